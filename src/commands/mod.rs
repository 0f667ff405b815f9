mod config_cmd;
mod prefs;
mod recipes;
mod status;

pub use config_cmd::ConfigCommand;
pub use prefs::PrefsCommand;
pub use recipes::RecipesCommand;
pub use status::StatusCommand;

use clap::ValueEnum;
use std::time::Duration;

/// Upper bound for the connectivity probe, independent of the request timeout
pub(crate) const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tastybites::config::DEFAULT_REQUEST_TIMEOUT_SECS;

    #[test]
    fn test_probe_timeout_is_shorter_than_request_timeout() {
        assert!(PROBE_TIMEOUT < Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    }
}
