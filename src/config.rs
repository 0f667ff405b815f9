use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://api.spoonacular.com";
pub const DEFAULT_RECIPES_NUMBER: u32 = 50;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Base URL of the recipe API
    pub base_url: ConfigValue<String>,
    /// Key sent as the `apiKey` query parameter
    pub api_key: ConfigValue<String>,
    /// Path to the SQLite recipe cache
    pub database_path: ConfigValue<PathBuf>,
    /// Directory holding the preferences file
    pub data_dir: ConfigValue<PathBuf>,
    /// Number of recipes requested per search
    pub recipes_number: ConfigValue<u32>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: ConfigValue<u64>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    base_url: Option<String>,
    api_key: Option<String>,
    database_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    recipes_number: Option<u32>,
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let default_data_dir = Self::default_data_dir();

        // Start with defaults
        let mut base_url = ConfigValue::new(DEFAULT_BASE_URL.to_string(), ConfigSource::Default);
        let mut api_key = ConfigValue::new(String::new(), ConfigSource::Default);
        let mut database_path = ConfigValue::new(
            default_data_dir.join(crate::db::DATABASE_NAME),
            ConfigSource::Default,
        );
        let mut data_dir = ConfigValue::new(default_data_dir, ConfigSource::Default);
        let mut recipes_number = ConfigValue::new(DEFAULT_RECIPES_NUMBER, ConfigSource::Default);
        let mut request_timeout_secs =
            ConfigValue::new(DEFAULT_REQUEST_TIMEOUT_SECS, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            if let Some(url) = file_config.base_url {
                base_url = ConfigValue::new(url, ConfigSource::File);
            }
            if let Some(key) = file_config.api_key {
                api_key = ConfigValue::new(key, ConfigSource::File);
            }
            if let Some(db_path) = file_config.database_path {
                database_path =
                    ConfigValue::new(resolve_relative(&path, db_path), ConfigSource::File);
            }
            if let Some(dir) = file_config.data_dir {
                data_dir = ConfigValue::new(resolve_relative(&path, dir), ConfigSource::File);
            }
            if let Some(number) = file_config.recipes_number {
                recipes_number = ConfigValue::new(number, ConfigSource::File);
            }
            if let Some(secs) = file_config.request_timeout_secs {
                request_timeout_secs = ConfigValue::new(secs, ConfigSource::File);
            }

            config_file = Some(path);
        }

        // Apply environment variable overrides
        if let Ok(url) = std::env::var("TASTYBITES_BASE_URL") {
            base_url = ConfigValue::new(url, ConfigSource::Environment);
        }
        if let Ok(key) = std::env::var("TASTYBITES_API_KEY") {
            api_key = ConfigValue::new(key, ConfigSource::Environment);
        }
        if let Ok(db_path) = std::env::var("TASTYBITES_DATABASE_PATH") {
            database_path = ConfigValue::new(PathBuf::from(db_path), ConfigSource::Environment);
        }
        if let Ok(dir) = std::env::var("TASTYBITES_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Some(number) = env_parse("TASTYBITES_RECIPES_NUMBER")? {
            recipes_number = ConfigValue::new(number, ConfigSource::Environment);
        }
        if let Some(secs) = env_parse("TASTYBITES_REQUEST_TIMEOUT_SECS")? {
            request_timeout_secs = ConfigValue::new(secs, ConfigSource::Environment);
        }

        Ok(Self {
            base_url,
            api_key,
            database_path,
            data_dir,
            recipes_number,
            request_timeout_secs,
            config_file,
        })
    }

    /// Copy safe to print: the API key is reduced to its first few characters.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.api_key.value = mask_key(&self.api_key.value);
        config
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/tastybites/
    /// - macOS: ~/Library/Application Support/tastybites/
    /// - Windows: %APPDATA%/tastybites/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tastybites")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/tastybites/
    /// - macOS: ~/Library/Application Support/tastybites/
    /// - Windows: %APPDATA%/tastybites/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tastybites")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }
}

// Relative paths in the config file are relative to the file itself
fn resolve_relative(config_path: &std::path::Path, value: PathBuf) -> PathBuf {
    if value.is_relative() {
        config_path
            .parent()
            .map(|p| p.join(&value))
            .unwrap_or(value)
    } else {
        value
    }
}

fn env_parse<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv(name, raw)),
        Err(_) => Ok(None),
    }
}

fn mask_key(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    let visible: String = key.chars().take(4).collect();
    format!("{}...", visible)
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidEnv(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidEnv(name, value) => {
                write!(f, "Invalid value '{}' for environment variable {}", value, name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.base_url.value, DEFAULT_BASE_URL);
        assert_eq!(config.base_url.source, ConfigSource::Default);
        assert!(config
            .database_path
            .value
            .to_string_lossy()
            .contains("recipes_database.db"));
        assert_eq!(config.recipes_number.value, 50);
        assert_eq!(config.request_timeout_secs.value, 15);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "base_url: http://localhost:9000").unwrap();
        writeln!(file, "api_key: secret-key").unwrap();
        writeln!(file, "database_path: /custom/path/cache.db").unwrap();
        writeln!(file, "recipes_number: 10").unwrap();

        let config = Config::load(Some(config_path.clone())).unwrap();
        assert_eq!(config.base_url.value, "http://localhost:9000");
        assert_eq!(config.base_url.source, ConfigSource::File);
        assert_eq!(config.api_key.value, "secret-key");
        assert_eq!(
            config.database_path.value,
            PathBuf::from("/custom/path/cache.db")
        );
        assert_eq!(config.recipes_number.value, 10);
        assert_eq!(config.recipes_number.source, ConfigSource::File);
        assert_eq!(config.request_timeout_secs.source, ConfigSource::Default);
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "data_dir: data").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.data_dir.value, temp_dir.path().join("data"));
    }

    #[test]
    #[ignore] // Run with --ignored; env vars can pollute parallel tests
    fn test_env_var_overrides_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_key: fromfile").unwrap();

        std::env::set_var("TASTYBITES_API_KEY", "fromenv");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.api_key.value, "fromenv");
        assert_eq!(config.api_key.source, ConfigSource::Environment);

        std::env::remove_var("TASTYBITES_API_KEY");
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_redacted_masks_api_key() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "api_key: abcdef123456").unwrap();

        let config = Config::load(Some(config_path)).unwrap().redacted();
        assert_eq!(config.api_key.value, "abcd...");
    }
}
