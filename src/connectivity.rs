//! Internet connectivity checks.

use std::future::Future;
use std::time::Duration;

use tokio::net::TcpStream;

/// Answers "is the internet reachable right now?".
pub trait ConnectivityProbe: Send + Sync + 'static {
    fn is_internet_connected(&self) -> impl Future<Output = bool> + Send;
}

/// Probes connectivity by opening a TCP connection to the API host.
#[derive(Debug, Clone)]
pub struct TcpProbe {
    /// `host:port` to connect to; `None` when the base URL has no usable host
    addr: Option<String>,
    timeout: Duration,
}

impl TcpProbe {
    pub fn new(addr: impl Into<String>, timeout: Duration) -> Self {
        Self {
            addr: Some(addr.into()),
            timeout,
        }
    }

    /// Derives the probe address from an `http(s)://host[:port]` base URL.
    pub fn for_base_url(base_url: &str, timeout: Duration) -> Self {
        let addr = reqwest::Url::parse(base_url).ok().and_then(|url| {
            let host = url.host_str()?.to_string();
            let port = url.port_or_known_default()?;
            Some(format!("{}:{}", host, port))
        });
        if addr.is_none() {
            tracing::warn!(base_url, "Cannot derive a host to probe from base URL");
        }
        Self { addr, timeout }
    }

    pub fn addr(&self) -> Option<&str> {
        self.addr.as_deref()
    }
}

impl ConnectivityProbe for TcpProbe {
    async fn is_internet_connected(&self) -> bool {
        let Some(addr) = &self.addr else {
            return false;
        };
        match tokio::time::timeout(self.timeout, TcpStream::connect(addr.as_str())).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                tracing::debug!(addr = %addr, error = %e, "Connectivity probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(addr = %addr, "Connectivity probe timed out");
                false
            }
        }
    }
}

/// Connectivity source chosen at startup.
#[derive(Debug, Clone)]
pub enum Connectivity {
    /// Probe the network on every check
    Probe(TcpProbe),
    /// Always report the given state (e.g. `--offline`)
    Fixed(bool),
}

impl ConnectivityProbe for Connectivity {
    async fn is_internet_connected(&self) -> bool {
        match self {
            Connectivity::Probe(probe) => probe.is_internet_connected().await,
            Connectivity::Fixed(connected) => *connected,
        }
    }
}
