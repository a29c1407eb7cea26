use crate::cache::DEFAULT_CAPACITY;
use crate::service::DEFAULT_FETCH_TIMEOUT;
use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("edu-image-service/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value = "8000")]
    pub port: u16,

    #[arg(long, env = "CACHE_CAPACITY", default_value_t = DEFAULT_CAPACITY)]
    pub cache_capacity: usize,

    #[arg(long, env = "FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub fetch_timeout_secs: u64,

    #[arg(long, env = "USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Requests allowed per client IP within one window; 0 disables limiting.
    /// When enabled, /fetch_image answers 429 instead of 200 once the burst is spent.
    #[arg(long, env = "RATE_LIMIT_REQUESTS", default_value = "0")]
    pub rate_limit_requests: u32,

    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value = "1")]
    pub rate_limit_window_secs: u64,

    /// Used when RUST_LOG is not set.
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self::parse())
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_service_contract() {
        let config = Config::try_parse_from(["edu-image-service"]).unwrap();
        assert_eq!(config.cache_capacity, 20);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.rate_limit_requests, 0);
        assert!(config.user_agent.starts_with("edu-image-service/"));
    }

    #[test]
    fn flags_override_defaults() {
        let config = Config::try_parse_from([
            "edu-image-service",
            "--host",
            "127.0.0.1",
            "--port",
            "9100",
            "--fetch-timeout-secs",
            "3",
        ])
        .unwrap();
        let addr: SocketAddr = "127.0.0.1:9100".parse().unwrap();
        assert_eq!(config.socket_addr().unwrap(), addr);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn bad_host_is_an_error() {
        let args = ["edu-image-service", "--host", "not a host"];
        let config = Config::try_parse_from(args).unwrap();
        assert!(config.socket_addr().is_err());
    }
}
