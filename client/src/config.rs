//! # Client Configuration
//!
//! This module manages client configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! | Variable                         | Default                      |
//! |----------------------------------|------------------------------|
//! | `SKILLSWAP_API_URL`              | `http://localhost:5000/api`  |
//! | `SKILLSWAP_TIMEOUT_SECS`         | `10`                         |
//! | `SKILLSWAP_MOCK_LATENCY_MS`      | `300`                        |
//! | `SKILLSWAP_HEALTH_INTERVAL_SECS` | `30`                         |
//! | `SKILLSWAP_TOKEN_FILE`           | `.skillswap/token`           |
//!
//! The configuration is handed to [`crate::app::AppContext::start`]; there is
//! no global instance.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TOKEN_FILE: &str = ".skillswap/token";

/// Client configuration.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash, e.g. `http://localhost:5000/api`.
    pub api_base_url: String,

    /// Per-request timeout. A timeout counts as the backend being unreachable.
    pub request_timeout: Duration,

    /// Artificial delay applied to every response served from demo data.
    pub mock_latency: Duration,

    /// Period of the background health probe driving the demo-mode banner.
    pub health_interval: Duration,

    /// Where the bearer token is persisted between runs.
    pub token_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            mock_latency: Duration::from_millis(300),
            health_interval: Duration::from_secs(30),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let api_base_url = env::var("SKILLSWAP_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let request_timeout =
            env_parse::<u64>("SKILLSWAP_TIMEOUT_SECS")?.map_or(defaults.request_timeout, Duration::from_secs);

        let mock_latency =
            env_parse::<u64>("SKILLSWAP_MOCK_LATENCY_MS")?.map_or(defaults.mock_latency, Duration::from_millis);

        let health_interval = env_parse::<u64>("SKILLSWAP_HEALTH_INTERVAL_SECS")?
            .map_or(defaults.health_interval, Duration::from_secs);

        let token_file = env::var("SKILLSWAP_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_file);

        Ok(Self {
            api_base_url,
            request_timeout,
            mock_latency,
            health_interval,
            token_file,
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(format!(
                "SKILLSWAP_API_URL must start with http:// or https://, got {}",
                self.api_base_url
            ));
        }

        let timeout = self.request_timeout.as_secs();
        if !(1..=120).contains(&timeout) {
            return Err("SKILLSWAP_TIMEOUT_SECS must be between 1 and 120".to_string());
        }

        if self.mock_latency > Duration::from_secs(5) {
            return Err("SKILLSWAP_MOCK_LATENCY_MS must be at most 5000".to_string());
        }

        if self.health_interval.is_zero() {
            return Err("SKILLSWAP_HEALTH_INTERVAL_SECS must be at least 1".to_string());
        }

        Ok(())
    }

    /// Load and validate in one step.
    pub fn load() -> Result<Self, String> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }
}

fn env_parse<T>(name: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("{} must be a valid number: {}", name, e)),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ClientConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = ClientConfig {
            api_base_url: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_timeout_and_interval() {
        let config = ClientConfig {
            request_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = ClientConfig {
            health_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_excessive_mock_latency() {
        let config = ClientConfig {
            mock_latency: Duration::from_secs(6),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
