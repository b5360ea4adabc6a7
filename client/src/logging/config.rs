//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_LOG_LEVEL: &str = "skillswap=info,warn";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
    /// Directory for the daily-rotated log file; `None` disables the file layer
    pub log_dir: Option<PathBuf>,
    /// Suppress stderr output (only meaningful with `log_dir`)
    pub file_only: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: None,
            file_only: false,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let log_dir = std::env::var("SKILLSWAP_LOG_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Self {
            log_level: std::env::var("RUST_LOG")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
            file_only: log_dir.is_some()
                && std::env::var("SKILLSWAP_LOG_FILE_ONLY")
                    .map(|v| v == "1")
                    .unwrap_or(false),
            log_dir,
        }
    }

    pub fn log_file_name() -> &'static str {
        "skillswap.log"
    }

    pub fn writes_stderr(&self) -> bool {
        !(self.file_only && self.log_dir.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_writes_stderr_only() {
        let config = LogConfig::default();
        assert!(config.log_dir.is_none());
        assert!(config.writes_stderr());
    }

    #[test]
    fn test_file_only_needs_a_directory() {
        let config = LogConfig {
            file_only: true,
            ..Default::default()
        };
        assert!(config.writes_stderr());

        let config = LogConfig {
            file_only: true,
            log_dir: Some(PathBuf::from("logs")),
            ..Default::default()
        };
        assert!(!config.writes_stderr());
    }
}
