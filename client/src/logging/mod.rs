//! # Logging
//!
//! Structured logging via `tracing`, configured from the environment.
//!
//! | Variable                  | Effect                                         |
//! |---------------------------|------------------------------------------------|
//! | `RUST_LOG`                | Filter directives (default `skillswap=info,warn`) |
//! | `SKILLSWAP_LOG_DIR`       | Also write a daily-rotated `skillswap.log` here |
//! | `SKILLSWAP_LOG_FILE_ONLY` | `1` silences stderr when a log dir is set      |

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
