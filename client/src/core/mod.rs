//! # Core Module
//!
//! Cross-cutting types shared by every other module:
//!
//! - [`error`]: the [`ClientError`](error::ClientError) taxonomy and `Result` alias
//! - [`service`]: the [`SkillSwapApi`](service::SkillSwapApi) trait the session
//!   store and the shell program against

pub mod error;
pub mod service;

pub use error::{ClientError, Result};
pub use service::SkillSwapApi;
