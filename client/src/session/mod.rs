//! # Session Module
//!
//! - [`token`]: where the bearer token is persisted
//! - [`store`]: the [`SessionStore`] holding the signed-in user

pub mod store;
pub mod token;

pub use store::{SessionState, SessionStore};
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};
