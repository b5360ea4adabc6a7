//! # Common Error Types
//!
//! Consolidated error handling for the skill swap client.
//!
//! This module provides a centralized error type [`ClientError`] that covers
//! every failure an operation can resolve to.
//!
//! ## Error Categories
//!
//! - **Validation**: bad input caught before any network call
//! - **Authentication**: 401-class responses (bad credentials, expired token)
//! - **Authorization**: role or ownership violations, from the backend or
//!   from the local swap lifecycle rules
//! - **NotFound**: 404-class responses and unknown ids in the demo dataset
//! - **InvalidTransition**: a swap status change the lifecycle forbids
//! - **NetworkUnavailable**: connectivity failures; consumed by the API client,
//!   which substitutes demo data, and never shown to the user
//! - **Backend**: any other non-2xx response, message passed through verbatim
//! - **Decode**: a 2xx body that does not match the expected schema
//! - **State**: local state problems (token file unreadable, etc.)
//!
//! ## Usage Pattern
//!
//! ```rust
//! use skillswap::core::error::ClientError;
//!
//! fn validate_stars(stars: u8) -> Result<u8, ClientError> {
//!     if !(1..=5).contains(&stars) {
//!         return Err(ClientError::Validation("Rating must be between 1 and 5".to_string()));
//!     }
//!     Ok(stars)
//! }
//! ```

use shared::SwapStatus;
use thiserror::Error;

/// Client-wide error type.
///
/// `Display` yields the message meant for the user; the session store
/// records exactly that string as its last error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Client-detected bad input (password mismatch, too-short password, ...).
    #[error("{0}")]
    Validation(String),

    /// 401-class failure.
    #[error("{0}")]
    Authentication(String),

    /// Actor is not allowed to perform the action.
    ///
    /// # Example
    ///
    /// ```rust
    /// use skillswap::core::error::ClientError;
    ///
    /// let err = ClientError::Authorization("Only the recipient can accept a request".to_string());
    /// assert_eq!(err.to_string(), "Only the recipient can accept a request");
    /// ```
    #[error("{0}")]
    Authorization(String),

    #[error("{0}")]
    NotFound(String),

    /// The swap lifecycle does not allow `from -> to`.
    #[error("Cannot change a {from} request to {to}")]
    InvalidTransition { from: SwapStatus, to: SwapStatus },

    /// Connectivity-class failure. Triggers the demo-data fallback.
    #[error("Backend not available: {0}")]
    NetworkUnavailable(String),

    /// Any other non-2xx response. `message` is the backend's text.
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Unexpected response from server: {0}")]
    Decode(String),

    #[error("State error: {0}")]
    State(String),
}

impl ClientError {
    /// True for failures that should be answered with demo data.
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::NetworkUnavailable(_))
    }

    /// Map an HTTP status and backend message to the matching variant.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 => ClientError::Authentication(message),
            403 => ClientError::Authorization(message),
            404 => ClientError::NotFound(message),
            _ => ClientError::Backend { status, message },
        }
    }
}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            ClientError::NetworkUnavailable(err.to_string())
        } else if err.is_decode() || err.is_body() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::from_status(status.as_u16(), err.to_string())
        } else {
            ClientError::NetworkUnavailable(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::State(err.to_string())
    }
}
