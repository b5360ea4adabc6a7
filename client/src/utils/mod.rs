//! # Utility Functions
//!
//! Shared utility functions used across the client.
//!
//! ## Modules
//!
//! - **[`validation`]**: Input checks for sign-up, login and ratings
//!
//! ## Related Modules
//!
//! - [`shared::utils`]: Cross-crate serde helpers (string-or-integer ids)
//! - [`crate::core`]: Core abstractions and error types

pub mod validation;
