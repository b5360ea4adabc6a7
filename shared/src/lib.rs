//! # Skill Swap Shared Data Transfer Objects
//!
//! This library defines the contract between the skill swap client and the
//! REST backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login, registration, error bodies
//!   - **[`dto::user`]**: Users, profile updates, search filters
//!   - **[`dto::swap`]**: Swap requests and ratings
//!   - **[`dto::skills`]**: Skills directory and health probe
//! - **[`utils`]**: Serde helpers for loosely encoded identifiers
//!
//! ## Wire Format
//!
//! The canonical encoding is snake_case with string identifiers. Older
//! clients used camelCase names and `_id`; both are accepted when
//! deserializing so records parse the same no matter which backend
//! revision produced them.
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::swap::{SwapRequest, SwapStatus};
//!
//! let json = r#"{
//!     "id": 1,
//!     "requester": {"id": 1, "name": "Alex"},
//!     "recipient": {"id": 2, "name": "Bella"},
//!     "requested_skill": "Python",
//!     "offered_skill": "JavaScript",
//!     "status": "pending",
//!     "created_at": "2024-05-01T12:00:00Z"
//! }"#;
//! let swap: SwapRequest = serde_json::from_str(json).unwrap();
//! assert_eq!(swap.status, SwapStatus::Pending);
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
