//! # Data Transfer Objects (DTOs)
//!
//! This module contains all data structures exchanged with the skill swap
//! REST backend.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, registration and error bodies
//! - [`user`] - Users, profile updates, search filters
//! - [`swap`] - Swap requests, status updates and ratings
//! - [`skills`] - Popular skills, categories and health probe
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case on output. Legacy camelCase spellings and
//!   `_id` are accepted on input via `#[serde(alias = ...)]`.
//! - **Identifiers**: held as `String`; accepted as JSON strings or integers.
//! - **Enums**: lowercase strings (`"pending"`, `"admin"`).
//! - **Envelopes**: endpoints that answer in more than one shape are
//!   modelled as untagged enums (`UserEnvelope`, `SwapListEnvelope`, ...)
//!   and unwrapped with an `into_*` method.
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/auth/login
//! Content-Type: application/json
//!
//! { "email": "demo@example.com", "password": "password123" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "user": { "id": 1, "email": "demo@example.com", "skills_offered": [], ... },
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "refresh": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..."
//! }
//! ```

pub mod auth;
pub mod skills;
pub mod swap;
pub mod user;

pub use auth::*;
pub use skills::*;
pub use swap::*;
pub use user::*;
