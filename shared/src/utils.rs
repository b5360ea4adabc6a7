//! # Shared Serde Helpers
//!
//! Deserialisation helpers for the places where backends disagree about
//! how a value is encoded on the wire.
//!
//! - [`string_or_int`] - identifiers sent either as `"42"` or `42`
//! - [`opt_string_or_int`] - same, for optional identifiers
//!
//! ## Usage
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Row {
//!     #[serde(deserialize_with = "shared::utils::string_or_int")]
//!     id: String,
//! }
//!
//! let a: Row = serde_json::from_str(r#"{"id": 7}"#).unwrap();
//! let b: Row = serde_json::from_str(r#"{"id": "7"}"#).unwrap();
//! assert_eq!(a.id, b.id);
//! ```

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Int(i64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => s,
            RawId::Int(n) => n.to_string(),
        }
    }
}

/// Accept an identifier encoded as a JSON string or integer.
pub fn string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer).map(String::from)
}

/// Optional variant of [`string_or_int`]; `null` and a missing field both map to `None`.
pub fn opt_string_or_int<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawId>::deserialize(deserializer).map(|raw| raw.map(String::from))
}
