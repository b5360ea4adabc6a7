//! # Swap Request Lifecycle
//!
//! The state machine every swap request follows, and an in-memory ledger
//! that applies it.
//!
//! - **[`rules`]**: the allowed-transition table and per-party permissions
//! - **[`ledger`]**: [`SwapLedger`], a store of requests and ratings that
//!   refuses any mutation the rules forbid
//!
//! The same rules run in two places: the API client checks them against its
//! copy of a request before contacting the backend, and the demo backend's
//! ledger enforces them when no backend is reachable.

pub mod ledger;
pub mod rules;

pub use ledger::{NewSwap, SwapLedger};
pub use rules::{available_actions, check_delete, check_rating, check_transition, Party};
