//! # Services Module
//!
//! Everything that answers a backend call.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │        SessionStore / skillswap shell        │
//! └──────────────────────┬───────────────────────┘
//!                        │ SkillSwapApi
//!                        ▼
//! ┌──────────────────────────────────────────────┐
//! │                 ApiClient                    │
//! │  live call ──ok──────────────► Served::Live  │
//! │      │                                       │
//! │      ├─ 4xx/5xx ─────────────► Served::Failed│
//! │      │                                       │
//! │      └─ unreachable ─► MockBackend           │
//! │                          └───► Served::Mocked│
//! └──────────────────────────────────────────────┘
//! ```
//!
//! - [`api`]: reqwest client, one module per backend resource
//! - [`mock`]: canned deterministic dataset served in demo mode

pub mod api;
pub mod mock;

pub use api::{ApiClient, Served};
pub use mock::MockBackend;
