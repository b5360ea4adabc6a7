//! # Skill Swap Client - Library Root
//!
//! Typed client for a skill swap marketplace: users advertise the skills
//! they offer and want, browse each other, and trade skills through swap
//! requests. This library crate contains every module used by the
//! `skillswap` binary (`main.rs`).
//!
//! ## Features
//!
//! - **Sessions**: login, registration, logout and profile updates, with the
//!   bearer token persisted between runs
//! - **Marketplace**: user search, available skills, popular skills and
//!   skill categories
//! - **Swap Requests**: create, accept, reject, complete, cancel and rate,
//!   with the request lifecycle enforced locally before anything is sent
//! - **Demo Mode**: when the backend is unreachable every call is answered
//!   from a canned dataset with the same shapes as live responses
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              skillswap (this crate)                    │
//! ├────────────────────────────────────────────────────────┤
//! │  app        - AppContext: startup, shutdown, probe     │
//! │  session    - SessionStore + persisted token           │
//! │  services   - ApiClient (reqwest) + MockBackend        │
//! │  lifecycle  - swap request state machine + ledger      │
//! │  core       - ClientError, SkillSwapApi trait          │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP/JSON
//!          ▼
//! ┌─────────────────────────┐
//! │  Skill swap REST API    │
//! │  (/auth, /users,        │
//! │   /skills, /swaps)      │
//! └─────────────────────────┘
//! ```
//!
//! ## Module Dependency Graph
//!
//! ```text
//! main.rs
//!   └── app::AppContext
//!         ├── session::SessionStore ──► core::service::SkillSwapApi
//!         └── services::api::ApiClient (implements SkillSwapApi)
//!               ├── lifecycle (pre-checks)
//!               └── services::mock::MockBackend
//!                     └── lifecycle::SwapLedger
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use skillswap::app::AppContext;
//! use skillswap::config::ClientConfig;
//! use shared::LoginRequest;
//!
//! # async fn run() -> skillswap::core::Result<()> {
//! let ctx = AppContext::start(ClientConfig::default()).await?;
//! let user = ctx
//!     .session()
//!     .login(LoginRequest {
//!         email: "demo@example.com".to_string(),
//!         password: "password123".to_string(),
//!     })
//!     .await?;
//! println!("Signed in as {}", user.display_name());
//! ctx.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod lifecycle;
pub mod logging;
pub mod services;
pub mod session;
pub mod utils;

pub use app::AppContext;
pub use config::ClientConfig;
pub use core::{ClientError, Result, SkillSwapApi};
pub use services::{ApiClient, Served};
pub use session::SessionStore;
