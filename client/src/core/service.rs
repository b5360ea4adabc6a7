//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.

use async_trait::async_trait;
use shared::{
    AuthResponse, CreateSwapRequest, HealthResponse, LoginRequest, PopularSkill, ProfileUpdate,
    RegisterRequest, SkillCategory, SwapRating, SwapRequest, SwapStatus, User, UserRef,
    UserSearchParams,
};

use super::error::Result;

/// Every backend operation the session store and the shell rely on.
///
/// [`crate::services::api::ApiClient`] is the production implementation; it
/// resolves each call live or from demo data and only surfaces
/// user-facing failures. Tests substitute a stub.
#[async_trait]
pub trait SkillSwapApi: Send + Sync {
    /// Authenticate and persist the issued token.
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse>;

    /// Create an account and persist the issued token.
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse>;

    /// End the session. The persisted token is cleared even if the backend
    /// call fails.
    async fn logout(&self) -> Result<()>;

    /// Resolve the user behind the persisted token.
    async fn current_user(&self) -> Result<User>;

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User>;

    async fn search_users(&self, params: UserSearchParams) -> Result<Vec<User>>;

    async fn available_skills(&self, params: UserSearchParams) -> Result<Vec<User>>;

    async fn popular_skills(&self) -> Result<Vec<PopularSkill>>;

    async fn skill_categories(&self) -> Result<Vec<SkillCategory>>;

    /// Open a request from `requester`.
    async fn create_swap(&self, requester: &UserRef, request: CreateSwapRequest)
        -> Result<SwapRequest>;

    /// Requests `actor_id` sent or received.
    async fn list_swaps(&self, actor_id: &str) -> Result<Vec<SwapRequest>>;

    /// Move `swap` to `status` on behalf of `actor_id`.
    ///
    /// The lifecycle rules are checked against the caller's copy before
    /// anything is sent.
    async fn update_swap_status(
        &self,
        swap: &SwapRequest,
        actor_id: &str,
        status: SwapStatus,
    ) -> Result<SwapRequest>;

    /// Withdraw a pending request (requester only).
    async fn delete_swap(&self, swap: &SwapRequest, actor_id: &str) -> Result<()>;

    /// Rate the other participant of a completed swap.
    async fn rate_swap(
        &self,
        swap: &SwapRequest,
        actor_id: &str,
        stars: u8,
        comment: &str,
    ) -> Result<SwapRating>;

    /// Backend health. Never fails: an unreachable backend reports `DEMO`.
    async fn health(&self) -> HealthResponse;
}
