//! # Backend API Client Module
//!
//! HTTP client for the skill swap REST backend, with a demo-data fallback
//! when the backend cannot be reached.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs      - Module exports and SkillSwapApi implementation
//! ├── client.rs   - ApiClient, Served<T> and the shared request path
//! ├── auth.rs     - /auth/* (login, register, logout, me)
//! ├── users.rs    - /users/* (profile, search)
//! ├── skills.rs   - /skills/* (available, popular, categories)
//! ├── swaps.rs    - /swaps/* (create, list, update, delete, rate)
//! └── health.rs   - /health
//! ```
//!
//! Each endpoint returns [`Served<T>`]; the [`SkillSwapApi`] implementation
//! below collapses that into a plain `Result` for callers that do not care
//! where the answer came from.

pub mod auth;
pub mod client;
pub mod health;
pub mod skills;
pub mod swaps;
pub mod users;

pub use client::{ApiClient, Served, FALLBACK_ERROR};

use async_trait::async_trait;
use shared::{
    AuthResponse, CreateSwapRequest, HealthResponse, LoginRequest, PopularSkill, ProfileUpdate,
    RegisterRequest, SkillCategory, SwapRating, SwapRequest, SwapStatus, User, UserRef,
    UserSearchParams,
};

use crate::core::error::Result;
use crate::core::service::SkillSwapApi;

#[async_trait]
impl SkillSwapApi for ApiClient {
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        ApiClient::login(self, &request).await.into_result()
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        ApiClient::register(self, &request).await.into_result()
    }

    async fn logout(&self) -> Result<()> {
        ApiClient::logout(self).await.into_result()
    }

    async fn current_user(&self) -> Result<User> {
        ApiClient::current_user(self).await.into_result()
    }

    async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        ApiClient::update_profile(self, &update).await.into_result()
    }

    async fn search_users(&self, params: UserSearchParams) -> Result<Vec<User>> {
        ApiClient::search_users(self, &params).await.into_result()
    }

    async fn available_skills(&self, params: UserSearchParams) -> Result<Vec<User>> {
        ApiClient::available_skills(self, &params).await.into_result()
    }

    async fn popular_skills(&self) -> Result<Vec<PopularSkill>> {
        ApiClient::popular_skills(self).await.into_result()
    }

    async fn skill_categories(&self) -> Result<Vec<SkillCategory>> {
        ApiClient::skill_categories(self).await.into_result()
    }

    async fn create_swap(
        &self,
        requester: &UserRef,
        request: CreateSwapRequest,
    ) -> Result<SwapRequest> {
        ApiClient::create_swap(self, requester, &request)
            .await
            .into_result()
    }

    async fn list_swaps(&self, actor_id: &str) -> Result<Vec<SwapRequest>> {
        ApiClient::list_swaps(self, actor_id).await.into_result()
    }

    async fn update_swap_status(
        &self,
        swap: &SwapRequest,
        actor_id: &str,
        status: SwapStatus,
    ) -> Result<SwapRequest> {
        ApiClient::update_swap_status(self, swap, actor_id, status)
            .await
            .into_result()
    }

    async fn delete_swap(&self, swap: &SwapRequest, actor_id: &str) -> Result<()> {
        ApiClient::delete_swap(self, swap, actor_id).await.into_result()
    }

    async fn rate_swap(
        &self,
        swap: &SwapRequest,
        actor_id: &str,
        stars: u8,
        comment: &str,
    ) -> Result<SwapRating> {
        ApiClient::rate_swap(self, swap, actor_id, stars, comment)
            .await
            .into_result()
    }

    async fn health(&self) -> HealthResponse {
        match ApiClient::health(self).await {
            Served::Live(health) | Served::Mocked(health) => health,
            Served::Failed(err) => HealthResponse {
                status: "ERROR".to_string(),
                message: err.to_string(),
            },
        }
    }
}
