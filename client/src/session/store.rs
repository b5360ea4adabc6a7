//! # Session Store
//!
//! Holds the signed-in user for the lifetime of an [`crate::app::AppContext`].
//!
//! Each operation clears the previous error, calls the API, and either
//! replaces the current user or records the failure message for display.
//! A failed operation never changes the current user.

use std::sync::Arc;

use parking_lot::RwLock;
use shared::{LoginRequest, ProfileUpdate, RegisterRequest, User};

use super::token::TokenStore;
use crate::core::error::{ClientError, Result};
use crate::core::service::SkillSwapApi;

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
}

pub struct SessionStore {
    api: Arc<dyn SkillSwapApi>,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// A new store starts loading until [`initialize`](Self::initialize) runs.
    pub fn new(api: Arc<dyn SkillSwapApi>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            tokens,
            state: RwLock::new(SessionState {
                loading: true,
                ..SessionState::default()
            }),
        }
    }

    /// Resolve the user behind a persisted token, if there is one.
    ///
    /// A token that no longer resolves is discarded and the session starts
    /// signed out.
    pub async fn initialize(&self) {
        if self.tokens.load().is_some() {
            match self.api.current_user().await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "Restored session");
                    self.state.write().user = Some(user);
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Stored session token rejected, signing out");
                    if let Err(err) = self.tokens.clear() {
                        tracing::error!(error = %err, "Failed to clear session token");
                    }
                }
            }
        }
        self.state.write().loading = false;
    }

    pub async fn login(&self, request: LoginRequest) -> Result<User> {
        self.begin();
        let outcome = self.api.login(request).await.map(|auth| auth.user);
        self.finish(outcome)
    }

    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        self.begin();
        let outcome = self.api.register(request).await.map(|auth| auth.user);
        self.finish(outcome)
    }

    /// Sign out. The session is cleared even if the backend call fails.
    pub async fn logout(&self) {
        self.begin();
        if let Err(err) = self.api.logout().await {
            tracing::warn!(error = %err, "Logout did not complete cleanly");
        }
        let mut state = self.state.write();
        state.user = None;
        state.loading = false;
    }

    pub async fn update_profile(&self, update: ProfileUpdate) -> Result<User> {
        self.begin();
        if self.current_user().is_none() {
            return self.finish(Err(ClientError::Authentication(
                "Not authenticated".to_string(),
            )));
        }
        let outcome = self.api.update_profile(update).await;
        self.finish(outcome)
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.read().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().user.as_ref().is_some_and(User::is_admin)
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.read().error.clone()
    }

    /// The signed-in user, or an `Authentication` error.
    pub fn require_user(&self) -> Result<User> {
        self.current_user()
            .ok_or_else(|| ClientError::Authentication("Please log in first".to_string()))
    }

    fn begin(&self) {
        let mut state = self.state.write();
        state.error = None;
        state.loading = true;
    }

    fn finish(&self, outcome: Result<User>) -> Result<User> {
        let mut state = self.state.write();
        state.loading = false;
        match &outcome {
            Ok(user) => state.user = Some(user.clone()),
            Err(err) => state.error = Some(err.to_string()),
        }
        outcome
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}
