//! # Authentication Endpoints
//!
//! Login, registration, logout and current-user resolution. A successful
//! login or registration, live or demo, persists the issued token.

use shared::{AuthResponse, LoginRequest, RegisterRequest, User, UserEnvelope};

use super::client::{ApiClient, Served};
use crate::core::error::ClientError;
use crate::utils::validation::{validate_login, validate_registration};

impl ApiClient {
    /// `POST /auth/login`
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Served<AuthResponse> {
        if let Err(err) = validate_login(request).into_result() {
            return Served::Failed(err);
        }

        tracing::info!("Attempting login");
        let start = std::time::Instant::now();

        let live = self
            .fetch::<AuthResponse>(self.client.post(self.url("/auth/login")).json(request))
            .await;
        let served = self
            .serve("login", live, || self.mock.login(request))
            .await;

        let served = self.remember_token(served);
        if served.value().is_some() {
            tracing::info!(
                duration_ms = start.elapsed().as_millis(),
                demo = served.is_mocked(),
                "Login successful"
            );
        }
        served
    }

    /// `POST /auth/register`
    #[tracing::instrument(skip(self, request), fields(email = %request.email, username = %request.username))]
    pub async fn register(&self, request: &RegisterRequest) -> Served<AuthResponse> {
        if let Err(err) = validate_registration(request).into_result() {
            return Served::Failed(err);
        }

        let live = self
            .fetch::<AuthResponse>(self.client.post(self.url("/auth/register")).json(request))
            .await;
        let served = self
            .serve("register", live, || self.mock.register(request))
            .await;

        let served = self.remember_token(served);
        if let Some(auth) = served.value() {
            tracing::info!(user_id = %auth.user.id, "Registration successful");
        }
        served
    }

    /// `POST /auth/logout`. The local token is cleared whatever the backend says.
    #[tracing::instrument(skip(self))]
    pub async fn logout(&self) -> Served<()> {
        let live = self
            .fetch_unit(self.authorized(self.client.post(self.url("/auth/logout"))))
            .await;
        if let Err(err) = &live {
            tracing::warn!(error = %err, "Logout request failed, clearing session anyway");
        }

        self.mock.logout().await;
        if let Err(err) = self.tokens.clear() {
            return Served::Failed(err);
        }

        match live {
            Err(err) if err.is_network() => Served::Mocked(()),
            _ => Served::Live(()),
        }
    }

    /// `GET /auth/me`
    #[tracing::instrument(skip(self))]
    pub async fn current_user(&self) -> Served<User> {
        if self.token().is_none() {
            return Served::Failed(ClientError::Authentication(
                "Not authenticated".to_string(),
            ));
        }

        let live = self
            .fetch::<UserEnvelope>(self.authorized(self.client.get(self.url("/auth/me"))))
            .await
            .map(UserEnvelope::into_user);
        self.serve("current_user", live, || self.mock.current_user())
            .await
    }

    fn remember_token(&self, served: Served<AuthResponse>) -> Served<AuthResponse> {
        let Some(auth) = served.value() else {
            return served;
        };
        match self.tokens.save(&auth.token) {
            Ok(()) => served,
            Err(err) => {
                tracing::error!(error = %err, "Failed to persist session token");
                Served::Failed(err)
            }
        }
    }
}
