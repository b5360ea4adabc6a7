//! # Application Context
//!
//! The one object a front-end creates at startup and drops at exit. It owns
//! the configuration, the API client, the session store and the background
//! health probe that drives the demo-mode banner.
//!
//! ```text
//! AppContext::start(config)
//!   ├─ FileTokenStore(config.token_file)
//!   ├─ ApiClient ────────────── Arc<dyn SkillSwapApi>
//!   ├─ SessionStore::initialize()   (restores a persisted session)
//!   └─ health probe every config.health_interval
//! AppContext::shutdown()
//!   └─ probe aborted
//! ```
//!
//! The probe only decides whether the banner shows. Every call still tries
//! the backend first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use shared::{SwapRequest, User};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::config::ClientConfig;
use crate::core::error::{ClientError, Result};
use crate::core::service::SkillSwapApi;
use crate::services::api::ApiClient;
use crate::session::{FileTokenStore, SessionStore, TokenStore};

pub struct AppContext {
    config: ClientConfig,
    api: Arc<ApiClient>,
    session: SessionStore,
    banner: Arc<AtomicBool>,
    probe: Mutex<Option<JoinHandle<()>>>,
}

impl AppContext {
    /// Start with the token persisted at `config.token_file`.
    pub async fn start(config: ClientConfig) -> Result<Self> {
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.token_file.clone()));
        Self::start_with_tokens(config, tokens).await
    }

    /// Start with a caller-supplied token store.
    pub async fn start_with_tokens(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ClientError::State(format!("Invalid configuration: {}", e)))?;

        let api = Arc::new(ApiClient::new(&config, tokens.clone()));
        let session = SessionStore::new(api.clone(), tokens);
        session.initialize().await;

        let banner = Arc::new(AtomicBool::new(false));
        let probe = spawn_health_probe(api.clone(), banner.clone(), config.health_interval);

        tracing::info!(
            api_base_url = %config.api_base_url,
            authenticated = session.is_authenticated(),
            "Application context started"
        );

        Ok(Self {
            config,
            api,
            session,
            banner,
            probe: Mutex::new(Some(probe)),
        })
    }

    /// Stop background work. Safe to call more than once.
    pub fn shutdown(&self) {
        if let Some(probe) = self.probe.lock().take() {
            probe.abort();
            tracing::debug!("Health probe stopped");
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Whether the demo-mode banner should be shown: the last probe saw
    /// no backend, or the last call was served from demo data.
    pub fn demo_banner_visible(&self) -> bool {
        self.banner.load(Ordering::Relaxed) || self.api.is_demo_mode()
    }

    /// The signed-in user, or an `Authentication` error.
    pub fn current_user(&self) -> Result<User> {
        self.session.require_user()
    }

    /// Look a request up among those the signed-in user sent or received.
    pub async fn find_swap(&self, id: &str) -> Result<SwapRequest> {
        let me = self.current_user()?;
        SkillSwapApi::list_swaps(&*self.api, &me.id)
            .await?
            .into_iter()
            .find(|swap| swap.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Swap request {} not found", id)))
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("config", &self.config)
            .field("api", &self.api)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn spawn_health_probe(api: Arc<ApiClient>, banner: Arc<AtomicBool>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            let health = SkillSwapApi::health(&*api).await;
            let demo = health.is_demo();
            if banner.swap(demo, Ordering::Relaxed) != demo {
                tracing::info!(status = %health.status, message = %health.message, "Backend health changed");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;

    fn offline_config() -> ClientConfig {
        ClientConfig {
            api_base_url: "http://127.0.0.1:1/api".to_string(),
            mock_latency: Duration::ZERO,
            health_interval: Duration::from_millis(20),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_probe_raises_banner_when_backend_unreachable() {
        let ctx = AppContext::start_with_tokens(offline_config(), Arc::new(MemoryTokenStore::new()))
            .await
            .unwrap();

        for _ in 0..100 {
            if ctx.banner.load(Ordering::Relaxed) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(ctx.demo_banner_visible());
        ctx.shutdown();
        ctx.shutdown();
    }

    #[tokio::test]
    async fn test_start_restores_session_offline() {
        let tokens = Arc::new(MemoryTokenStore::with_token("mock-token"));
        let ctx = AppContext::start_with_tokens(offline_config(), tokens).await.unwrap();
        assert_eq!(ctx.current_user().unwrap().email, "demo@example.com");
    }

    #[tokio::test]
    async fn test_start_rejects_invalid_config() {
        let config = ClientConfig {
            api_base_url: "localhost".to_string(),
            ..offline_config()
        };
        let err = AppContext::start_with_tokens(config, Arc::new(MemoryTokenStore::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::State(_)));
    }

    #[tokio::test]
    async fn test_find_swap_requires_login() {
        let ctx = AppContext::start_with_tokens(offline_config(), Arc::new(MemoryTokenStore::new()))
            .await
            .unwrap();
        assert!(matches!(
            ctx.find_swap("demo-1").await,
            Err(ClientError::Authentication(_))
        ));
    }
}
