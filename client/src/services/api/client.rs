//! # API Client
//!
//! Main HTTP client for backend API communication, and the transport result
//! every endpoint returns.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::ErrorResponse;

use crate::config::ClientConfig;
use crate::core::error::{ClientError, Result};
use crate::services::mock::MockBackend;
use crate::session::TokenStore;

/// Message used when an error body carries nothing readable.
pub const FALLBACK_ERROR: &str = "Something went wrong";

/// How a call was resolved.
///
/// `Live` and `Mocked` carry the same type, so callers that only want the
/// value use [`Served::into_result`] and never see the difference.
#[derive(Debug, Clone, PartialEq)]
pub enum Served<T> {
    /// Answered by the backend.
    Live(T),
    /// Backend unreachable; answered from demo data.
    Mocked(T),
    /// A user-facing failure, from the backend, the demo data or a local check.
    Failed(ClientError),
}

impl<T> Served<T> {
    pub fn into_result(self) -> Result<T> {
        match self {
            Served::Live(value) | Served::Mocked(value) => Ok(value),
            Served::Failed(err) => Err(err),
        }
    }

    pub fn is_mocked(&self) -> bool {
        matches!(self, Served::Mocked(_))
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Served::Live(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Served::Live(value) | Served::Mocked(value) => Some(value),
            Served::Failed(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Served<U> {
        match self {
            Served::Live(value) => Served::Live(f(value)),
            Served::Mocked(value) => Served::Mocked(f(value)),
            Served::Failed(err) => Served::Failed(err),
        }
    }
}

/// HTTP client for the skill swap backend.
///
/// Every endpoint tries the network first. A connectivity failure is answered
/// from [`MockBackend`] and flips the client into demo mode; the next live
/// answer flips it back.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    pub(crate) tokens: Arc<dyn TokenStore>,
    pub(crate) mock: MockBackend,
    demo: AtomicBool,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            tokens,
            mock: MockBackend::new(config.mock_latency),
            demo: AtomicBool::new(false),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether the most recent call was served from demo data.
    pub fn is_demo_mode(&self) -> bool {
        self.demo.load(Ordering::Relaxed)
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.tokens.load()
    }

    /// Attach the persisted bearer token, if any.
    pub(crate) fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send `request` and decode a 2xx body as `T`.
    ///
    /// Non-2xx responses become the matching [`ClientError`] carrying the
    /// backend's message.
    pub(crate) async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let body = self.send(request).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Response parse error");
            ClientError::Decode(e.to_string())
        })
    }

    /// Like [`fetch`](Self::fetch) for endpoints whose body is irrelevant.
    pub(crate) async fn fetch_unit(&self, request: RequestBuilder) -> Result<()> {
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<String> {
        let request = request
            .build()
            .map_err(|e| ClientError::State(format!("Invalid request: {}", e)))?;
        let method = request.method().clone();
        let url = request.url().clone();
        tracing::debug!(%method, %url, "Sending request");

        let start = Instant::now();
        let response = self.client.execute(request).await?;
        let status = response.status();
        // The server has seen the request by now, so a failed read must not
        // fall back to demo data.
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Decode(format!("Failed to read response body: {}", e)))?;
        let duration = start.elapsed();

        if status.is_success() {
            tracing::debug!(%method, %url, status = status.as_u16(), duration_ms = duration.as_millis(), "Request succeeded");
            return Ok(body);
        }

        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.message().map(str::to_string))
            .unwrap_or_else(|| FALLBACK_ERROR.to_string());

        tracing::warn!(
            %method,
            %url,
            status = status.as_u16(),
            error = %message,
            duration_ms = duration.as_millis(),
            "Backend reported failure"
        );
        Err(ClientError::from_status(status.as_u16(), message))
    }

    /// Resolve a live outcome, falling back to demo data on connectivity
    /// failures only.
    pub(crate) async fn serve<T, F, Fut>(&self, operation: &'static str, live: Result<T>, fallback: F) -> Served<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match live {
            Ok(value) => {
                self.set_demo(false);
                Served::Live(value)
            }
            Err(err) if err.is_network() => {
                tracing::warn!(operation, error = %err, "Backend unreachable, serving demo data");
                self.set_demo(true);
                match fallback().await {
                    Ok(value) => Served::Mocked(value),
                    Err(err) => Served::Failed(err),
                }
            }
            Err(err) => {
                self.set_demo(false);
                Served::Failed(err)
            }
        }
    }

    fn set_demo(&self, on: bool) {
        let was = self.demo.swap(on, Ordering::Relaxed);
        if was != on {
            if on {
                tracing::info!("Entering demo mode");
            } else {
                tracing::info!("Backend reachable, leaving demo mode");
            }
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("demo", &self.is_demo_mode())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MemoryTokenStore;

    fn client() -> ApiClient {
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:1/api/".to_string(),
            mock_latency: std::time::Duration::ZERO,
            ..Default::default()
        };
        ApiClient::new(&config, Arc::new(MemoryTokenStore::new()))
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = client();
        assert_eq!(api.url("/health"), "http://127.0.0.1:1/api/health");
    }

    #[test]
    fn test_served_into_result_hides_origin() {
        assert_eq!(Served::Live(1).into_result(), Ok(1));
        assert_eq!(Served::Mocked(1).into_result(), Ok(1));
        let failed: Served<i32> = Served::Failed(ClientError::NotFound("x".to_string()));
        assert!(failed.into_result().is_err());
    }

    #[test]
    fn test_served_map_keeps_origin() {
        let mapped = Served::Mocked(2).map(|v| v * 10);
        assert!(mapped.is_mocked());
        assert_eq!(mapped.value(), Some(&20));
    }

    #[tokio::test]
    async fn test_serve_falls_back_only_on_network_errors() {
        let api = client();

        let served = api
            .serve(
                "probe",
                Err::<u8, _>(ClientError::NetworkUnavailable("refused".to_string())),
                || async { Ok(7) },
            )
            .await;
        assert_eq!(served, Served::Mocked(7));
        assert!(api.is_demo_mode());

        let served = api
            .serve(
                "probe",
                Err::<u8, _>(ClientError::from_status(400, "Bad input")),
                || async { Ok(7) },
            )
            .await;
        assert_eq!(served, Served::Failed(ClientError::from_status(400, "Bad input")));
        assert!(!api.is_demo_mode());

        let served = api.serve("probe", Ok(1u8), || async { Ok(7) }).await;
        assert!(served.is_live());
    }
}
