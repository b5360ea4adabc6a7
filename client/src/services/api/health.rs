//! # Health Endpoint

use shared::HealthResponse;

use super::client::{ApiClient, Served};

impl ApiClient {
    /// `GET /health`. An unreachable backend answers `DEMO`.
    pub async fn health(&self) -> Served<HealthResponse> {
        let live = self
            .fetch::<HealthResponse>(self.client.get(self.url("/health")))
            .await;
        self.serve("health", live, || async { Ok(self.mock.health().await) })
            .await
    }
}
