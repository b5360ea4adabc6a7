//! # User Endpoints
//!
//! Profile updates and user search.

use shared::{ProfileUpdate, User, UserEnvelope, UserListEnvelope, UserSearchParams};

use super::client::{ApiClient, Served};
use crate::core::error::ClientError;

impl ApiClient {
    /// `PUT /users/profile`
    #[tracing::instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Served<User> {
        if update.is_empty() {
            return Served::Failed(ClientError::Validation("Nothing to update".to_string()));
        }

        let live = self
            .fetch::<UserEnvelope>(
                self.authorized(self.client.put(self.url("/users/profile")))
                    .json(update),
            )
            .await
            .map(UserEnvelope::into_user);
        self.serve("update_profile", live, || self.mock.update_profile(update))
            .await
    }

    /// `GET /users/list`, filtered by `params`. The current user is not listed.
    #[tracing::instrument(skip(self))]
    pub async fn search_users(&self, params: &UserSearchParams) -> Served<Vec<User>> {
        let start = std::time::Instant::now();
        let live = self
            .fetch::<UserListEnvelope>(
                self.authorized(self.client.get(self.url("/users/list")))
                    .query(&params.to_query()),
            )
            .await
            .map(UserListEnvelope::into_users);
        let served = self
            .serve("search_users", live, || self.mock.search_users(params))
            .await;

        if let Some(users) = served.value() {
            tracing::info!(
                count = users.len(),
                duration_ms = start.elapsed().as_millis(),
                "User search complete"
            );
        }
        served
    }
}
