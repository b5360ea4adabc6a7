//! # Swap Request Endpoints
//!
//! Create, list, update, delete and rate swap requests.
//!
//! Status changes, deletes and ratings are checked against the caller's copy
//! of the request with the lifecycle rules before anything is sent, so an
//! illegal action fails the same way live and in demo mode.

use chrono::Utc;
use shared::{
    CreateRatingRequest, CreateSwapRequest, RatingCreatedEnvelope, SwapCreatedEnvelope,
    SwapListEnvelope, SwapRating, SwapRequest, SwapRequestEcho, SwapStatus, SwapUpdatedEnvelope,
    UpdateSwapStatus, UserRef,
};

use super::client::{ApiClient, Served};
use crate::core::error::{ClientError, Result};
use crate::lifecycle::{check_delete, check_rating, check_transition, NewSwap, Party};

impl ApiClient {
    /// `POST /swaps`
    #[tracing::instrument(skip(self, requester, request), fields(recipient = %request.recipient))]
    pub async fn create_swap(
        &self,
        requester: &UserRef,
        request: &CreateSwapRequest,
    ) -> Served<SwapRequest> {
        let draft = NewSwap {
            requester: requester.clone(),
            recipient: UserRef::new(request.recipient.clone(), request.recipient.clone()),
            requested_skill: request.requested_skill.clone(),
            offered_skill: request.offered_skill.clone(),
            message: request.message.clone(),
        };
        if let Err(err) = draft.validate() {
            return Served::Failed(err);
        }

        let live = match self
            .fetch::<SwapCreatedEnvelope>(
                self.authorized(self.client.post(self.url("/swaps")))
                    .json(request),
            )
            .await
        {
            Ok(created) => match created.into_request(requester, Utc::now()) {
                Ok(swap) => Ok(swap),
                Err(echo) => self.locate_created(requester, &echo).await,
            },
            Err(err) => Err(err),
        };
        let served = self
            .serve("create_swap", live, || self.mock.create_swap(requester, request))
            .await;

        if let Some(swap) = served.value() {
            tracing::info!(swap_id = %swap.id, "Swap request created");
        }
        served
    }

    /// The backend stored the request but echoed it without an id. Find it
    /// in the caller's list so later updates have something to address.
    async fn locate_created(&self, requester: &UserRef, echo: &SwapRequestEcho) -> Result<SwapRequest> {
        let listed = self
            .fetch::<SwapListEnvelope>(self.authorized(self.client.get(self.url("/swaps"))))
            .await
            .map_err(|err| match err {
                // Already created upstream, so never answer this with demo data
                ClientError::NetworkUnavailable(msg) => ClientError::Decode(format!(
                    "Swap request was created but could not be reloaded: {}",
                    msg
                )),
                other => other,
            })?
            .into_requests();

        echo.find_in(&requester.id, &listed).ok_or_else(|| {
            tracing::error!(recipient = %echo.recipient.id, "Created swap request missing from list");
            ClientError::Decode("Swap request was created but the server did not return its id".to_string())
        })
    }

    /// `GET /swaps`: requests the caller sent or received.
    #[tracing::instrument(skip(self))]
    pub async fn list_swaps(&self, actor_id: &str) -> Served<Vec<SwapRequest>> {
        let live = self
            .fetch::<SwapListEnvelope>(self.authorized(self.client.get(self.url("/swaps"))))
            .await
            .map(SwapListEnvelope::into_requests);
        self.serve("list_swaps", live, || self.mock.list_swaps(actor_id))
            .await
    }

    /// `PATCH /swaps/{id}`
    #[tracing::instrument(skip(self, swap), fields(swap_id = %swap.id, from = %swap.status))]
    pub async fn update_swap_status(
        &self,
        swap: &SwapRequest,
        actor_id: &str,
        status: SwapStatus,
    ) -> Served<SwapRequest> {
        if let Err(err) = check_transition(swap, actor_id, status) {
            tracing::warn!(error = %err, "Status change refused locally");
            return Served::Failed(err);
        }

        let live = self
            .fetch::<SwapUpdatedEnvelope>(
                self.authorized(self.client.patch(self.url(&format!("/swaps/{}", swap.id))))
                    .json(&UpdateSwapStatus { status }),
            )
            .await
            .map(|updated| updated.into_request(swap, status, Utc::now()));
        let served = self
            .serve("update_swap_status", live, || {
                self.mock.update_swap_status(swap, actor_id, status)
            })
            .await;

        if served.value().is_some() {
            tracing::info!(to = %status, "Swap request updated");
        }
        served
    }

    /// `DELETE /swaps/{id}`
    #[tracing::instrument(skip(self, swap), fields(swap_id = %swap.id))]
    pub async fn delete_swap(&self, swap: &SwapRequest, actor_id: &str) -> Served<()> {
        if let Err(err) = check_delete(swap, actor_id) {
            return Served::Failed(err);
        }

        let live = self
            .fetch_unit(
                self.authorized(self.client.delete(self.url(&format!("/swaps/{}", swap.id)))),
            )
            .await;
        self.serve("delete_swap", live, || async {
            self.mock.delete_swap(swap, actor_id).await.map(|_| ())
        })
        .await
    }

    /// `POST /swaps/ratings`: rate the other participant of a completed swap.
    #[tracing::instrument(skip(self, swap, comment), fields(swap_id = %swap.id))]
    pub async fn rate_swap(
        &self,
        swap: &SwapRequest,
        actor_id: &str,
        stars: u8,
        comment: &str,
    ) -> Served<SwapRating> {
        let (rater, rated_user) = match check_rating(swap, actor_id, stars) {
            Ok(Party::Requester) => (&swap.requester, &swap.recipient),
            Ok(Party::Recipient) => (&swap.recipient, &swap.requester),
            Err(err) => return Served::Failed(err),
        };

        let body = CreateRatingRequest {
            swap_request: swap.id.clone(),
            rated_user: rated_user.id.clone(),
            rating: stars,
            comment: comment.trim().to_string(),
        };
        let live = self
            .fetch::<RatingCreatedEnvelope>(
                self.authorized(self.client.post(self.url("/swaps/ratings")))
                    .json(&body),
            )
            .await
            .map(|created| created.into_rating(rater, rated_user, Utc::now()));
        self.serve("rate_swap", live, || {
            self.mock.rate_swap(swap, actor_id, stars, comment)
        })
        .await
    }
}
