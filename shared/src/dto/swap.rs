//! # Swap Request Data Transfer Objects
//!
//! Request/response structures for `/swaps` endpoints: creating, listing,
//! updating and rating skill swap requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{user_ref_or_id, UserRef};
use crate::utils::{opt_string_or_int, string_or_int};

/// Lifecycle status of a swap request.
///
/// `Rejected`, `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwapStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

impl SwapStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SwapStatus::Rejected | SwapStatus::Completed | SwapStatus::Cancelled
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Completed => "completed",
            SwapStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SwapStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(SwapStatus::Pending),
            "accepted" => Ok(SwapStatus::Accepted),
            "rejected" => Ok(SwapStatus::Rejected),
            "completed" => Ok(SwapStatus::Completed),
            "cancelled" | "canceled" => Ok(SwapStatus::Cancelled),
            _ => Err(format!("Invalid swap status: {}", s)),
        }
    }
}

/// A proposal from `requester` to exchange `offered_skill` for `requested_skill`
/// with `recipient`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRequest {
    #[serde(alias = "_id", deserialize_with = "string_or_int")]
    pub id: String,
    pub requester: UserRef,
    pub recipient: UserRef,
    #[serde(alias = "requestedSkill")]
    pub requested_skill: String,
    #[serde(alias = "offeredSkill")]
    pub offered_skill: String,
    #[serde(default)]
    pub message: String,
    pub status: SwapStatus,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default, alias = "updatedAt", skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl SwapRequest {
    pub fn involves(&self, user_id: &str) -> bool {
        self.requester.id == user_id || self.recipient.id == user_id
    }

    /// The other participant, seen from `user_id`.
    pub fn counterparty(&self, user_id: &str) -> Option<&UserRef> {
        if self.requester.id == user_id {
            Some(&self.recipient)
        } else if self.recipient.id == user_id {
            Some(&self.requester)
        } else {
            None
        }
    }
}

/// Body of `POST /swaps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSwapRequest {
    /// Recipient user id.
    pub recipient: String,
    pub requested_skill: String,
    pub offered_skill: String,
    #[serde(default)]
    pub message: String,
}

/// Body of `PATCH /swaps/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSwapStatus {
    pub status: SwapStatus,
}

/// Echo of the create payload, as returned by backends that only
/// serialise the writable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct SwapRequestEcho {
    #[serde(default, alias = "_id", deserialize_with = "opt_string_or_int")]
    pub id: Option<String>,
    #[serde(deserialize_with = "user_ref_or_id")]
    pub recipient: UserRef,
    #[serde(alias = "requestedSkill")]
    pub requested_skill: String,
    #[serde(alias = "offeredSkill")]
    pub offered_skill: String,
    #[serde(default)]
    pub message: String,
}

/// Response of `POST /swaps` in any of the shapes seen in the wild.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SwapCreatedEnvelope {
    Wrapped {
        #[serde(alias = "swapRequest")]
        swap_request: SwapRequest,
    },
    Full(SwapRequest),
    Echo(SwapRequestEcho),
}

impl SwapCreatedEnvelope {
    /// Resolve to a full request, filling what an echo leaves out.
    ///
    /// An echo without an id cannot be addressed later, so it is handed
    /// back for the caller to look up with [`SwapRequestEcho::find_in`].
    pub fn into_request(
        self,
        requester: &UserRef,
        now: DateTime<Utc>,
    ) -> Result<SwapRequest, SwapRequestEcho> {
        match self {
            SwapCreatedEnvelope::Wrapped { swap_request } | SwapCreatedEnvelope::Full(swap_request) => {
                Ok(swap_request)
            }
            SwapCreatedEnvelope::Echo(mut echo) => match echo.id.take() {
                Some(id) => Ok(SwapRequest {
                    id,
                    requester: requester.clone(),
                    recipient: echo.recipient,
                    requested_skill: echo.requested_skill,
                    offered_skill: echo.offered_skill,
                    message: echo.message,
                    status: SwapStatus::Pending,
                    created_at: now,
                    updated_at: None,
                }),
                None => Err(echo),
            },
        }
    }
}

impl SwapRequestEcho {
    /// The newest pending request in `requests` that this echo describes.
    pub fn find_in(&self, requester_id: &str, requests: &[SwapRequest]) -> Option<SwapRequest> {
        requests
            .iter()
            .filter(|r| {
                r.status == SwapStatus::Pending
                    && r.requester.id == requester_id
                    && r.recipient.id == self.recipient.id
                    && r.requested_skill == self.requested_skill
                    && r.offered_skill == self.offered_skill
            })
            .max_by_key(|r| r.created_at)
            .cloned()
    }
}

/// Response of `PATCH /swaps/{id}`: the updated request, wrapped or bare,
/// or only an acknowledgement.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SwapUpdatedEnvelope {
    Wrapped {
        #[serde(alias = "swapRequest")]
        swap_request: SwapRequest,
    },
    Full(SwapRequest),
    Ack { message: String },
}

impl SwapUpdatedEnvelope {
    /// Resolve to the updated request. An acknowledgement is applied to
    /// `original` locally.
    pub fn into_request(
        self,
        original: &SwapRequest,
        status: SwapStatus,
        now: DateTime<Utc>,
    ) -> SwapRequest {
        match self {
            SwapUpdatedEnvelope::Wrapped { swap_request } | SwapUpdatedEnvelope::Full(swap_request) => {
                swap_request
            }
            SwapUpdatedEnvelope::Ack { .. } => SwapRequest {
                status,
                updated_at: Some(now),
                ..original.clone()
            },
        }
    }
}

/// Response of `GET /swaps`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SwapListEnvelope {
    Bare(Vec<SwapRequest>),
    Paged {
        results: Vec<SwapRequest>,
    },
    Wrapped {
        #[serde(alias = "swapRequests")]
        swap_requests: Vec<SwapRequest>,
    },
    Split {
        sent_requests: Vec<SwapRequest>,
        received_requests: Vec<SwapRequest>,
    },
}

impl SwapListEnvelope {
    pub fn into_requests(self) -> Vec<SwapRequest> {
        match self {
            SwapListEnvelope::Bare(list)
            | SwapListEnvelope::Paged { results: list }
            | SwapListEnvelope::Wrapped { swap_requests: list } => list,
            SwapListEnvelope::Split {
                mut sent_requests,
                received_requests,
            } => {
                sent_requests.extend(received_requests);
                sent_requests
            }
        }
    }
}

/// Body of `POST /swaps/ratings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRatingRequest {
    #[serde(deserialize_with = "string_or_int")]
    pub swap_request: String,
    #[serde(deserialize_with = "string_or_int")]
    pub rated_user: String,
    /// 1 to 5 stars.
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
}

/// A rating one participant left for the other on a completed swap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapRating {
    #[serde(default, alias = "_id", deserialize_with = "opt_string_or_int")]
    pub id: Option<String>,
    #[serde(deserialize_with = "string_or_int")]
    pub swap_request: String,
    #[serde(deserialize_with = "user_ref_or_id")]
    pub rater: UserRef,
    #[serde(deserialize_with = "user_ref_or_id")]
    pub rated_user: UserRef,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Response of `POST /swaps/ratings`: the stored rating, or an echo of
/// the submitted fields without rater or id.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RatingCreatedEnvelope {
    Full(SwapRating),
    Echo(CreateRatingRequest),
}

impl RatingCreatedEnvelope {
    /// Resolve to a full rating. An echo takes both parties from the
    /// caller, who knows them from the swap.
    pub fn into_rating(self, rater: &UserRef, rated_user: &UserRef, now: DateTime<Utc>) -> SwapRating {
        match self {
            RatingCreatedEnvelope::Full(rating) => rating,
            RatingCreatedEnvelope::Echo(echo) => SwapRating {
                id: None,
                swap_request: echo.swap_request,
                rater: rater.clone(),
                rated_user: rated_user.clone(),
                rating: echo.rating,
                comment: echo.comment,
                created_at: Some(now),
            },
        }
    }
}

/// Generic `{message}` acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
