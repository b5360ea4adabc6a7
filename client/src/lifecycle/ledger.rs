//! # Swap Ledger
//!
//! In-memory record of swap requests and their ratings, enforcing the
//! lifecycle rules on every mutation. The demo backend keeps one of these;
//! tests use it directly.

use chrono::{DateTime, Utc};
use shared::{SwapRating, SwapRequest, SwapStatus, UserRef};

use super::rules::{check_delete, check_rating, check_transition, Party};
use crate::core::error::{ClientError, Result};

/// Input for [`SwapLedger::create`].
#[derive(Debug, Clone)]
pub struct NewSwap {
    pub requester: UserRef,
    pub recipient: UserRef,
    pub requested_skill: String,
    pub offered_skill: String,
    pub message: String,
}

impl NewSwap {
    /// Reject missing parties, self-requests and blank skills.
    pub fn validate(&self) -> Result<()> {
        if self.requester.id.trim().is_empty() {
            return Err(ClientError::Validation("Requester is required".to_string()));
        }
        if self.recipient.id.trim().is_empty() {
            return Err(ClientError::Validation("Recipient is required".to_string()));
        }
        if self.requester.id == self.recipient.id {
            return Err(ClientError::Validation(
                "You cannot send a swap request to yourself".to_string(),
            ));
        }
        if self.requested_skill.trim().is_empty() || self.offered_skill.trim().is_empty() {
            return Err(ClientError::Validation(
                "Both the requested and the offered skill are required".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct SwapLedger {
    requests: Vec<SwapRequest>,
    ratings: Vec<SwapRating>,
}

impl SwapLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an existing record, replacing any request with the same id.
    pub fn insert(&mut self, swap: SwapRequest) {
        self.requests.retain(|r| r.id != swap.id);
        self.requests.push(swap);
    }

    /// Next free `demo-<n>` id. Counting from the number of records keeps
    /// ids stable for the same sequence of calls.
    fn next_id(&self) -> String {
        (self.requests.len() + 1..)
            .map(|n| format!("demo-{}", n))
            .find(|id| self.get(id).is_none())
            .unwrap_or_default()
    }

    /// Open a new request in `pending`.
    pub fn create(&mut self, new: NewSwap, now: DateTime<Utc>) -> Result<SwapRequest> {
        new.validate()?;

        let swap = SwapRequest {
            id: self.next_id(),
            requester: new.requester,
            recipient: new.recipient,
            requested_skill: new.requested_skill.trim().to_string(),
            offered_skill: new.offered_skill.trim().to_string(),
            message: new.message,
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: None,
        };
        self.requests.push(swap.clone());
        Ok(swap)
    }

    pub fn get(&self, id: &str) -> Option<&SwapRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut SwapRequest> {
        self.requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Swap request {} not found", id)))
    }

    /// Requests `user_id` sent or received, newest first.
    pub fn list_for(&self, user_id: &str) -> Vec<SwapRequest> {
        let mut list: Vec<SwapRequest> = self
            .requests
            .iter()
            .filter(|r| r.involves(user_id))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        list
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn update_status(
        &mut self,
        id: &str,
        actor_id: &str,
        to: SwapStatus,
        now: DateTime<Utc>,
    ) -> Result<SwapRequest> {
        let swap = self.get_mut(id)?;
        check_transition(swap, actor_id, to)?;
        swap.status = to;
        swap.updated_at = Some(now);
        Ok(swap.clone())
    }

    /// Withdraw a pending request. The record stays, as `cancelled`.
    pub fn delete(&mut self, id: &str, actor_id: &str, now: DateTime<Utc>) -> Result<SwapRequest> {
        let swap = self.get_mut(id)?;
        check_delete(swap, actor_id)?;
        swap.status = SwapStatus::Cancelled;
        swap.updated_at = Some(now);
        Ok(swap.clone())
    }

    /// Attach a 1-5 star rating from `actor_id` to a completed swap.
    ///
    /// Each participant rates at most once; the status is not changed.
    pub fn rate(
        &mut self,
        id: &str,
        actor_id: &str,
        stars: u8,
        comment: &str,
        now: DateTime<Utc>,
    ) -> Result<SwapRating> {
        let swap = self
            .get(id)
            .ok_or_else(|| ClientError::NotFound(format!("Swap request {} not found", id)))?;
        let party = check_rating(swap, actor_id, stars)?;
        if self
            .ratings
            .iter()
            .any(|r| r.swap_request == id && r.rater.id == actor_id)
        {
            return Err(ClientError::Validation(
                "You have already rated this swap".to_string(),
            ));
        }

        let (rater, rated_user) = match party {
            Party::Requester => (swap.requester.clone(), swap.recipient.clone()),
            Party::Recipient => (swap.recipient.clone(), swap.requester.clone()),
        };
        let rating = SwapRating {
            id: Some(format!("{}-{}", id, rater.id)),
            swap_request: id.to_string(),
            rater,
            rated_user,
            rating: stars,
            comment: comment.trim().to_string(),
            created_at: Some(now),
        };
        self.ratings.push(rating.clone());
        Ok(rating)
    }

    pub fn ratings_for(&self, id: &str) -> Vec<&SwapRating> {
        self.ratings.iter().filter(|r| r.swap_request == id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alex() -> UserRef {
        UserRef::new("alex", "Alex")
    }

    fn bella() -> UserRef {
        UserRef::new("bella", "Bella")
    }

    fn python_for_js() -> NewSwap {
        NewSwap {
            requester: alex(),
            recipient: bella(),
            requested_skill: "Python".to_string(),
            offered_skill: "JavaScript".to_string(),
            message: "Happy to pair weekly".to_string(),
        }
    }

    #[test]
    fn test_create_starts_pending() {
        let mut ledger = SwapLedger::new();
        let now = Utc::now();
        let swap = ledger.create(python_for_js(), now).unwrap();
        assert_eq!(swap.status, SwapStatus::Pending);
        assert_eq!(swap.created_at, now);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(&swap.id), Some(&swap));
    }

    #[test]
    fn test_created_ids_are_sequential_and_skip_seeded() {
        let now = Utc::now();
        let mut seeded = SwapLedger::new();
        seeded.insert(SwapRequest {
            id: "demo-2".to_string(),
            requester: bella(),
            recipient: alex(),
            requested_skill: "Cooking".to_string(),
            offered_skill: "Spanish".to_string(),
            message: String::new(),
            status: SwapStatus::Pending,
            created_at: now,
            updated_at: None,
        });

        let first = seeded.create(python_for_js(), now).unwrap();
        let second = seeded.create(python_for_js(), now).unwrap();
        assert_eq!(first.id, "demo-3");
        assert_eq!(second.id, "demo-4");

        let mut again = SwapLedger::new();
        assert_eq!(again.create(python_for_js(), now).unwrap().id, "demo-1");
        assert_eq!(again.create(python_for_js(), now).unwrap().id, "demo-2");
    }

    #[test]
    fn test_create_rejects_self_request() {
        let mut ledger = SwapLedger::new();
        let mut new = python_for_js();
        new.recipient = alex();
        assert!(matches!(
            ledger.create(new, Utc::now()),
            Err(ClientError::Validation(_))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_create_rejects_missing_party() {
        let mut ledger = SwapLedger::new();
        let mut new = python_for_js();
        new.recipient = UserRef::new("", "");
        assert!(matches!(
            ledger.create(new, Utc::now()),
            Err(ClientError::Validation(_))
        ));
    }

    #[test]
    fn test_full_scenario_alex_to_bella() {
        let mut ledger = SwapLedger::new();
        let now = Utc::now();
        let swap = ledger.create(python_for_js(), now).unwrap();

        // Alex cannot accept his own request
        assert!(matches!(
            ledger.update_status(&swap.id, "alex", SwapStatus::Accepted, now),
            Err(ClientError::Authorization(_))
        ));

        let accepted = ledger
            .update_status(&swap.id, "bella", SwapStatus::Accepted, now)
            .unwrap();
        assert_eq!(accepted.status, SwapStatus::Accepted);

        // Rating before completion is refused
        assert!(ledger.rate(&swap.id, "alex", 5, "", now).is_err());

        let completed = ledger
            .update_status(&swap.id, "alex", SwapStatus::Completed, now)
            .unwrap();
        assert_eq!(completed.status, SwapStatus::Completed);

        let from_alex = ledger.rate(&swap.id, "alex", 5, "Great teacher", now).unwrap();
        assert_eq!(from_alex.rated_user.id, "bella");
        let from_bella = ledger.rate(&swap.id, "bella", 4, "", now).unwrap();
        assert_eq!(from_bella.rated_user.id, "alex");

        // Exactly once each
        assert!(matches!(
            ledger.rate(&swap.id, "alex", 3, "", now),
            Err(ClientError::Validation(_))
        ));
        assert_eq!(ledger.ratings_for(&swap.id).len(), 2);
        assert_eq!(ledger.get(&swap.id).unwrap().status, SwapStatus::Completed);
    }

    #[test]
    fn test_rating_bounds_and_outsiders() {
        let mut ledger = SwapLedger::new();
        let now = Utc::now();
        let swap = ledger.create(python_for_js(), now).unwrap();
        ledger.update_status(&swap.id, "bella", SwapStatus::Accepted, now).unwrap();
        ledger.update_status(&swap.id, "bella", SwapStatus::Completed, now).unwrap();

        assert!(matches!(
            ledger.rate(&swap.id, "alex", 0, "", now),
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            ledger.rate(&swap.id, "alex", 6, "", now),
            Err(ClientError::Validation(_))
        ));
        assert!(matches!(
            ledger.rate(&swap.id, "mallory", 5, "", now),
            Err(ClientError::Authorization(_))
        ));
    }

    #[test]
    fn test_terminal_request_refuses_updates() {
        let mut ledger = SwapLedger::new();
        let now = Utc::now();
        let swap = ledger.create(python_for_js(), now).unwrap();
        ledger.update_status(&swap.id, "bella", SwapStatus::Rejected, now).unwrap();

        for actor in ["alex", "bella"] {
            assert!(matches!(
                ledger.update_status(&swap.id, actor, SwapStatus::Accepted, now),
                Err(ClientError::InvalidTransition { .. })
            ));
        }
    }

    #[test]
    fn test_delete_cancels_pending_only() {
        let mut ledger = SwapLedger::new();
        let now = Utc::now();
        let first = ledger.create(python_for_js(), now).unwrap();
        let cancelled = ledger.delete(&first.id, "alex", now).unwrap();
        assert_eq!(cancelled.status, SwapStatus::Cancelled);

        let second = ledger.create(python_for_js(), now).unwrap();
        ledger.update_status(&second.id, "bella", SwapStatus::Accepted, now).unwrap();
        assert!(matches!(
            ledger.delete(&second.id, "alex", now),
            Err(ClientError::Authorization(_))
        ));
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut ledger = SwapLedger::new();
        assert!(matches!(
            ledger.update_status("nope", "alex", SwapStatus::Accepted, Utc::now()),
            Err(ClientError::NotFound(_))
        ));
        assert!(matches!(
            ledger.delete("nope", "alex", Utc::now()),
            Err(ClientError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_for_filters_and_orders() {
        let mut ledger = SwapLedger::new();
        let earlier = Utc::now() - chrono::Duration::hours(1);
        let later = Utc::now();
        let old = ledger.create(python_for_js(), earlier).unwrap();
        let new = ledger.create(python_for_js(), later).unwrap();
        ledger
            .create(
                NewSwap {
                    requester: UserRef::new("carol", "Carol"),
                    recipient: UserRef::new("dave", "Dave"),
                    ..python_for_js()
                },
                later,
            )
            .unwrap();

        let ids: Vec<String> = ledger.list_for("bella").into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![new.id, old.id]);
        assert!(ledger.list_for("erin").is_empty());
    }
}
