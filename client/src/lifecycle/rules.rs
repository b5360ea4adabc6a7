//! # Transition Rules
//!
//! Who may move a swap request from one status to another.
//!
//! ```text
//!            accept / reject (recipient)
//!   pending ──────────────────────────────► accepted ──► completed
//!      │                         │                (either party)
//!      │                         └──► rejected
//!      └──► cancelled (requester, via delete)
//! ```
//!
//! `rejected`, `completed` and `cancelled` are terminal, and nothing returns
//! to `pending`.

use shared::{SwapRequest, SwapStatus};

use crate::core::error::{ClientError, Result};
use crate::utils::validation::validate_rating;

/// Which side of a swap request an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Requester,
    Recipient,
}

impl Party {
    /// Resolve `actor_id` against the request; `None` for outsiders.
    pub fn of(swap: &SwapRequest, actor_id: &str) -> Option<Party> {
        if swap.requester.id == actor_id {
            Some(Party::Requester)
        } else if swap.recipient.id == actor_id {
            Some(Party::Recipient)
        } else {
            None
        }
    }
}

/// Party allowed to perform a given transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permitted {
    Requester,
    Recipient,
    Either,
}

impl Permitted {
    fn allows(self, party: Party) -> bool {
        match self {
            Permitted::Either => true,
            Permitted::Requester => party == Party::Requester,
            Permitted::Recipient => party == Party::Recipient,
        }
    }
}

/// The allowed-transition table. `None` means the transition does not exist.
pub fn permitted_party(from: SwapStatus, to: SwapStatus) -> Option<Permitted> {
    use SwapStatus::*;

    match (from, to) {
        (Pending, Accepted) | (Pending, Rejected) => Some(Permitted::Recipient),
        (Accepted, Completed) => Some(Permitted::Either),
        (Pending, Cancelled) => Some(Permitted::Requester),
        _ => None,
    }
}

/// Check that `actor_id` may move `swap` to `to`.
///
/// Terminal requests fail with `InvalidTransition` regardless of actor.
/// Otherwise an unknown transition is `InvalidTransition`, and a known one
/// attempted by the wrong party (or an outsider) is `Authorization`.
pub fn check_transition(swap: &SwapRequest, actor_id: &str, to: SwapStatus) -> Result<()> {
    let from = swap.status;
    let invalid = ClientError::InvalidTransition { from, to };

    if from.is_terminal() {
        return Err(invalid);
    }
    let Some(permitted) = permitted_party(from, to) else {
        return Err(invalid);
    };

    let party = Party::of(swap, actor_id).ok_or_else(|| {
        ClientError::Authorization("You are not a participant in this swap request".to_string())
    })?;

    if !permitted.allows(party) {
        let who = match permitted {
            Permitted::Recipient => "the recipient",
            Permitted::Requester => "the requester",
            Permitted::Either => "a participant",
        };
        return Err(ClientError::Authorization(format!(
            "Only {} can mark this request {}",
            who, to
        )));
    }

    Ok(())
}

/// Check that `actor_id` may delete (cancel) `swap`: requester only, while pending.
pub fn check_delete(swap: &SwapRequest, actor_id: &str) -> Result<()> {
    if Party::of(swap, actor_id) != Some(Party::Requester) {
        return Err(ClientError::Authorization(
            "Only the requester can delete a swap request".to_string(),
        ));
    }
    if swap.status != SwapStatus::Pending {
        return Err(ClientError::Authorization(format!(
            "Only pending requests can be deleted; this one is {}",
            swap.status
        )));
    }
    Ok(())
}

/// Check that `actor_id` may rate `swap` with `stars`: a participant, on a
/// completed request, 1 to 5 stars. Returns the rater's side.
pub fn check_rating(swap: &SwapRequest, actor_id: &str, stars: u8) -> Result<Party> {
    validate_rating(stars).into_result()?;
    let party = Party::of(swap, actor_id).ok_or_else(|| {
        ClientError::Authorization("You are not a participant in this swap request".to_string())
    })?;
    if swap.status != SwapStatus::Completed {
        return Err(ClientError::Validation(format!(
            "Only completed swaps can be rated; this one is {}",
            swap.status
        )));
    }
    Ok(party)
}

/// Statuses `actor_id` could move `swap` to right now. Drives which actions a
/// front-end offers.
pub fn available_actions(swap: &SwapRequest, actor_id: &str) -> Vec<SwapStatus> {
    [
        SwapStatus::Accepted,
        SwapStatus::Rejected,
        SwapStatus::Completed,
        SwapStatus::Cancelled,
    ]
    .into_iter()
    .filter(|to| check_transition(swap, actor_id, *to).is_ok())
    .collect()
}
