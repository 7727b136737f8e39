//! # Request Status
//!
//! The lifecycle status of a water request and the transition edges the
//! rest of the stack is allowed to take. Serializes `snake_case`,
//! matching the strings stored in the `water_requests` table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle status of a water request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Created by a resident, waiting for a driver (initial).
    Pending,
    /// A driver has claimed the delivery.
    Accepted,
    /// A driver declined the request (terminal).
    Rejected,
    /// Delivery confirmed (terminal).
    Completed,
}

impl RequestStatus {
    /// Can transition from `self` to `to`?
    ///
    /// The only legal edges are Pending→Accepted, Pending→Rejected and
    /// Accepted→Completed. Nothing ever returns to Pending, and there is
    /// no Pending→Completed shortcut.
    pub fn can_transition_to(self, to: RequestStatus) -> bool {
        use RequestStatus::*;
        matches!(
            (self, to),
            (Pending, Accepted) | (Pending, Rejected) | (Accepted, Completed)
        )
    }

    /// Whether this status is terminal. Terminal requests are retained
    /// for history, never deleted.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }

    /// Whether a request in this status carries an assigned driver.
    pub fn carries_driver(self) -> bool {
        matches!(self, Self::Accepted | Self::Completed)
    }

    /// Return the string representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Parse a stored status string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status transition was attempted outside the legal edges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid request transition: {from} -> {to}")]
pub struct TransitionError {
    /// Status the request was in.
    pub from: RequestStatus,
    /// Status the caller attempted to move to.
    pub to: RequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequestStatus::*;

    #[test]
    fn test_legal_edges() {
        assert!(Pending.can_transition_to(Accepted));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Accepted.can_transition_to(Completed));
    }

    #[test]
    fn test_no_pending_to_completed_skip() {
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn test_nothing_returns_to_pending() {
        for from in [Accepted, Rejected, Completed] {
            assert!(!from.can_transition_to(Pending), "{from} -> pending");
        }
    }

    #[test]
    fn test_terminal_states_have_no_outgoing_edges() {
        for from in [Rejected, Completed] {
            for to in [Pending, Accepted, Rejected, Completed] {
                assert!(!from.can_transition_to(to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn test_terminality() {
        assert!(!Pending.is_terminal());
        assert!(!Accepted.is_terminal());
        assert!(Rejected.is_terminal());
        assert!(Completed.is_terminal());
    }

    #[test]
    fn test_driver_carrying_states() {
        assert!(!Pending.carries_driver());
        assert!(Accepted.carries_driver());
        assert!(!Rejected.carries_driver());
        assert!(Completed.carries_driver());
    }

    #[test]
    fn test_serializes_stored_strings() {
        assert_eq!(serde_json::to_string(&Pending).unwrap(), "\"pending\"");
        assert_eq!(serde_json::to_string(&Completed).unwrap(), "\"completed\"");
    }

    #[test]
    fn test_parse_roundtrip() {
        for s in [Pending, Accepted, Rejected, Completed] {
            assert_eq!(RequestStatus::parse(s.as_str()), Some(s));
        }
        assert_eq!(RequestStatus::parse("cancelled"), None);
    }
}
