//! # Water Request Entity
//!
//! The central record of the stack: a resident's ask for a volume of
//! water delivered to an address. Construction validates input;
//! transitions are planned as pure [`Transition`] values that the
//! lifecycle manager applies through the store's conditional update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aqf_core::{DriverId, RequestId, ResidentId, Urgency, ValidationError};

use crate::status::{RequestStatus, TransitionError};

/// Maximum accepted address length.
const MAX_ADDRESS_LEN: usize = 512;

/// A water delivery request.
///
/// `status`, `assigned_driver_id`, and `updated_at` are owned by the
/// lifecycle manager — no other component writes these fields. All
/// remaining fields are immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterRequest {
    /// Unique identifier, assigned at creation.
    pub id: RequestId,
    /// Resident who asked for the delivery (weak reference).
    pub resident_id: ResidentId,
    /// Free-text delivery location.
    pub address: String,
    /// Requested quantity. Always positive.
    pub volume_liters: u32,
    /// Resident-declared priority tier. Immutable after creation.
    pub urgency: Urgency,
    /// Optional free-text instructions from the resident.
    pub details: Option<String>,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// Driver who claimed the delivery. `Some` iff status is
    /// accepted or completed.
    pub assigned_driver_id: Option<DriverId>,
    /// When the request was created.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every status transition. Never earlier than
    /// `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRequest {
    /// Resident placing the request.
    pub resident_id: ResidentId,
    /// Delivery address.
    pub address: String,
    /// Requested volume. Validated positive at construction.
    pub volume_liters: i64,
    /// Declared urgency tier.
    pub urgency: Urgency,
    /// Optional free-text instructions.
    #[serde(default)]
    pub details: Option<String>,
}

impl WaterRequest {
    /// Create a new request in the Pending state.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the volume is not positive or
    /// exceeds [`aqf_core::MAX_VOLUME_LITERS`], or the address is blank
    /// or oversized. Nothing is persisted for a request that fails
    /// validation.
    pub fn create(input: NewRequest, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        if input.volume_liters <= 0 {
            return Err(ValidationError::NonPositiveVolume(input.volume_liters));
        }
        let address = input.address.trim().to_string();
        if address.is_empty() {
            return Err(ValidationError::EmptyAddress);
        }
        if address.len() > MAX_ADDRESS_LEN {
            return Err(ValidationError::AddressTooLong {
                limit: MAX_ADDRESS_LEN,
                actual: address.len(),
            });
        }
        let volume_liters =
            u32::try_from(input.volume_liters).map_err(|_| ValidationError::VolumeTooLarge {
                limit: aqf_core::MAX_VOLUME_LITERS,
                actual: input.volume_liters,
            })?;

        Ok(Self {
            id: RequestId::new(),
            resident_id: input.resident_id,
            address,
            volume_liters,
            urgency: input.urgency,
            details: input.details.filter(|d| !d.trim().is_empty()),
            status: RequestStatus::Pending,
            assigned_driver_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Plan the Pending→Accepted transition for `driver`.
    pub fn accept(
        &self,
        driver: DriverId,
        now: DateTime<Utc>,
    ) -> Result<Transition, TransitionError> {
        self.plan(RequestStatus::Accepted, Some(driver), now)
    }

    /// Plan the Pending→Rejected transition.
    ///
    /// The declining driver is not recorded on the row — a rejected
    /// request never carries an assigned driver.
    pub fn reject(&self, now: DateTime<Utc>) -> Result<Transition, TransitionError> {
        self.plan(RequestStatus::Rejected, None, now)
    }

    /// Plan the Accepted→Completed transition. The assigned driver is
    /// carried over unchanged.
    pub fn complete(&self, now: DateTime<Utc>) -> Result<Transition, TransitionError> {
        self.plan(RequestStatus::Completed, self.assigned_driver_id, now)
    }

    /// Apply a patch, producing the post-transition record.
    pub fn with_patch(&self, patch: &RequestPatch) -> Self {
        let mut next = self.clone();
        next.status = patch.status;
        next.assigned_driver_id = patch.assigned_driver_id;
        next.updated_at = patch.updated_at;
        next
    }

    fn plan(
        &self,
        to: RequestStatus,
        driver: Option<DriverId>,
        now: DateTime<Utc>,
    ) -> Result<Transition, TransitionError> {
        if !self.status.can_transition_to(to) {
            return Err(TransitionError {
                from: self.status,
                to,
            });
        }
        // updated_at must never regress below created_at, even with a
        // skewed caller clock.
        let updated_at = now.max(self.created_at);
        Ok(Transition {
            expected: self.status,
            patch: RequestPatch {
                status: to,
                assigned_driver_id: driver,
                updated_at,
            },
            event: TransitionEvent {
                request_id: self.id,
                from: self.status,
                to,
                occurred_at: updated_at,
            },
        })
    }
}

/// The manager-owned fields a transition writes.
///
/// Applied via the store's conditional update (`update_if`), never via
/// blind replacement, so a lost race surfaces as zero rows affected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequestPatch {
    /// Post-transition status.
    pub status: RequestStatus,
    /// Post-transition driver assignment.
    pub assigned_driver_id: Option<DriverId>,
    /// Transition time.
    pub updated_at: DateTime<Utc>,
}

/// Descriptor of a completed transition.
///
/// The lifecycle manager emits these; surrounding application code may
/// forward them to a notification sink. The manager never sends
/// notifications itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransitionEvent {
    /// The request that transitioned.
    pub request_id: RequestId,
    /// Status before the transition.
    pub from: RequestStatus,
    /// Status after the transition.
    pub to: RequestStatus,
    /// When the transition was applied.
    pub occurred_at: DateTime<Utc>,
}

/// A planned transition: the precondition, the fields to write, and the
/// event to emit once the write is acknowledged.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    /// Status the stored row must still hold for the write to apply.
    pub expected: RequestStatus,
    /// Fields to write.
    pub patch: RequestPatch,
    /// Event describing the transition.
    pub event: TransitionEvent,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_input() -> NewRequest {
        NewRequest {
            resident_id: ResidentId::new(),
            address: "123 Main St".to_string(),
            volume_liters: 500,
            urgency: Urgency::Medium,
            details: None,
        }
    }

    fn pending() -> WaterRequest {
        WaterRequest::create(new_input(), Utc::now()).unwrap()
    }

    // ── Creation ─────────────────────────────────────────────────────

    #[test]
    fn test_create_starts_pending_and_unassigned() {
        let r = pending();
        assert_eq!(r.status, RequestStatus::Pending);
        assert!(r.assigned_driver_id.is_none());
        assert_eq!(r.created_at, r.updated_at);
    }

    #[test]
    fn test_create_echoes_input() {
        let input = new_input();
        let resident = input.resident_id;
        let r = WaterRequest::create(input, Utc::now()).unwrap();
        assert_eq!(r.resident_id, resident);
        assert_eq!(r.address, "123 Main St");
        assert_eq!(r.volume_liters, 500);
        assert_eq!(r.urgency, Urgency::Medium);
    }

    #[test]
    fn test_create_zero_volume_rejected() {
        let mut input = new_input();
        input.volume_liters = 0;
        assert_eq!(
            WaterRequest::create(input, Utc::now()),
            Err(ValidationError::NonPositiveVolume(0))
        );
    }

    #[test]
    fn test_create_negative_volume_rejected() {
        let mut input = new_input();
        input.volume_liters = -250;
        assert!(WaterRequest::create(input, Utc::now()).is_err());
    }

    #[test]
    fn test_create_oversized_volume_rejected_not_clamped() {
        let mut input = new_input();
        input.volume_liters = 5_000_000_000;
        assert_eq!(
            WaterRequest::create(input, Utc::now()),
            Err(ValidationError::VolumeTooLarge {
                limit: aqf_core::MAX_VOLUME_LITERS,
                actual: 5_000_000_000,
            })
        );
    }

    #[test]
    fn test_create_max_volume_stored_exactly() {
        let mut input = new_input();
        input.volume_liters = i64::from(aqf_core::MAX_VOLUME_LITERS);
        let r = WaterRequest::create(input, Utc::now()).unwrap();
        assert_eq!(r.volume_liters, aqf_core::MAX_VOLUME_LITERS);
    }

    #[test]
    fn test_create_blank_address_rejected() {
        let mut input = new_input();
        input.address = "   ".to_string();
        assert_eq!(
            WaterRequest::create(input, Utc::now()),
            Err(ValidationError::EmptyAddress)
        );
    }

    #[test]
    fn test_create_oversized_address_rejected() {
        let mut input = new_input();
        input.address = "x".repeat(600);
        assert!(matches!(
            WaterRequest::create(input, Utc::now()),
            Err(ValidationError::AddressTooLong { .. })
        ));
    }

    #[test]
    fn test_blank_details_normalized_to_none() {
        let mut input = new_input();
        input.details = Some("  ".to_string());
        let r = WaterRequest::create(input, Utc::now()).unwrap();
        assert!(r.details.is_none());
    }

    // ── Transitions ──────────────────────────────────────────────────

    #[test]
    fn test_accept_sets_driver() {
        let r = pending();
        let driver = DriverId::new();
        let tx = r.accept(driver, Utc::now()).unwrap();
        assert_eq!(tx.expected, RequestStatus::Pending);
        assert_eq!(tx.patch.status, RequestStatus::Accepted);
        assert_eq!(tx.patch.assigned_driver_id, Some(driver));

        let accepted = r.with_patch(&tx.patch);
        assert_eq!(accepted.status, RequestStatus::Accepted);
        assert!(accepted.updated_at >= accepted.created_at);
    }

    #[test]
    fn test_reject_leaves_driver_unset() {
        let r = pending();
        let tx = r.reject(Utc::now()).unwrap();
        assert_eq!(tx.patch.status, RequestStatus::Rejected);
        assert!(tx.patch.assigned_driver_id.is_none());
    }

    #[test]
    fn test_complete_carries_driver_over() {
        let r = pending();
        let driver = DriverId::new();
        let accepted = r.with_patch(&r.accept(driver, Utc::now()).unwrap().patch);
        let tx = accepted.complete(Utc::now()).unwrap();
        assert_eq!(tx.patch.status, RequestStatus::Completed);
        assert_eq!(tx.patch.assigned_driver_id, Some(driver));
    }

    #[test]
    fn test_accept_twice_rejected() {
        let r = pending();
        let accepted = r.with_patch(&r.accept(DriverId::new(), Utc::now()).unwrap().patch);
        let err = accepted.accept(DriverId::new(), Utc::now()).unwrap_err();
        assert_eq!(err.from, RequestStatus::Accepted);
        assert_eq!(err.to, RequestStatus::Accepted);
        // The original assignment is untouched by the failed attempt.
        assert!(accepted.assigned_driver_id.is_some());
    }

    #[test]
    fn test_complete_pending_rejected() {
        let r = pending();
        let err = r.complete(Utc::now()).unwrap_err();
        assert_eq!(err.from, RequestStatus::Pending);
        assert_eq!(err.to, RequestStatus::Completed);
    }

    #[test]
    fn test_reject_then_accept_rejected() {
        let r = pending();
        let rejected = r.with_patch(&r.reject(Utc::now()).unwrap().patch);
        assert!(rejected.accept(DriverId::new(), Utc::now()).is_err());
    }

    #[test]
    fn test_event_describes_edge() {
        let r = pending();
        let tx = r.accept(DriverId::new(), Utc::now()).unwrap();
        assert_eq!(tx.event.request_id, r.id);
        assert_eq!(tx.event.from, RequestStatus::Pending);
        assert_eq!(tx.event.to, RequestStatus::Accepted);
        assert_eq!(tx.event.occurred_at, tx.patch.updated_at);
    }

    #[test]
    fn test_skewed_clock_never_regresses_updated_at() {
        let r = pending();
        let past = r.created_at - chrono::Duration::hours(1);
        let tx = r.accept(DriverId::new(), past).unwrap();
        assert!(tx.patch.updated_at >= r.created_at);
    }

    // ── Invariant: driver iff accepted/completed ─────────────────────

    #[test]
    fn test_driver_presence_matches_status() {
        let r = pending();
        assert_eq!(
            r.assigned_driver_id.is_some(),
            r.status.carries_driver()
        );

        let accepted = r.with_patch(&r.accept(DriverId::new(), Utc::now()).unwrap().patch);
        assert_eq!(
            accepted.assigned_driver_id.is_some(),
            accepted.status.carries_driver()
        );

        let completed = accepted.with_patch(&accepted.complete(Utc::now()).unwrap().patch);
        assert_eq!(
            completed.assigned_driver_id.is_some(),
            completed.status.carries_driver()
        );

        let rejected = pending();
        let rejected = rejected.with_patch(&rejected.reject(Utc::now()).unwrap().patch);
        assert_eq!(
            rejected.assigned_driver_id.is_some(),
            rejected.status.carries_driver()
        );
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn test_request_serde_roundtrip() {
        let r = pending();
        let json = serde_json::to_string(&r).unwrap();
        let parsed: WaterRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, r.id);
        assert_eq!(parsed.status, r.status);
        assert_eq!(parsed.volume_liters, r.volume_liters);
    }
}
