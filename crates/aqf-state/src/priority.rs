//! # Driver Queue Ordering
//!
//! Produces the driver-facing view of open requests: filtered to one
//! status, ordered by urgency rank (high first), stable on ties so the
//! list does not visually reshuffle between renders when urgencies tie.

use crate::request::WaterRequest;
use crate::status::RequestStatus;

/// Order `requests` for a driver.
///
/// Filters to `status`, sorts ascending by [`aqf_core::Urgency::rank`], and keeps
/// the original relative order within a tier (stable sort). Returns a
/// fresh iterator over borrowed records each call; the input is never
/// mutated.
pub fn prioritized(
    requests: &[WaterRequest],
    status: RequestStatus,
) -> impl Iterator<Item = &WaterRequest> {
    let mut view: Vec<&WaterRequest> = requests.iter().filter(|r| r.status == status).collect();
    view.sort_by_key(|r| r.urgency.rank());
    view.into_iter()
}

/// The default driver queue: pending requests only — the only requests
/// a driver can act on.
pub fn pending_queue(requests: &[WaterRequest]) -> impl Iterator<Item = &WaterRequest> {
    prioritized(requests, RequestStatus::Pending)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aqf_core::{DriverId, ResidentId, Urgency};
    use chrono::Utc;
    use proptest::prelude::*;

    use crate::request::NewRequest;

    fn request(address: &str, urgency: Urgency) -> WaterRequest {
        WaterRequest::create(
            NewRequest {
                resident_id: ResidentId::new(),
                address: address.to_string(),
                volume_liters: 500,
                urgency,
                details: None,
            },
            Utc::now(),
        )
        .unwrap()
    }

    fn accepted(address: &str, urgency: Urgency) -> WaterRequest {
        let r = request(address, urgency);
        let tx = r.accept(DriverId::new(), Utc::now()).unwrap();
        r.with_patch(&tx.patch)
    }

    #[test]
    fn test_orders_high_medium_low() {
        // The worked example: [low, high, high, medium] -> [2, 3, 4, 1].
        let reqs = vec![
            request("1 Low Ln", Urgency::Low),
            request("2 High St", Urgency::High),
            request("3 High Ave", Urgency::High),
            request("4 Medium Rd", Urgency::Medium),
        ];
        let ordered: Vec<&str> = pending_queue(&reqs).map(|r| r.address.as_str()).collect();
        assert_eq!(
            ordered,
            vec!["2 High St", "3 High Ave", "4 Medium Rd", "1 Low Ln"]
        );
    }

    #[test]
    fn test_ties_keep_original_order() {
        let reqs = vec![
            request("first", Urgency::High),
            request("second", Urgency::High),
            request("third", Urgency::High),
        ];
        let ordered: Vec<&str> = pending_queue(&reqs).map(|r| r.address.as_str()).collect();
        assert_eq!(ordered, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_filters_to_requested_status() {
        let reqs = vec![
            request("open", Urgency::Low),
            accepted("claimed", Urgency::High),
        ];
        let pending: Vec<&str> = pending_queue(&reqs).map(|r| r.address.as_str()).collect();
        assert_eq!(pending, vec!["open"]);

        let claimed: Vec<&str> = prioritized(&reqs, RequestStatus::Accepted)
            .map(|r| r.address.as_str())
            .collect();
        assert_eq!(claimed, vec!["claimed"]);
    }

    #[test]
    fn test_empty_input_yields_empty_view() {
        let reqs: Vec<WaterRequest> = Vec::new();
        assert_eq!(pending_queue(&reqs).count(), 0);
    }

    #[test]
    fn test_restartable_view_does_not_mutate_input() {
        let reqs = vec![
            request("b", Urgency::Low),
            request("a", Urgency::High),
        ];
        let first: Vec<&str> = pending_queue(&reqs).map(|r| r.address.as_str()).collect();
        let second: Vec<&str> = pending_queue(&reqs).map(|r| r.address.as_str()).collect();
        assert_eq!(first, second);
        // Input order untouched.
        assert_eq!(reqs[0].address, "b");
        assert_eq!(reqs[1].address, "a");
    }

    fn arb_urgency() -> impl Strategy<Value = Urgency> {
        prop_oneof![
            Just(Urgency::High),
            Just(Urgency::Medium),
            Just(Urgency::Low),
        ]
    }

    proptest! {
        #[test]
        fn prop_output_is_pending_subset_in_nondecreasing_rank(
            urgencies in proptest::collection::vec(arb_urgency(), 0..20)
        ) {
            let reqs: Vec<WaterRequest> = urgencies
                .iter()
                .enumerate()
                .map(|(i, u)| request(&format!("addr-{i}"), *u))
                .collect();

            let view: Vec<&WaterRequest> = pending_queue(&reqs).collect();

            // Exactly the pending subset (everything here is pending).
            prop_assert_eq!(view.len(), reqs.len());

            // Non-decreasing urgency rank.
            for pair in view.windows(2) {
                prop_assert!(pair[0].urgency.rank() <= pair[1].urgency.rank());
            }

            // Stability: within a tier, original order survives.
            for tier in [Urgency::High, Urgency::Medium, Urgency::Low] {
                let in_view: Vec<_> = view
                    .iter()
                    .filter(|r| r.urgency == tier)
                    .map(|r| r.address.clone())
                    .collect();
                let in_input: Vec<_> = reqs
                    .iter()
                    .filter(|r| r.urgency == tier)
                    .map(|r| r.address.clone())
                    .collect();
                prop_assert_eq!(in_view, in_input);
            }
        }
    }
}
