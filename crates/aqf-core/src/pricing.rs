//! # Price Estimation
//!
//! Linear price model for a tanker delivery: a fixed call-out fee plus a
//! per-liter rate. The estimate is informational — callers may attach it
//! to a request as a quote, but nothing here is persisted and the total
//! is never authoritative for billing.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Default fixed call-out fee, in the zone currency.
pub const DEFAULT_BASE_FEE: f64 = 5.0;

/// Default per-liter delivery rate, in the zone currency.
pub const DEFAULT_PER_LITER_RATE: f64 = 0.01;

/// Maximum volume a single request can carry.
pub const MAX_VOLUME_LITERS: u32 = u32::MAX;

/// A derived, non-authoritative price estimate for a delivery volume.
///
/// `total` is deterministic given the three inputs; the struct carries
/// them alongside so a displayed quote can always be reproduced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Fixed call-out fee applied to every delivery.
    pub base_fee: f64,
    /// Rate applied per requested liter.
    pub per_liter_rate: f64,
    /// Requested volume the quote was computed for.
    pub volume_liters: u32,
    /// `base_fee + per_liter_rate * volume_liters`.
    pub total: f64,
}

impl PriceQuote {
    /// Compute a quote with explicit fee parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveVolume`] when
    /// `volume_liters <= 0`, or [`ValidationError::VolumeTooLarge`]
    /// when it exceeds [`MAX_VOLUME_LITERS`].
    pub fn compute(
        volume_liters: i64,
        base_fee: f64,
        per_liter_rate: f64,
    ) -> Result<Self, ValidationError> {
        if volume_liters <= 0 {
            return Err(ValidationError::NonPositiveVolume(volume_liters));
        }
        let volume =
            u32::try_from(volume_liters).map_err(|_| ValidationError::VolumeTooLarge {
                limit: MAX_VOLUME_LITERS,
                actual: volume_liters,
            })?;
        Ok(Self {
            base_fee,
            per_liter_rate,
            volume_liters: volume,
            total: base_fee + per_liter_rate * volume as f64,
        })
    }

    /// Compute a quote with the default fee schedule.
    pub fn with_defaults(volume_liters: i64) -> Result<Self, ValidationError> {
        Self::compute(volume_liters, DEFAULT_BASE_FEE, DEFAULT_PER_LITER_RATE)
    }
}

/// Estimate the delivery price for a volume using the default fee
/// schedule.
///
/// Pure function: `DEFAULT_BASE_FEE + DEFAULT_PER_LITER_RATE * volume`.
///
/// # Errors
///
/// Returns [`ValidationError::NonPositiveVolume`] when
/// `volume_liters <= 0`, or [`ValidationError::VolumeTooLarge`] when it
/// exceeds [`MAX_VOLUME_LITERS`].
pub fn estimate_price(volume_liters: i64) -> Result<f64, ValidationError> {
    PriceQuote::with_defaults(volume_liters).map(|q| q.total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_thousand_liters_costs_fifteen() {
        assert_eq!(estimate_price(1000).unwrap(), 15.0);
    }

    #[test]
    fn test_zero_volume_rejected() {
        assert_eq!(
            estimate_price(0),
            Err(ValidationError::NonPositiveVolume(0))
        );
    }

    #[test]
    fn test_negative_volume_rejected() {
        assert_eq!(
            estimate_price(-5),
            Err(ValidationError::NonPositiveVolume(-5))
        );
    }

    #[test]
    fn test_max_volume_priced_linearly() {
        let volume = i64::from(MAX_VOLUME_LITERS);
        assert_eq!(
            estimate_price(volume).unwrap(),
            DEFAULT_BASE_FEE + DEFAULT_PER_LITER_RATE * volume as f64
        );
    }

    #[test]
    fn test_oversized_volume_rejected_not_clamped() {
        let volume = i64::from(MAX_VOLUME_LITERS) + 1;
        assert_eq!(
            estimate_price(volume),
            Err(ValidationError::VolumeTooLarge {
                limit: MAX_VOLUME_LITERS,
                actual: volume,
            })
        );
        assert!(estimate_price(5_000_000_000).is_err());
    }

    #[test]
    fn test_quote_echoes_inputs() {
        let q = PriceQuote::compute(250, 10.0, 0.02).unwrap();
        assert_eq!(q.base_fee, 10.0);
        assert_eq!(q.per_liter_rate, 0.02);
        assert_eq!(q.volume_liters, 250);
        assert_eq!(q.total, 15.0);
    }

    proptest! {
        #[test]
        fn prop_total_matches_linear_model(volume in 1i64..=i64::from(u32::MAX)) {
            let total = estimate_price(volume).unwrap();
            prop_assert_eq!(total, DEFAULT_BASE_FEE + DEFAULT_PER_LITER_RATE * volume as f64);
        }

        #[test]
        fn prop_non_positive_always_rejected(volume in i64::MIN..=0) {
            prop_assert!(estimate_price(volume).is_err());
        }

        #[test]
        fn prop_out_of_range_always_rejected(
            volume in (i64::from(u32::MAX) + 1)..=i64::MAX
        ) {
            prop_assert!(estimate_price(volume).is_err());
        }

        #[test]
        fn prop_deterministic(volume in 1i64..=2_000_000) {
            prop_assert_eq!(estimate_price(volume), estimate_price(volume));
        }
    }
}
