//! # Urgency Tiers
//!
//! Resident-declared priority tier for a water request. Set at creation,
//! immutable thereafter, and used only for driver-facing ordering.

use serde::{Deserialize, Serialize};

/// Urgency tier of a water request.
///
/// The numeric rank drives driver queue ordering: lower rank sorts
/// first, so `High` requests surface at the top of the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    /// Household is out of water or close to it.
    High,
    /// Supply is running low but not critical.
    Medium,
    /// Routine top-up.
    Low,
}

impl Urgency {
    /// Ordering rank: High=1, Medium=2, Low=3. Ascending rank is the
    /// driver queue order.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }

    /// Return the string representation of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Urgency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
