//! # Validation Errors
//!
//! Structured errors for bad request input. A `ValidationError` is
//! raised before anything reaches persistence — a request that fails
//! validation is never inserted.

use thiserror::Error;

/// Request input validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A water request must ask for at least one liter.
    #[error("volume_liters must be positive, got {0}")]
    NonPositiveVolume(i64),

    /// The requested volume exceeds what a request can represent.
    #[error("volume_liters must not exceed {limit}, got {actual}")]
    VolumeTooLarge {
        /// Maximum accepted volume.
        limit: u32,
        /// The rejected input.
        actual: i64,
    },

    /// The delivery address is missing or blank.
    #[error("address must not be empty")]
    EmptyAddress,

    /// The delivery address exceeds the storage limit.
    #[error("address must not exceed {limit} characters, got {actual}")]
    AddressTooLong {
        /// Maximum accepted length.
        limit: usize,
        /// Length of the rejected input.
        actual: usize,
    },
}
