//! # Store Errors
//!
//! Failures raised by the persistence collaborator. Wraps the backend
//! cause so callers can log it, without leaking backend detail into the
//! domain taxonomy.

use thiserror::Error;

/// A persistence operation failed.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database backend reported an error.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back to a domain record.
    #[error("corrupt stored record {id}: {reason}")]
    CorruptRecord {
        /// Row identifier.
        id: uuid::Uuid,
        /// What failed to decode.
        reason: String,
    },
}
