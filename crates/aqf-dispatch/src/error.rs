//! # Dispatch Error Taxonomy
//!
//! The four recoverable failure classes of the lifecycle manager. All
//! are recoverable by the caller (re-fetch and show the current state,
//! or surface a message); none is fatal to the process.

use thiserror::Error;

use aqf_core::{RequestId, ValidationError};
use aqf_state::{RequestStatus, TransitionError};
use aqf_store::StoreError;

/// A lifecycle operation failed.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Bad input; nothing was persisted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No request with this id exists.
    #[error("no such request: {0}")]
    NotFound(RequestId),

    /// The request was not in the status the transition requires. This
    /// includes lost races: another actor transitioned the row between
    /// our read and our conditional write.
    #[error("invalid request transition: {from} -> {to}")]
    InvalidTransition {
        /// Status the request actually held.
        from: RequestStatus,
        /// Status the caller attempted to move to.
        to: RequestStatus,
    },

    /// The persistence collaborator failed; wraps the underlying cause.
    /// No local mutation was applied.
    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),
}

impl From<TransitionError> for DispatchError {
    fn from(err: TransitionError) -> Self {
        Self::InvalidTransition {
            from: err.from,
            to: err.to,
        }
    }
}
