//! # aqf-dispatch — Request Lifecycle Manager
//!
//! Owns the water request lifecycle: creation, driver accept/reject,
//! delivery completion, and the driver queue. Every state transition is
//! validated against the state machine in `aqf-state` before a
//! conditional write is issued through the persistence collaborator in
//! `aqf-store` — the manager performs no local mutation until the store
//! acknowledges the write, so the observed view never diverges from
//! stored state.
//!
//! ## Failure semantics
//!
//! Four recoverable error classes ([`DispatchError`]): bad input,
//! unknown id, status precondition violated (including lost races), and
//! persistence failure wrapping the backend cause. The manager never
//! retries — retrying an accept after a lost race would be semantically
//! wrong, the request is no longer available.
//!
//! ## Notifications
//!
//! Successful transitions return a [`aqf_state::TransitionEvent`].
//! Surrounding application code may forward it to a
//! [`NotificationSink`]; the manager never sends anything itself.

pub mod error;
pub mod manager;
pub mod notify;

pub use error::DispatchError;
pub use manager::{RequestLifecycleManager, StatusCounts};
pub use notify::{NotificationSink, TracingSink};
