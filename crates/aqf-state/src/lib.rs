//! # aqf-state — Request Lifecycle State Machine
//!
//! Models the lifecycle of a water delivery request and the ordering of
//! the driver-facing queue.
//!
//! ## States
//!
//! ```text
//! Pending ──▶ Accepted ──▶ Completed (terminal)
//!    │
//!    ▼
//! Rejected (terminal)
//! ```
//!
//! ## Design Decision
//!
//! The lifecycle uses an enum with validated transitions rather than
//! typestate types. With four states and three edges, the typestate
//! machinery would cost more than it buys; the enum approach with
//! transition methods returning `Result` rejects invalid transitions at
//! runtime with structured errors naming the current state and the
//! attempted target.
//!
//! Transitions are planned here as pure values ([`Transition`]) and
//! applied by the lifecycle manager through the persistence layer's
//! conditional update — never by blind in-place mutation. That keeps the
//! race-safety property (two drivers cannot both win the same request)
//! in one place: the store's compare-and-set.

pub mod priority;
pub mod request;
pub mod status;

pub use priority::{pending_queue, prioritized};
pub use request::{NewRequest, RequestPatch, Transition, TransitionEvent, WaterRequest};
pub use status::{RequestStatus, TransitionError};
