//! # aqf-core — Foundational Types for the AquaFlow Stack
//!
//! The bedrock of the AquaFlow workspace. Defines the type-system
//! primitives shared by every other crate: identifier newtypes, the
//! urgency tiers used for driver-facing ordering, request input
//! validation, and the pure price estimator.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `RequestId`,
//!    `ResidentId`, `DriverId` — all UUID newtypes. No bare strings or
//!    bare UUIDs for identifiers, so a driver id can never be passed
//!    where a resident id is expected.
//!
//! 2. **Validation at construction.** Bad input (`volume_liters == 0`,
//!    blank address) is rejected with a structured [`ValidationError`]
//!    before anything reaches persistence.
//!
//! 3. **Pure pricing.** [`pricing::estimate_price`] is deterministic
//!    given its inputs. No hidden state, nothing persisted.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `aqf-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod error;
pub mod identity;
pub mod pricing;
pub mod urgency;

// Re-export primary types for ergonomic imports.
pub use error::ValidationError;
pub use identity::{DriverId, RequestId, ResidentId};
pub use pricing::{
    estimate_price, PriceQuote, DEFAULT_BASE_FEE, DEFAULT_PER_LITER_RATE, MAX_VOLUME_LITERS,
};
pub use urgency::Urgency;
