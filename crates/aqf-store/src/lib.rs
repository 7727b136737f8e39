//! # aqf-store — Persistence Collaborator
//!
//! The storage contract the lifecycle manager writes through, plus two
//! implementations:
//!
//! - [`MemoryStore`] — thread-safe in-memory map. Used by tests and by
//!   deployments without a configured database.
//! - [`PgStore`] — PostgreSQL via SQLx, with embedded migrations.
//!
//! ## The conditional update
//!
//! Status transitions are applied with
//! [`RequestStore::update_if`]: write the patch only where the stored
//! status still equals the expected pre-transition status, and report
//! how many rows matched. Zero rows affected on an existing row means
//! another actor transitioned it first — the caller surfaces that as a
//! lost race, never as a silent success. This is the property that
//! prevents two drivers from both believing they won the same request.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use postgres::{init_pool, PgStore};
pub use store::RequestStore;
