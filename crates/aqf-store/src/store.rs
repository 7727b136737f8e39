//! # RequestStore Contract
//!
//! The abstract persistence collaborator consumed by the lifecycle
//! manager. The trait is object-safe so the manager can hold
//! `Arc<dyn RequestStore>` and swap the in-memory and PostgreSQL
//! implementations freely.

use async_trait::async_trait;

use aqf_core::{RequestId, ResidentId};
use aqf_state::{RequestPatch, RequestStatus, WaterRequest};

use crate::error::StoreError;

/// Row CRUD and filtering over water requests.
///
/// Only the lifecycle manager mutates `status`, `assigned_driver_id`,
/// and `updated_at`, and only through [`RequestStore::update_if`].
/// Requests are never deleted — terminal rows are retained for history,
/// so the contract deliberately has no delete operation.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Insert a new request row.
    async fn insert(&self, request: &WaterRequest) -> Result<(), StoreError>;

    /// Fetch a request by id. `Ok(None)` when the id is unknown.
    async fn get(&self, id: RequestId) -> Result<Option<WaterRequest>, StoreError>;

    /// Conditionally apply a transition patch: write `patch` only if the
    /// stored status still equals `expected`. Returns the number of rows
    /// affected — zero means the row is missing or another actor
    /// transitioned it first.
    async fn update_if(
        &self,
        id: RequestId,
        expected: RequestStatus,
        patch: RequestPatch,
    ) -> Result<u64, StoreError>;

    /// All requests in the given status, oldest first.
    async fn list_by_status(&self, status: RequestStatus) -> Result<Vec<WaterRequest>, StoreError>;

    /// All requests placed by a resident, oldest first.
    async fn list_by_resident(
        &self,
        resident: ResidentId,
    ) -> Result<Vec<WaterRequest>, StoreError>;

    /// Every request, oldest first.
    async fn list_all(&self) -> Result<Vec<WaterRequest>, StoreError>;
}
