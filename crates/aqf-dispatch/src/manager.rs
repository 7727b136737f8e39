//! # Request Lifecycle Manager
//!
//! The single owner of water request transitions. Every operation
//! follows the same discipline: read the current row, validate the
//! transition against the state machine, issue a conditional write, and
//! only then report success. A write that matches zero rows is a lost
//! race and surfaces as [`DispatchError::InvalidTransition`] — never as
//! a silent success.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use aqf_core::{DriverId, RequestId, ResidentId};
use aqf_state::{
    prioritized, NewRequest, RequestStatus, Transition, TransitionEvent, WaterRequest,
};
use aqf_store::RequestStore;

use crate::error::DispatchError;

/// Counts of requests per lifecycle status (admin statistics panel).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub completed: usize,
}

impl StatusCounts {
    /// Total number of requests ever placed.
    pub fn total(&self) -> usize {
        self.pending + self.accepted + self.rejected + self.completed
    }
}

/// The request lifecycle manager.
///
/// Holds the persistence collaborator behind `Arc<dyn RequestStore>` so
/// the in-memory and PostgreSQL stores are interchangeable. Cheap to
/// clone; clones share the store.
#[derive(Clone)]
pub struct RequestLifecycleManager {
    store: Arc<dyn RequestStore>,
}

impl RequestLifecycleManager {
    /// Create a manager over a store.
    pub fn new(store: Arc<dyn RequestStore>) -> Self {
        Self { store }
    }

    /// Create a new request in the Pending state.
    ///
    /// Validation happens before the insert: a request that fails
    /// validation produces no persisted record.
    pub async fn create_request(
        &self,
        input: NewRequest,
    ) -> Result<WaterRequest, DispatchError> {
        let request = WaterRequest::create(input, Utc::now())?;
        self.store.insert(&request).await?;
        tracing::info!(
            request_id = %request.id,
            resident_id = %request.resident_id,
            urgency = %request.urgency,
            volume_liters = request.volume_liters,
            "request created"
        );
        Ok(request)
    }

    /// Fetch a request by id.
    pub async fn get(&self, id: RequestId) -> Result<WaterRequest, DispatchError> {
        self.store
            .get(id)
            .await?
            .ok_or(DispatchError::NotFound(id))
    }

    /// Driver accepts a pending request (Pending→Accepted). Sets the
    /// assigned driver and refreshes `updated_at`.
    pub async fn accept(
        &self,
        id: RequestId,
        driver: DriverId,
    ) -> Result<(WaterRequest, TransitionEvent), DispatchError> {
        let current = self.get(id).await?;
        let tx = current.accept(driver, Utc::now())?;
        self.apply(&current, tx).await
    }

    /// Driver declines a pending request (Pending→Rejected). The row
    /// never carries the declining driver; it is only logged.
    pub async fn reject(
        &self,
        id: RequestId,
        driver: DriverId,
    ) -> Result<(WaterRequest, TransitionEvent), DispatchError> {
        let current = self.get(id).await?;
        let tx = current.reject(Utc::now())?;
        tracing::info!(request_id = %id, driver_id = %driver, "request declined");
        self.apply(&current, tx).await
    }

    /// Delivery confirmed (Accepted→Completed).
    pub async fn complete(
        &self,
        id: RequestId,
    ) -> Result<(WaterRequest, TransitionEvent), DispatchError> {
        let current = self.get(id).await?;
        let tx = current.complete(Utc::now())?;
        self.apply(&current, tx).await
    }

    /// The driver queue: pending requests ordered high→medium→low,
    /// stable within a tier.
    pub async fn driver_queue(&self) -> Result<Vec<WaterRequest>, DispatchError> {
        let pending = self.store.list_by_status(RequestStatus::Pending).await?;
        Ok(prioritized(&pending, RequestStatus::Pending)
            .cloned()
            .collect())
    }

    /// All requests in one status, oldest first.
    pub async fn list_by_status(
        &self,
        status: RequestStatus,
    ) -> Result<Vec<WaterRequest>, DispatchError> {
        Ok(self.store.list_by_status(status).await?)
    }

    /// A resident's requests, oldest first.
    pub async fn list_by_resident(
        &self,
        resident: ResidentId,
    ) -> Result<Vec<WaterRequest>, DispatchError> {
        Ok(self.store.list_by_resident(resident).await?)
    }

    /// Every request, oldest first.
    pub async fn list_all(&self) -> Result<Vec<WaterRequest>, DispatchError> {
        Ok(self.store.list_all().await?)
    }

    /// Request counts per status.
    pub async fn status_counts(&self) -> Result<StatusCounts, DispatchError> {
        let mut counts = StatusCounts::default();
        for request in self.store.list_all().await? {
            match request.status {
                RequestStatus::Pending => counts.pending += 1,
                RequestStatus::Accepted => counts.accepted += 1,
                RequestStatus::Rejected => counts.rejected += 1,
                RequestStatus::Completed => counts.completed += 1,
            }
        }
        Ok(counts)
    }

    /// Issue the conditional write for a planned transition and resolve
    /// the lost-race case.
    async fn apply(
        &self,
        current: &WaterRequest,
        tx: Transition,
    ) -> Result<(WaterRequest, TransitionEvent), DispatchError> {
        let affected = self
            .store
            .update_if(current.id, tx.expected, tx.patch)
            .await?;

        if affected == 0 {
            // Someone else transitioned the row between our read and
            // our write. Re-read so the error names the real state.
            let from = self
                .store
                .get(current.id)
                .await?
                .map(|r| r.status)
                .ok_or(DispatchError::NotFound(current.id))?;
            tracing::warn!(
                request_id = %current.id,
                from = %from,
                to = %tx.patch.status,
                "transition lost race"
            );
            return Err(DispatchError::InvalidTransition {
                from,
                to: tx.patch.status,
            });
        }

        tracing::info!(
            request_id = %current.id,
            from = %tx.event.from,
            to = %tx.event.to,
            "request transitioned"
        );
        Ok((current.with_patch(&tx.patch), tx.event))
    }
}
