//! # In-Memory Store
//!
//! Thread-safe map-backed implementation of [`RequestStore`]. Backs
//! tests and deployments without a configured database.
//!
//! All lock operations are synchronous (`parking_lot`, not
//! `tokio::sync`) because the lock is never held across an `.await`
//! point. `parking_lot::RwLock` is non-poisonable — a panicking writer
//! does not permanently corrupt the store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use aqf_core::{RequestId, ResidentId};
use aqf_state::{RequestPatch, RequestStatus, WaterRequest};

use crate::error::StoreError;
use crate::store::RequestStore;

/// In-memory request store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Arc<RwLock<HashMap<Uuid, WaterRequest>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
        }
    }
}

#[async_trait]
impl RequestStore for MemoryStore {
    async fn insert(&self, request: &WaterRequest) -> Result<(), StoreError> {
        self.data.write().insert(request.id.0, request.clone());
        Ok(())
    }

    async fn get(&self, id: RequestId) -> Result<Option<WaterRequest>, StoreError> {
        Ok(self.data.read().get(&id.0).cloned())
    }

    async fn update_if(
        &self,
        id: RequestId,
        expected: RequestStatus,
        patch: RequestPatch,
    ) -> Result<u64, StoreError> {
        // Check-and-set under a single write lock: no TOCTOU window
        // between reading the status and applying the patch.
        let mut guard = self.data.write();
        match guard.get_mut(&id.0) {
            Some(row) if row.status == expected => {
                *row = row.with_patch(&patch);
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn list_by_status(&self, status: RequestStatus) -> Result<Vec<WaterRequest>, StoreError> {
        let mut rows: Vec<WaterRequest> = self
            .data
            .read()
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.created_at);
        Ok(rows)
    }

    async fn list_by_resident(
        &self,
        resident: ResidentId,
    ) -> Result<Vec<WaterRequest>, StoreError> {
        let mut rows: Vec<WaterRequest> = self
            .data
            .read()
            .values()
            .filter(|r| r.resident_id == resident)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.created_at);
        Ok(rows)
    }

    async fn list_all(&self) -> Result<Vec<WaterRequest>, StoreError> {
        let mut rows: Vec<WaterRequest> = self.data.read().values().cloned().collect();
        rows.sort_by_key(|r| r.created_at);
        Ok(rows)
    }
}
