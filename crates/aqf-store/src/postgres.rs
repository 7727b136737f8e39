//! # PostgreSQL Store
//!
//! SQLx-backed implementation of [`RequestStore`]. Status transitions
//! use `UPDATE ... WHERE id = $1 AND status = $2` and report
//! `rows_affected()`, so the database resolves transition races: the
//! losing writer matches zero rows.
//!
//! Enum fields are stored as their `snake_case` strings and
//! re-validated on read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions};
use uuid::Uuid;

use aqf_core::{DriverId, RequestId, ResidentId, Urgency};
use aqf_state::{RequestPatch, RequestStatus, WaterRequest};

use crate::error::StoreError;
use crate::store::RequestStore;

/// Initialize the database connection pool and run embedded migrations.
///
/// Returns `None` if `DATABASE_URL` is not set (in-memory-only mode).
/// Returns `Err` if the URL is set but the connection or migration fails.
pub async fn init_pool() -> Result<Option<PgPool>, sqlx::Error> {
    let url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!(
                "DATABASE_URL not set — running in-memory only mode. \
                 Requests will not survive restarts."
            );
            return Ok(None);
        }
    };

    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect(&url)
        .await?;

    tracing::info!("Connected to PostgreSQL");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations applied");

    Ok(Some(pool))
}

/// PostgreSQL-backed request store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Access the underlying pool (health checks).
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

const SELECT_COLUMNS: &str = "id, resident_id, address, volume_liters, urgency, details, \
     status, assigned_driver_id, created_at, updated_at";

#[async_trait]
impl RequestStore for PgStore {
    async fn insert(&self, request: &WaterRequest) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO water_requests \
             (id, resident_id, address, volume_liters, urgency, details, \
              status, assigned_driver_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(request.id.0)
        .bind(request.resident_id.0)
        .bind(&request.address)
        .bind(i64::from(request.volume_liters))
        .bind(request.urgency.as_str())
        .bind(&request.details)
        .bind(request.status.as_str())
        .bind(request.assigned_driver_id.map(|d| d.0))
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: RequestId) -> Result<Option<WaterRequest>, StoreError> {
        let row = sqlx::query_as::<_, RequestRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM water_requests WHERE id = $1"
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RequestRow::into_record).transpose()
    }

    async fn update_if(
        &self,
        id: RequestId,
        expected: RequestStatus,
        patch: RequestPatch,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(
            "UPDATE water_requests \
             SET status = $1, assigned_driver_id = $2, updated_at = $3 \
             WHERE id = $4 AND status = $5",
        )
        .bind(patch.status.as_str())
        .bind(patch.assigned_driver_id.map(|d| d.0))
        .bind(patch.updated_at)
        .bind(id.0)
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn list_by_status(&self, status: RequestStatus) -> Result<Vec<WaterRequest>, StoreError> {
        let rows = sqlx::query_as::<_, RequestRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM water_requests \
             WHERE status = $1 ORDER BY created_at"
        ))
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RequestRow::into_record).collect()
    }

    async fn list_by_resident(
        &self,
        resident: ResidentId,
    ) -> Result<Vec<WaterRequest>, StoreError> {
        let rows = sqlx::query_as::<_, RequestRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM water_requests \
             WHERE resident_id = $1 ORDER BY created_at"
        ))
        .bind(resident.0)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RequestRow::into_record).collect()
    }

    async fn list_all(&self) -> Result<Vec<WaterRequest>, StoreError> {
        let rows = sqlx::query_as::<_, RequestRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM water_requests ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RequestRow::into_record).collect()
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct RequestRow {
    id: Uuid,
    resident_id: Uuid,
    address: String,
    volume_liters: i64,
    urgency: String,
    details: Option<String>,
    status: String,
    assigned_driver_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RequestRow {
    fn into_record(self) -> Result<WaterRequest, StoreError> {
        let status = RequestStatus::parse(&self.status).ok_or_else(|| StoreError::CorruptRecord {
            id: self.id,
            reason: format!("unknown status {:?}", self.status),
        })?;
        let urgency = parse_urgency(&self.urgency).ok_or_else(|| StoreError::CorruptRecord {
            id: self.id,
            reason: format!("unknown urgency {:?}", self.urgency),
        })?;
        let volume_liters =
            u32::try_from(self.volume_liters).map_err(|_| StoreError::CorruptRecord {
                id: self.id,
                reason: format!("volume_liters out of range: {}", self.volume_liters),
            })?;

        Ok(WaterRequest {
            id: RequestId(self.id),
            resident_id: ResidentId(self.resident_id),
            address: self.address,
            volume_liters,
            urgency,
            details: self.details,
            status,
            assigned_driver_id: self.assigned_driver_id.map(DriverId),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn parse_urgency(s: &str) -> Option<Urgency> {
    match s {
        "high" => Some(Urgency::High),
        "medium" => Some(Urgency::Medium),
        "low" => Some(Urgency::Low),
        _ => None,
    }
}
