//! # Admin API
//!
//! GET /v1/stats reports request counts per lifecycle status for the
//! operations dashboard.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::state::AppState;

/// Per-status request counts plus the overall total.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatsView {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub completed: usize,
    pub total: usize,
}

/// Build the admin router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/stats", get(stats))
}

/// GET /v1/stats — Request counts per lifecycle status.
#[utoipa::path(
    get,
    path = "/v1/stats",
    responses(
        (status = 200, description = "Per-status request counts", body = StatsView),
    ),
    tag = "admin"
)]
pub(crate) async fn stats(State(state): State<AppState>) -> Result<Json<StatsView>, AppError> {
    let counts = state.manager.status_counts().await?;
    Ok(Json(StatsView {
        pending: counts.pending,
        accepted: counts.accepted,
        rejected: counts.rejected,
        completed: counts.completed,
        total: counts.total(),
    }))
}
