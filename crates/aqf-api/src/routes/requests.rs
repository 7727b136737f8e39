//! # Request Intake API
//!
//! Routes:
//! - POST /v1/requests — resident places a water request
//! - GET  /v1/requests/{id} — fetch one request
//! - GET  /v1/requests — listing, filterable by status and resident

use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use aqf_core::{PriceQuote, RequestId, ResidentId, Urgency};
use aqf_state::{NewRequest, RequestStatus, WaterRequest};

use crate::error::AppError;
use crate::routes::quotes::QuoteView;
use crate::state::AppState;

/// API-layer view of a water request.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RequestView {
    pub id: Uuid,
    pub resident_id: Uuid,
    pub address: String,
    pub volume_liters: u32,
    /// Urgency tier: "high", "medium", or "low".
    #[schema(value_type = String)]
    pub urgency: Urgency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Lifecycle status: "pending", "accepted", "rejected", "completed".
    #[schema(value_type = String)]
    pub status: RequestStatus,
    pub assigned_driver_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<WaterRequest> for RequestView {
    fn from(r: WaterRequest) -> Self {
        Self {
            id: r.id.0,
            resident_id: r.resident_id.0,
            address: r.address,
            volume_liters: r.volume_liters,
            urgency: r.urgency,
            details: r.details,
            status: r.status,
            assigned_driver_id: r.assigned_driver_id.map(|d| d.0),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Request body for creating a water request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRequestBody {
    pub resident_id: Uuid,
    pub address: String,
    pub volume_liters: i64,
    /// "high", "medium", or "low".
    #[schema(value_type = String)]
    pub urgency: Urgency,
    #[serde(default)]
    pub details: Option<String>,
}

/// Response for a created request: the stored record plus an
/// informational quote. The quote is never persisted.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedRequestResponse {
    pub request: RequestView,
    pub quote: QuoteView,
}

/// Listing filters.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Restrict to one lifecycle status.
    pub status: Option<RequestStatus>,
    /// Restrict to one resident's history.
    pub resident_id: Option<Uuid>,
}

/// Build the request intake router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/requests", post(create_request).get(list_requests))
        .route("/v1/requests/{id}", get(get_request))
}

/// POST /v1/requests — Create a water request.
#[utoipa::path(
    post,
    path = "/v1/requests",
    request_body = CreateRequestBody,
    responses(
        (status = 201, description = "Request created", body = CreatedRequestResponse),
        (status = 422, description = "Validation failure", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub(crate) async fn create_request(
    State(state): State<AppState>,
    Json(body): Json<CreateRequestBody>,
) -> Result<(axum::http::StatusCode, Json<CreatedRequestResponse>), AppError> {
    let request = state
        .manager
        .create_request(NewRequest {
            resident_id: ResidentId(body.resident_id),
            address: body.address,
            volume_liters: body.volume_liters,
            urgency: body.urgency,
            details: body.details,
        })
        .await?;

    // The stored volume already passed validation, so this cannot fail.
    let quote = PriceQuote::with_defaults(i64::from(request.volume_liters))?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(CreatedRequestResponse {
            request: request.into(),
            quote: quote.into(),
        }),
    ))
}

/// GET /v1/requests/{id} — Fetch one request.
#[utoipa::path(
    get,
    path = "/v1/requests/{id}",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Request found", body = RequestView),
        (status = 404, description = "Unknown request", body = crate::error::ErrorBody),
    ),
    tag = "requests"
)]
pub(crate) async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestView>, AppError> {
    let request = state.manager.get(RequestId(id)).await?;
    Ok(Json(request.into()))
}

/// GET /v1/requests — List requests, filterable by status and resident.
#[utoipa::path(
    get,
    path = "/v1/requests",
    params(
        ("status" = Option<String>, Query, description = "Filter by lifecycle status"),
        ("resident_id" = Option<Uuid>, Query, description = "Filter by resident"),
    ),
    responses(
        (status = 200, description = "Matching requests, oldest first", body = [RequestView]),
    ),
    tag = "requests"
)]
pub(crate) async fn list_requests(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<RequestView>>, AppError> {
    let rows = match (query.resident_id, query.status) {
        (Some(resident), status) => {
            let mut rows = state
                .manager
                .list_by_resident(ResidentId(resident))
                .await?;
            if let Some(status) = status {
                rows.retain(|r| r.status == status);
            }
            rows
        }
        (None, Some(status)) => state.manager.list_by_status(status).await?,
        (None, None) => state.manager.list_all().await?,
    };

    Ok(Json(rows.into_iter().map(RequestView::from).collect()))
}
