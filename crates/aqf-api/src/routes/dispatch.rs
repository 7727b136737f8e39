//! # Dispatch API
//!
//! Driver-facing surface:
//! - GET  /v1/dispatch/queue — pending requests, most urgent first
//! - POST /v1/requests/{id}/accept — driver claims a pending request
//! - POST /v1/requests/{id}/reject — driver declines a pending request
//! - POST /v1/requests/{id}/complete — assigned driver marks delivery done
//!
//! Each successful transition emits a [`TransitionEvent`] to the
//! application's notification sink after the write is durable.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use aqf_core::{DriverId, RequestId};
use aqf_state::TransitionEvent;

use crate::error::AppError;
use crate::routes::requests::RequestView;
use crate::state::AppState;

/// Request body for driver-initiated transitions.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DriverActionBody {
    pub driver_id: Uuid,
}

/// Build the dispatch router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/dispatch/queue", get(dispatch_queue))
        .route("/v1/requests/{id}/accept", post(accept_request))
        .route("/v1/requests/{id}/reject", post(reject_request))
        .route("/v1/requests/{id}/complete", post(complete_request))
}

async fn emit(state: &AppState, event: &TransitionEvent) {
    state.notifier.notify(event).await;
}

/// GET /v1/dispatch/queue — Pending requests ordered by urgency.
#[utoipa::path(
    get,
    path = "/v1/dispatch/queue",
    responses(
        (status = 200, description = "Pending queue, most urgent first", body = [RequestView]),
    ),
    tag = "dispatch"
)]
pub(crate) async fn dispatch_queue(
    State(state): State<AppState>,
) -> Result<Json<Vec<RequestView>>, AppError> {
    let queue = state.manager.driver_queue().await?;
    Ok(Json(queue.into_iter().map(RequestView::from).collect()))
}

/// POST /v1/requests/{id}/accept — Claim a pending request.
#[utoipa::path(
    post,
    path = "/v1/requests/{id}/accept",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = DriverActionBody,
    responses(
        (status = 200, description = "Request accepted", body = RequestView),
        (status = 404, description = "Unknown request", body = crate::error::ErrorBody),
        (status = 409, description = "Not pending", body = crate::error::ErrorBody),
    ),
    tag = "dispatch"
)]
pub(crate) async fn accept_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DriverActionBody>,
) -> Result<Json<RequestView>, AppError> {
    let (request, event) = state
        .manager
        .accept(RequestId(id), DriverId(body.driver_id))
        .await?;
    emit(&state, &event).await;
    Ok(Json(request.into()))
}

/// POST /v1/requests/{id}/reject — Decline a pending request.
#[utoipa::path(
    post,
    path = "/v1/requests/{id}/reject",
    params(("id" = Uuid, Path, description = "Request ID")),
    request_body = DriverActionBody,
    responses(
        (status = 200, description = "Request rejected", body = RequestView),
        (status = 404, description = "Unknown request", body = crate::error::ErrorBody),
        (status = 409, description = "Not pending", body = crate::error::ErrorBody),
    ),
    tag = "dispatch"
)]
pub(crate) async fn reject_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<DriverActionBody>,
) -> Result<Json<RequestView>, AppError> {
    let (request, event) = state
        .manager
        .reject(RequestId(id), DriverId(body.driver_id))
        .await?;
    emit(&state, &event).await;
    Ok(Json(request.into()))
}

/// POST /v1/requests/{id}/complete — Mark an accepted delivery done.
#[utoipa::path(
    post,
    path = "/v1/requests/{id}/complete",
    params(("id" = Uuid, Path, description = "Request ID")),
    responses(
        (status = 200, description = "Delivery completed", body = RequestView),
        (status = 404, description = "Unknown request", body = crate::error::ErrorBody),
        (status = 409, description = "Not accepted", body = crate::error::ErrorBody),
    ),
    tag = "dispatch"
)]
pub(crate) async fn complete_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RequestView>, AppError> {
    let (request, event) = state.manager.complete(RequestId(id)).await?;
    emit(&state, &event).await;
    Ok(Json(request.into()))
}
