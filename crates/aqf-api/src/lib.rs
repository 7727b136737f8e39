//! # aqf-api — Axum HTTP Services for AquaFlow
//!
//! The HTTP layer over the request lifecycle manager. Residents place
//! water requests, drivers work the dispatch queue, and operations
//! staff read statistics.
//!
//! ## API Surface
//!
//! | Prefix                  | Module                  | Domain                  |
//! |-------------------------|-------------------------|-------------------------|
//! | `/v1/requests/*`        | [`routes::requests`]    | Resident intake         |
//! | `/v1/dispatch/*`        | [`routes::dispatch`]    | Driver queue            |
//! | `/v1/requests/{id}/...` | [`routes::dispatch`]    | Delivery transitions    |
//! | `/v1/quotes`            | [`routes::quotes`]      | Price estimation        |
//! | `/v1/stats`             | [`routes::admin`]       | Operations statistics   |
//!
//! ## OpenAPI
//!
//! Auto-generated spec via utoipa derive macros at `/openapi.json`.

pub mod error;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assemble the full application router.
///
/// Health probes (`/health/*`) are mounted before the trace layer so
/// probe traffic stays out of the request logs.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::requests::router())
        .merge(routes::dispatch::router())
        .merge(routes::quotes::router())
        .merge(routes::admin::router())
        .merge(openapi::router())
        .layer(TraceLayer::new_for_http());

    let health = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    Router::new().merge(health).merge(api).with_state(state)
}

/// Liveness probe — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe — verifies the database connection when one is
/// configured. In-memory deployments are always ready.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, StatusCode> {
    if let Some(pool) = &state.db_pool {
        sqlx::query("SELECT 1")
            .execute(pool)
            .await
            .map_err(|e| {
                tracing::error!("readiness check failed: {e}");
                StatusCode::SERVICE_UNAVAILABLE
            })?;
    }
    Ok("ready")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_liveness_probe() {
        let app = app(AppState::in_memory());
        let response = app
            .oneshot(
                Request::get("/health/liveness")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_without_database() {
        let app = app(AppState::in_memory());
        let response = app
            .oneshot(
                Request::get("/health/readiness")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = app(AppState::in_memory());
        let response = app
            .oneshot(Request::get("/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
