//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AquaFlow API — Water Tanker Dispatch",
        version = "0.1.0",
        description = "Request lifecycle management for community water tanker deliveries: \
                       resident intake, driver dispatch queue, delivery transitions, price \
                       quotes, and admin statistics.",
        license(name = "MIT")
    ),
    paths(
        // Requests
        crate::routes::requests::create_request,
        crate::routes::requests::get_request,
        crate::routes::requests::list_requests,
        // Dispatch
        crate::routes::dispatch::dispatch_queue,
        crate::routes::dispatch::accept_request,
        crate::routes::dispatch::reject_request,
        crate::routes::dispatch::complete_request,
        // Quotes
        crate::routes::quotes::create_quote,
        // Admin
        crate::routes::admin::stats,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::requests::RequestView,
        crate::routes::requests::CreateRequestBody,
        crate::routes::requests::CreatedRequestResponse,
        crate::routes::dispatch::DriverActionBody,
        crate::routes::quotes::QuoteBody,
        crate::routes::quotes::QuoteView,
        crate::routes::admin::StatsView,
    )),
    tags(
        (name = "requests", description = "Resident request intake and listing"),
        (name = "dispatch", description = "Driver queue and delivery transitions"),
        (name = "quotes", description = "Delivery price estimation"),
        (name = "admin", description = "Operations statistics"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
