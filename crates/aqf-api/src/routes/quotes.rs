//! # Price Quote API
//!
//! POST /v1/quotes computes a delivery price for a requested volume
//! without creating a request. Quotes are pure reads: nothing is
//! persisted and no ID is issued.

use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use aqf_core::PriceQuote;

use crate::error::AppError;
use crate::state::AppState;

/// Request body for a price quote.
#[derive(Debug, Deserialize, ToSchema)]
pub struct QuoteBody {
    pub volume_liters: i64,
}

/// API-layer view of a computed price quote.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct QuoteView {
    pub volume_liters: u32,
    pub base_fee: f64,
    pub per_liter_rate: f64,
    pub total: f64,
}

impl From<PriceQuote> for QuoteView {
    fn from(q: PriceQuote) -> Self {
        Self {
            volume_liters: q.volume_liters,
            base_fee: q.base_fee,
            per_liter_rate: q.per_liter_rate,
            total: q.total,
        }
    }
}

/// Build the quote router.
pub fn router() -> Router<AppState> {
    Router::new().route("/v1/quotes", post(create_quote))
}

/// POST /v1/quotes — Compute a delivery price for a volume.
#[utoipa::path(
    post,
    path = "/v1/quotes",
    request_body = QuoteBody,
    responses(
        (status = 200, description = "Computed quote", body = QuoteView),
        (status = 422, description = "Non-positive volume", body = crate::error::ErrorBody),
    ),
    tag = "quotes"
)]
pub(crate) async fn create_quote(Json(body): Json<QuoteBody>) -> Result<Json<QuoteView>, AppError> {
    let quote = PriceQuote::with_defaults(body.volume_liters)?;
    Ok(Json(quote.into()))
}
