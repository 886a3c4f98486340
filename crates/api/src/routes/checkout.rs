//! Checkout quote handler.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::instrument;

use pharmahub_core::CheckoutSummary;

use super::cart::{LineRequest, resolve_lines};
use crate::error::Result;
use crate::extract::ApiJson;
use crate::state::AppState;

/// Quote request body.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub items: Vec<LineRequest>,
}

/// Stateless totals for the posted lines, priced from the catalog.
#[instrument(skip(state, request), fields(lines = request.items.len()))]
pub async fn quote(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<QuoteRequest>,
) -> Result<Json<CheckoutSummary>> {
    let items = resolve_lines(&state, &request.items).await?;
    Ok(Json(state.fees().compute(&items)))
}
