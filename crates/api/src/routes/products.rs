//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use pharmahub_core::BrandedProductId;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::models::BrandedProduct;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Catalog search parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<i64>,
}

impl SearchParams {
    fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }
}

/// Search the catalog by brand name, generic name or NAFDAC code.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<BrandedProduct>>> {
    let products = ProductRepository::new(state.pool())
        .search(params.q.as_deref(), params.limit())
        .await?;
    Ok(Json(products))
}

/// A single catalog entry.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<BrandedProductId>,
) -> Result<Json<BrandedProduct>> {
    ProductRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
}
