//! Supplier directory route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use pharmahub_core::SupplierId;

use crate::db::{ListingRepository, SupplierRepository};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::{ListingView, Supplier};
use crate::services::auth::Principal;
use crate::state::AppState;

/// Look up the supplier account for `principal`, if any.
pub(crate) async fn supplier_for(state: &AppState, principal: &Principal) -> Result<Option<Supplier>> {
    let Some(email) = principal.email.as_ref() else {
        return Ok(None);
    };
    Ok(SupplierRepository::new(state.pool())
        .find_by_email(email.as_str())
        .await?)
}

/// List every supplier.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Supplier>>> {
    let suppliers = SupplierRepository::new(state.pool()).list_all().await?;
    Ok(Json(suppliers))
}

/// The supplier account linked to the caller's email.
#[instrument(skip_all, fields(user_id = %principal.user_id))]
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
) -> Result<Json<Supplier>> {
    supplier_for(&state, &principal)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No supplier account for this user".to_string()))
}

/// A single supplier.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<SupplierId>,
) -> Result<Json<Supplier>> {
    SupplierRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Supplier not found".to_string()))
}

/// Everything a supplier lists.
#[instrument(skip(state))]
pub async fn products(
    State(state): State<AppState>,
    Path(id): Path<SupplierId>,
) -> Result<Json<Vec<ListingView>>> {
    if SupplierRepository::new(state.pool()).get(id).await?.is_none() {
        return Err(AppError::NotFound("Supplier not found".to_string()));
    }

    let listings = ListingRepository::new(state.pool())
        .list_for_supplier(id)
        .await?;
    Ok(Json(listings))
}
