//! Cart route handlers.
//!
//! The cart is kept in the caller's session. Lines are always resolved from
//! `supplier_products`, so prices, names and verification flags come from the
//! catalog rather than from the client.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use pharmahub_core::{Cart, CartItem, CheckoutSummary, SupplierProductId};

use crate::db::ListingRepository;
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::services::cart::CartSession;
use crate::state::AppState;

// =============================================================================
// Request / Response Types
// =============================================================================

/// One requested cart line.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LineRequest {
    pub supplier_product_id: SupplierProductId,
    pub quantity: u32,
}

/// Replace-cart request body.
#[derive(Debug, Deserialize)]
pub struct SetItemsRequest {
    #[serde(default)]
    pub items: Vec<LineRequest>,
}

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub supplier_product_id: SupplierProductId,
    pub quantity: Option<u32>,
}

/// Quantity update request body.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

/// Cart contents with derived totals.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub item_count: u64,
    pub summary: CheckoutSummary,
}

impl CartResponse {
    fn new(cart: &Cart, state: &AppState) -> Self {
        let summary = state.fees().compute(cart.items());
        let item_count = cart.item_count();
        Self {
            items: cart.items().to_vec(),
            item_count,
            summary,
        }
    }
}

// =============================================================================
// Line Resolution
// =============================================================================

/// Resolve requested lines against the catalog.
///
/// Zero-quantity lines are skipped without a lookup. Any unknown listing ID
/// fails the whole request with 404.
pub(crate) async fn resolve_lines(state: &AppState, lines: &[LineRequest]) -> Result<Vec<CartItem>> {
    let wanted: Vec<LineRequest> = lines.iter().copied().filter(|l| l.quantity > 0).collect();
    let ids: Vec<SupplierProductId> = wanted.iter().map(|l| l.supplier_product_id).collect();
    let listings = ListingRepository::new(state.pool()).get_listings(&ids).await?;

    wanted
        .iter()
        .map(|line| {
            listings
                .iter()
                .find(|listing| listing.id == line.supplier_product_id)
                .map(|listing| listing.to_cart_item(line.quantity))
                .ok_or_else(|| {
                    AppError::NotFound(format!("Listing not found: {}", line.supplier_product_id))
                })
        })
        .collect()
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the cart.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartResponse>> {
    let cart = CartSession::new(&session).load().await?;
    Ok(Json(CartResponse::new(&cart, &state)))
}

/// Replace the cart contents.
#[instrument(skip(state, session, request), fields(lines = request.items.len()))]
pub async fn set_items(
    State(state): State<AppState>,
    session: Session,
    ApiJson(request): ApiJson<SetItemsRequest>,
) -> Result<Json<CartResponse>> {
    let items = resolve_lines(&state, &request.items).await?;
    let (cart, ()) = CartSession::new(&session)
        .modify(|cart| cart.set_items(items))
        .await?;
    Ok(Json(CartResponse::new(&cart, &state)))
}

/// Add a listing to the cart, merging with an existing line.
#[instrument(skip(state, session))]
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    ApiJson(request): ApiJson<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    let quantity = request.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest("Quantity must be at least 1".to_string()));
    }

    let listing = ListingRepository::new(state.pool())
        .get_listing(request.supplier_product_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Listing not found: {}", request.supplier_product_id))
        })?;

    let (cart, ()) = CartSession::new(&session)
        .modify(|cart| cart.add_item(listing.to_cart_item(quantity)))
        .await?;

    tracing::info!(listing_id = %listing.id, quantity, "Added to cart");
    Ok(Json(CartResponse::new(&cart, &state)))
}

/// Set the quantity of a line. A quantity of 0 removes the line.
#[instrument(skip(state, session))]
pub async fn update_quantity(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<SupplierProductId>,
    ApiJson(request): ApiJson<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>> {
    let (cart, existed) = CartSession::new(&session)
        .modify(|cart| cart.update_quantity(id, request.quantity))
        .await?;

    if !existed {
        return Err(AppError::NotFound("Item not in cart".to_string()));
    }
    Ok(Json(CartResponse::new(&cart, &state)))
}

/// Remove a line. Removing an absent line is not an error.
#[instrument(skip(state, session))]
pub async fn remove_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<SupplierProductId>,
) -> Result<Json<CartResponse>> {
    let (cart, ()) = CartSession::new(&session)
        .modify(|cart| cart.remove_item(id))
        .await?;
    Ok(Json(CartResponse::new(&cart, &state)))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartResponse>> {
    let (cart, ()) = CartSession::new(&session)
        .modify(Cart::clear)
        .await?;
    Ok(Json(CartResponse::new(&cart, &state)))
}

/// Checkout totals for the current cart.
#[instrument(skip(state, session))]
pub async fn summary(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CheckoutSummary>> {
    let cart = CartSession::new(&session).load().await?;
    Ok(Json(state.fees().compute(cart.items())))
}
