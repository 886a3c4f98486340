//! Supplier listing management.
//!
//! Only suppliers may manage listings, and only their own. The caller is
//! matched to a supplier by email; no match is 403. A listing owned by another
//! supplier is reported as 404 so IDs cannot be guessed.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use pharmahub_core::{BrandedProductId, SupplierProductId};

use super::suppliers::supplier_for;
use crate::db::ListingRepository;
use crate::error::{AppError, Result};
use crate::extract::ApiJson;
use crate::middleware::RequireAuth;
use crate::models::{Listing, ListingUpdate, NewListing, Supplier};
use crate::services::auth::Principal;
use crate::state::AppState;

const DEFAULT_UNIT: &str = "pack";

/// `supplier_products.price` is `NUMERIC(12, 2)`.
const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 10_000_000_000;

/// Create-listing request body. Every field is optional at the wire level so
/// missing fields produce our own 400 message.
#[derive(Debug, Default, Deserialize)]
pub struct CreateListingRequest {
    pub branded_product_id: Option<BrandedProductId>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub unit: Option<String>,
    pub image_url: Option<String>,
}

impl CreateListingRequest {
    fn validate(self) -> Result<NewListing> {
        let branded_product_id = self
            .branded_product_id
            .ok_or_else(|| AppError::BadRequest("branded_product_id is required".to_string()))?;
        let price = self
            .price
            .ok_or_else(|| AppError::BadRequest("price is required".to_string()))?;
        let stock_quantity = self.stock_quantity.unwrap_or(0);
        let unit = match self.unit.as_deref().map(str::trim) {
            None => DEFAULT_UNIT.to_string(),
            Some("") => return Err(AppError::BadRequest("unit must not be blank".to_string())),
            Some(unit) => unit.to_string(),
        };

        validate_amounts(Some(price), Some(stock_quantity))?;

        Ok(NewListing {
            branded_product_id,
            price,
            stock_quantity,
            unit,
            image_url: self.image_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

fn validate_amounts(price: Option<Decimal>, stock_quantity: Option<i32>) -> Result<()> {
    if let Some(price) = price {
        if price < Decimal::ZERO {
            return Err(AppError::BadRequest("price must not be negative".to_string()));
        }
        if price >= Decimal::from(PRICE_LIMIT) {
            return Err(AppError::BadRequest(
                "price must be less than 10000000000".to_string(),
            ));
        }
        if price.normalize().scale() > PRICE_SCALE {
            return Err(AppError::BadRequest(
                "price must have at most 2 decimal places".to_string(),
            ));
        }
    }
    if stock_quantity.is_some_and(|q| q < 0) {
        return Err(AppError::BadRequest(
            "stock_quantity must not be negative".to_string(),
        ));
    }
    Ok(())
}

fn validate_update(update: &ListingUpdate) -> Result<()> {
    if update.is_empty() {
        return Err(AppError::BadRequest("Nothing to update".to_string()));
    }
    if update.unit.as_deref().is_some_and(|u| u.trim().is_empty()) {
        return Err(AppError::BadRequest("unit must not be blank".to_string()));
    }
    validate_amounts(update.price, update.stock_quantity)
}

async fn require_supplier(state: &AppState, principal: &Principal) -> Result<Supplier> {
    supplier_for(state, principal).await?.ok_or_else(|| {
        AppError::Forbidden("Only suppliers can manage listings".to_string())
    })
}

/// Create a listing for the caller's supplier account.
#[instrument(skip_all, fields(user_id = %principal.user_id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    ApiJson(request): ApiJson<CreateListingRequest>,
) -> Result<(StatusCode, Json<Listing>)> {
    let new_listing = request.validate()?;
    let supplier = require_supplier(&state, &principal).await?;

    let listing = ListingRepository::new(state.pool())
        .create(supplier.id, &new_listing)
        .await?;

    tracing::info!(
        listing_id = %listing.id,
        supplier_id = %supplier.id,
        "Listing created"
    );
    Ok((StatusCode::CREATED, Json(listing)))
}

/// Update price, stock, unit or image of an owned listing.
#[instrument(skip_all, fields(user_id = %principal.user_id, listing_id = %id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<SupplierProductId>,
    ApiJson(update): ApiJson<ListingUpdate>,
) -> Result<Json<Listing>> {
    validate_update(&update)?;
    let supplier = require_supplier(&state, &principal).await?;

    ListingRepository::new(state.pool())
        .update(id, supplier.id, &update)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Listing not found".to_string()))
}

/// Delete an owned listing.
#[instrument(skip_all, fields(user_id = %principal.user_id, listing_id = %id))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(principal): RequireAuth,
    Path(id): Path<SupplierProductId>,
) -> Result<StatusCode> {
    let supplier = require_supplier(&state, &principal).await?;

    if ListingRepository::new(state.pool()).delete(id, supplier.id).await? {
        tracing::info!(supplier_id = %supplier.id, "Listing deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Listing not found".to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request() -> CreateListingRequest {
        CreateListingRequest {
            branded_product_id: Some(BrandedProductId::new(4)),
            price: Some(Decimal::new(1250, 0)),
            ..CreateListingRequest::default()
        }
    }

    #[test]
    fn test_defaults_applied() {
        let listing = request().validate().unwrap();
        assert_eq!(listing.unit, "pack");
        assert_eq!(listing.stock_quantity, 0);
        assert!(listing.image_url.is_none());
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = CreateListingRequest::default().validate().unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = CreateListingRequest {
            price: None,
            ..request()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "Bad request: price is required");
    }

    #[test]
    fn test_negative_values_rejected() {
        let negative_price = CreateListingRequest {
            price: Some(Decimal::new(-1, 0)),
            ..request()
        };
        assert!(negative_price.validate().is_err());

        let negative_stock = CreateListingRequest {
            stock_quantity: Some(-3),
            ..request()
        };
        assert!(negative_stock.validate().is_err());
    }

    #[test]
    fn test_price_must_fit_column() {
        let too_large = CreateListingRequest {
            price: Some(Decimal::from(PRICE_LIMIT)),
            ..request()
        };
        assert_eq!(
            too_large.validate().unwrap_err().status(),
            StatusCode::BAD_REQUEST
        );

        let largest = CreateListingRequest {
            price: Some(Decimal::new(999_999_999_999, 2)),
            ..request()
        };
        assert!(largest.validate().is_ok());

        let fractional_kobo = CreateListingRequest {
            price: Some(Decimal::new(12_345, 3)),
            ..request()
        };
        assert!(fractional_kobo.validate().is_err());

        let trailing_zeros = CreateListingRequest {
            price: Some(Decimal::new(1_500_000, 3)),
            ..request()
        };
        assert!(trailing_zeros.validate().is_ok());

        assert!(
            validate_update(&ListingUpdate {
                price: Some(Decimal::new(2, 0) * Decimal::from(PRICE_LIMIT)),
                ..ListingUpdate::default()
            })
            .is_err()
        );
    }

    #[test]
    fn test_blank_unit_rejected() {
        let blank = CreateListingRequest {
            unit: Some("  ".to_string()),
            ..request()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_update_validation() {
        assert!(validate_update(&ListingUpdate::default()).is_err());
        assert!(
            validate_update(&ListingUpdate {
                stock_quantity: Some(12),
                ..ListingUpdate::default()
            })
            .is_ok()
        );
        assert!(
            validate_update(&ListingUpdate {
                price: Some(Decimal::new(-50, 1)),
                ..ListingUpdate::default()
            })
            .is_err()
        );
    }
}
