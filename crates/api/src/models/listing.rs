//! Supplier listings (`supplier_products`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use pharmahub_core::{BrandedProductId, CartItem, SupplierId, SupplierProductId};

/// A listing row as stored.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub id: SupplierProductId,
    pub supplier_id: SupplierId,
    pub branded_product_id: BrandedProductId,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub unit: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A listing joined with its product and supplier, as buyers see it.
#[derive(Debug, Clone, Serialize)]
pub struct ListingView {
    pub id: SupplierProductId,
    pub supplier_id: SupplierId,
    pub supplier_name: String,
    pub branded_product_id: BrandedProductId,
    pub brand_name: String,
    pub nafdac_code: String,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub unit: String,
    pub image_url: Option<String>,
    pub verified: bool,
}

impl ListingView {
    /// Build a cart line for `quantity` units of this listing.
    #[must_use]
    pub fn to_cart_item(&self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id,
            name: self.brand_name.clone(),
            unit_price: self.price,
            quantity,
            unit: self.unit.clone(),
            supplier_name: self.supplier_name.clone(),
            verified: self.verified,
            image_ref: self.image_url.clone(),
        }
    }
}

/// Validated input for a new listing.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub branded_product_id: BrandedProductId,
    pub price: Decimal,
    pub stock_quantity: i32,
    pub unit: String,
    pub image_url: Option<String>,
}

/// Partial update of a listing. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingUpdate {
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i32>,
    pub unit: Option<String>,
    pub image_url: Option<String>,
}

impl ListingUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.price.is_none()
            && self.stock_quantity.is_none()
            && self.unit.is_none()
            && self.image_url.is_none()
    }
}
