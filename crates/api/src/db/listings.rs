//! Supplier listing repository (`supplier_products`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use pharmahub_core::{BrandedProductId, SupplierId, SupplierProductId};

use super::RepositoryError;
use crate::models::{Listing, ListingUpdate, ListingView, NewListing};

const LISTING_COLUMNS: &str = "id, supplier_id, branded_product_id, price, stock_quantity, unit, \
                               image_url, created_at, updated_at";

const VIEW_SELECT: &str = r"
    SELECT sp.id, sp.supplier_id, s.name AS supplier_name,
           sp.branded_product_id, b.brand_name, b.nafdac_code,
           sp.price, sp.stock_quantity, sp.unit, sp.image_url,
           (b.is_verified AND s.is_verified) AS verified
    FROM supplier_products sp
    JOIN suppliers s ON s.id = sp.supplier_id
    JOIN branded_products b ON b.id = sp.branded_product_id
";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ListingRow {
    id: i32,
    supplier_id: i32,
    branded_product_id: i32,
    price: Decimal,
    stock_quantity: i32,
    unit: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Self {
            id: SupplierProductId::new(row.id),
            supplier_id: SupplierId::new(row.supplier_id),
            branded_product_id: BrandedProductId::new(row.branded_product_id),
            price: row.price,
            stock_quantity: row.stock_quantity,
            unit: row.unit,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ListingViewRow {
    id: i32,
    supplier_id: i32,
    supplier_name: String,
    branded_product_id: i32,
    brand_name: String,
    nafdac_code: String,
    price: Decimal,
    stock_quantity: i32,
    unit: String,
    image_url: Option<String>,
    verified: bool,
}

impl From<ListingViewRow> for ListingView {
    fn from(row: ListingViewRow) -> Self {
        Self {
            id: SupplierProductId::new(row.id),
            supplier_id: SupplierId::new(row.supplier_id),
            supplier_name: row.supplier_name,
            branded_product_id: BrandedProductId::new(row.branded_product_id),
            brand_name: row.brand_name,
            nafdac_code: row.nafdac_code,
            price: row.price,
            stock_quantity: row.stock_quantity,
            unit: row.unit,
            image_url: row.image_url,
            verified: row.verified,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for supplier listings.
pub struct ListingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ListingRepository<'a> {
    /// Create a new listing repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All listings of one supplier, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_for_supplier(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Vec<ListingView>, RepositoryError> {
        let sql = format!("{VIEW_SELECT} WHERE sp.supplier_id = $1 ORDER BY sp.created_at DESC, sp.id");
        let rows = sqlx::query_as::<_, ListingViewRow>(&sql)
            .bind(supplier_id)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// A single listing as buyers see it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get_listing(
        &self,
        id: SupplierProductId,
    ) -> Result<Option<ListingView>, RepositoryError> {
        let sql = format!("{VIEW_SELECT} WHERE sp.id = $1");
        let row = sqlx::query_as::<_, ListingViewRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Batch lookup used when a whole cart is replaced. Missing IDs are
    /// simply absent from the result.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn get_listings(
        &self,
        ids: &[SupplierProductId],
    ) -> Result<Vec<ListingView>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let raw: Vec<i32> = ids.iter().map(SupplierProductId::as_i32).collect();
        let sql = format!("{VIEW_SELECT} WHERE sp.id = ANY($1)");
        let rows = sqlx::query_as::<_, ListingViewRow>(&sql)
            .bind(raw)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Create a listing for `supplier_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the supplier already lists this product.
    /// Returns `RepositoryError::NotFound` if the branded product does not exist.
    /// Returns `RepositoryError::Database` for other failures.
    #[instrument(skip(self, listing), fields(product = %listing.branded_product_id))]
    pub async fn create(
        &self,
        supplier_id: SupplierId,
        listing: &NewListing,
    ) -> Result<Listing, RepositoryError> {
        let sql = format!(
            "INSERT INTO supplier_products
                 (supplier_id, branded_product_id, price, stock_quantity, unit, image_url)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {LISTING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(supplier_id)
            .bind(listing.branded_product_id)
            .bind(listing.price)
            .bind(listing.stock_quantity)
            .bind(&listing.unit)
            .bind(listing.image_url.as_deref())
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, "product already listed by this supplier"))?;

        Ok(row.into())
    }

    /// Apply a partial update to a listing owned by `supplier_id`.
    ///
    /// Returns `Ok(None)` when no listing with that ID belongs to the supplier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        id: SupplierProductId,
        supplier_id: SupplierId,
        update: &ListingUpdate,
    ) -> Result<Option<Listing>, RepositoryError> {
        let sql = format!(
            "UPDATE supplier_products SET
                 price = COALESCE($3, price),
                 stock_quantity = COALESCE($4, stock_quantity),
                 unit = COALESCE($5, unit),
                 image_url = COALESCE($6, image_url),
                 updated_at = now()
             WHERE id = $1 AND supplier_id = $2
             RETURNING {LISTING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ListingRow>(&sql)
            .bind(id)
            .bind(supplier_id)
            .bind(update.price)
            .bind(update.stock_quantity)
            .bind(update.unit.as_deref())
            .bind(update.image_url.as_deref())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a listing owned by `supplier_id`. Returns `false` if nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        id: SupplierProductId,
        supplier_id: SupplierId,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM supplier_products WHERE id = $1 AND supplier_id = $2")
            .bind(id)
            .bind(supplier_id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
