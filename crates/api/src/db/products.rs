//! Product catalog repository.
//!
//! Backs the NAFDAC verification lookup and catalog search.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::instrument;

use pharmahub_core::{
    BrandedProductId, GenericProductId, GenericReference, NafdacCode, VerificationRecord,
};

use super::{RepositoryError, escape_like};
use crate::models::BrandedProduct;

/// Columns selected for every branded product query.
const PRODUCT_COLUMNS: &str = r"
    b.id, b.nafdac_code, b.brand_name, b.manufacturer, b.strength, b.dosage_form,
    g.id AS generic_id, g.name AS generic_name,
    b.bioequivalence, b.is_verified, b.created_at
    FROM branded_products b
    LEFT JOIN generic_products g ON g.id = b.generic_product_id
";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct BrandedProductRow {
    id: i32,
    nafdac_code: String,
    brand_name: String,
    manufacturer: Option<String>,
    strength: Option<String>,
    dosage_form: Option<String>,
    generic_id: Option<i32>,
    generic_name: Option<String>,
    bioequivalence: Option<Decimal>,
    is_verified: bool,
    created_at: DateTime<Utc>,
}

impl From<BrandedProductRow> for BrandedProduct {
    fn from(row: BrandedProductRow) -> Self {
        let generic = match (row.generic_id, row.generic_name) {
            (Some(id), Some(name)) => Some(GenericReference {
                id: GenericProductId::new(id),
                name,
            }),
            _ => None,
        };

        Self {
            id: BrandedProductId::new(row.id),
            nafdac_code: row.nafdac_code,
            brand_name: row.brand_name,
            manufacturer: row.manufacturer,
            strength: row.strength,
            dosage_form: row.dosage_form,
            generic,
            bioequivalence: row.bioequivalence,
            verified: row.is_verified,
            created_at: row.created_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the branded product catalog.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Find the catalog entry registered under `code`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self, code), fields(code = %code))]
    pub async fn find_by_nafdac_code(
        &self,
        code: &NafdacCode,
    ) -> Result<Option<BrandedProduct>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} WHERE upper(b.nafdac_code) = upper($1) LIMIT 1");
        let row = sqlx::query_as::<_, BrandedProductRow>(&sql)
            .bind(code.as_str())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Verification lookup: the normalized record for `code`, if registered.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails. A missing code
    /// is `Ok(None)`, never an error.
    pub async fn verify(
        &self,
        code: &NafdacCode,
    ) -> Result<Option<VerificationRecord>, RepositoryError> {
        Ok(self.find_by_nafdac_code(code).await?.map(Into::into))
    }

    /// Get a branded product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn get(&self, id: BrandedProductId) -> Result<Option<BrandedProduct>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} WHERE b.id = $1");
        let row = sqlx::query_as::<_, BrandedProductRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Search brand and generic names (case-insensitive substring).
    ///
    /// With no query, returns the first `limit` products alphabetically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
    ) -> Result<Vec<BrandedProduct>, RepositoryError> {
        let pattern = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", escape_like(q)));

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS}
             WHERE $1::text IS NULL
                OR b.brand_name ILIKE $1
                OR g.name ILIKE $1
                OR b.nafdac_code ILIKE $1
             ORDER BY b.brand_name, b.id
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, BrandedProductRow>(&sql)
            .bind(pattern)
            .bind(limit)
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
