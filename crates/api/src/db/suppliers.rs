//! Supplier directory repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use pharmahub_core::{Email, SupplierId, reconcile};

use super::{RepositoryError, readable_rows};
use crate::models::Supplier;

const SUPPLIER_COLUMNS: &str = "id, name, email, phone, address, is_verified, created_at";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct SupplierRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    is_verified: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<SupplierRow> for Supplier {
    type Error = RepositoryError;

    fn try_from(row: SupplierRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email for supplier {}: {e}", row.id))
        })?;

        Ok(Self {
            id: SupplierId::new(row.id),
            name: row.name,
            email,
            phone: row.phone,
            address: row.address,
            verified: row.is_verified,
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for supplier database operations.
pub struct SupplierRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SupplierRepository<'a> {
    /// Create a new supplier repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every supplier, oldest first.
    ///
    /// Rows with an unparseable email are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Supplier>, RepositoryError> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers ORDER BY id");
        let rows = sqlx::query_as::<_, SupplierRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(readable_rows(rows, "suppliers"))
    }

    /// Get a supplier by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    #[instrument(skip(self))]
    pub async fn get(&self, id: SupplierId) -> Result<Option<Supplier>, RepositoryError> {
        let sql = format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = $1");
        let row = sqlx::query_as::<_, SupplierRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Find the supplier whose email matches `email`, ignoring case.
    ///
    /// Scans the full directory. When several suppliers share an email the
    /// oldest one (lowest ID) wins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Supplier>, RepositoryError> {
        let suppliers = self.list_all().await?;
        let found = reconcile(&suppliers, email).cloned();
        tracing::debug!(
            scanned = suppliers.len(),
            matched = found.as_ref().map(|s| s.id.as_i32()),
            "Supplier identity reconciliation"
        );
        Ok(found)
    }

    /// Register a new supplier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self))]
    pub async fn create(
        &self,
        name: &str,
        email: &Email,
        phone: Option<&str>,
    ) -> Result<Supplier, RepositoryError> {
        let sql = format!(
            "INSERT INTO suppliers (name, email, phone)
             VALUES ($1, $2, $3)
             RETURNING {SUPPLIER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, SupplierRow>(&sql)
            .bind(name)
            .bind(email)
            .bind(phone)
            .fetch_one(self.pool)
            .await
            .map_err(|e| RepositoryError::from_write(e, "supplier already exists"))?;

        row.try_into()
    }
}
