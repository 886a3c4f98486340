//! Database operations for the marketplace `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `generic_products` - INN / generic drug names
//! - `branded_products` - Registered brands with NAFDAC numbers
//! - `suppliers` - Supplier directory
//! - `providers` - Healthcare providers and pharmacies (buyers)
//! - `supplier_products` - Listings: one supplier selling one branded product
//! - `tower_sessions.session` - Session storage (cart lives here)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p pharmahub-cli -- migrate
//! ```
//!
//! Queries are built with `sqlx::query_as` at runtime so the crate builds
//! without a live database.

pub mod listings;
pub mod products;
pub mod providers;
pub mod suppliers;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use listings::ListingRepository;
pub use products::ProductRepository;
pub use providers::ProviderRepository;
pub use suppliers::SupplierRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., a supplier listing the same product twice).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Classify a write error, turning constraint violations into domain errors.
    pub(crate) fn from_write(err: sqlx::Error, conflict_message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return Self::Conflict(conflict_message.to_owned());
            }
            if db_err.is_foreign_key_violation() {
                return Self::NotFound;
            }
        }
        Self::Database(err)
    }
}

/// Convert rows into domain values, logging and skipping any that fail.
///
/// Used for directory scans, where one unreadable row must not hide the rest.
pub(crate) fn readable_rows<R, T>(rows: Vec<R>, table: &'static str) -> Vec<T>
where
    R: TryInto<T, Error = RepositoryError>,
{
    rows.into_iter()
        .filter_map(|row| match row.try_into() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(table, error = %e, "Skipping unreadable row");
                None
            }
        })
        .collect()
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Escape `%`, `_` and `\` so user input can be embedded in an `ILIKE` pattern.
#[must_use]
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("paracetamol"), "paracetamol");
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_non_database_errors_pass_through() {
        let err = RepositoryError::from_write(sqlx::Error::RowNotFound, "duplicate");
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
    }
}
