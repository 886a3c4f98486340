//! Healthcare provider repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use pharmahub_core::{Email, ProviderId, reconcile};

use super::{RepositoryError, readable_rows};
use crate::models::Provider;

#[derive(Debug, sqlx::FromRow)]
struct ProviderRow {
    id: i32,
    name: String,
    email: String,
    license_number: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProviderRow> for Provider {
    type Error = RepositoryError;

    fn try_from(row: ProviderRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email for provider {}: {e}", row.id))
        })?;

        Ok(Self {
            id: ProviderId::new(row.id),
            name: row.name,
            email,
            license_number: row.license_number,
            created_at: row.created_at,
        })
    }
}

/// Repository for provider database operations.
pub struct ProviderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProviderRepository<'a> {
    /// Create a new provider repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every provider, oldest first. Rows with an unparseable email are
    /// logged and left out.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<Provider>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProviderRow>(
            "SELECT id, name, email, license_number, created_at FROM providers ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(readable_rows(rows, "providers"))
    }

    /// Find the provider whose email matches `email`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Provider>, RepositoryError> {
        let providers = self.list_all().await?;
        Ok(reconcile(&providers, email).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(id: i32, email: &str) -> ProviderRow {
        ProviderRow {
            id,
            name: format!("Pharmacy {id}"),
            email: email.to_string(),
            license_number: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_corrupt_row_does_not_hide_match() {
        let rows = vec![row(1, "  "), row(2, "buyer@healthplus.ng")];
        let providers: Vec<Provider> = readable_rows(rows, "providers");

        let found = reconcile(&providers, "Buyer@HealthPlus.ng").unwrap();
        assert_eq!(found.id, ProviderId::new(2));
    }
}
