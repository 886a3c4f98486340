//! Supplier domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pharmahub_core::{ContactEmail, Email, SupplierId, SupplierIdentity};

/// A supplier in the directory.
#[derive(Debug, Clone, Serialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Set by operators once the supplier's licence has been checked.
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    /// The fields used for identity reconciliation.
    #[must_use]
    pub fn identity(&self) -> SupplierIdentity {
        SupplierIdentity {
            id: self.id,
            name: self.name.clone(),
            email: self.email.as_str().to_owned(),
        }
    }
}

impl ContactEmail for Supplier {
    fn contact_email(&self) -> &str {
        self.email.as_str()
    }
}
