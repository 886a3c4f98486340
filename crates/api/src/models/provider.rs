//! Healthcare provider (buyer) domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use pharmahub_core::{ContactEmail, Email, ProviderId};

/// A hospital, clinic or pharmacy buying through the marketplace.
#[derive(Debug, Clone, Serialize)]
pub struct Provider {
    pub id: ProviderId,
    pub name: String,
    pub email: Email,
    /// Pharmacy Council of Nigeria premises licence, when supplied.
    pub license_number: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ContactEmail for Provider {
    fn contact_email(&self) -> &str {
        self.email.as_str()
    }
}
