//! Identity reconciliation.
//!
//! Authenticated principals carry an email but no supplier or provider ID, so
//! the link is made by scanning the candidate rows for a case-insensitive email
//! match. The first match in iteration order wins; callers that need a stable
//! answer for duplicate emails must pass candidates in a stable order.

use serde::{Deserialize, Serialize};

use crate::types::SupplierId;

/// Anything that can be matched against a principal's email.
pub trait ContactEmail {
    fn contact_email(&self) -> &str;
}

/// Minimal supplier identity used for reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierIdentity {
    pub id: SupplierId,
    pub name: String,
    pub email: String,
}

impl ContactEmail for SupplierIdentity {
    fn contact_email(&self) -> &str {
        &self.email
    }
}

/// Find the first candidate whose email equals `email`, ignoring case.
///
/// A blank `email` never matches.
///
/// ```
/// use pharmahub_core::{SupplierId, SupplierIdentity, reconcile};
///
/// let suppliers = vec![SupplierIdentity {
///     id: SupplierId::new(1),
///     name: "Emzor".to_string(),
///     email: "Sales@Emzor.com".to_string(),
/// }];
///
/// assert!(reconcile(&suppliers, "sales@emzor.com").is_some());
/// assert!(reconcile(&suppliers, "buyer@clinic.ng").is_none());
/// ```
pub fn reconcile<'a, T, I>(candidates: I, email: &str) -> Option<&'a T>
where
    T: ContactEmail + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let wanted = email.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }
    candidates
        .into_iter()
        .find(|candidate| candidate.contact_email().trim().to_lowercase() == wanted)
}
