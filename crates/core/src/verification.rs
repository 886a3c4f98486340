//! NAFDAC product verification.
//!
//! A lookup takes a [`NafdacCode`] and either finds the product in the catalog
//! or reports the code as unverified. Not finding a code is an ordinary outcome,
//! never an error; only storage failures are errors, and those belong to the
//! caller.

use serde::{Deserialize, Serialize};

use crate::types::{GenericProductId, NafdacCode};

/// Reference to the generic (INN) product a branded product belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericReference {
    pub id: GenericProductId,
    pub name: String,
}

/// Catalog data returned for a registered product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    pub nafdac_code: String,
    pub brand_name: String,
    pub manufacturer: Option<String>,
    pub strength: Option<String>,
    pub dosage_form: Option<String>,
    pub generic: Option<GenericReference>,
    /// Catalog-level verification flag as stored.
    pub verified: bool,
}

/// Result of a verification lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// The code matched a catalog entry.
    Verified { product: VerificationRecord },
    /// No catalog entry carries this code.
    Unverified { code: String },
}

impl VerificationOutcome {
    /// Build the outcome for `code` from an optional catalog match.
    #[must_use]
    pub fn from_lookup(code: &NafdacCode, record: Option<VerificationRecord>) -> Self {
        match record {
            Some(product) => Self::Verified { product },
            None => Self::Unverified {
                code: code.as_str().to_owned(),
            },
        }
    }

    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }
}
