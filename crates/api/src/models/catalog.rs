//! Product catalog types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use pharmahub_core::{BrandedProductId, GenericReference, VerificationRecord};

/// A registered branded product.
#[derive(Debug, Clone, Serialize)]
pub struct BrandedProduct {
    pub id: BrandedProductId,
    pub nafdac_code: String,
    pub brand_name: String,
    pub manufacturer: Option<String>,
    pub strength: Option<String>,
    pub dosage_form: Option<String>,
    pub generic: Option<GenericReference>,
    /// Bioequivalence against the reference product, in percent. Display only.
    pub bioequivalence: Option<Decimal>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<BrandedProduct> for VerificationRecord {
    fn from(product: BrandedProduct) -> Self {
        Self {
            nafdac_code: product.nafdac_code,
            brand_name: product.brand_name,
            manufacturer: product.manufacturer,
            strength: product.strength,
            dosage_form: product.dosage_form,
            generic: product.generic,
            verified: product.verified,
        }
    }
}
