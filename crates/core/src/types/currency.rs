//! Currency codes for marketplace amounts.
//!
//! All amounts are carried as `rust_decimal::Decimal` in the currency's
//! standard unit (naira, not kobo).

use serde::{Deserialize, Serialize};

/// ISO 4217 currency codes accepted by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    NGN,
}

impl CurrencyCode {
    /// Three-letter ISO code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NGN => "NGN",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_naira() {
        assert_eq!(CurrencyCode::default(), CurrencyCode::NGN);
        assert_eq!(CurrencyCode::NGN.to_string(), "NGN");
        assert_eq!(serde_json::to_string(&CurrencyCode::NGN).unwrap(), "\"NGN\"");
    }
}
