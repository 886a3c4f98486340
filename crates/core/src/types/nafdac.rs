//! NAFDAC registration numbers.
//!
//! Buyers type these by hand from the pack, so input arrives with stray
//! whitespace and arbitrary casing (`" a4-0123 "`, `"A4-0123"`). A
//! [`NafdacCode`] keeps the trimmed text and exposes an upper-cased form for
//! lookups.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`NafdacCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NafdacCodeError {
    /// Nothing left after trimming.
    #[error("NAFDAC code is required")]
    Empty,
    /// Longer than any registration number we store.
    #[error("NAFDAC code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A trimmed NAFDAC registration number.
///
/// ```
/// use pharmahub_core::NafdacCode;
///
/// let a = NafdacCode::parse(" a4-0123 ").unwrap();
/// let b = NafdacCode::parse("A4-0123").unwrap();
/// assert_eq!(a.normalized(), b.normalized());
/// assert_eq!(a.as_str(), "a4-0123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NafdacCode(String);

impl NafdacCode {
    /// Maximum accepted length after trimming.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a code from free text.
    ///
    /// # Errors
    ///
    /// Returns [`NafdacCodeError::Empty`] if the input is blank and
    /// [`NafdacCodeError::TooLong`] if it exceeds [`Self::MAX_LENGTH`].
    pub fn parse(input: &str) -> Result<Self, NafdacCodeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(NafdacCodeError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(NafdacCodeError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// The trimmed code as entered.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Upper-cased form compared against `upper(nafdac_code)` in the catalog.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.0.to_uppercase()
    }
}

impl fmt::Display for NafdacCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for NafdacCode {
    type Error = NafdacCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<NafdacCode> for String {
    fn from(code: NafdacCode) -> Self {
        code.0
    }
}

impl std::str::FromStr for NafdacCode {
    type Err = NafdacCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_and_case_insensitive() {
        let padded = NafdacCode::parse(" a4-0123 ").unwrap();
        let plain = NafdacCode::parse("A4-0123").unwrap();
        assert_eq!(padded.normalized(), plain.normalized());
        assert_eq!(padded.normalized(), "A4-0123");
    }

    #[test]
    fn test_blank_is_rejected() {
        assert_eq!(NafdacCode::parse(""), Err(NafdacCodeError::Empty));
        assert_eq!(NafdacCode::parse(" \t\n"), Err(NafdacCodeError::Empty));
    }

    #[test]
    fn test_too_long_is_rejected() {
        let long = "X".repeat(NafdacCode::MAX_LENGTH + 1);
        assert!(matches!(
            NafdacCode::parse(&long),
            Err(NafdacCodeError::TooLong { .. })
        ));
        assert!(NafdacCode::parse(&"X".repeat(NafdacCode::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_deserialize_goes_through_parse() {
        let code: NafdacCode = serde_json::from_str("\"  04-1234  \"").unwrap();
        assert_eq!(code.as_str(), "04-1234");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"04-1234\"");

        assert!(serde_json::from_str::<NafdacCode>("\"   \"").is_err());
        let long = format!("\"{}\"", "X".repeat(NafdacCode::MAX_LENGTH + 1));
        assert!(serde_json::from_str::<NafdacCode>(&long).is_err());
    }

    #[test]
    fn test_error_message_is_client_facing() {
        assert_eq!(NafdacCodeError::Empty.to_string(), "NAFDAC code is required");
    }
}
