//! Core types for PharmaHub.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod currency;
pub mod email;
pub mod id;
pub mod nafdac;

pub use currency::CurrencyCode;
pub use email::{Email, EmailError};
pub use id::*;
pub use nafdac::{NafdacCode, NafdacCodeError};
