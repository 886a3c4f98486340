//! PharmaHub Core - Shared domain library.
//!
//! This crate provides the domain types and logic used across all PharmaHub components:
//! - `api` - JSON HTTP service for buyers and suppliers
//! - `cli` - Command-line tools for migrations and operator tasks
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, emails, currency and NAFDAC codes
//! - [`cart`] - Owned shopping cart with set/add/update/remove/clear
//! - [`checkout`] - Subtotal, delivery fee, escrow fee and total
//! - [`verification`] - NAFDAC verification records and lookup outcomes
//! - [`identity`] - Matching authenticated emails against supplier/provider rows

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod identity;
pub mod types;
pub mod verification;

pub use cart::{Cart, CartItem};
pub use checkout::{CheckoutSummary, FeeSchedule, compute_totals};
pub use identity::{ContactEmail, SupplierIdentity, reconcile};
pub use types::*;
pub use verification::{GenericReference, VerificationOutcome, VerificationRecord};
