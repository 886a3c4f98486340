//! Domain models for the API.
//!
//! These are validated domain objects, separate from the database row types in
//! [`crate::db`]. Pure marketplace logic (cart, checkout, verification,
//! identity matching) lives in `pharmahub-core`.

pub mod catalog;
pub mod listing;
pub mod provider;
pub mod session;
pub mod supplier;

pub use catalog::BrandedProduct;
pub use listing::{Listing, ListingUpdate, ListingView, NewListing};
pub use provider::Provider;
pub use session::keys as session_keys;
pub use supplier::Supplier;
