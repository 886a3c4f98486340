//! Session-related types.

/// Session keys.
pub mod keys {
    /// Key for the buyer's cart (`pharmahub_core::Cart`).
    pub const CART: &str = "cart";
}
