//! Shopping cart state.
//!
//! A [`Cart`] is a flat list of [`CartItem`] lines keyed by listing ID. It has a
//! single owner (the buyer's session) and no internal locking; callers load it,
//! mutate it and write it back.
//!
//! Invariant: every line has `quantity >= 1`. Operations that would leave a
//! line at zero remove it instead.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::SupplierProductId;

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The supplier listing this line refers to.
    pub id: SupplierProductId,
    /// Brand name shown to the buyer.
    pub name: String,
    /// Price per unit at the time the line was added.
    pub unit_price: Decimal,
    /// Number of units, always at least 1.
    pub quantity: u32,
    /// Unit label (e.g. "pack", "carton of 100").
    pub unit: String,
    /// Display name of the supplier.
    pub supplier_name: String,
    /// Whether the product carries a verified NAFDAC registration.
    pub verified: bool,
    /// Product image reference, if the listing has one.
    pub image_ref: Option<String>,
}

impl CartItem {
    /// `unit_price × quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Buyer's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Replace the cart contents.
    ///
    /// Zero-quantity lines are dropped. Repeated IDs collapse into one line at
    /// the position of the first occurrence, carrying the last occurrence's
    /// values.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = CartItem>) {
        let mut collapsed: Vec<CartItem> = Vec::new();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match collapsed.iter_mut().find(|line| line.id == item.id) {
                Some(line) => *line = item,
                None => collapsed.push(item),
            }
        }
        self.items = collapsed;
    }

    /// Add a line, merging with an existing line for the same listing.
    ///
    /// When the listing is already in the cart the quantities are summed and
    /// the descriptive fields (price, name, supplier) are refreshed from `item`.
    pub fn add_item(&mut self, item: CartItem) {
        if item.quantity == 0 {
            return;
        }
        match self.items.iter_mut().find(|line| line.id == item.id) {
            Some(line) => {
                let quantity = line.quantity.saturating_add(item.quantity);
                *line = CartItem { quantity, ..item };
            }
            None => self.items.push(item),
        }
    }

    /// Set the quantity of a line.
    ///
    /// A quantity of zero removes the line. Returns `false` if no line with
    /// that ID exists, in which case the cart is unchanged.
    pub fn update_quantity(&mut self, id: SupplierProductId, quantity: u32) -> bool {
        let Some(position) = self.items.iter().position(|line| line.id == id) else {
            return false;
        };
        if quantity == 0 {
            self.items.remove(position);
        } else if let Some(line) = self.items.get_mut(position) {
            line.quantity = quantity;
        }
        true
    }

    /// Remove a line. Removing an ID that is not in the cart is a no-op.
    pub fn remove_item(&mut self, id: SupplierProductId) {
        self.items.retain(|line| line.id != id);
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line by listing ID.
    #[must_use]
    pub fn get(&self, id: SupplierProductId) -> Option<&CartItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines (badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }
}
