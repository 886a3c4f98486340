//! Checkout totals.
//!
//! ```text
//! subtotal     = Σ unit_price × quantity
//! delivery_fee = flat (2000 by default)
//! escrow_fee   = round(subtotal × escrow_rate)   (1% by default, whole units)
//! total        = subtotal + delivery_fee + escrow_fee
//! ```
//!
//! The delivery fee is charged even for an empty cart. Rounding is half away
//! from zero, which for the non-negative amounts we deal with is the same as
//! rounding half up.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::types::CurrencyCode;

/// Flat delivery fee in naira.
pub const DEFAULT_DELIVERY_FEE: Decimal = Decimal::from_parts(2000, 0, 0, false, 0);

/// Escrow surcharge as a fraction of the subtotal (0.01 = 1%).
pub const DEFAULT_ESCROW_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Computed checkout amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub delivery_fee: Decimal,
    pub escrow_fee: Decimal,
    pub total: Decimal,
    pub currency: CurrencyCode,
}

/// Fee parameters applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeSchedule {
    pub delivery_fee: Decimal,
    pub escrow_rate: Decimal,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            delivery_fee: DEFAULT_DELIVERY_FEE,
            escrow_rate: DEFAULT_ESCROW_RATE,
        }
    }
}

impl FeeSchedule {
    /// Compute totals for a set of cart lines under this schedule.
    #[must_use]
    pub fn compute<'a>(&self, items: impl IntoIterator<Item = &'a CartItem>) -> CheckoutSummary {
        let subtotal: Decimal = items.into_iter().map(CartItem::line_total).sum();
        self.for_subtotal(subtotal)
    }

    /// Compute totals from an already-summed subtotal.
    #[must_use]
    pub fn for_subtotal(&self, subtotal: Decimal) -> CheckoutSummary {
        let escrow_fee = (subtotal * self.escrow_rate)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        CheckoutSummary {
            subtotal,
            delivery_fee: self.delivery_fee,
            escrow_fee,
            total: subtotal + self.delivery_fee + escrow_fee,
            currency: CurrencyCode::NGN,
        }
    }
}

/// Compute totals with the default fee schedule.
#[must_use]
pub fn compute_totals<'a>(items: impl IntoIterator<Item = &'a CartItem>) -> CheckoutSummary {
    FeeSchedule::default().compute(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::types::SupplierProductId;

    fn line(id: i32, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: SupplierProductId::new(id),
            name: "Amoxicillin 500mg".to_string(),
            unit_price: price,
            quantity,
            unit: "pack".to_string(),
            supplier_name: "Fidson".to_string(),
            verified: true,
            image_ref: None,
        }
    }

    #[test]
    fn test_default_constants() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.delivery_fee, Decimal::from(2000));
        assert_eq!(fees.escrow_rate, Decimal::new(1, 2));
    }

    #[test]
    fn test_empty_cart_still_pays_delivery() {
        let summary = compute_totals(&[]);
        assert_eq!(summary.subtotal, Decimal::ZERO);
        assert_eq!(summary.escrow_fee, Decimal::ZERO);
        assert_eq!(summary.total, Decimal::from(2000));
    }

    #[test]
    fn test_typical_order() {
        let items = [
            line(1, Decimal::from(4500), 2),
            line(2, Decimal::from(1250), 4),
        ];
        let summary = compute_totals(&items);

        assert_eq!(summary.subtotal, Decimal::from(14_000));
        assert_eq!(summary.delivery_fee, Decimal::from(2000));
        assert_eq!(summary.escrow_fee, Decimal::from(140));
        assert_eq!(summary.total, Decimal::from(16_140));
        assert_eq!(summary.currency, CurrencyCode::NGN);
    }

    #[test]
    fn test_escrow_rounds_half_up() {
        // 1% of 250 = 2.5 -> 3
        let summary = compute_totals(&[line(1, Decimal::from(250), 1)]);
        assert_eq!(summary.escrow_fee, Decimal::from(3));

        // 1% of 249 = 2.49 -> 2
        let summary = compute_totals(&[line(1, Decimal::from(249), 1)]);
        assert_eq!(summary.escrow_fee, Decimal::from(2));
    }

    #[test]
    fn test_fractional_prices() {
        let summary = compute_totals(&[line(1, Decimal::new(199_99, 2), 3)]);
        assert_eq!(summary.subtotal, Decimal::new(599_97, 2));
        assert_eq!(summary.escrow_fee, Decimal::from(6));
        assert_eq!(summary.total, Decimal::new(2605_97, 2));
    }

    #[test]
    fn test_custom_schedule() {
        let fees = FeeSchedule {
            delivery_fee: Decimal::from(1500),
            escrow_rate: Decimal::new(2, 2),
        };
        let summary = fees.compute(&[line(1, Decimal::from(10_000), 1)]);
        assert_eq!(summary.escrow_fee, Decimal::from(200));
        assert_eq!(summary.total, Decimal::from(11_700));
    }

    #[test]
    fn test_summary_serializes_amounts_as_strings() {
        let summary = compute_totals(&[line(1, Decimal::from(100), 1)]);
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["delivery_fee"], "2000");
        assert_eq!(json["currency"], "NGN");
    }

    proptest! {
        #[test]
        fn prop_totals_follow_subtotal(
            lines in prop::collection::vec((0i64..1_000_000, 0u32..500), 0..20)
        ) {
            let items: Vec<CartItem> = lines
                .iter()
                .enumerate()
                .map(|(i, (price, qty))| {
                    line(i32::try_from(i).unwrap(), Decimal::from(*price), *qty)
                })
                .collect();
            let summary = compute_totals(&items);

            let expected_subtotal: Decimal = lines
                .iter()
                .map(|(price, qty)| Decimal::from(*price) * Decimal::from(*qty))
                .sum();
            let expected_escrow = (expected_subtotal / Decimal::from(100))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

            prop_assert_eq!(summary.subtotal, expected_subtotal);
            prop_assert_eq!(summary.escrow_fee, expected_escrow);
            prop_assert_eq!(
                summary.total,
                expected_subtotal + Decimal::from(2000) + expected_escrow
            );
        }

        #[test]
        fn prop_doubling_quantities_doubles_subtotal(
            lines in prop::collection::vec((0i64..100_000, 1u32..100), 1..10)
        ) {
            let single: Vec<CartItem> = lines
                .iter()
                .enumerate()
                .map(|(i, (price, qty))| line(i32::try_from(i).unwrap(), Decimal::from(*price), *qty))
                .collect();
            let doubled: Vec<CartItem> = single
                .iter()
                .map(|item| CartItem { quantity: item.quantity * 2, ..item.clone() })
                .collect();

            let a = compute_totals(&single);
            let b = compute_totals(&doubled);
            prop_assert_eq!(b.subtotal, a.subtotal * Decimal::from(2));
        }
    }
}
