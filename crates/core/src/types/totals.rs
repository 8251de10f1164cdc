//! Checkout totals arithmetic.
//!
//! The store charges a flat shipping fee below a free-shipping threshold and
//! a fixed-percentage tax on the merchandise subtotal. Totals are computed
//! once, at order creation, and stored on the order row.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(999, 0, 0, false, 0);

/// Flat shipping fee charged below the threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(49, 0, 0, false, 0);

/// Tax rate applied to the merchandise subtotal (12%).
pub const TAX_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);

/// Computed totals for a cart or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTotals {
    /// Sum of unit price × quantity over all lines.
    pub subtotal: Decimal,
    /// Flat fee, or zero at/above the free-shipping threshold.
    pub shipping: Decimal,
    /// `TAX_RATE` of the subtotal, rounded to 2 decimal places.
    pub tax: Decimal,
    /// subtotal + shipping + tax.
    pub total: Decimal,
}

impl OrderTotals {
    /// Compute totals from `(unit_price, quantity)` lines.
    #[must_use]
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = (Decimal, i32)>,
    {
        let subtotal = lines
            .into_iter()
            .map(|(price, qty)| price * Decimal::from(qty))
            .sum();
        Self::from_subtotal(subtotal)
    }

    /// Compute shipping, tax, and total from a merchandise subtotal.
    #[must_use]
    pub fn from_subtotal(subtotal: Decimal) -> Self {
        let shipping = if subtotal.is_zero() || subtotal >= FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING_FEE
        };
        let tax = (subtotal * TAX_RATE).round_dp(2);
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Totals for an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_subtotal(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(cents: i64) -> Decimal {
        Decimal::new(cents, 2)
    }

    #[test]
    fn test_flat_shipping_below_threshold() {
        let totals = OrderTotals::from_subtotal(dec(50_000)); // 500.00
        assert_eq!(totals.shipping, dec(4_900));
        assert_eq!(totals.tax, dec(6_000)); // 12% of 500.00
        assert_eq!(totals.total, dec(50_000 + 4_900 + 6_000));
    }

    #[test]
    fn test_free_shipping_at_threshold() {
        let totals = OrderTotals::from_subtotal(dec(99_900)); // 999.00 exactly
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.total, dec(99_900) + totals.tax);
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let totals = OrderTotals::from_subtotal(dec(129_900));
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.tax, dec(15_588)); // 12% of 1299.00
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let totals = OrderTotals::empty();
        assert_eq!(totals.subtotal, Decimal::ZERO);
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::ZERO);
        assert_eq!(totals.total, Decimal::ZERO);
    }

    #[test]
    fn test_from_lines_sums_quantities() {
        let totals = OrderTotals::from_lines(vec![(dec(29_900), 2), (dec(9_950), 1)]);
        assert_eq!(totals.subtotal, dec(69_750)); // 2×299.00 + 99.50
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        // total must always equal subtotal + shipping + tax.
        for cents in [1, 4_999, 99_899, 99_900, 250_000] {
            let t = OrderTotals::from_subtotal(dec(cents));
            assert_eq!(t.total, t.subtotal + t.shipping + t.tax);
        }
    }

    #[test]
    fn test_tax_rounds_to_two_places() {
        // 12% of 10.01 = 1.2012 -> 1.20
        let totals = OrderTotals::from_subtotal(dec(1_001));
        assert_eq!(totals.tax, dec(120));
    }
}
