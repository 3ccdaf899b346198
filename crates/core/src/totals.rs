//! Client-advisory checkout totals.
//!
//! These values ride along with the place-order request; the server is the
//! source of truth and may recompute. Once an order exists, screens display
//! whatever the server persisted, never this computation.

use rust_decimal::Decimal;

/// Item subtotal above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Flat shipping fee below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// Tax rate applied to the item subtotal (18%).
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// The advisory price breakdown for a checkout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTotals {
    pub items_price: Decimal,
    pub shipping_price: Decimal,
    pub tax_price: Decimal,
    pub total_price: Decimal,
}

impl CheckoutTotals {
    /// Compute the breakdown from an item subtotal.
    ///
    /// Tax is rounded to two decimal places before totalling, matching what
    /// the order form has always submitted.
    #[must_use]
    pub fn compute(items_price: Decimal) -> Self {
        let shipping_price = if items_price > FREE_SHIPPING_THRESHOLD {
            Decimal::ZERO
        } else {
            FLAT_SHIPPING_FEE
        };
        let tax_price = (items_price * TAX_RATE).round_dp(2);
        let total_price = items_price + shipping_price + tax_price;

        Self {
            items_price,
            shipping_price,
            tax_price,
            total_price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_shipping_above_threshold() {
        let totals = CheckoutTotals::compute(Decimal::from(12_000));
        assert_eq!(totals.shipping_price, Decimal::ZERO);
        assert_eq!(totals.tax_price, Decimal::new(2_160_00, 2));
        assert_eq!(totals.total_price, Decimal::new(14_160_00, 2));
    }

    #[test]
    fn flat_fee_at_or_below_threshold() {
        // Exactly at the threshold still pays shipping.
        let totals = CheckoutTotals::compute(Decimal::from(10_000));
        assert_eq!(totals.shipping_price, FLAT_SHIPPING_FEE);

        let totals = CheckoutTotals::compute(Decimal::from(800));
        assert_eq!(totals.shipping_price, FLAT_SHIPPING_FEE);
        assert_eq!(totals.tax_price, Decimal::new(144_00, 2));
        assert_eq!(totals.total_price, Decimal::new(1_444_00, 2));
    }

    #[test]
    fn tax_rounds_to_two_places() {
        // 18% of 33.33 is 5.9994 -> 6.00
        let totals = CheckoutTotals::compute(Decimal::new(33_33, 2));
        assert_eq!(totals.tax_price, Decimal::new(6_00, 2));
    }

    #[test]
    fn empty_cart_totals_are_flat_fee_only() {
        let totals = CheckoutTotals::compute(Decimal::ZERO);
        assert_eq!(totals.items_price, Decimal::ZERO);
        assert_eq!(totals.total_price, FLAT_SHIPPING_FEE);
    }
}
