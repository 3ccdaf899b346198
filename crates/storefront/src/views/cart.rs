//! Cart screen: a read-only projection of the shared [`CartStore`].

use cycle_bazaar_client::CartStore;
use cycle_bazaar_client::types::CartLine;
use cycle_bazaar_core::CycleId;
use rust_decimal::Decimal;

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLineView {
    pub cycle_id: CycleId,
    pub name: String,
    pub image_url: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub line_total: Decimal,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            cycle_id: line.cycle.id.clone(),
            name: line.cycle.display_name(),
            image_url: line.cycle.image_url.clone(),
            unit_price: line.cycle.price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// The whole cart page, derived fresh from the store on every render.
#[derive(Debug, Clone, PartialEq)]
pub struct CartPageView {
    pub lines: Vec<CartLineView>,
    pub total_quantity: u32,
    pub subtotal: Decimal,
}

impl CartPageView {
    #[must_use]
    pub fn from_store(cart: &CartStore) -> Self {
        Self {
            lines: cart.items().iter().map(CartLineView::from).collect(),
            total_quantity: cart.items().iter().map(|line| line.quantity).sum(),
            subtotal: cart.subtotal(),
        }
    }

    /// Whether the checkout button is enabled.
    #[must_use]
    pub fn can_checkout(&self) -> bool {
        !self.lines.is_empty()
    }
}
