//! The checkout sequencer: shipping, payment, review, place.
//!
//! A small state machine that enforces the screen order the checkout flow
//! guarantees. Each step gates on the data the previous one collected, so
//! deep-linking into review with no shipping address bounces back to the
//! shipping form instead of placing a broken order.

use cycle_bazaar_client::types::{NewOrder, Order, OrderItem, ShippingAddress};
use cycle_bazaar_client::{ApiClient, ApiError, CartStore, SessionStore};
use cycle_bazaar_core::{CheckoutTotals, OrderId, PaymentMethod};
use tracing::instrument;

/// Where the checkout flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CheckoutStep {
    #[default]
    Shipping,
    Payment,
    Review,
    Placing,
    /// The order was accepted; carries its id for the confirmation screen.
    Placed(OrderId),
}

/// Drives a single checkout pass over the shared [`CartStore`].
pub struct CheckoutSequencer {
    api: ApiClient,
    pub step: CheckoutStep,
}

impl CheckoutSequencer {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            step: CheckoutStep::Shipping,
        }
    }

    /// Record the shipping address and advance to payment selection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when any field is blank; the step
    /// does not advance.
    #[instrument(skip_all)]
    pub fn submit_shipping(
        &mut self,
        cart: &mut CartStore,
        address: ShippingAddress,
    ) -> Result<(), ApiError> {
        if address.address.trim().is_empty()
            || address.city.trim().is_empty()
            || address.postal_code.trim().is_empty()
            || address.country.trim().is_empty()
        {
            return Err(ApiError::Validation(
                "Please fill in all shipping fields".into(),
            ));
        }
        cart.save_shipping_address(address)?;
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Entering the payment screen directly is only legal once an address
    /// exists; otherwise the flow restarts at shipping.
    pub fn enter_payment(&mut self, cart: &CartStore) {
        self.step = if cart.shipping_address().address.is_empty() {
            CheckoutStep::Shipping
        } else {
            CheckoutStep::Payment
        };
    }

    /// Record the payment method and advance to review.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable payment-method mirror cannot be
    /// written.
    #[instrument(skip(self, cart))]
    pub fn submit_payment(
        &mut self,
        cart: &mut CartStore,
        method: PaymentMethod,
    ) -> Result<(), ApiError> {
        cart.save_payment_method(method)?;
        self.step = CheckoutStep::Review;
        Ok(())
    }

    /// The price breakdown the review screen shows, recomputed from the
    /// cart on every render.
    #[must_use]
    pub fn totals(cart: &CartStore) -> CheckoutTotals {
        CheckoutTotals::compute(cart.subtotal())
    }

    /// Submit the order. On success the cart empties and the flow lands on
    /// the confirmation step; on failure it stays at review with the error.
    ///
    /// # Errors
    ///
    /// Returns an error when the flow is not at review, prerequisites are
    /// missing, the viewer is logged out, or the server rejects the order.
    #[instrument(skip_all)]
    pub async fn place_order(
        &mut self,
        session: &SessionStore,
        cart: &mut CartStore,
    ) -> Result<Order, ApiError> {
        if self.step != CheckoutStep::Review {
            return Err(ApiError::Validation("Checkout is not at review".into()));
        }
        if cart.is_empty() {
            return Err(ApiError::Validation("Your cart is empty".into()));
        }
        let Some(payment_method) = cart.payment_method() else {
            return Err(ApiError::Validation("No payment method selected".into()));
        };
        let Some(token) = session.token().cloned() else {
            return Err(ApiError::Unauthenticated);
        };

        // Snapshot names and prices now; later catalog edits must not
        // rewrite a placed order.
        let order_items = cart
            .items()
            .iter()
            .map(|line| OrderItem {
                cycle: line.cycle.id.clone(),
                name: line.cycle.display_name(),
                image: line.cycle.image_url.clone(),
                price: line.cycle.price,
                qty: line.quantity,
            })
            .collect();
        let totals = Self::totals(cart);
        let order = NewOrder {
            order_items,
            shipping_address: cart.shipping_address().clone(),
            payment_method,
            items_price: totals.items_price,
            tax_price: totals.tax_price,
            shipping_price: totals.shipping_price,
            total_price: totals.total_price,
        };

        self.step = CheckoutStep::Placing;
        match self.api.place_order(&token, &order).await {
            Ok(placed) => {
                cart.clear();
                self.step = CheckoutStep::Placed(placed.id.clone());
                Ok(placed)
            }
            Err(e) => {
                self.step = CheckoutStep::Review;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cycle_bazaar_client::storage::MemoryStore;
    use cycle_bazaar_client::{ClientConfig, SessionStore};
    use url::Url;

    fn offline_api() -> ApiClient {
        let url = Url::parse("http://127.0.0.1:1").unwrap();
        ApiClient::new(&ClientConfig::new(url))
    }

    fn stores() -> (SessionStore, CartStore) {
        let storage = Arc::new(MemoryStore::new());
        (
            SessionStore::new(storage.clone()),
            CartStore::new(offline_api(), storage),
        )
    }

    fn address() -> ShippingAddress {
        ShippingAddress {
            address: "12 Canal Road".into(),
            city: "Pune".into(),
            postal_code: "411001".into(),
            country: "India".into(),
        }
    }

    #[test]
    fn blank_shipping_fields_do_not_advance() {
        let (_, mut cart) = stores();
        let mut flow = CheckoutSequencer::new(offline_api());

        let mut bad = address();
        bad.city = "  ".into();
        let err = flow.submit_shipping(&mut cart, bad).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(flow.step, CheckoutStep::Shipping);
    }

    #[test]
    fn payment_screen_requires_an_address() {
        let (_, mut cart) = stores();
        let mut flow = CheckoutSequencer::new(offline_api());

        flow.enter_payment(&cart);
        assert_eq!(flow.step, CheckoutStep::Shipping);

        flow.submit_shipping(&mut cart, address()).unwrap();
        assert_eq!(flow.step, CheckoutStep::Payment);
        flow.enter_payment(&cart);
        assert_eq!(flow.step, CheckoutStep::Payment);
    }

    #[tokio::test]
    async fn place_order_requires_review_step_and_nonempty_cart() {
        let (session, mut cart) = stores();
        let mut flow = CheckoutSequencer::new(offline_api());

        let err = flow.place_order(&session, &mut cart).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));

        flow.submit_shipping(&mut cart, address()).unwrap();
        flow.submit_payment(&mut cart, PaymentMethod::Cod).unwrap();
        let err = flow.place_order(&session, &mut cart).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(flow.step, CheckoutStep::Review);
    }
}
