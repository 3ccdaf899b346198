//! The cart store: cart lines, shipping address, and payment method.
//!
//! Cart lines are server-owned; every mutation posts the delta and replaces
//! local lines with the authoritative response (no merging, no anonymous
//! cart). Shipping address and payment method are pure local state mirrored
//! to durable storage with no network round trip.

use std::sync::Arc;

use cycle_bazaar_core::{CycleId, PaymentMethod};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::storage::{self, DurableStore, StorageError, keys};
use crate::types::{CartLine, Identity, ShippingAddress};

/// Holds the shopping cart and checkout choices for the session.
pub struct CartStore {
    api: ApiClient,
    storage: Arc<dyn DurableStore>,
    items: Vec<CartLine>,
    shipping_address: ShippingAddress,
    payment_method: Option<PaymentMethod>,
}

impl CartStore {
    /// Create the store, hydrating shipping address and payment method from
    /// durable storage. Cart lines start empty until an identity is synced.
    #[must_use]
    pub fn new(api: ApiClient, storage: Arc<dyn DurableStore>) -> Self {
        let shipping_address =
            storage::load(storage.as_ref(), keys::SHIPPING_ADDRESS).unwrap_or_else(|e| {
                tracing::warn!("discarding unreadable stored shipping address: {e}");
                None
            });
        let payment_method =
            storage::load(storage.as_ref(), keys::PAYMENT_METHOD).unwrap_or_else(|e| {
                tracing::warn!("discarding unreadable stored payment method: {e}");
                None
            });

        Self {
            api,
            storage,
            items: Vec::new(),
            shipping_address: shipping_address.unwrap_or_default(),
            payment_method,
        }
    }

    /// The current cart lines.
    #[must_use]
    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item subtotal across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartLine::line_total).sum()
    }

    #[must_use]
    pub const fn shipping_address(&self) -> &ShippingAddress {
        &self.shipping_address
    }

    #[must_use]
    pub const fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    /// Synchronize cart lines with the identity now in effect.
    ///
    /// A present identity fetches that user's server-side cart; an absent
    /// one clears local lines (there is no anonymous cart). A failed fetch
    /// leaves the cart empty and logs a warning - the next mutation will
    /// resynchronize.
    #[instrument(skip(self, identity), fields(logged_in = identity.is_some()))]
    pub async fn sync_identity(&mut self, identity: Option<&Identity>) {
        let Some(identity) = identity else {
            self.items.clear();
            return;
        };

        match self.api.get_cart(&identity.token).await {
            Ok(cart) => self.items = cart.items,
            Err(e) => {
                tracing::warn!("failed to fetch cart for identity change: {e}");
                self.items.clear();
            }
        }
    }

    /// Add `quantity` units of a cycle to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthenticated`] without touching local state
    /// when no identity is present; otherwise propagates the request error.
    #[instrument(skip(self, identity), fields(cycle_id = %cycle_id, quantity))]
    pub async fn add_to_cart(
        &mut self,
        identity: Option<&Identity>,
        cycle_id: &CycleId,
        quantity: u32,
    ) -> Result<(), ApiError> {
        let Some(identity) = identity else {
            return Err(ApiError::Unauthenticated);
        };

        let cart = self
            .api
            .add_cart_item(&identity.token, cycle_id, quantity)
            .await?;
        self.items = cart.items;
        Ok(())
    }

    /// Remove a cycle's line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if no identity is present or the request fails.
    #[instrument(skip(self, identity), fields(cycle_id = %cycle_id))]
    pub async fn remove_from_cart(
        &mut self,
        identity: Option<&Identity>,
        cycle_id: &CycleId,
    ) -> Result<(), ApiError> {
        let Some(identity) = identity else {
            return Err(ApiError::Unauthenticated);
        };

        let cart = self.api.remove_cart_item(&identity.token, cycle_id).await?;
        self.items = cart.items;
        Ok(())
    }

    /// Save the shipping address for this checkout pass (local only).
    ///
    /// # Errors
    ///
    /// Returns an error if the durable mirror cannot be written; memory is
    /// left unchanged in that case.
    #[instrument(skip(self, address))]
    pub fn save_shipping_address(&mut self, address: ShippingAddress) -> Result<(), StorageError> {
        storage::save(self.storage.as_ref(), keys::SHIPPING_ADDRESS, &address)?;
        self.shipping_address = address;
        Ok(())
    }

    /// Save the chosen payment method (local only).
    ///
    /// # Errors
    ///
    /// Returns an error if the durable mirror cannot be written.
    #[instrument(skip(self))]
    pub fn save_payment_method(&mut self, method: PaymentMethod) -> Result<(), StorageError> {
        storage::save(self.storage.as_ref(), keys::PAYMENT_METHOD, &method)?;
        self.payment_method = Some(method);
        Ok(())
    }

    /// Empty local cart state after an order is successfully placed.
    ///
    /// Deliberately no API call: the server clears its copy as an
    /// order-placement side effect the client assumes.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
