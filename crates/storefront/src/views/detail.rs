//! Cycle detail screen: wishlist and alert toggles, add-to-cart.

use cycle_bazaar_client::types::{Cycle, Identity};
use cycle_bazaar_client::{ApiClient, ApiError, CartStore, SessionStore};
use cycle_bazaar_core::{CycleId, ViewState};
use tracing::instrument;

/// The three independent subscription flags the detail screen renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DetailFlags {
    pub in_wishlist: bool,
    pub stock_subscribed: bool,
    pub price_drop_subscribed: bool,
}

/// Derive the flags from the identity and the fetched cycle.
///
/// Pure membership checks against the server-returned subscriber sets -
/// recomputed on every render so the flags can never go stale relative to
/// the snapshot they describe.
#[must_use]
pub fn detail_flags(identity: Option<&Identity>, cycle: &Cycle) -> DetailFlags {
    let Some(identity) = identity else {
        return DetailFlags::default();
    };

    DetailFlags {
        in_wishlist: identity.wishlist.contains(&cycle.id),
        stock_subscribed: cycle.subscribers.contains(&identity.id),
        price_drop_subscribed: cycle.price_drop_subscribers.contains(&identity.id),
    }
}

/// Cycle detail screen view model.
pub struct CycleDetailView {
    api: ApiClient,
    pub state: ViewState<Cycle>,
    busy: bool,
}

impl CycleDetailView {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: ViewState::Loading,
            busy: false,
        }
    }

    /// Fetch the cycle. Runs on mount and on id change.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn load(&mut self, id: &CycleId) {
        self.state = ViewState::Loading;
        self.state = match self.api.get_cycle(id).await {
            Ok(cycle) => ViewState::Ready(cycle),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// Current subscription flags for the given viewer.
    #[must_use]
    pub fn flags(&self, identity: Option<&Identity>) -> DetailFlags {
        self.state
            .ready()
            .map(|cycle| detail_flags(identity, cycle))
            .unwrap_or_default()
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    /// Add one unit to the cart; refuses out-of-stock cycles before any
    /// request is sent.
    ///
    /// # Errors
    ///
    /// Returns an error when the cycle is not loaded, is out of stock, the
    /// viewer is unauthenticated, or the request fails.
    #[instrument(skip_all)]
    pub async fn add_to_cart(
        &mut self,
        session: &SessionStore,
        cart: &mut CartStore,
    ) -> Result<(), ApiError> {
        let Some(cycle) = self.state.ready() else {
            return Err(ApiError::Validation("Cycle is not loaded yet".into()));
        };
        if !cycle.in_stock() {
            return Err(ApiError::Validation(
                "This cycle is currently out of stock!".into(),
            ));
        }

        let id = cycle.id.clone();
        cart.add_to_cart(session.identity(), &id, 1).await
    }

    /// Toggle wishlist membership. Flips only after the server confirms,
    /// and pushes the authoritative wishlist back into the session store.
    ///
    /// # Errors
    ///
    /// Returns an error when unauthenticated or the request fails.
    #[instrument(skip_all)]
    pub async fn toggle_wishlist(
        &mut self,
        session: &mut SessionStore,
    ) -> Result<String, ApiError> {
        if self.busy {
            return Err(ApiError::Validation("Request already in progress".into()));
        }
        let Some(cycle) = self.state.ready() else {
            return Err(ApiError::Validation("Cycle is not loaded yet".into()));
        };
        let Some(token) = session.token().cloned() else {
            return Err(ApiError::Unauthenticated);
        };

        let id = cycle.id.clone();
        self.busy = true;
        let result = self.api.toggle_wishlist(&token, &id).await;
        self.busy = false;

        let update = result?;
        session.update_wishlist(update.wishlist)?;
        Ok(update.message)
    }

    /// Toggle the back-in-stock alert subscription.
    ///
    /// # Errors
    ///
    /// Returns an error when unauthenticated or the request fails.
    #[instrument(skip_all)]
    pub async fn toggle_stock_alert(
        &mut self,
        session: &SessionStore,
    ) -> Result<String, ApiError> {
        self.toggle_subscription(session, Subscription::Stock).await
    }

    /// Toggle the price-drop alert subscription.
    ///
    /// # Errors
    ///
    /// Returns an error when unauthenticated or the request fails.
    #[instrument(skip_all)]
    pub async fn toggle_price_drop_alert(
        &mut self,
        session: &SessionStore,
    ) -> Result<String, ApiError> {
        self.toggle_subscription(session, Subscription::PriceDrop)
            .await
    }

    async fn toggle_subscription(
        &mut self,
        session: &SessionStore,
        kind: Subscription,
    ) -> Result<String, ApiError> {
        if self.busy {
            return Err(ApiError::Validation("Request already in progress".into()));
        }
        let Some(identity) = session.identity() else {
            return Err(ApiError::Unauthenticated);
        };
        let Some(cycle) = self.state.ready() else {
            return Err(ApiError::Validation("Cycle is not loaded yet".into()));
        };

        let subscribed = match kind {
            Subscription::Stock => cycle.subscribers.contains(&identity.id),
            Subscription::PriceDrop => cycle.price_drop_subscribers.contains(&identity.id),
        };
        let id = cycle.id.clone();
        let token = identity.token.clone();
        let user_id = identity.id.clone();

        self.busy = true;
        let result = match kind {
            Subscription::Stock => self.api.set_stock_alert(&token, &id, !subscribed).await,
            Subscription::PriceDrop => {
                self.api.set_price_drop_alert(&token, &id, !subscribed).await
            }
        };
        self.busy = false;
        let message = result?.message;

        // Server confirmed; update the held snapshot's subscriber set so the
        // derived flag flips.
        if let ViewState::Ready(cycle) = &mut self.state {
            let set = match kind {
                Subscription::Stock => &mut cycle.subscribers,
                Subscription::PriceDrop => &mut cycle.price_drop_subscribers,
            };
            if subscribed {
                set.retain(|id| *id != user_id);
            } else {
                set.push(user_id);
            }
        }

        Ok(message)
    }
}

#[derive(Clone, Copy)]
enum Subscription {
    Stock,
    PriceDrop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cycle_bazaar_client::types::AuthToken;
    use cycle_bazaar_core::UserId;
    use rust_decimal::Decimal;

    fn cycle() -> Cycle {
        Cycle {
            id: CycleId::new("c1"),
            brand: "Hero".into(),
            model: "Ranger".into(),
            price: Decimal::from(9_000),
            image_url: "/img/c1.jpg".into(),
            description: String::new(),
            stock: 2,
            subscribers: vec![UserId::new("u2")],
            price_drop_subscribers: vec![UserId::new("u1")],
        }
    }

    fn identity() -> Identity {
        Identity {
            id: UserId::new("u1"),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            is_admin: false,
            token: AuthToken::from("tok"),
            wishlist: vec![CycleId::new("c1")],
        }
    }

    #[test]
    fn flags_derive_from_identity_and_subscriber_sets() {
        let flags = detail_flags(Some(&identity()), &cycle());
        assert!(flags.in_wishlist);
        assert!(!flags.stock_subscribed);
        assert!(flags.price_drop_subscribed);
    }

    #[test]
    fn flags_are_all_off_when_logged_out() {
        assert_eq!(detail_flags(None, &cycle()), DetailFlags::default());
    }

    #[test]
    fn flags_are_independent_of_each_other() {
        let mut cycle = cycle();
        cycle.subscribers.push(UserId::new("u1"));
        let flags = detail_flags(Some(&identity()), &cycle);
        assert!(flags.in_wishlist && flags.stock_subscribed && flags.price_drop_subscribed);

        cycle.price_drop_subscribers.clear();
        let flags = detail_flags(Some(&identity()), &cycle);
        assert!(flags.in_wishlist && flags.stock_subscribed);
        assert!(!flags.price_drop_subscribed);
    }
}
