//! Admin dashboard: catalog management plus pending cancellation requests.

use cycle_bazaar_client::types::{AuthToken, Cycle, CycleInput, Order};
use cycle_bazaar_client::{ApiClient, ApiError, SessionStore};
use cycle_bazaar_core::{CancellationAction, CycleId, OrderId, OrderStatus, ViewState};
use rust_decimal::Decimal;
use tracing::instrument;

use crate::prompt::Prompt;

/// The add-cycle form. Holds raw text the way the inputs do; [`validate`]
/// turns it into a request payload or a message for the form.
///
/// [`validate`]: AddCycleForm::validate
#[derive(Debug, Clone, Default)]
pub struct AddCycleForm {
    pub brand: String,
    pub model: String,
    pub price: String,
    pub image_url: String,
    pub description: String,
    pub stock: String,
}

impl AddCycleForm {
    /// Check the fields and build the creation payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] naming the first offending field.
    pub fn validate(&self) -> Result<CycleInput, ApiError> {
        if self.brand.trim().is_empty() || self.model.trim().is_empty() {
            return Err(ApiError::Validation("Brand and model are required".into()));
        }
        let price: Decimal = self
            .price
            .trim()
            .parse()
            .map_err(|_| ApiError::Validation("Price must be a number".into()))?;
        if price <= Decimal::ZERO {
            return Err(ApiError::Validation("Price must be positive".into()));
        }
        let stock: u32 = self
            .stock
            .trim()
            .parse()
            .map_err(|_| ApiError::Validation("Stock must be a whole number".into()))?;
        if self.image_url.trim().is_empty() {
            return Err(ApiError::Validation("Image URL is required".into()));
        }

        Ok(CycleInput {
            brand: self.brand.trim().to_owned(),
            model: self.model.trim().to_owned(),
            price,
            image_url: self.image_url.trim().to_owned(),
            description: self.description.trim().to_owned(),
            stock,
        })
    }
}

/// Dashboard view model: the managed catalog and the order queue, loaded
/// side by side.
pub struct AdminDashboardView {
    api: ApiClient,
    pub cycles: ViewState<Vec<Cycle>>,
    pub orders: ViewState<Vec<Order>>,
}

impl AdminDashboardView {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            cycles: ViewState::Loading,
            orders: ViewState::Loading,
        }
    }

    /// Fetch the catalog and all orders. A non-admin viewer gets the
    /// authorization error on both panels and no requests are sent.
    #[instrument(skip_all)]
    pub async fn load(&mut self, session: &SessionStore) {
        self.cycles = ViewState::Loading;
        self.orders = ViewState::Loading;

        let Some(token) = admin_token(session) else {
            let message = "Not authorized as an admin".to_owned();
            self.cycles = ViewState::Error(message.clone());
            self.orders = ViewState::Error(message);
            return;
        };

        self.cycles = match self.api.list_cycles(None, 1).await {
            Ok(page) => ViewState::Ready(page.cycles),
            Err(e) => ViewState::Error(e.to_string()),
        };
        self.orders = match self.api.list_orders(&token).await {
            Ok(orders) => ViewState::Ready(orders),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// Orders waiting on a cancellation verdict.
    #[must_use]
    pub fn cancellation_requests(&self) -> Vec<&Order> {
        self.orders
            .ready()
            .map(|orders| {
                orders
                    .iter()
                    .filter(|order| order.status == OrderStatus::CancellationRequested)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Create a cycle from the form and refresh the catalog panel.
    ///
    /// # Errors
    ///
    /// Returns an error when the form is invalid, the viewer is not an
    /// admin, or the request fails.
    #[instrument(skip_all)]
    pub async fn add_cycle(
        &mut self,
        session: &SessionStore,
        form: &AddCycleForm,
    ) -> Result<String, ApiError> {
        let input = form.validate()?;
        let Some(token) = admin_token(session) else {
            return Err(ApiError::Unauthenticated);
        };

        let message = self.api.add_cycle(&token, &input).await?.message;
        self.reload_cycles().await;
        Ok(message)
    }

    /// Delete a cycle after operator confirmation. A declined prompt is a
    /// quiet no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when the viewer is not an admin or the request
    /// fails.
    #[instrument(skip(self, session, prompt), fields(id = %id))]
    pub async fn delete_cycle(
        &mut self,
        session: &SessionStore,
        prompt: &dyn Prompt,
        id: &CycleId,
    ) -> Result<Option<String>, ApiError> {
        let Some(token) = admin_token(session) else {
            return Err(ApiError::Unauthenticated);
        };
        if !prompt.confirm("Are you sure you want to delete this cycle?") {
            return Ok(None);
        }

        let message = self.api.delete_cycle(&token, id).await?.message;
        self.reload_cycles().await;
        Ok(Some(message))
    }

    /// Approve or reject a pending cancellation request, then refresh the
    /// order panel so the request leaves the queue.
    ///
    /// # Errors
    ///
    /// Returns an error when the viewer is not an admin or the request
    /// fails.
    #[instrument(skip(self, session, prompt), fields(order_id = %order_id, action = action.as_str()))]
    pub async fn manage_cancellation(
        &mut self,
        session: &SessionStore,
        prompt: &dyn Prompt,
        order_id: &OrderId,
        action: CancellationAction,
    ) -> Result<Option<String>, ApiError> {
        let Some(token) = admin_token(session) else {
            return Err(ApiError::Unauthenticated);
        };
        let question = match action {
            CancellationAction::Approve => "Approve this cancellation request?",
            CancellationAction::Reject => "Reject this cancellation request?",
        };
        if !prompt.confirm(question) {
            return Ok(None);
        }

        let message = self
            .api
            .manage_cancellation(&token, order_id, action)
            .await?
            .message;
        self.reload_orders(&token).await;
        Ok(Some(message))
    }

    async fn reload_cycles(&mut self) {
        self.cycles = match self.api.list_cycles(None, 1).await {
            Ok(page) => ViewState::Ready(page.cycles),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    async fn reload_orders(&mut self, token: &AuthToken) {
        self.orders = match self.api.list_orders(token).await {
            Ok(orders) => ViewState::Ready(orders),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }
}

/// The session token, but only when the identity carries the admin flag.
fn admin_token(session: &SessionStore) -> Option<AuthToken> {
    session
        .is_admin()
        .then(|| session.token().cloned())
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AddCycleForm {
        AddCycleForm {
            brand: "Hero".into(),
            model: "Ranger".into(),
            price: "8999".into(),
            image_url: "/img/ranger.jpg".into(),
            description: "Steel frame commuter".into(),
            stock: "4".into(),
        }
    }

    #[test]
    fn valid_form_builds_the_payload() {
        let input = form().validate().unwrap();
        assert_eq!(input.brand, "Hero");
        assert_eq!(input.price, Decimal::from(8_999));
        assert_eq!(input.stock, 4);
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let mut form = form();
        form.price = "cheap".into();
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("Price"));
    }

    #[test]
    fn zero_price_is_rejected() {
        let mut form = form();
        form.price = "0".into();
        assert!(form.validate().is_err());
    }

    #[test]
    fn missing_brand_is_rejected_before_parsing_numbers() {
        let mut form = form();
        form.brand = " ".into();
        form.price = "not a number".into();
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("Brand"));
    }
}
