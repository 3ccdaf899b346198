//! Admin order list.

use cycle_bazaar_client::types::{AuthToken, Order};
use cycle_bazaar_client::{ApiClient, ApiError, SessionStore};
use cycle_bazaar_core::{OrderId, ViewState};
use tracing::instrument;

use crate::prompt::Prompt;

/// Every order in the system, for the admin order screen.
pub struct AdminOrdersView {
    api: ApiClient,
    pub state: ViewState<Vec<Order>>,
}

impl AdminOrdersView {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: ViewState::Loading,
        }
    }

    /// Fetch all orders; non-admin viewers get the authorization error
    /// without a request.
    #[instrument(skip_all)]
    pub async fn load(&mut self, session: &SessionStore) {
        self.state = ViewState::Loading;
        let Some(token) = admin_token(session) else {
            self.state = ViewState::Error("Not authorized as an admin".into());
            return;
        };
        self.state = match self.api.list_orders(&token).await {
            Ok(orders) => ViewState::Ready(orders),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// Delete an order after confirmation; declined prompts are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when the viewer is not an admin or the request
    /// fails.
    #[instrument(skip(self, session, prompt), fields(order_id = %order_id))]
    pub async fn delete_order(
        &mut self,
        session: &SessionStore,
        prompt: &dyn Prompt,
        order_id: &OrderId,
    ) -> Result<Option<String>, ApiError> {
        let Some(token) = admin_token(session) else {
            return Err(ApiError::Unauthenticated);
        };
        if !prompt.confirm("Are you sure you want to delete this order?") {
            return Ok(None);
        }

        let message = self.api.delete_order(&token, order_id).await?.message;
        if let ViewState::Ready(orders) = &mut self.state {
            orders.retain(|order| order.id != *order_id);
        }
        Ok(Some(message))
    }
}

fn admin_token(session: &SessionStore) -> Option<AuthToken> {
    session
        .is_admin()
        .then(|| session.token().cloned())
        .flatten()
}
