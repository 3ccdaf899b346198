//! Order history screen.

use cycle_bazaar_client::types::Order;
use cycle_bazaar_client::{ApiClient, ApiError, SessionStore};
use cycle_bazaar_core::ViewState;
use tracing::instrument;

/// The signed-in customer's order history, newest first as the server
/// returns it.
pub struct MyOrdersView {
    api: ApiClient,
    pub state: ViewState<Vec<Order>>,
}

impl MyOrdersView {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: ViewState::Loading,
        }
    }

    #[instrument(skip_all)]
    pub async fn load(&mut self, session: &SessionStore) {
        self.state = ViewState::Loading;
        let Some(token) = session.token() else {
            self.state = ViewState::Error(ApiError::Unauthenticated.to_string());
            return;
        };
        self.state = match self.api.my_orders(token).await {
            Ok(orders) => ViewState::Ready(orders),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }
}
