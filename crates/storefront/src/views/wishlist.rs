//! Wishlist screen.

use cycle_bazaar_client::types::Cycle;
use cycle_bazaar_client::{ApiClient, ApiError, SessionStore};
use cycle_bazaar_core::{CycleId, ViewState};
use tracing::instrument;

/// Wishlist screen view model. Login-gated; removal goes through the same
/// toggle endpoint the detail screen uses.
pub struct WishlistView {
    api: ApiClient,
    pub state: ViewState<Vec<Cycle>>,
}

impl WishlistView {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: ViewState::Loading,
        }
    }

    /// Fetch the saved cycles. A logged-out viewer lands on the login
    /// prompt instead of an empty list.
    #[instrument(skip_all)]
    pub async fn load(&mut self, session: &SessionStore) {
        self.state = ViewState::Loading;
        let Some(token) = session.token() else {
            self.state = ViewState::Error(ApiError::Unauthenticated.to_string());
            return;
        };
        self.state = match self.api.get_wishlist(token).await {
            Ok(cycles) => ViewState::Ready(cycles),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// Remove a cycle. The server answers with the authoritative wishlist;
    /// the displayed list is filtered down to it and the session mirror
    /// updated, so a late duplicate click cannot drift local state.
    ///
    /// # Errors
    ///
    /// Returns an error when unauthenticated or the request fails.
    #[instrument(skip(self, session), fields(cycle_id = %cycle_id))]
    pub async fn remove(
        &mut self,
        session: &mut SessionStore,
        cycle_id: &CycleId,
    ) -> Result<String, ApiError> {
        let Some(token) = session.token().cloned() else {
            return Err(ApiError::Unauthenticated);
        };

        let update = self.api.toggle_wishlist(&token, cycle_id).await?;
        if let ViewState::Ready(cycles) = &mut self.state {
            cycles.retain(|cycle| update.wishlist.contains(&cycle.id));
        }
        session.update_wishlist(update.wishlist)?;
        Ok(update.message)
    }
}
