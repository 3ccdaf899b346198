//! Edit-cycle screen: fetch, amend, save.

use cycle_bazaar_client::types::Cycle;
use cycle_bazaar_client::{ApiClient, ApiError, SessionStore};
use cycle_bazaar_core::{CycleId, ViewState};
use tracing::instrument;

use crate::views::dashboard::AddCycleForm;

/// Edit screen view model. Reuses [`AddCycleForm`] for field validation;
/// the form is prefilled from the fetched cycle.
pub struct EditCycleView {
    api: ApiClient,
    cycle_id: CycleId,
    pub state: ViewState<AddCycleForm>,
}

impl EditCycleView {
    #[must_use]
    pub const fn new(api: ApiClient, cycle_id: CycleId) -> Self {
        Self {
            api,
            cycle_id,
            state: ViewState::Loading,
        }
    }

    #[must_use]
    pub const fn cycle_id(&self) -> &CycleId {
        &self.cycle_id
    }

    /// Fetch the cycle and prefill the form.
    #[instrument(skip_all, fields(id = %self.cycle_id))]
    pub async fn load(&mut self) {
        self.state = ViewState::Loading;
        self.state = match self.api.get_cycle(&self.cycle_id).await {
            Ok(cycle) => ViewState::Ready(prefill(&cycle)),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// Validate the edited form and push the update.
    ///
    /// # Errors
    ///
    /// Returns an error when the form is invalid, the viewer is not an
    /// admin, or the request fails.
    #[instrument(skip_all, fields(id = %self.cycle_id))]
    pub async fn save(&self, session: &SessionStore) -> Result<String, ApiError> {
        let Some(form) = self.state.ready() else {
            return Err(ApiError::Validation("Cycle is not loaded yet".into()));
        };
        let input = form.validate()?;
        let Some(token) = session.token().filter(|_| session.is_admin()) else {
            return Err(ApiError::Unauthenticated);
        };

        let message = self
            .api
            .update_cycle(token, &self.cycle_id, &input)
            .await?
            .message;
        Ok(message)
    }
}

fn prefill(cycle: &Cycle) -> AddCycleForm {
    AddCycleForm {
        brand: cycle.brand.clone(),
        model: cycle.model.clone(),
        price: cycle.price.to_string(),
        image_url: cycle.image_url.clone(),
        description: cycle.description.clone(),
        stock: cycle.stock.to_string(),
    }
}
