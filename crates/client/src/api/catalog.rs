//! Catalog endpoints: listing, detail, admin CRUD, and alert subscriptions.

use cycle_bazaar_core::CycleId;
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{AuthToken, Cycle, CycleInput, CyclePage, Message};

impl ApiClient {
    /// Fetch one page of the catalog, optionally filtered by keyword.
    ///
    /// Pages are 1-indexed; the server clamps out-of-range pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_cycles(
        &self,
        keyword: Option<&str>,
        page_number: u32,
    ) -> Result<CyclePage, ApiError> {
        let req = self.get("/cycles").query(&[
            ("keyword", keyword.unwrap_or_default()),
            ("pageNumber", &page_number.to_string()),
        ]);
        self.send(req).await
    }

    /// Fetch a single cycle by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the cycle does not exist or the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_cycle(&self, id: &CycleId) -> Result<Cycle, ApiError> {
        self.send(self.get(&format!("/cycles/{id}"))).await
    }

    /// Create a cycle (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token, input))]
    pub async fn add_cycle(
        &self,
        token: &AuthToken,
        input: &CycleInput,
    ) -> Result<Message, ApiError> {
        let req = Self::authed(self.post("/cycles/add"), token).json(input);
        self.send(req).await
    }

    /// Update a cycle (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token, input), fields(id = %id))]
    pub async fn update_cycle(
        &self,
        token: &AuthToken,
        id: &CycleId,
        input: &CycleInput,
    ) -> Result<Message, ApiError> {
        let req = Self::authed(self.put(&format!("/cycles/update/{id}")), token).json(input);
        self.send(req).await
    }

    /// Delete a cycle (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn delete_cycle(&self, token: &AuthToken, id: &CycleId) -> Result<Message, ApiError> {
        let req = Self::authed(self.delete(&format!("/cycles/{id}")), token);
        self.send(req).await
    }

    /// Subscribe to (or unsubscribe from) back-in-stock alerts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(id = %id, subscribe))]
    pub async fn set_stock_alert(
        &self,
        token: &AuthToken,
        id: &CycleId,
        subscribe: bool,
    ) -> Result<Message, ApiError> {
        let path = format!("/cycles/{id}/subscribe");
        let req = if subscribe {
            self.post(&path)
        } else {
            self.delete(&path)
        };
        self.send(Self::authed(req, token)).await
    }

    /// Subscribe to (or unsubscribe from) price-drop alerts.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(id = %id, subscribe))]
    pub async fn set_price_drop_alert(
        &self,
        token: &AuthToken,
        id: &CycleId,
        subscribe: bool,
    ) -> Result<Message, ApiError> {
        let path = format!("/cycles/{id}/subscribe-price");
        let req = if subscribe {
            self.post(&path)
        } else {
            self.delete(&path)
        };
        self.send(Self::authed(req, token)).await
    }
}
