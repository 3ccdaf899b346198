//! Server-side cart endpoints.
//!
//! Every mutation answers with the full authoritative cart; callers replace
//! local lines wholesale rather than merging.

use cycle_bazaar_core::CycleId;
use serde_json::json;
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{AuthToken, CartResponse};

impl ApiClient {
    /// Fetch the logged-in user's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn get_cart(&self, token: &AuthToken) -> Result<CartResponse, ApiError> {
        self.send(Self::authed(self.get("/api/cart"), token)).await
    }

    /// Add `quantity` units of a cycle; the server merges into an existing
    /// line if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(cycle_id = %cycle_id, quantity))]
    pub async fn add_cart_item(
        &self,
        token: &AuthToken,
        cycle_id: &CycleId,
        quantity: u32,
    ) -> Result<CartResponse, ApiError> {
        let req = Self::authed(self.post("/api/cart/add"), token).json(&json!({
            "cycleId": cycle_id,
            "quantity": quantity,
        }));
        self.send(req).await
    }

    /// Remove a cycle's line from the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(cycle_id = %cycle_id))]
    pub async fn remove_cart_item(
        &self,
        token: &AuthToken,
        cycle_id: &CycleId,
    ) -> Result<CartResponse, ApiError> {
        let req = Self::authed(self.delete(&format!("/api/cart/remove/{cycle_id}")), token);
        self.send(req).await
    }
}
