//! Order endpoints: placement, listing, lifecycle transitions, payment.

use cycle_bazaar_core::{CancellationAction, OrderId, OrderStatus};
use serde_json::json;
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{AuthToken, Message, NewOrder, Order, PaymentIntent};

impl ApiClient {
    /// Place an order from the current cart snapshot.
    ///
    /// The server clears the user's cart as a side effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token, order))]
    pub async fn place_order(&self, token: &AuthToken, order: &NewOrder) -> Result<Order, ApiError> {
        let req = Self::authed(self.post("/api/orders"), token).json(order);
        self.send(req).await
    }

    /// List every order (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token))]
    pub async fn list_orders(&self, token: &AuthToken) -> Result<Vec<Order>, ApiError> {
        self.send(Self::authed(self.get("/api/orders"), token)).await
    }

    /// List the logged-in user's own orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn my_orders(&self, token: &AuthToken) -> Result<Vec<Order>, ApiError> {
        self.send(Self::authed(self.get("/api/orders/myorders"), token))
            .await
    }

    /// Fetch one order.
    ///
    /// # Errors
    ///
    /// Returns an error if the order does not exist, the viewer is not
    /// authorized, or the request fails.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn get_order(&self, token: &AuthToken, id: &OrderId) -> Result<Order, ApiError> {
        self.send(Self::authed(self.get(&format!("/api/orders/{id}")), token))
            .await
    }

    /// Delete an order (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn delete_order(&self, token: &AuthToken, id: &OrderId) -> Result<Message, ApiError> {
        let req = Self::authed(self.delete(&format!("/api/orders/{id}")), token);
        self.send(req).await
    }

    /// Mark an order paid.
    ///
    /// With a payment receipt this confirms an online payment; without one
    /// it is the admin marking a pay-on-delivery order settled. Idempotent
    /// server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token, receipt), fields(id = %id))]
    pub async fn pay_order(
        &self,
        token: &AuthToken,
        id: &OrderId,
        receipt: Option<&serde_json::Value>,
    ) -> Result<Order, ApiError> {
        let mut req = Self::authed(self.put(&format!("/api/orders/{id}/pay")), token);
        req = match receipt {
            Some(receipt) => req.json(receipt),
            None => req.json(&json!({})),
        };
        self.send(req).await
    }

    /// Move an order to a new status (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        token: &AuthToken,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<Order, ApiError> {
        let req = Self::authed(self.put(&format!("/api/orders/{id}/status")), token)
            .json(&json!({ "status": status }));
        self.send(req).await
    }

    /// Request cancellation of an order (customer, processing only).
    ///
    /// Sets a pending request for admin review; status moves to
    /// `Cancellation Requested`, not `Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token, reason), fields(id = %id))]
    pub async fn request_cancellation(
        &self,
        token: &AuthToken,
        id: &OrderId,
        reason: &str,
    ) -> Result<Message, ApiError> {
        let req = Self::authed(self.put(&format!("/api/orders/{id}/cancel")), token)
            .json(&json!({ "reason": reason }));
        self.send(req).await
    }

    /// Approve or reject a pending cancellation request (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(id = %id, action = action.as_str()))]
    pub async fn manage_cancellation(
        &self,
        token: &AuthToken,
        id: &OrderId,
        action: CancellationAction,
    ) -> Result<Message, ApiError> {
        let req = Self::authed(
            self.put(&format!("/api/orders/{id}/manage-cancellation")),
            token,
        )
        .json(&json!({ "action": action }));
        self.send(req).await
    }

    /// Obtain a payment authorization handle for the payment widget.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(id = %id))]
    pub async fn create_payment_intent(
        &self,
        token: &AuthToken,
        id: &OrderId,
    ) -> Result<PaymentIntent, ApiError> {
        let req = Self::authed(
            self.post(&format!("/api/orders/{id}/create-payment-intent")),
            token,
        );
        self.send(req).await
    }
}
