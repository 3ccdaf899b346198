//! User endpoints: registration, login, password recovery, wishlist, and
//! admin user management.

use cycle_bazaar_core::{CycleId, UserId};
use serde_json::json;
use tracing::instrument;

use super::ApiClient;
use crate::error::ApiError;
use crate::types::{AuthToken, Cycle, Identity, Message, UserSummary, WishlistUpdate};

impl ApiClient {
    /// Register a new account; verification happens over email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Message, ApiError> {
        let req = self.post("/api/users/register").json(&json!({
            "name": name,
            "email": email,
            "password": password,
        }));
        self.send(req).await
    }

    /// Exchange credentials for an authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request
    /// fails.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, ApiError> {
        let req = self.post("/api/users/login").json(&json!({
            "email": email,
            "password": password,
        }));
        self.send(req).await
    }

    /// Confirm an email address with the token from the verification link.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is invalid or the request fails.
    #[instrument(skip(self, token))]
    pub async fn verify_email(&self, token: &str) -> Result<Message, ApiError> {
        self.send(self.get(&format!("/api/users/verify/{token}"))).await
    }

    /// Request a password-reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self))]
    pub async fn forgot_password(&self, email: &str) -> Result<Message, ApiError> {
        let req = self
            .post("/api/users/forgot-password")
            .json(&json!({ "email": email }));
        self.send(req).await
    }

    /// Set a new password using the token from the reset email.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is invalid or the request fails.
    #[instrument(skip(self, token, password))]
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<Message, ApiError> {
        let req = self
            .post(&format!("/api/users/reset-password/{token}"))
            .json(&json!({ "password": password }));
        self.send(req).await
    }

    /// Fetch the logged-in user's wishlist as full cycle documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn get_wishlist(&self, token: &AuthToken) -> Result<Vec<Cycle>, ApiError> {
        self.send(Self::authed(self.get("/api/users/wishlist"), token))
            .await
    }

    /// Toggle a cycle in the wishlist; the server adds or removes it and
    /// answers with the authoritative wishlist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(cycle_id = %cycle_id))]
    pub async fn toggle_wishlist(
        &self,
        token: &AuthToken,
        cycle_id: &CycleId,
    ) -> Result<WishlistUpdate, ApiError> {
        let req = Self::authed(self.post("/api/users/wishlist"), token)
            .json(&json!({ "cycleId": cycle_id }));
        self.send(req).await
    }

    /// List every account (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token))]
    pub async fn list_users(&self, token: &AuthToken) -> Result<Vec<UserSummary>, ApiError> {
        self.send(Self::authed(self.get("/api/users"), token)).await
    }

    /// Delete an account (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip(self, token), fields(user_id = %user_id))]
    pub async fn delete_user(
        &self,
        token: &AuthToken,
        user_id: &UserId,
    ) -> Result<Message, ApiError> {
        let req = Self::authed(self.delete(&format!("/api/users/{user_id}")), token);
        self.send(req).await
    }
}
