//! Authentication screens: login, registration, and the email flows.

use cycle_bazaar_client::types::Identity;
use cycle_bazaar_client::{ApiClient, ApiError, CartStore, SessionStore};
use cycle_bazaar_core::ViewState;
use tracing::instrument;

/// Login screen form state.
#[derive(Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// Authenticate, persist the identity, and pull the account's cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the credentials are rejected, the request
    /// fails, or the identity cannot be persisted.
    #[instrument(skip_all, fields(email = %self.email))]
    pub async fn submit(
        &self,
        api: &ApiClient,
        session: &mut SessionStore,
        cart: &mut CartStore,
    ) -> Result<Identity, ApiError> {
        let identity = api.login(&self.email, &self.password).await?;
        session.login(identity.clone())?;
        cart.sync_identity(Some(&identity)).await;
        Ok(identity)
    }
}

/// Registration screen form state.
#[derive(Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Create the account. The mismatch check runs before any request so a
    /// typo never reaches the server.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the passwords differ,
    /// otherwise propagates the request error.
    #[instrument(skip_all, fields(email = %self.email))]
    pub async fn submit(&self, api: &ApiClient) -> Result<String, ApiError> {
        if self.password != self.confirm_password {
            return Err(ApiError::Validation("Passwords do not match".into()));
        }
        let message = api
            .register(&self.name, &self.email, &self.password)
            .await?;
        Ok(message.message)
    }
}

/// Forgot-password screen form state.
#[derive(Default)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl ForgotPasswordForm {
    /// Request a reset link for the entered address.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    #[instrument(skip_all, fields(email = %self.email))]
    pub async fn submit(&self, api: &ApiClient) -> Result<String, ApiError> {
        Ok(api.forgot_password(&self.email).await?.message)
    }
}

/// Reset-password screen form state. The token arrives in the link URL.
#[derive(Default)]
pub struct ResetPasswordForm {
    pub password: String,
    pub confirm_password: String,
}

impl ResetPasswordForm {
    /// Set the new password against the emailed token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the passwords differ,
    /// otherwise propagates the request error.
    #[instrument(skip_all)]
    pub async fn submit(&self, api: &ApiClient, token: &str) -> Result<String, ApiError> {
        if self.password != self.confirm_password {
            return Err(ApiError::Validation("Passwords do not match".into()));
        }
        Ok(api.reset_password(token, &self.password).await?.message)
    }
}

/// Email-verification landing screen. Fires once with the token from the
/// link URL and renders the outcome.
pub struct VerifyEmailView {
    api: ApiClient,
    pub state: ViewState<String>,
}

impl VerifyEmailView {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: ViewState::Loading,
        }
    }

    #[instrument(skip(self, token))]
    pub async fn verify(&mut self, token: &str) {
        self.state = match self.api.verify_email(token).await {
            Ok(message) => ViewState::Ready(message.message),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }
}
