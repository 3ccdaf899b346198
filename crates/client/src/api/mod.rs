//! Cycle Bazaar REST API client.
//!
//! One client, one method per endpoint, grouped by resource:
//!
//! - [`catalog`] - `/cycles` listing, detail, admin CRUD, subscriptions
//! - [`users`] - `/api/users` auth, wishlist, admin user management
//! - [`cart`] - `/api/cart` server-side cart
//! - [`orders`] - `/api/orders` placement, lifecycle, payment
//!
//! Protected routes send `Authorization: Bearer <token>`. Error responses
//! surface the body's `message` field (or the raw body) verbatim.

mod cart;
mod catalog;
mod orders;
mod users;

use std::sync::Arc;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::types::AuthToken;

/// Client for the remote Cycle Bazaar API.
///
/// Cheaply cloneable; every view model holds one.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Create a new API client from configuration.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base: config.api_url.clone(),
            }),
        }
    }

    /// Resolve an endpoint path against the configured origin.
    fn endpoint(&self, path: &str) -> String {
        let base = self.inner.base.as_str().trim_end_matches('/');
        format!("{base}/{}", path.trim_start_matches('/'))
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.inner.http.get(self.endpoint(path))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.inner.http.post(self.endpoint(path))
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.inner.http.put(self.endpoint(path))
    }

    fn delete(&self, path: &str) -> RequestBuilder {
        self.inner.http.delete(self.endpoint(path))
    }

    /// Attach the bearer token for a protected route.
    fn authed(req: RequestBuilder, token: &AuthToken) -> RequestBuilder {
        req.bearer_auth(token.expose())
    }

    /// Send a request and decode the JSON response.
    ///
    /// Non-2xx responses become [`ApiError::Api`] carrying the verbatim
    /// server message.
    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::debug!(
                status = %status,
                body = %body.chars().take(200).collect::<String>(),
                "API returned non-success status"
            );
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Extract the user-facing message from an error body.
///
/// The API answers errors as `{ "message": ... }`, as a bare JSON string,
/// or occasionally as a non-JSON body; whichever it is, the user sees it
/// unchanged.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string)
            .or_else(|| value.as_str().map(ToString::to_string))
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        let url = Url::parse(base).expect("valid url");
        ApiClient::new(&ClientConfig::new(url))
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let api = client("http://localhost:5000/");
        assert_eq!(api.endpoint("/api/cart"), "http://localhost:5000/api/cart");
        assert_eq!(api.endpoint("cycles"), "http://localhost:5000/cycles");
    }

    #[test]
    fn error_message_prefers_message_field() {
        assert_eq!(
            error_message(r#"{"message":"Order not found"}"#),
            "Order not found"
        );
    }

    #[test]
    fn error_message_accepts_bare_string_bodies() {
        assert_eq!(error_message(r#""Invalid email or password""#), "Invalid email or password");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"error":"nope"}"#), r#"{"error":"nope"}"#);
    }
}
