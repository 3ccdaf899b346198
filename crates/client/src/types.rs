//! Wire types for the Cycle Bazaar REST API.
//!
//! Everything here is a snapshot of server-owned state; the client never
//! edits these in place, it replaces them from fresh responses. Field names
//! follow the API's camelCase JSON.

use chrono::{DateTime, Utc};
use cycle_bazaar_core::{CycleId, OrderId, OrderStatus, PaymentMethod, UserId};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// =============================================================================
// Identity
// =============================================================================

/// Bearer token issued at login.
///
/// Wraps `SecretString` so the token never leaks through `Debug`/tracing
/// output, while still serializing for the durable-storage mirror.
#[derive(Clone)]
pub struct AuthToken(SecretString);

impl AuthToken {
    /// The raw token, for the `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken([REDACTED])")
    }
}

impl PartialEq for AuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for AuthToken {}

impl From<&str> for AuthToken {
    fn from(token: &str) -> Self {
        Self(SecretString::from(token.to_string()))
    }
}

impl Serialize for AuthToken {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.expose())
    }
}

impl<'de> Deserialize<'de> for AuthToken {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self(SecretString::from(token)))
    }
}

/// The authenticated identity held client-side for the life of the session.
///
/// Returned by `POST /api/users/login` and mirrored verbatim to durable
/// storage under the `userInfo` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    pub token: AuthToken,
    #[serde(default)]
    pub wishlist: Vec<CycleId>,
}

// =============================================================================
// Catalog
// =============================================================================

/// A catalog product snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    #[serde(rename = "_id")]
    pub id: CycleId,
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    pub image_url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub stock: u32,
    /// Users subscribed to back-in-stock alerts.
    #[serde(default)]
    pub subscribers: Vec<UserId>,
    /// Users subscribed to price-drop alerts.
    #[serde(default)]
    pub price_drop_subscribers: Vec<UserId>,
}

impl Cycle {
    /// Display name, e.g. "Hero Ranger".
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// One page of catalog results from `GET /cycles?keyword&pageNumber`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclePage {
    #[serde(default)]
    pub cycles: Vec<Cycle>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub pages: u32,
}

const fn default_page() -> u32 {
    1
}

/// Payload for creating or updating a cycle (admin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleInput {
    pub brand: String,
    pub model: String,
    pub price: Decimal,
    pub image_url: String,
    pub description: String,
    pub stock: u32,
}

// =============================================================================
// Cart
// =============================================================================

/// One product-and-quantity entry in the cart.
///
/// The server populates the full cycle document on every cart response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "cycleId")]
    pub cycle: Cycle,
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.cycle.price * Decimal::from(self.quantity)
    }
}

/// Server-authoritative cart contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

/// Shipping destination for a checkout pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

// =============================================================================
// Orders
// =============================================================================

/// Owner snapshot populated on order detail responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUser {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
}

/// A line item snapshot frozen at order placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Reference back to the catalog product.
    pub cycle: CycleId,
    pub name: String,
    pub image: String,
    pub price: Decimal,
    pub qty: u32,
}

/// Customer-initiated, admin-adjudicated cancellation sub-state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancellationDetails {
    pub reason: String,
    #[serde(default)]
    pub requested_at: Option<DateTime<Utc>>,
    /// Status to restore when an admin rejects the request.
    #[serde(default)]
    pub previous_status: Option<OrderStatus>,
}

/// An order snapshot as the server persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    /// Populated on detail responses; absent on some list responses.
    #[serde(default)]
    pub user: Option<OrderUser>,
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub items_price: Decimal,
    pub shipping_price: Decimal,
    pub tax_price: Decimal,
    pub total_price: Decimal,
    #[serde(default)]
    pub is_paid: bool,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub delivered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_refunded: bool,
    #[serde(default)]
    pub refunded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub cancellation_details: Option<CancellationDetails>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for `POST /api/orders`.
///
/// The price fields are client-advisory; the server may recompute.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub order_items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub items_price: Decimal,
    pub tax_price: Decimal,
    pub shipping_price: Decimal,
    pub total_price: Decimal,
}

/// Payment authorization handle from `POST /api/orders/:id/create-payment-intent`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

// =============================================================================
// Users (admin) and generic envelopes
// =============================================================================

/// Row in the admin user list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_verified: bool,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Response of the wishlist toggle: acknowledgement plus the authoritative
/// wishlist.
#[derive(Debug, Clone, Deserialize)]
pub struct WishlistUpdate {
    pub message: String,
    #[serde(default)]
    pub wishlist: Vec<CycleId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_round_trips_byte_for_byte() {
        let raw = r#"{"_id":"u1","name":"Asha","email":"asha@example.com","isAdmin":false,"token":"tok-123","wishlist":["c1","c2"]}"#;
        let identity: Identity = serde_json::from_str(raw).expect("parse identity");
        assert_eq!(identity.token.expose(), "tok-123");

        let json = serde_json::to_string(&identity).expect("serialize identity");
        assert_eq!(json, raw);
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = AuthToken::from("super-secret");
        assert_eq!(format!("{token:?}"), "AuthToken([REDACTED])");
    }

    #[test]
    fn cycle_page_defaults_missing_counts() {
        let page: CyclePage = serde_json::from_str(r#"{"cycles":[]}"#).expect("parse page");
        assert_eq!(page.page, 1);
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn cart_line_parses_populated_cycle_and_totals() {
        let raw = r#"{"cycleId":{"_id":"c1","brand":"Hero","model":"Ranger","price":12000,"imageUrl":"/img/c1.jpg","stock":3},"quantity":2}"#;
        let line: CartLine = serde_json::from_str(raw).expect("parse line");
        assert_eq!(line.cycle.display_name(), "Hero Ranger");
        assert_eq!(line.line_total(), Decimal::from(24_000));
    }

    #[test]
    fn order_status_strings_parse_inside_order() {
        let raw = r#"{
            "_id": "o1",
            "orderItems": [],
            "shippingAddress": {"address":"12 MG Road","city":"Pune","postalCode":"411001","country":"India"},
            "paymentMethod": "COD",
            "itemsPrice": 800, "shippingPrice": 500, "taxPrice": 144, "totalPrice": 1444,
            "status": "Out for Delivery"
        }"#;
        let order: Order = serde_json::from_str(raw).expect("parse order");
        assert_eq!(order.status, OrderStatus::OutForDelivery);
        assert_eq!(order.payment_method, PaymentMethod::Cod);
        assert!(order.cancellation_details.is_none());
    }
}
