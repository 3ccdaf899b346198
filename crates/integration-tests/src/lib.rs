//! Integration test harness for the Cycle Bazaar client.
//!
//! Spins up an in-process stub of the remote Cycle Bazaar API on a random
//! loopback port, seeded with a small catalog and two accounts. The stub
//! implements the same wire contract the production server speaks, so the
//! client crates are exercised end to end over real HTTP.
//!
//! Accounts:
//! - `rider@example.com` / `secret` (customer, token [`RIDER_TOKEN`])
//! - `admin@example.com` / `secret` (admin, token [`ADMIN_TOKEN`])

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::{BTreeMap, HashMap};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Json;
use serde_json::{Value, json};
use url::Url;

use cycle_bazaar_client::{ApiClient, ClientConfig};

pub const RIDER_TOKEN: &str = "tok-rider";
pub const ADMIN_TOKEN: &str = "tok-admin";

const PAGE_SIZE: usize = 8;
const NOW: &str = "2026-08-30T12:00:00Z";

/// Mutable world the stub serves from.
#[derive(Debug, Default)]
pub struct StubState {
    pub cycles: Vec<Value>,
    /// identity templates keyed by token
    pub users: BTreeMap<String, Value>,
    /// token -> (`cycle_id`, quantity), insertion ordered
    pub carts: HashMap<String, Vec<(String, u32)>>,
    pub orders: BTreeMap<String, Value>,
    /// token -> wishlist cycle ids
    pub wishlists: HashMap<String, Vec<String>>,
    next_order: u32,
}

impl StubState {
    fn seeded() -> Self {
        let mut state = Self::default();
        state.cycles = vec![
            cycle_json("c1", "Hero", "Ranger", 9_000.0, 5),
            cycle_json("c2", "Atlas", "Storm", 12_000.0, 0),
            cycle_json("c3", "BSA", "Comet", 3_500.5, 2),
        ];
        state.users.insert(
            RIDER_TOKEN.to_owned(),
            json!({
                "_id": "u-rider",
                "name": "Riya",
                "email": "rider@example.com",
                "isAdmin": false,
                "token": RIDER_TOKEN,
                "wishlist": [],
            }),
        );
        state.users.insert(
            ADMIN_TOKEN.to_owned(),
            json!({
                "_id": "u-admin",
                "name": "Root",
                "email": "admin@example.com",
                "isAdmin": true,
                "token": ADMIN_TOKEN,
                "wishlist": [],
            }),
        );
        state
    }

    fn cycle(&self, id: &str) -> Option<&Value> {
        self.cycles.iter().find(|cycle| cycle["_id"] == id)
    }
}

fn cycle_json(id: &str, brand: &str, model: &str, price: f64, stock: u32) -> Value {
    json!({
        "_id": id,
        "brand": brand,
        "model": model,
        "price": price,
        "imageUrl": format!("/img/{id}.jpg"),
        "description": format!("{brand} {model} test cycle"),
        "stock": stock,
        "subscribers": [],
        "priceDropSubscribers": [],
    })
}

type Shared = Arc<Mutex<StubState>>;

/// A running stub API plus handles for assertions.
pub struct TestApi {
    pub base_url: Url,
    state: Shared,
}

impl TestApi {
    /// Bind a random loopback port and start serving the stub.
    pub async fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(StubState::seeded()));
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind loopback");
        let addr: SocketAddr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}")).expect("stub url");
        Self { base_url, state }
    }

    #[must_use]
    pub fn client(&self) -> ApiClient {
        ApiClient::new(&ClientConfig::new(self.base_url.clone()))
    }

    /// Direct look at the stub world, for assertions and fixture edits.
    pub fn state(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().expect("stub state lock")
    }

    /// Snapshot of a stored order.
    #[must_use]
    pub fn order(&self, id: &str) -> Option<Value> {
        self.state().orders.get(id).cloned()
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/cycles", get(list_cycles))
        .route("/cycles/add", post(add_cycle))
        .route("/cycles/update/{id}", put(update_cycle))
        .route("/cycles/{id}", get(get_cycle).delete(delete_cycle))
        .route(
            "/cycles/{id}/subscribe",
            post(subscribe_stock).delete(unsubscribe_stock),
        )
        .route(
            "/cycles/{id}/subscribe-price",
            post(subscribe_price).delete(unsubscribe_price),
        )
        .route("/api/users/login", post(login))
        .route("/api/users/register", post(register))
        .route("/api/users/verify/{token}", get(verify_email))
        .route("/api/users/forgot-password", post(forgot_password))
        .route("/api/users/reset-password/{token}", post(reset_password))
        .route("/api/users/wishlist", get(get_wishlist).post(toggle_wishlist))
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", axum::routing::delete(delete_user))
        .route("/api/cart", get(get_cart))
        .route("/api/cart/add", post(cart_add))
        .route("/api/cart/remove/{id}", axum::routing::delete(cart_remove))
        .route("/api/orders", post(place_order).get(list_orders))
        .route("/api/orders/myorders", get(my_orders))
        .route(
            "/api/orders/{id}",
            get(get_order).delete(delete_order),
        )
        .route("/api/orders/{id}/pay", put(pay_order))
        .route("/api/orders/{id}/status", put(set_status))
        .route("/api/orders/{id}/cancel", put(cancel_order))
        .route(
            "/api/orders/{id}/manage-cancellation",
            put(manage_cancellation),
        )
        .route(
            "/api/orders/{id}/create-payment-intent",
            post(create_payment_intent),
        )
        .with_state(state)
}

// ============================================================================
// Auth plumbing
// ============================================================================

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::to_owned)
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn require_user(state: &StubState, headers: &HeaderMap) -> Result<(String, Value), Response> {
    let Some(token) = bearer(headers) else {
        return Err(fail(StatusCode::UNAUTHORIZED, "Not authorized, no token"));
    };
    match state.users.get(&token) {
        Some(user) => Ok((token, user.clone())),
        None => Err(fail(StatusCode::UNAUTHORIZED, "Not authorized, token failed")),
    }
}

fn require_admin(state: &StubState, headers: &HeaderMap) -> Result<String, Response> {
    let (token, user) = require_user(state, headers)?;
    if user["isAdmin"] == true {
        Ok(token)
    } else {
        Err(fail(StatusCode::FORBIDDEN, "Not authorized as an admin"))
    }
}

// ============================================================================
// Catalog handlers
// ============================================================================

async fn list_cycles(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let state = state.lock().expect("lock");
    let keyword = params
        .get("keyword")
        .map(|k| k.to_lowercase())
        .unwrap_or_default();
    let page: usize = params
        .get("pageNumber")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1);

    let matching: Vec<&Value> = state
        .cycles
        .iter()
        .filter(|cycle| {
            keyword.is_empty()
                || cycle["brand"]
                    .as_str()
                    .is_some_and(|b| b.to_lowercase().contains(&keyword))
                || cycle["model"]
                    .as_str()
                    .is_some_and(|m| m.to_lowercase().contains(&keyword))
        })
        .collect();

    let pages = matching.len().div_ceil(PAGE_SIZE).max(1);
    let cycles: Vec<&Value> = matching
        .into_iter()
        .skip((page - 1) * PAGE_SIZE)
        .take(PAGE_SIZE)
        .collect();

    Json(json!({ "cycles": cycles, "page": page, "pages": pages })).into_response()
}

async fn get_cycle(State(state): State<Shared>, Path(id): Path<String>) -> Response {
    let state = state.lock().expect("lock");
    match state.cycle(&id) {
        Some(cycle) => Json(cycle.clone()).into_response(),
        None => fail(StatusCode::NOT_FOUND, "Cycle not found"),
    }
}

async fn add_cycle(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("lock");
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }

    let id = format!("c{}", state.cycles.len() + 1);
    let mut cycle = cycle_json(&id, "", "", 0.0, 0);
    merge_fields(
        &mut cycle,
        &body,
        &["brand", "model", "price", "imageUrl", "description", "stock"],
    );
    state.cycles.push(cycle);
    Json(json!({ "message": "Cycle added successfully" })).into_response()
}

async fn update_cycle(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("lock");
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }

    let Some(cycle) = state.cycles.iter_mut().find(|cycle| cycle["_id"] == *id) else {
        return fail(StatusCode::NOT_FOUND, "Cycle not found");
    };
    merge_fields(
        cycle,
        &body,
        &["brand", "model", "price", "imageUrl", "description", "stock"],
    );
    Json(json!({ "message": "Cycle updated successfully" })).into_response()
}

async fn delete_cycle(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.lock().expect("lock");
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    state.cycles.retain(|cycle| cycle["_id"] != *id);
    Json(json!({ "message": "Cycle deleted successfully" })).into_response()
}

fn merge_fields(target: &mut Value, body: &Value, fields: &[&str]) {
    for field in fields {
        if let Some(value) = body.get(field) {
            target[*field] = value.clone();
        }
    }
}

// ============================================================================
// Alert subscriptions
// ============================================================================

async fn subscribe_stock(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    toggle_subscriber(&state, &headers, &id, "subscribers", true)
}

async fn unsubscribe_stock(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    toggle_subscriber(&state, &headers, &id, "subscribers", false)
}

async fn subscribe_price(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    toggle_subscriber(&state, &headers, &id, "priceDropSubscribers", true)
}

async fn unsubscribe_price(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    toggle_subscriber(&state, &headers, &id, "priceDropSubscribers", false)
}

fn toggle_subscriber(
    state: &Shared,
    headers: &HeaderMap,
    id: &str,
    field: &str,
    add: bool,
) -> Response {
    let mut state = state.lock().expect("lock");
    let (_, user) = match require_user(&state, headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let user_id = user["_id"].clone();

    let Some(cycle) = state.cycles.iter_mut().find(|cycle| cycle["_id"] == *id) else {
        return fail(StatusCode::NOT_FOUND, "Cycle not found");
    };
    let Some(list) = cycle[field].as_array_mut() else {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "bad fixture");
    };
    list.retain(|entry| *entry != user_id);
    if add {
        list.push(user_id);
        Json(json!({ "message": "Subscribed" })).into_response()
    } else {
        Json(json!({ "message": "Unsubscribed" })).into_response()
    }
}

// ============================================================================
// User handlers
// ============================================================================

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    let state = state.lock().expect("lock");
    let email = body["email"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    if password != "secret" {
        return fail(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    let identity = state
        .users
        .values()
        .find(|user| user["email"] == email)
        .cloned();
    match identity {
        Some(mut identity) => {
            let token = identity["token"].as_str().unwrap_or_default().to_owned();
            identity["wishlist"] =
                json!(state.wishlists.get(&token).cloned().unwrap_or_default());
            Json(identity).into_response()
        }
        None => fail(StatusCode::UNAUTHORIZED, "Invalid email or password"),
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body["email"].as_str().unwrap_or_default().is_empty() {
        return fail(StatusCode::BAD_REQUEST, "Email is required");
    }
    Json(json!({
        "message": "Registration successful! Please check your email to verify your account."
    }))
    .into_response()
}

async fn verify_email(Path(token): Path<String>) -> Response {
    if token == "good-token" {
        Json(json!({ "message": "Email verified successfully. You can now log in." }))
            .into_response()
    } else {
        fail(StatusCode::BAD_REQUEST, "Invalid or expired token")
    }
}

async fn forgot_password(Json(_body): Json<Value>) -> Response {
    Json(json!({ "message": "Password reset email sent" })).into_response()
}

async fn reset_password(Path(token): Path<String>, Json(_body): Json<Value>) -> Response {
    if token == "good-token" {
        Json(json!({ "message": "Password has been reset" })).into_response()
    } else {
        fail(StatusCode::BAD_REQUEST, "Invalid or expired token")
    }
}

async fn get_wishlist(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().expect("lock");
    let (token, _) = match require_user(&state, &headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let ids = state.wishlists.get(&token).cloned().unwrap_or_default();
    let cycles: Vec<&Value> = ids.iter().filter_map(|id| state.cycle(id)).collect();
    Json(json!(cycles)).into_response()
}

async fn toggle_wishlist(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("lock");
    let (token, _) = match require_user(&state, &headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let cycle_id = body["cycleId"].as_str().unwrap_or_default().to_owned();
    if state.cycle(&cycle_id).is_none() {
        return fail(StatusCode::NOT_FOUND, "Cycle not found");
    }

    let list = state.wishlists.entry(token).or_default();
    let message = if list.contains(&cycle_id) {
        list.retain(|id| *id != cycle_id);
        "Removed from wishlist"
    } else {
        list.push(cycle_id);
        "Added to wishlist"
    };
    let wishlist = list.clone();
    Json(json!({ "message": message, "wishlist": wishlist })).into_response()
}

async fn list_users(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().expect("lock");
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    let users: Vec<Value> = state
        .users
        .values()
        .map(|user| {
            json!({
                "_id": user["_id"],
                "name": user["name"],
                "email": user["email"],
                "isAdmin": user["isAdmin"],
                "isVerified": true,
            })
        })
        .collect();
    Json(json!(users)).into_response()
}

async fn delete_user(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.lock().expect("lock");
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    state.users.retain(|_, user| user["_id"] != *id);
    Json(json!({ "message": "User removed" })).into_response()
}

// ============================================================================
// Cart handlers
// ============================================================================

fn cart_response(state: &StubState, token: &str) -> Value {
    let entries = state.carts.get(token).cloned().unwrap_or_default();
    let items: Vec<Value> = entries
        .iter()
        .filter_map(|(id, quantity)| {
            state
                .cycle(id)
                .map(|cycle| json!({ "cycleId": cycle, "quantity": quantity }))
        })
        .collect();
    json!({ "items": items })
}

async fn get_cart(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().expect("lock");
    let (token, _) = match require_user(&state, &headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    Json(cart_response(&state, &token)).into_response()
}

async fn cart_add(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("lock");
    let (token, _) = match require_user(&state, &headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let cycle_id = body["cycleId"].as_str().unwrap_or_default().to_owned();
    let quantity = u32::try_from(body["quantity"].as_u64().unwrap_or(1)).unwrap_or(1);
    if state.cycle(&cycle_id).is_none() {
        return fail(StatusCode::NOT_FOUND, "Cycle not found");
    }

    let cart = state.carts.entry(token.clone()).or_default();
    match cart.iter_mut().find(|(id, _)| *id == cycle_id) {
        Some((_, existing)) => *existing += quantity,
        None => cart.push((cycle_id, quantity)),
    }
    Json(cart_response(&state, &token)).into_response()
}

async fn cart_remove(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.lock().expect("lock");
    let (token, _) = match require_user(&state, &headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    if let Some(cart) = state.carts.get_mut(&token) {
        cart.retain(|(cycle_id, _)| *cycle_id != id);
    }
    Json(cart_response(&state, &token)).into_response()
}

// ============================================================================
// Order handlers
// ============================================================================

async fn place_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("lock");
    let (token, user) = match require_user(&state, &headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    if body["orderItems"].as_array().is_none_or(Vec::is_empty) {
        return fail(StatusCode::BAD_REQUEST, "No order items");
    }

    state.next_order += 1;
    let id = format!("o{}", state.next_order);
    let order = json!({
        "_id": id,
        "user": { "_id": user["_id"], "name": user["name"], "email": user["email"] },
        "orderItems": body["orderItems"],
        "shippingAddress": body["shippingAddress"],
        "paymentMethod": body["paymentMethod"],
        "itemsPrice": body["itemsPrice"],
        "shippingPrice": body["shippingPrice"],
        "taxPrice": body["taxPrice"],
        "totalPrice": body["totalPrice"],
        "isPaid": false,
        "paidAt": null,
        "isDelivered": false,
        "deliveredAt": null,
        "isRefunded": false,
        "refundedAt": null,
        "status": "Processing",
        "cancellationDetails": null,
        "createdAt": NOW,
    });
    state.orders.insert(id.clone(), order.clone());
    // Placing an order consumes the server-side cart.
    state.carts.remove(&token);
    Json(order).into_response()
}

async fn list_orders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().expect("lock");
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    let orders: Vec<&Value> = state.orders.values().collect();
    Json(json!(orders)).into_response()
}

async fn my_orders(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let state = state.lock().expect("lock");
    let (_, user) = match require_user(&state, &headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let orders: Vec<&Value> = state
        .orders
        .values()
        .filter(|order| order["user"]["_id"] == user["_id"])
        .collect();
    Json(json!(orders)).into_response()
}

async fn get_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.lock().expect("lock");
    let (_, user) = match require_user(&state, &headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let Some(order) = state.orders.get(&id) else {
        return fail(StatusCode::NOT_FOUND, "Order not found");
    };
    if user["isAdmin"] != true && order["user"]["_id"] != user["_id"] {
        return fail(StatusCode::FORBIDDEN, "Not authorized to view this order");
    }
    Json(order.clone()).into_response()
}

async fn delete_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.lock().expect("lock");
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    if state.orders.remove(&id).is_none() {
        return fail(StatusCode::NOT_FOUND, "Order not found");
    }
    Json(json!({ "message": "Order removed" })).into_response()
}

async fn pay_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let mut state = state.lock().expect("lock");
    if let Err(resp) = require_user(&state, &headers) {
        return resp;
    }
    let Some(order) = state.orders.get_mut(&id) else {
        return fail(StatusCode::NOT_FOUND, "Order not found");
    };
    order["isPaid"] = json!(true);
    order["paidAt"] = json!(NOW);
    Json(order.clone()).into_response()
}

async fn set_status(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("lock");
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    let Some(order) = state.orders.get_mut(&id) else {
        return fail(StatusCode::NOT_FOUND, "Order not found");
    };
    let status = body["status"].clone();
    order["status"] = status.clone();
    if status == "Delivered" {
        order["isDelivered"] = json!(true);
        order["deliveredAt"] = json!(NOW);
    }
    Json(order.clone()).into_response()
}

async fn cancel_order(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("lock");
    let (_, user) = match require_user(&state, &headers) {
        Ok(found) => found,
        Err(resp) => return resp,
    };
    let Some(order) = state.orders.get_mut(&id) else {
        return fail(StatusCode::NOT_FOUND, "Order not found");
    };
    if order["user"]["_id"] != user["_id"] {
        return fail(StatusCode::FORBIDDEN, "Not authorized to cancel this order");
    }
    if order["status"] != "Processing" {
        return fail(
            StatusCode::BAD_REQUEST,
            "Order can no longer be cancelled",
        );
    }

    order["cancellationDetails"] = json!({
        "reason": body["reason"],
        "requestedAt": NOW,
        "previousStatus": order["status"],
    });
    order["status"] = json!("Cancellation Requested");
    Json(json!({ "message": "Cancellation requested" })).into_response()
}

async fn manage_cancellation(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().expect("lock");
    if let Err(resp) = require_admin(&state, &headers) {
        return resp;
    }
    let Some(order) = state.orders.get_mut(&id) else {
        return fail(StatusCode::NOT_FOUND, "Order not found");
    };
    if order["status"] != "Cancellation Requested" {
        return fail(StatusCode::BAD_REQUEST, "No cancellation request pending");
    }

    match body["action"].as_str() {
        Some("approve") => {
            order["status"] = json!("Cancelled");
            if order["isPaid"] == true {
                order["isRefunded"] = json!(true);
                order["refundedAt"] = json!(NOW);
            }
            Json(json!({ "message": "Cancellation approved" })).into_response()
        }
        Some("reject") => {
            // Revert to the status in force before the request; the details
            // stay behind as the audit trail.
            order["status"] = order["cancellationDetails"]["previousStatus"].clone();
            Json(json!({ "message": "Cancellation rejected" })).into_response()
        }
        _ => fail(StatusCode::BAD_REQUEST, "Unknown action"),
    }
}

async fn create_payment_intent(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let state = state.lock().expect("lock");
    if let Err(resp) = require_user(&state, &headers) {
        return resp;
    }
    let Some(order) = state.orders.get(&id) else {
        return fail(StatusCode::NOT_FOUND, "Order not found");
    };
    if order["isPaid"] == true {
        return fail(StatusCode::BAD_REQUEST, "Order is already paid");
    }
    Json(json!({ "clientSecret": format!("cs_test_{id}") })).into_response()
}
