//! Admin screen tests: catalog management, order queue, user list.

use std::sync::Arc;

use cycle_bazaar_admin::views::{AddCycleForm, AdminDashboardView, AdminOrdersView, UserListView};
use cycle_bazaar_admin::{EditCycleView, StaticPrompt};
use cycle_bazaar_client::storage::MemoryStore;
use cycle_bazaar_client::types::ShippingAddress;
use cycle_bazaar_client::{CartStore, SessionStore};
use cycle_bazaar_core::{
    CancellationAction, CycleId, OrderId, OrderStatus, PaymentMethod, UserId, ViewState,
};
use cycle_bazaar_integration_tests::TestApi;
use cycle_bazaar_storefront::views::{CycleDetailView, LoginForm, OrderLifecycleView};
use cycle_bazaar_storefront::CheckoutSequencer;

async fn login(api_stub: &TestApi, email: &str) -> (SessionStore, CartStore) {
    let api = api_stub.client();
    let storage = Arc::new(MemoryStore::new());
    let mut session = SessionStore::new(storage.clone());
    let mut cart = CartStore::new(api.clone(), storage);
    let form = LoginForm {
        email: email.into(),
        password: "secret".into(),
    };
    form.submit(&api, &mut session, &mut cart)
        .await
        .expect("login");
    (session, cart)
}

async fn place_cancellation_request(api_stub: &TestApi) -> OrderId {
    let (session, mut cart) = login(api_stub, "rider@example.com").await;
    let identity = session.identity().cloned();
    cart.add_to_cart(identity.as_ref(), &CycleId::new("c1"), 1)
        .await
        .expect("add");

    let mut flow = CheckoutSequencer::new(api_stub.client());
    flow.submit_shipping(
        &mut cart,
        ShippingAddress {
            address: "12 Canal Road".into(),
            city: "Pune".into(),
            postal_code: "411001".into(),
            country: "India".into(),
        },
    )
    .expect("shipping");
    flow.submit_payment(&mut cart, PaymentMethod::Cod)
        .expect("payment");
    let order = flow
        .place_order(&session, &mut cart)
        .await
        .expect("place order");

    let mut view = OrderLifecycleView::new(
        api_stub.client(),
        order.id.clone(),
        false,
    );
    view.load(&session).await;
    view.request_cancellation(&session, "Wrong colour")
        .await
        .expect("request cancellation");
    order.id
}

// ============================================================================
// Access control
// ============================================================================

#[tokio::test]
async fn test_admin_screens_refuse_non_admin_sessions() {
    let api_stub = TestApi::spawn().await;
    let (rider, _) = login(&api_stub, "rider@example.com").await;

    let mut dashboard = AdminDashboardView::new(api_stub.client());
    dashboard.load(&rider).await;
    assert!(
        dashboard
            .cycles
            .error()
            .expect("gated")
            .contains("admin")
    );

    let mut orders = AdminOrdersView::new(api_stub.client());
    orders.load(&rider).await;
    assert!(orders.state.error().is_some());

    let mut users = UserListView::new(api_stub.client());
    users.load(&rider).await;
    assert!(users.state.error().is_some());
}

// ============================================================================
// Catalog management
// ============================================================================

#[tokio::test]
async fn test_add_edit_and_delete_a_cycle() {
    let api_stub = TestApi::spawn().await;
    let (admin, _) = login(&api_stub, "admin@example.com").await;

    let mut dashboard = AdminDashboardView::new(api_stub.client());
    dashboard.load(&admin).await;
    assert_eq!(dashboard.cycles.ready().expect("catalog").len(), 3);

    let form = AddCycleForm {
        brand: "Firefox".into(),
        model: "Cyclone".into(),
        price: "15500".into(),
        image_url: "/img/cyclone.jpg".into(),
        description: "Trail bike".into(),
        stock: "6".into(),
    };
    dashboard.add_cycle(&admin, &form).await.expect("add cycle");
    let cycles = dashboard.cycles.ready().expect("catalog");
    assert_eq!(cycles.len(), 4);
    let new_id = cycles
        .iter()
        .find(|cycle| cycle.brand == "Firefox")
        .expect("new cycle listed")
        .id
        .clone();

    // Edit: bump the stock through the edit screen.
    let mut edit = EditCycleView::new(api_stub.client(), new_id.clone());
    edit.load().await;
    if let ViewState::Ready(form) = &mut edit.state {
        form.stock = "9".into();
    }
    edit.save(&admin).await.expect("save edit");

    let mut detail = CycleDetailView::new(api_stub.client());
    detail.load(&new_id).await;
    assert_eq!(detail.state.ready().expect("cycle").stock, 9);

    // Delete, with the prompt approving.
    let outcome = dashboard
        .delete_cycle(&admin, &StaticPrompt::approving("yes"), &new_id)
        .await
        .expect("delete");
    assert!(outcome.is_some());
    assert_eq!(dashboard.cycles.ready().expect("catalog").len(), 3);
}

#[tokio::test]
async fn test_declined_delete_leaves_the_catalog_alone() {
    let api_stub = TestApi::spawn().await;
    let (admin, _) = login(&api_stub, "admin@example.com").await;

    let mut dashboard = AdminDashboardView::new(api_stub.client());
    dashboard.load(&admin).await;
    let outcome = dashboard
        .delete_cycle(&admin, &StaticPrompt::declining(), &CycleId::new("c1"))
        .await
        .expect("no-op");
    assert!(outcome.is_none());
    assert_eq!(dashboard.cycles.ready().expect("catalog").len(), 3);
}

// ============================================================================
// Cancellation queue
// ============================================================================

#[tokio::test]
async fn test_cancellation_queue_drains_after_a_verdict() {
    let api_stub = TestApi::spawn().await;
    let order_id = place_cancellation_request(&api_stub).await;
    let (admin, _) = login(&api_stub, "admin@example.com").await;

    let mut dashboard = AdminDashboardView::new(api_stub.client());
    dashboard.load(&admin).await;
    let pending = dashboard.cancellation_requests();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, order_id);

    dashboard
        .manage_cancellation(
            &admin,
            &StaticPrompt::approving("yes"),
            &order_id,
            CancellationAction::Approve,
        )
        .await
        .expect("approve");

    assert!(dashboard.cancellation_requests().is_empty());
    let order = api_stub.order(order_id.as_str()).expect("order kept");
    assert_eq!(order["status"], "Cancelled");
}

// ============================================================================
// Orders and users
// ============================================================================

#[tokio::test]
async fn test_admin_order_list_shows_every_order() {
    let api_stub = TestApi::spawn().await;
    let order_id = place_cancellation_request(&api_stub).await;
    let (admin, _) = login(&api_stub, "admin@example.com").await;

    let mut orders = AdminOrdersView::new(api_stub.client());
    orders.load(&admin).await;
    let listed = orders.state.ready().expect("orders");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, order_id);
    assert_eq!(listed[0].status, OrderStatus::CancellationRequested);
}

#[tokio::test]
async fn test_admins_cannot_delete_their_own_account() {
    let api_stub = TestApi::spawn().await;
    let (admin, _) = login(&api_stub, "admin@example.com").await;

    let mut users = UserListView::new(api_stub.client());
    users.load(&admin).await;
    assert_eq!(users.state.ready().expect("users").len(), 2);

    let own_id = admin.identity().expect("logged in").id.clone();
    assert!(!users.can_delete(&admin, &own_id));
    let err = users
        .delete_user(&admin, &StaticPrompt::approving("yes"), &own_id)
        .await
        .expect_err("self-delete refused");
    assert!(err.to_string().contains("cannot delete"));

    // Deleting the rider works.
    let outcome = users
        .delete_user(
            &admin,
            &StaticPrompt::approving("yes"),
            &UserId::new("u-rider"),
        )
        .await
        .expect("delete rider");
    assert!(outcome.is_some());
    assert_eq!(users.state.ready().expect("users").len(), 1);
}
