//! End-to-end storefront tests: browse, cart, and the checkout flow.

use std::sync::Arc;

use cycle_bazaar_client::storage::MemoryStore;
use cycle_bazaar_client::types::ShippingAddress;
use cycle_bazaar_client::{CartStore, SessionStore};
use cycle_bazaar_core::{CycleId, PaymentMethod};
use cycle_bazaar_integration_tests::TestApi;
use cycle_bazaar_storefront::views::{CatalogView, CycleDetailView, LoginForm};
use cycle_bazaar_storefront::{CheckoutSequencer, CheckoutStep};
use rust_decimal::Decimal;

async fn rider_login(api_stub: &TestApi) -> (SessionStore, CartStore) {
    let api = api_stub.client();
    let storage = Arc::new(MemoryStore::new());
    let mut session = SessionStore::new(storage.clone());
    let mut cart = CartStore::new(api.clone(), storage);

    let form = LoginForm {
        email: "rider@example.com".into(),
        password: "secret".into(),
    };
    form.submit(&api, &mut session, &mut cart)
        .await
        .expect("login");
    (session, cart)
}

fn address() -> ShippingAddress {
    ShippingAddress {
        address: "12 Canal Road".into(),
        city: "Pune".into(),
        postal_code: "411001".into(),
        country: "India".into(),
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[tokio::test]
async fn test_catalog_search_filters_by_keyword() {
    let api_stub = TestApi::spawn().await;
    let mut view = CatalogView::new(api_stub.client());

    view.load(Some("hero"), 1).await;
    let page = view.state.ready().expect("catalog loads");
    assert_eq!(page.cycles.len(), 1);
    assert_eq!(page.cycles[0].brand, "Hero");

    let links = view.page_links();
    assert_eq!(links.len(), 1);
    assert_eq!(
        links.first().map(|link| link.href.as_str()),
        Some("/search/hero/page/1")
    );

    view.load(None, 1).await;
    let page = view.state.ready().expect("catalog loads");
    assert_eq!(page.cycles.len(), 3);
    assert_eq!(page.pager.pages, 1);
}

#[tokio::test]
async fn test_out_of_stock_cycle_cannot_be_added() {
    let api_stub = TestApi::spawn().await;
    let (session, mut cart) = rider_login(&api_stub).await;

    let mut detail = CycleDetailView::new(api_stub.client());
    detail.load(&CycleId::new("c2")).await;

    let err = detail
        .add_to_cart(&session, &mut cart)
        .await
        .expect_err("c2 is out of stock");
    assert!(err.to_string().contains("out of stock"));
    assert!(cart.is_empty());
}

// ============================================================================
// Cart mutations round-trip through the server
// ============================================================================

#[tokio::test]
async fn test_repeated_adds_accumulate_into_one_line() {
    let api_stub = TestApi::spawn().await;
    let (session, mut cart) = rider_login(&api_stub).await;
    let identity = session.identity().cloned();

    cart.add_to_cart(identity.as_ref(), &CycleId::new("c1"), 1)
        .await
        .expect("first add");
    cart.add_to_cart(identity.as_ref(), &CycleId::new("c1"), 2)
        .await
        .expect("second add");

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, 3);
    assert_eq!(cart.subtotal(), Decimal::from(27_000));
}

#[tokio::test]
async fn test_remove_then_add_yields_the_new_quantity() {
    let api_stub = TestApi::spawn().await;
    let (session, mut cart) = rider_login(&api_stub).await;
    let identity = session.identity().cloned();

    cart.add_to_cart(identity.as_ref(), &CycleId::new("c1"), 5)
        .await
        .expect("add");
    cart.remove_from_cart(identity.as_ref(), &CycleId::new("c1"))
        .await
        .expect("remove");
    assert!(cart.is_empty());

    cart.add_to_cart(identity.as_ref(), &CycleId::new("c1"), 2)
        .await
        .expect("re-add");
    assert_eq!(cart.items()[0].quantity, 2);
}

#[tokio::test]
async fn test_cart_survives_a_fresh_session_for_the_same_account() {
    let api_stub = TestApi::spawn().await;
    let (session, mut cart) = rider_login(&api_stub).await;
    let identity = session.identity().cloned();
    cart.add_to_cart(identity.as_ref(), &CycleId::new("c3"), 1)
        .await
        .expect("add");

    // A second device logs in: the server-side cart comes down with it.
    let (session2, mut cart2) = rider_login(&api_stub).await;
    cart2.sync_identity(session2.identity()).await;
    assert_eq!(cart2.items().len(), 1);
    assert_eq!(cart2.items()[0].cycle.id, CycleId::new("c3"));
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_totals_cross_the_free_shipping_threshold() {
    let api_stub = TestApi::spawn().await;
    let (session, mut cart) = rider_login(&api_stub).await;
    let identity = session.identity().cloned();

    // One Hero Ranger: 9000, under the threshold.
    cart.add_to_cart(identity.as_ref(), &CycleId::new("c1"), 1)
        .await
        .expect("add");
    let totals = CheckoutSequencer::totals(&cart);
    assert_eq!(totals.shipping_price, Decimal::from(500));
    assert_eq!(totals.tax_price, Decimal::from(1_620));
    assert_eq!(totals.total_price, Decimal::from(11_120));

    // Two of them: 18000, free shipping.
    cart.add_to_cart(identity.as_ref(), &CycleId::new("c1"), 1)
        .await
        .expect("add");
    let totals = CheckoutSequencer::totals(&cart);
    assert_eq!(totals.shipping_price, Decimal::ZERO);
    assert_eq!(totals.tax_price, Decimal::from(3_240));
    assert_eq!(totals.total_price, Decimal::from(21_240));
}

#[tokio::test]
async fn test_full_cod_checkout_places_the_order_and_empties_the_cart() {
    let api_stub = TestApi::spawn().await;
    let (session, mut cart) = rider_login(&api_stub).await;
    let identity = session.identity().cloned();
    cart.add_to_cart(identity.as_ref(), &CycleId::new("c1"), 2)
        .await
        .expect("add");

    let mut flow = CheckoutSequencer::new(api_stub.client());
    flow.submit_shipping(&mut cart, address()).expect("shipping");
    flow.submit_payment(&mut cart, PaymentMethod::Cod)
        .expect("payment");

    let order = flow
        .place_order(&session, &mut cart)
        .await
        .expect("place order");
    assert_eq!(flow.step, CheckoutStep::Placed(order.id.clone()));
    assert!(cart.is_empty());

    // Snapshots, not references: the line carries the display name and the
    // price at purchase time.
    assert_eq!(order.order_items.len(), 1);
    assert_eq!(order.order_items[0].name, "Hero Ranger");
    assert_eq!(order.order_items[0].qty, 2);
    assert_eq!(order.total_price, Decimal::from(21_240));
    assert!(!order.is_paid);

    // The server also dropped its copy of the cart.
    cart.sync_identity(identity.as_ref()).await;
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_rejected_order_keeps_the_flow_at_review() {
    let api_stub = TestApi::spawn().await;
    let (session, mut cart) = rider_login(&api_stub).await;

    // Empty cart: the server would reject it, but the sequencer refuses
    // before any request.
    let mut flow = CheckoutSequencer::new(api_stub.client());
    flow.submit_shipping(&mut cart, address()).expect("shipping");
    flow.submit_payment(&mut cart, PaymentMethod::Cod)
        .expect("payment");

    let err = flow
        .place_order(&session, &mut cart)
        .await
        .expect_err("empty cart cannot be placed");
    assert!(err.to_string().contains("empty"));
    assert_eq!(flow.step, CheckoutStep::Review);
}
