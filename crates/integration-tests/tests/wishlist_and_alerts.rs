//! Wishlist and alert-subscription flows against the stub API.

use std::sync::Arc;

use cycle_bazaar_client::storage::MemoryStore;
use cycle_bazaar_client::{CartStore, SessionStore};
use cycle_bazaar_core::CycleId;
use cycle_bazaar_integration_tests::TestApi;
use cycle_bazaar_storefront::views::{CycleDetailView, LoginForm, WishlistView};

async fn rider_login(api_stub: &TestApi) -> SessionStore {
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
    session
}

#[tokio::test]
async fn test_wishlist_toggle_updates_the_session_mirror() {
    let api_stub = TestApi::spawn().await;
    let mut session = rider_login(&api_stub).await;

    let mut detail = CycleDetailView::new(api_stub.client());
    detail.load(&CycleId::new("c1")).await;
    assert!(!detail.flags(session.identity()).in_wishlist);

    let message = detail
        .toggle_wishlist(&mut session)
        .await
        .expect("toggle on");
    assert_eq!(message, "Added to wishlist");
    assert!(detail.flags(session.identity()).in_wishlist);

    let message = detail
        .toggle_wishlist(&mut session)
        .await
        .expect("toggle off");
    assert_eq!(message, "Removed from wishlist");
    assert!(!detail.flags(session.identity()).in_wishlist);
}

#[tokio::test]
async fn test_wishlist_screen_lists_and_removes_saved_cycles() {
    let api_stub = TestApi::spawn().await;
    let mut session = rider_login(&api_stub).await;

    let mut detail = CycleDetailView::new(api_stub.client());
    for id in ["c1", "c3"] {
        detail.load(&CycleId::new(id)).await;
        detail
            .toggle_wishlist(&mut session)
            .await
            .expect("add to wishlist");
    }

    let mut wishlist = WishlistView::new(api_stub.client());
    wishlist.load(&session).await;
    assert_eq!(wishlist.state.ready().expect("loads").len(), 2);

    wishlist
        .remove(&mut session, &CycleId::new("c1"))
        .await
        .expect("remove");
    let remaining = wishlist.state.ready().expect("still ready");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, CycleId::new("c3"));

    // The session mirror followed the server.
    let identity = session.identity().expect("logged in");
    assert_eq!(identity.wishlist, vec![CycleId::new("c3")]);
}

#[tokio::test]
async fn test_wishlist_screen_requires_login() {
    let api_stub = TestApi::spawn().await;
    let session = SessionStore::new(Arc::new(MemoryStore::new()));

    let mut wishlist = WishlistView::new(api_stub.client());
    wishlist.load(&session).await;
    assert!(
        wishlist
            .state
            .error()
            .expect("login gate")
            .contains("login")
    );
}

#[tokio::test]
async fn test_stock_and_price_alerts_toggle_independently() {
    let api_stub = TestApi::spawn().await;
    let session = rider_login(&api_stub).await;

    let mut detail = CycleDetailView::new(api_stub.client());
    detail.load(&CycleId::new("c2")).await;

    detail
        .toggle_stock_alert(&session)
        .await
        .expect("subscribe stock");
    let flags = detail.flags(session.identity());
    assert!(flags.stock_subscribed);
    assert!(!flags.price_drop_subscribed);

    detail
        .toggle_price_drop_alert(&session)
        .await
        .expect("subscribe price");
    let flags = detail.flags(session.identity());
    assert!(flags.stock_subscribed);
    assert!(flags.price_drop_subscribed);

    detail
        .toggle_stock_alert(&session)
        .await
        .expect("unsubscribe stock");
    let flags = detail.flags(session.identity());
    assert!(!flags.stock_subscribed);
    assert!(flags.price_drop_subscribed);

    // The server agrees with the locally flipped flags.
    detail.load(&CycleId::new("c2")).await;
    let flags = detail.flags(session.identity());
    assert!(!flags.stock_subscribed);
    assert!(flags.price_drop_subscribed);
}
