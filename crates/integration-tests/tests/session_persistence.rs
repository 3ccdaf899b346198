//! Session and checkout-preference persistence across restarts.

use std::sync::Arc;

use cycle_bazaar_client::storage::{DurableStore, FileStore, MemoryStore, keys};
use cycle_bazaar_client::types::ShippingAddress;
use cycle_bazaar_client::{ApiClient, CartStore, SessionStore};
use cycle_bazaar_core::PaymentMethod;
use cycle_bazaar_integration_tests::TestApi;
use cycle_bazaar_storefront::views::LoginForm;

async fn login_into(api: &ApiClient, storage: Arc<dyn DurableStore>) -> SessionStore {
    let mut session = SessionStore::new(storage.clone());
    let mut cart = CartStore::new(api.clone(), storage);
    let form = LoginForm {
        email: "rider@example.com".into(),
        password: "secret".into(),
    };
    form.submit(api, &mut session, &mut cart)
        .await
        .expect("login");
    session
}

#[tokio::test]
async fn test_identity_rehydrates_byte_for_byte() {
    let api_stub = TestApi::spawn().await;
    let api = api_stub.client();
    let storage: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());

    let session = login_into(&api, storage.clone()).await;
    let stored_before = storage
        .get_raw(keys::USER_INFO)
        .expect("read")
        .expect("identity stored");

    // A fresh process: a new store over the same durable state.
    let rehydrated = SessionStore::new(storage.clone());
    assert_eq!(rehydrated.identity(), session.identity());

    // Rehydration must not rewrite the stored blob.
    let stored_after = storage
        .get_raw(keys::USER_INFO)
        .expect("read")
        .expect("still stored");
    assert_eq!(stored_before, stored_after);
}

#[tokio::test]
async fn test_logout_clears_the_durable_mirror() {
    let api_stub = TestApi::spawn().await;
    let api = api_stub.client();
    let storage: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());

    let mut session = login_into(&api, storage.clone()).await;
    session.logout().expect("logout");

    let rehydrated = SessionStore::new(storage);
    assert!(rehydrated.identity().is_none());
}

#[tokio::test]
async fn test_checkout_preferences_survive_a_restart() {
    let api_stub = TestApi::spawn().await;
    let api = api_stub.client();
    let storage: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());

    let mut cart = CartStore::new(api.clone(), storage.clone());
    cart.save_shipping_address(ShippingAddress {
        address: "12 Canal Road".into(),
        city: "Pune".into(),
        postal_code: "411001".into(),
        country: "India".into(),
    })
    .expect("save address");
    cart.save_payment_method(PaymentMethod::Stripe)
        .expect("save method");

    let rehydrated = CartStore::new(api, storage);
    assert_eq!(rehydrated.shipping_address().city, "Pune");
    assert_eq!(rehydrated.payment_method(), Some(PaymentMethod::Stripe));
    // Cart lines are server state, not local state; they start empty.
    assert!(rehydrated.is_empty());
}

#[tokio::test]
async fn test_file_store_round_trips_the_whole_session() {
    let api_stub = TestApi::spawn().await;
    let api = api_stub.client();
    let path = std::env::temp_dir().join(format!(
        "cycle-bazaar-session-test-{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let storage: Arc<dyn DurableStore> =
            Arc::new(FileStore::open(&path).expect("open store"));
        let session = login_into(&api, storage).await;
        assert!(session.identity().is_some());
    }

    // Reopen from disk, as a restarted process would.
    let storage: Arc<dyn DurableStore> = Arc::new(FileStore::open(&path).expect("reopen store"));
    let session = SessionStore::new(storage);
    let identity = session.identity().expect("identity persisted");
    assert_eq!(identity.email, "rider@example.com");

    let _ = std::fs::remove_file(&path);
}
