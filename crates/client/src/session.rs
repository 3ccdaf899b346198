//! The session store: the authenticated identity for the life of the tab.
//!
//! No network calls originate here - callers perform the login request and
//! pass the resulting identity in. Durable storage is the commit point:
//! every mutation writes the mirror first, then memory, so the in-memory
//! copy is always the durable copy's cache.

use std::sync::Arc;

use cycle_bazaar_core::CycleId;
use tracing::instrument;

use crate::storage::{self, DurableStore, StorageError, keys};
use crate::types::{AuthToken, Identity};

/// Holds the authenticated identity and mirrors it to durable storage.
pub struct SessionStore {
    identity: Option<Identity>,
    storage: Arc<dyn DurableStore>,
}

impl SessionStore {
    /// Create the store, hydrating from durable storage.
    ///
    /// An absent blob yields an unauthenticated session, not an error; a
    /// corrupt blob is discarded with a warning.
    #[must_use]
    pub fn new(storage: Arc<dyn DurableStore>) -> Self {
        let identity = match storage::load::<Identity>(storage.as_ref(), keys::USER_INFO) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!("discarding unreadable stored identity: {e}");
                None
            }
        };

        Self { identity, storage }
    }

    /// The current identity, if logged in.
    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// The current bearer token, if logged in.
    #[must_use]
    pub fn token(&self) -> Option<&AuthToken> {
        self.identity.as_ref().map(|identity| &identity.token)
    }

    /// Whether the current identity carries the admin flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.identity.as_ref().is_some_and(|identity| identity.is_admin)
    }

    /// Store a freshly authenticated identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable mirror cannot be written; memory is
    /// left unchanged in that case.
    #[instrument(skip(self, identity), fields(user = %identity.id))]
    pub fn login(&mut self, identity: Identity) -> Result<(), StorageError> {
        storage::save(self.storage.as_ref(), keys::USER_INFO, &identity)?;
        self.identity = Some(identity);
        Ok(())
    }

    /// Destroy the identity in memory and in durable storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable mirror cannot be cleared.
    #[instrument(skip(self))]
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.storage.remove(keys::USER_INFO)?;
        self.identity = None;
        Ok(())
    }

    /// Replace the held identity's wishlist with the server's authoritative
    /// copy and write through.
    ///
    /// A no-op when logged out.
    ///
    /// # Errors
    ///
    /// Returns an error if the durable mirror cannot be written.
    #[instrument(skip(self, wishlist))]
    pub fn update_wishlist(&mut self, wishlist: Vec<CycleId>) -> Result<(), StorageError> {
        let Some(identity) = self.identity.as_mut() else {
            return Ok(());
        };

        let mut updated = identity.clone();
        updated.wishlist = wishlist;
        storage::save(self.storage.as_ref(), keys::USER_INFO, &updated)?;
        *identity = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn identity() -> Identity {
        Identity {
            id: "u1".into(),
            name: "Asha".into(),
            email: "asha@example.com".into(),
            is_admin: false,
            token: AuthToken::from("tok-1"),
            wishlist: vec![CycleId::new("c1")],
        }
    }

    #[test]
    fn empty_storage_is_unauthenticated_not_an_error() {
        let session = SessionStore::new(Arc::new(MemoryStore::new()));
        assert!(session.identity().is_none());
        assert!(!session.is_admin());
    }

    #[test]
    fn login_survives_rehydration() {
        let storage: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());

        let mut session = SessionStore::new(Arc::clone(&storage));
        session.login(identity()).expect("login");

        // Simulated reload: a fresh store over the same durable storage.
        let rehydrated = SessionStore::new(storage);
        assert_eq!(rehydrated.identity(), Some(&identity()));
    }

    #[test]
    fn logout_clears_memory_and_mirror() {
        let storage: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());

        let mut session = SessionStore::new(Arc::clone(&storage));
        session.login(identity()).expect("login");
        session.logout().expect("logout");

        assert!(session.identity().is_none());
        assert!(
            storage
                .get_raw(keys::USER_INFO)
                .expect("storage read")
                .is_none()
        );
    }

    #[test]
    fn update_wishlist_writes_through() {
        let storage: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());

        let mut session = SessionStore::new(Arc::clone(&storage));
        session.login(identity()).expect("login");
        session
            .update_wishlist(vec![CycleId::new("c2"), CycleId::new("c3")])
            .expect("update wishlist");

        let rehydrated = SessionStore::new(storage);
        let wishlist = &rehydrated.identity().expect("identity").wishlist;
        assert_eq!(wishlist, &vec![CycleId::new("c2"), CycleId::new("c3")]);
    }

    #[test]
    fn corrupt_blob_is_discarded() {
        let storage: Arc<dyn DurableStore> = Arc::new(MemoryStore::new());
        storage
            .put_raw(keys::USER_INFO, "{not json")
            .expect("seed corrupt blob");

        let session = SessionStore::new(storage);
        assert!(session.identity().is_none());
    }
}
