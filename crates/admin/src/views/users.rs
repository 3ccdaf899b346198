//! Admin user list.

use cycle_bazaar_client::types::{AuthToken, UserSummary};
use cycle_bazaar_client::{ApiClient, ApiError, SessionStore};
use cycle_bazaar_core::{UserId, ViewState};
use tracing::instrument;

use crate::prompt::Prompt;

/// Every account, for the admin user screen.
pub struct UserListView {
    api: ApiClient,
    pub state: ViewState<Vec<UserSummary>>,
}

impl UserListView {
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: ViewState::Loading,
        }
    }

    #[instrument(skip_all)]
    pub async fn load(&mut self, session: &SessionStore) {
        self.state = ViewState::Loading;
        let Some(token) = admin_token(session) else {
            self.state = ViewState::Error("Not authorized as an admin".into());
            return;
        };
        self.state = match self.api.list_users(&token).await {
            Ok(users) => ViewState::Ready(users),
            Err(e) => ViewState::Error(e.to_string()),
        };
    }

    /// Whether the delete control is offered for a row. Admins can never
    /// delete their own account from this screen.
    #[must_use]
    pub fn can_delete(&self, session: &SessionStore, user_id: &UserId) -> bool {
        session
            .identity()
            .is_some_and(|identity| identity.is_admin && identity.id != *user_id)
    }

    /// Delete an account after confirmation; declined prompts are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when the delete is not offered for this row or the
    /// request fails.
    #[instrument(skip(self, session, prompt), fields(user_id = %user_id))]
    pub async fn delete_user(
        &mut self,
        session: &SessionStore,
        prompt: &dyn Prompt,
        user_id: &UserId,
    ) -> Result<Option<String>, ApiError> {
        if !self.can_delete(session, user_id) {
            return Err(ApiError::Validation(
                "You cannot delete this account".into(),
            ));
        }
        let Some(token) = admin_token(session) else {
            return Err(ApiError::Unauthenticated);
        };
        if !prompt.confirm("Are you sure you want to delete this user?") {
            return Ok(None);
        }

        let message = self.api.delete_user(&token, user_id).await?.message;
        if let ViewState::Ready(users) = &mut self.state {
            users.retain(|user| user.id != *user_id);
        }
        Ok(Some(message))
    }
}

fn admin_token(session: &SessionStore) -> Option<AuthToken> {
    session
        .is_admin()
        .then(|| session.token().cloned())
        .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use cycle_bazaar_client::storage::MemoryStore;
    use cycle_bazaar_client::types::Identity;
    use cycle_bazaar_client::{ClientConfig, SessionStore};
    use url::Url;

    fn admin_session() -> SessionStore {
        let mut session = SessionStore::new(Arc::new(MemoryStore::new()));
        session
            .login(Identity {
                id: UserId::new("admin-1"),
                name: "Root".into(),
                email: "root@example.com".into(),
                is_admin: true,
                token: "tok".into(),
                wishlist: Vec::new(),
            })
            .unwrap();
        session
    }

    fn view() -> UserListView {
        let url = Url::parse("http://127.0.0.1:1").unwrap();
        UserListView::new(ApiClient::new(&ClientConfig::new(url)))
    }

    #[test]
    fn admins_cannot_delete_themselves() {
        let session = admin_session();
        let view = view();
        assert!(!view.can_delete(&session, &UserId::new("admin-1")));
        assert!(view.can_delete(&session, &UserId::new("u2")));
    }

    #[tokio::test]
    async fn declined_prompt_sends_nothing() {
        let session = admin_session();
        let mut view = view();
        // Offline endpoint: a request slipping through would fail with an
        // Http error rather than Ok(None).
        let outcome = view
            .delete_user(&session, &crate::prompt::StaticPrompt::declining(), &UserId::new("u2"))
            .await
            .unwrap();
        assert!(outcome.is_none());
    }
}
