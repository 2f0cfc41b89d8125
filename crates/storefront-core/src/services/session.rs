//! Customer session relay

use std::sync::Arc;

use storefront_shared::constants::SESSION_KEY_ACCESS_TOKEN;
use tracing::{debug, warn};

use crate::domain::CustomerAccessToken;
use crate::error::DomainError;
use crate::ports::SessionStore;

/// Typed view over one session's `customerAccessToken` entry
#[derive(Clone)]
pub struct CustomerSession {
    id: String,
    store: Arc<dyn SessionStore>,
}

impl CustomerSession {
    pub fn new(id: impl Into<String>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            id: id.into(),
            store,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub async fn access_token(&self) -> Result<Option<CustomerAccessToken>, DomainError> {
        let Some(raw) = self.store.get(&self.id, SESSION_KEY_ACCESS_TOKEN).await? else {
            return Ok(None);
        };

        match serde_json::from_value::<CustomerAccessToken>(raw) {
            Ok(token) if token.is_present() => Ok(Some(token)),
            Ok(_) => Ok(None),
            Err(e) => {
                warn!("Discarding unreadable access token in session {}: {}", self.id, e);
                Ok(None)
            }
        }
    }

    pub async fn is_logged_in(&self) -> Result<bool, DomainError> {
        Ok(self.access_token().await?.is_some())
    }

    pub async fn set_access_token(&self, token: &CustomerAccessToken) -> Result<(), DomainError> {
        let value =
            serde_json::to_value(token).map_err(|e| DomainError::Session(e.to_string()))?;
        self.store.set(&self.id, SESSION_KEY_ACCESS_TOKEN, value).await?;
        debug!("Stored customer access token in session {}", self.id);
        Ok(())
    }

    pub async fn clear_access_token(&self) -> Result<(), DomainError> {
        self.store.remove(&self.id, SESSION_KEY_ACCESS_TOKEN).await
    }

    /// Signs the customer in under `new_id`. The current id never holds the
    /// token, so an id chosen before login cannot be reused afterwards.
    pub async fn sign_in(
        &self,
        new_id: impl Into<String>,
        token: &CustomerAccessToken,
    ) -> Result<CustomerSession, DomainError> {
        self.clear_access_token().await?;
        let renewed = CustomerSession::new(new_id, self.store.clone());
        renewed.set_access_token(token).await?;
        debug!("Session {} renewed as {}", self.id, renewed.id);
        Ok(renewed)
    }
}

impl std::fmt::Debug for CustomerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomerSession").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::session_store::MockSessionStore;
    use serde_json::json;

    #[tokio::test]
    async fn test_reads_stored_token() {
        let mut store = MockSessionStore::new();
        store
            .expect_get()
            .withf(|id, key| id == "s1" && key == SESSION_KEY_ACCESS_TOKEN)
            .returning(|_, _| Ok(Some(json!({"accessToken": "tok", "expiresAt": "2030-01-01"}))));

        let session = CustomerSession::new("s1", Arc::new(store));
        let token = session.access_token().await.unwrap().unwrap();
        assert_eq!(token.access_token, "tok");
        assert!(session.is_logged_in().await.unwrap());
    }

    #[tokio::test]
    async fn test_garbage_in_session_means_logged_out() {
        let mut store = MockSessionStore::new();
        store.expect_get().returning(|_, _| Ok(Some(json!("not a token"))));

        let session = CustomerSession::new("s1", Arc::new(store));
        assert!(session.access_token().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_writes_token_under_session_key() {
        let mut store = MockSessionStore::new();
        store
            .expect_set()
            .withf(|id, key, value| {
                id == "s1"
                    && key == SESSION_KEY_ACCESS_TOKEN
                    && *value == json!({"accessToken": "tok", "expiresAt": "2030"})
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let session = CustomerSession::new("s1", Arc::new(store));
        session
            .set_access_token(&CustomerAccessToken {
                access_token: "tok".into(),
                expires_at: "2030".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_sign_in_moves_token_to_new_id() {
        let mut store = MockSessionStore::new();
        store
            .expect_remove()
            .withf(|id, key| id == "old" && key == SESSION_KEY_ACCESS_TOKEN)
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_set()
            .withf(|id, key, _| id == "new" && key == SESSION_KEY_ACCESS_TOKEN)
            .times(1)
            .returning(|_, _, _| Ok(()));

        let session = CustomerSession::new("old", Arc::new(store));
        let renewed = session
            .sign_in(
                "new",
                &CustomerAccessToken {
                    access_token: "tok".into(),
                    expires_at: "2030".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(renewed.id(), "new");
    }
}
