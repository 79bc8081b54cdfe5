//! Session state: the single source of truth for "is the user
//! authenticated" and "what is the bearer token".
//!
//! The store keeps an in-memory snapshot guarded by an async lock and
//! mirrors every change into an injected [`SessionStorage`] backend so a
//! restart does not silently lose identity. No expiry timer runs locally;
//! expiry is discovered reactively when the server answers 401.

pub mod storage;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::models::AuthToken;
use crate::errors::ClientResult;
use storage::SessionStorage;

/// Snapshot of the authenticated session.
///
/// Serialized as-is into persistent storage; the `auth_token` key carries
/// the JSON token object and `username` the raw string, matching what the
/// web clients kept in local storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "auth_token", skip_serializing_if = "Option::is_none")]
    pub token: Option<AuthToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Holder of the current session, shared by every outgoing request.
///
/// Exactly one session is active per store; writes are last-write-wins,
/// which is acceptable for a single-user client.
pub struct SessionStore {
    current: RwLock<Session>,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// Creates a store over the given backend, hydrating the previous
    /// session if one was persisted. Hydration failure is downgraded to an
    /// empty session so a corrupt mirror never locks the user out.
    pub async fn new(storage: Box<dyn SessionStorage>) -> Self {
        let current = match storage.load().await {
            Ok(session) => {
                if session.token.is_some() {
                    info!(
                        username = session.username.as_deref().unwrap_or("<unknown>"),
                        "restored persisted session"
                    );
                }
                session
            }
            Err(error) => {
                warn!("could not hydrate session from storage: {error}");
                Session::default()
            }
        };

        SessionStore {
            current: RwLock::new(current),
            storage,
        }
    }

    /// Current bearer token, if any.
    pub async fn token(&self) -> Option<AuthToken> {
        self.current.read().await.token.clone()
    }

    /// Username recorded at login, if any.
    pub async fn username(&self) -> Option<String> {
        self.current.read().await.username.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.token.is_some()
    }

    /// Stores a fresh token in memory and mirrors it to storage.
    pub async fn set_token(&self, token: AuthToken) -> ClientResult<()> {
        let snapshot = {
            let mut current = self.current.write().await;
            current.token = Some(token);
            current.clone()
        };
        self.storage.store(&snapshot).await
    }

    /// Records the username alongside the token.
    pub async fn set_username(&self, username: impl Into<String>) -> ClientResult<()> {
        let snapshot = {
            let mut current = self.current.write().await;
            current.username = Some(username.into());
            current.clone()
        };
        self.storage.store(&snapshot).await
    }

    /// Logout: wipes the in-memory session and removes the persisted
    /// entries. Also invoked reactively when a request comes back 401.
    pub async fn clear(&self) -> ClientResult<()> {
        {
            let mut current = self.current.write().await;
            *current = Session::default();
        }
        self.storage.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::storage::MemoryStorage;
    use super::*;

    fn token(value: &str) -> AuthToken {
        AuthToken {
            access_token: value.to_string(),
            token_type: "bearer".to_string(),
        }
    }

    #[tokio::test]
    async fn test_set_and_clear_roundtrip() {
        let store = SessionStore::new(Box::new(MemoryStorage::new())).await;
        assert!(store.token().await.is_none());
        assert!(!store.is_authenticated().await);

        store.set_token(token("abc")).await.unwrap();
        store.set_username("alice").await.unwrap();
        assert_eq!(store.token().await.unwrap().access_token, "abc");
        assert_eq!(store.username().await.unwrap(), "alice");
        assert!(store.is_authenticated().await);

        store.clear().await.unwrap();
        assert!(store.token().await.is_none());
        assert!(store.username().await.is_none());
    }

    #[tokio::test]
    async fn test_hydration_survives_restart() {
        let backend = std::sync::Arc::new(MemoryStorage::new());

        let store = SessionStore::new(Box::new(backend.clone())).await;
        store.set_token(token("persisted")).await.unwrap();
        store.set_username("bob").await.unwrap();
        drop(store);

        // A new store over the same backend models a page reload.
        let restored = SessionStore::new(Box::new(backend)).await;
        assert_eq!(restored.token().await.unwrap().access_token, "persisted");
        assert_eq!(restored.username().await.unwrap(), "bob");
    }
}
