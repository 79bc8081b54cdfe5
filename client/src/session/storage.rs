//! Persistence backends for the session mirror.
//!
//! [`FileStorage`] writes a small JSON document under the platform config
//! directory; [`MemoryStorage`] backs tests and ephemeral clients.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::{ClientError, ClientResult};
use crate::session::Session;

/// Backend the [`super::SessionStore`] mirrors every change into.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Reads the persisted session. A missing entry is an empty session,
    /// not an error.
    async fn load(&self) -> ClientResult<Session>;

    /// Replaces the persisted session with the given snapshot.
    async fn store(&self, session: &Session) -> ClientResult<()>;

    /// Removes the persisted entries.
    async fn clear(&self) -> ClientResult<()>;
}

#[async_trait]
impl<S: SessionStorage + ?Sized> SessionStorage for Arc<S> {
    async fn load(&self) -> ClientResult<Session> {
        (**self).load().await
    }

    async fn store(&self, session: &Session) -> ClientResult<()> {
        (**self).store(session).await
    }

    async fn clear(&self) -> ClientResult<()> {
        (**self).clear().await
    }
}

/// JSON-file backend under the platform config directory.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    const APP_DIR: &'static str = "maintenance-client";
    const FILE_NAME: &'static str = "session.json";

    /// Storage rooted at `session_dir`, or at the platform config
    /// directory when none is given.
    pub fn new(session_dir: Option<PathBuf>) -> ClientResult<Self> {
        let dir = match session_dir {
            Some(dir) => dir,
            None => dirs::config_dir()
                .ok_or_else(|| ClientError::storage("no config directory on this platform"))?
                .join(Self::APP_DIR),
        };

        Ok(FileStorage {
            path: dir.join(Self::FILE_NAME),
        })
    }
}

#[async_trait]
impl SessionStorage for FileStorage {
    async fn load(&self) -> ClientResult<Session> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(Session::default()),
            Err(error) => {
                return Err(ClientError::storage(format!(
                    "reading {}: {error}",
                    self.path.display()
                )));
            }
        };

        serde_json::from_slice(&bytes).map_err(|error| {
            ClientError::storage(format!("decoding {}: {error}", self.path.display()))
        })
    }

    async fn store(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|error| {
                ClientError::storage(format!("creating {}: {error}", parent.display()))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(session)
            .map_err(|error| ClientError::storage(format!("encoding session: {error}")))?;

        tokio::fs::write(&self.path, bytes).await.map_err(|error| {
            ClientError::storage(format!("writing {}: {error}", self.path.display()))
        })
    }

    async fn clear(&self) -> ClientResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ClientError::storage(format!(
                "removing {}: {error}",
                self.path.display()
            ))),
        }
    }
}

/// In-memory backend for tests and clients that should not persist.
#[derive(Default)]
pub struct MemoryStorage {
    session: Mutex<Session>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStorage for MemoryStorage {
    async fn load(&self) -> ClientResult<Session> {
        Ok(self.session.lock().await.clone())
    }

    async fn store(&self, session: &Session) -> ClientResult<()> {
        *self.session.lock().await = session.clone();
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        *self.session.lock().await = Session::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::AuthToken;

    #[tokio::test]
    async fn test_file_storage_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(Some(dir.path().to_path_buf())).unwrap();

        // Nothing persisted yet: an empty session, not an error.
        assert_eq!(storage.load().await.unwrap(), Session::default());

        let session = Session {
            token: Some(AuthToken {
                access_token: "abc".to_string(),
                token_type: "bearer".to_string(),
            }),
            username: Some("alice".to_string()),
        };
        storage.store(&session).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), session);

        storage.clear().await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Session::default());
        // Clearing twice must stay quiet.
        storage.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_persisted_keys_match_local_storage_contract() {
        let session = Session {
            token: Some(AuthToken {
                access_token: "abc".to_string(),
                token_type: "bearer".to_string(),
            }),
            username: Some("alice".to_string()),
        };
        let value = serde_json::to_value(&session).unwrap();
        assert!(value.get("auth_token").is_some());
        assert_eq!(value["auth_token"]["access_token"], "abc");
        assert_eq!(value["username"], "alice");
    }
}
