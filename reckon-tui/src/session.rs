//! Session store: the single holder of the current bearer token.
//!
//! Reads are synchronous so a token can be attached to every outgoing request
//! without suspension. Writes are last-write-wins behind an `RwLock`. The
//! token is mirrored to a JSON file so a restart does not force a fresh
//! login; persistence failures only cost that convenience, so they are
//! logged and swallowed rather than failing the request that triggered them.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tracing::warn;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    token: String,
}

#[derive(Clone)]
pub struct SessionStore {
    token: Arc<RwLock<Option<String>>>,
    path: PathBuf,
}

impl SessionStore {
    /// Open the store, restoring any token persisted at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let token = std::fs::read_to_string(&path)
            .ok()
            .and_then(|contents| serde_json::from_str::<PersistedSession>(&contents).ok())
            .map(|session| session.token);
        Self {
            token: Arc::new(RwLock::new(token)),
            path,
        }
    }

    /// Current token, if any. Never fails.
    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Overwrite the token and persist it.
    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        {
            let mut guard = self
                .token
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = Some(token.clone());
        }
        self.persist(&token);
    }

    /// Drop the token and delete its persisted backing.
    pub fn clear(&self) {
        {
            let mut guard = self
                .token
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = None;
        }
        if self.path.exists() {
            if let Err(err) = std::fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %err, "failed to delete persisted session");
            }
        }
    }

    fn persist(&self, token: &str) {
        let session = PersistedSession {
            token: token.to_string(),
        };
        let result = (|| {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let contents = serde_json::to_string_pretty(&session)?;
            std::fs::write(&self.path, contents)?;
            Ok::<(), std::io::Error>(())
        })();
        if let Err(err) = result {
            warn!(path = %self.path.display(), error = %err, "failed to persist session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> SessionStore {
        SessionStore::open(dir.path().join("session.json"))
    }

    #[test]
    fn starts_empty_without_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.token(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set_token("tok-1");
        assert_eq!(store.token().as_deref(), Some("tok-1"));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set_token("tok-1");
        store.set_token("tok-2");
        assert_eq!(store.token().as_deref(), Some("tok-2"));
    }

    #[test]
    fn token_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        SessionStore::open(&path).set_token("persisted");
        let reopened = SessionStore::open(&path);
        assert_eq!(reopened.token().as_deref(), Some("persisted"));
    }

    #[test]
    fn clear_removes_token_and_backing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = SessionStore::open(&path);
        store.set_token("doomed");
        store.clear();
        assert_eq!(store.token(), None);
        assert!(!path.exists());
        assert_eq!(SessionStore::open(&path).token(), None);
    }

    #[test]
    fn clones_share_the_same_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let clone = store.clone();
        store.set_token("shared");
        assert_eq!(clone.token().as_deref(), Some("shared"));
    }

    #[test]
    fn corrupt_backing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(SessionStore::open(&path).token(), None);
    }
}
