//! Durable session store
//!
//! Holds the single `tropiqual_auth` slot: one serialized
//! `{role, established_at}` record, written on login, removed on logout,
//! read back at hydration. Anything unreadable in the slot resolves to
//! "absent"; session state never fails open.

use super::Session;
use crate::AccessResult;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Name of the durable slot
pub const SESSION_SLOT: &str = "tropiqual_auth";

/// Session store with an in-memory and a file backend.
///
/// The memory backend exists for tests and ephemeral deployments; the file
/// backend persists the slot as JSON under the configured data directory.
#[derive(Debug, Clone)]
pub enum SessionStore {
    Memory {
        slot: Arc<RwLock<Option<Session>>>,
    },
    File {
        path: PathBuf,
    },
}

impl SessionStore {
    /// Create an in-memory store
    pub fn memory() -> Self {
        Self::Memory {
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a file-backed store under `data_dir`
    pub fn file<P: AsRef<Path>>(data_dir: P) -> AccessResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&data_dir)?;

        let path = data_dir.join(format!("{}.json", SESSION_SLOT));
        info!("Session store initialized at: {}", path.display());

        Ok(Self::File { path })
    }

    /// Read the slot. A missing, unreadable or malformed record is absent;
    /// malformed records are purged on the way out.
    pub fn load(&self) -> Option<Session> {
        match self {
            Self::Memory { slot } => slot.read().unwrap().clone(),
            Self::File { path } => {
                if !path.exists() {
                    return None;
                }

                let data = match std::fs::read_to_string(path) {
                    Ok(data) => data,
                    Err(e) => {
                        warn!("Failed to read session slot, treating as absent: {}", e);
                        return None;
                    }
                };

                match serde_json::from_str::<Session>(&data) {
                    Ok(session) => {
                        debug!("Loaded session record from {}", path.display());
                        Some(session)
                    }
                    Err(e) => {
                        warn!("Malformed session record, purging slot: {}", e);
                        self.clear();
                        None
                    }
                }
            }
        }
    }

    /// Write the slot
    pub fn save(&self, session: &Session) -> AccessResult<()> {
        match self {
            Self::Memory { slot } => {
                *slot.write().unwrap() = Some(session.clone());
                Ok(())
            }
            Self::File { path } => {
                let data = serde_json::to_string_pretty(session)?;
                std::fs::write(path, data)?;

                debug!("Saved session record to {}", path.display());
                Ok(())
            }
        }
    }

    /// Empty the slot. Idempotent; failures are logged, not raised.
    pub fn clear(&self) {
        match self {
            Self::Memory { slot } => {
                *slot.write().unwrap() = None;
            }
            Self::File { path } => {
                if path.exists() {
                    if let Err(e) = std::fs::remove_file(path) {
                        warn!("Failed to clear session slot: {}", e);
                    } else {
                        debug!("Cleared session slot {}", path.display());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tropiqual_core::Role;

    #[test]
    fn memory_store_round_trips() {
        let store = SessionStore::memory();
        assert!(store.load().is_none());

        let session = Session::new(Role::Staff);
        store.save(&session).unwrap();
        assert_eq!(store.load(), Some(session));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn file_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::file(dir.path()).unwrap();
        assert!(store.load().is_none());

        let session = Session::new(Role::Admin);
        store.save(&session).unwrap();
        assert_eq!(store.load(), Some(session));

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn malformed_record_is_absent_and_purged() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::file(dir.path()).unwrap();

        let path = dir.path().join(format!("{}.json", SESSION_SLOT));
        std::fs::write(&path, "{not json").unwrap();

        assert!(store.load().is_none());
        // the corrupt slot must be gone, not just skipped
        assert!(!path.exists());
    }

    #[test]
    fn record_with_unknown_role_is_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::file(dir.path()).unwrap();

        let path = dir.path().join(format!("{}.json", SESSION_SLOT));
        std::fs::write(
            &path,
            r#"{"role":"superuser","established_at":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert!(store.load().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::file(dir.path()).unwrap();

        store.clear();
        store.clear();
        assert!(store.load().is_none());
    }
}
