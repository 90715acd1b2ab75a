use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::store::config::ADMIN_SESSION_FILE;
use crate::store::errors::StoreError;
use crate::store::types::{PersistedSession, SessionStore};

/// JSON-file-backed session store: the durable persistence behind
/// "remember me across reloads".
///
/// Every `set`/`clear` writes through to disk; reads are served from the
/// in-memory copy so they are synchronous.
pub struct FileSessionStore {
    path: PathBuf,
    entry: Mutex<Option<PersistedSession>>,
}

impl FileSessionStore {
    /// Open (or create) the store at the given path.
    ///
    /// An unreadable or corrupted file starts the store empty rather than
    /// failing: a broken local cache must not prevent the console from
    /// reaching the sign-in screen.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entry = match std::fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<PersistedSession>(&bytes) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(
                        "Discarding unreadable session file {}: {}",
                        path.display(),
                        e
                    );
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        tracing::info!("Opened session store at {}", path.display());
        Ok(Self {
            path,
            entry: Mutex::new(entry),
        })
    }

    /// Open the store at the path configured by `ADMIN_SESSION_FILE`.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(ADMIN_SESSION_FILE.as_str())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entry: &Option<PersistedSession>) -> Result<(), StoreError> {
        match entry {
            Some(session) => {
                let bytes = serde_json::to_vec_pretty(session)
                    .map_err(|e| StoreError::Serde(e.to_string()))?;
                std::fs::write(&self.path, bytes)?;
            }
            None => match std::fs::remove_file(&self.path) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            },
        }
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self) -> Result<Option<PersistedSession>, StoreError> {
        let entry = self.entry.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entry.clone())
    }

    fn set(&self, session: &PersistedSession) -> Result<(), StoreError> {
        let mut entry = self.entry.lock().map_err(|_| StoreError::Poisoned)?;
        let next = Some(session.clone());
        self.persist(&next)?;
        *entry = next;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entry = self.entry.lock().map_err(|_| StoreError::Poisoned)?;
        self.persist(&None)?;
        *entry = None;
        Ok(())
    }
}
