use std::sync::Mutex;

use crate::store::errors::StoreError;
use crate::store::types::{PersistedSession, SessionStore};

/// In-memory session store for tests and ephemeral (non remember-me)
/// sessions. Nothing survives a process restart.
pub struct InMemorySessionStore {
    entry: Mutex<Option<PersistedSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory session store");
        Self {
            entry: Mutex::new(None),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self) -> Result<Option<PersistedSession>, StoreError> {
        let entry = self.entry.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entry.clone())
    }

    fn set(&self, session: &PersistedSession) -> Result<(), StoreError> {
        let mut entry = self.entry.lock().map_err(|_| StoreError::Poisoned)?;
        *entry = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut entry = self.entry.lock().map_err(|_| StoreError::Poisoned)?;
        *entry = None;
        Ok(())
    }
}
