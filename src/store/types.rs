use serde::{Deserialize, Serialize};

use crate::store::errors::StoreError;

/// The single persisted backend session.
///
/// Field names match the console's storage keys (`admin_token`, `uid`,
/// `remember_me`), so a file written by one build is readable by the next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    /// Opaque backend-signed bearer token.
    pub admin_token: String,
    /// Provider UID the token was issued for.
    pub uid: String,
    /// Whether expiry triggers silent renewal instead of forced logout.
    pub remember_me: bool,
}

/// Client-side persistent storage for the backend session.
///
/// A single instance lives for the life of the process and is shared by
/// `Arc`. Reads must reflect the most recent `set`/`clear` synchronously:
/// the request authorizer reads the store inline before every dispatch.
pub trait SessionStore: Send + Sync + 'static {
    fn get(&self) -> Result<Option<PersistedSession>, StoreError>;

    fn set(&self, session: &PersistedSession) -> Result<(), StoreError>;

    fn clear(&self) -> Result<(), StoreError>;
}
