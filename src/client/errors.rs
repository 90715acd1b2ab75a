use thiserror::Error;

use crate::store::StoreError;

/// Errors surfaced by the request authorizer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No session was persisted when an authorized request was dispatched.
    /// The guard keeps protected views unmounted without a session, so this
    /// is a caller bug rather than an expected runtime condition.
    #[error("No session token available for an authorized request")]
    Unauthenticated,

    /// The session expired and could not be renewed. The only error with a
    /// global side effect: the store is cleared and the provider signed out
    /// before this is returned.
    #[error("Session expired")]
    SessionExpired,

    /// A 401 whose body did not match the expiry vocabulary; passed through
    /// to the caller with no side effects.
    #[error("Authorization refused: {0}")]
    Unauthorized(String),

    /// The backend could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// Error from session persistence.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
