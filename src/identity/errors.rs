use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum IdentityError {
    /// The federated identity provider could not be reached.
    #[error("Identity provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// A session operation was invoked with no active identity session.
    #[error("No active identity session")]
    NotSignedIn,
}
