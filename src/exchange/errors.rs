use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ExchangeError {
    /// The backend refused the login exchange, or returned a body the
    /// exchange could not interpret. Surfaced to the sign-in form.
    #[error("Login rejected: {0}")]
    LoginRejected(String),

    /// The login endpoint could not be reached.
    #[error("Login network error: {0}")]
    Network(String),
}
