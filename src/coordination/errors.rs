//! Error type for session lifecycle coordination

use thiserror::Error;

use crate::client::ApiError;
use crate::exchange::ExchangeError;
use crate::identity::IdentityError;
use crate::store::StoreError;

/// Errors that can occur while coordinating the session lifecycle.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    /// Error from the identity provider seam.
    #[error("Identity error: {0}")]
    Identity(IdentityError),

    /// Error from the backend login exchange.
    #[error("Exchange error: {0}")]
    Exchange(ExchangeError),

    /// Error from session persistence.
    #[error("Store error: {0}")]
    Store(StoreError),

    /// Error from the request authorizer.
    #[error("API error: {0}")]
    Api(ApiError),
}

// From implementations that log at the point of conversion, so lifecycle
// failures show up in the trace even when a caller discards the error.

impl From<IdentityError> for AuthFlowError {
    fn from(err: IdentityError) -> Self {
        let error = Self::Identity(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<ExchangeError> for AuthFlowError {
    fn from(err: ExchangeError) -> Self {
        let error = Self::Exchange(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<StoreError> for AuthFlowError {
    fn from(err: StoreError) -> Self {
        let error = Self::Store(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<ApiError> for AuthFlowError {
    fn from(err: ApiError) -> Self {
        let error = Self::Api(err);
        tracing::error!("{}", error);
        error
    }
}
