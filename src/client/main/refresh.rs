use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::client::errors::ApiError;
use crate::exchange::{ExchangeError, LoginCredentials, SessionExchanger};
use crate::identity::{IdentityError, IdentitySource};
use crate::store::{PersistedSession, SessionStore, StoreError};

#[derive(Debug, Error)]
enum RenewError {
    #[error(transparent)]
    Identity(#[from] IdentityError),
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Coalesces concurrent session renewals into one provider-token mint and
/// one backend exchange.
///
/// Without this, N requests failing with expiry in the same tick would each
/// independently refresh or each independently sign out. All renewals are
/// serialized behind one lock; the generation counter tells late arrivals
/// that the renewal they wanted already happened (or already failed).
pub struct RefreshController {
    identity: IdentitySource,
    exchanger: Arc<SessionExchanger>,
    store: Arc<dyn SessionStore>,
    generation: AtomicU64,
    flight: Mutex<()>,
}

impl RefreshController {
    pub fn new(
        identity: IdentitySource,
        exchanger: Arc<SessionExchanger>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            identity,
            exchanger,
            store,
            generation: AtomicU64::new(0),
            flight: Mutex::new(()),
        }
    }

    /// Generation callers capture before dispatching. A moved generation
    /// means another caller has since completed (or failed) a renewal.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Renew the session the given observation belongs to.
    ///
    /// Returns `Ok(())` when a usable session is (or already was) in the
    /// store; the caller re-reads the store and replays. Returns
    /// [`ApiError::SessionExpired`] after a forced logout.
    pub async fn refresh(&self, observed_generation: u64) -> Result<(), ApiError> {
        let _flight = self.flight.lock().await;

        if self.generation.load(Ordering::Acquire) != observed_generation {
            tracing::debug!("Session renewal already handled by a concurrent request");
            return Ok(());
        }

        let remember_me = self
            .store
            .get()?
            .map(|session| session.remember_me)
            .unwrap_or(false);

        let result = if !remember_me {
            tracing::info!("Session expired without remember-me; signing out");
            self.logout().await;
            Err(ApiError::SessionExpired)
        } else {
            match self.renew().await {
                Ok(()) => Ok(()),
                Err(e) => {
                    tracing::warn!("Session renewal failed: {}; signing out", e);
                    self.logout().await;
                    Err(ApiError::SessionExpired)
                }
            }
        };

        // Supersede the observed generation only once the outcome (renewed
        // session or cleared store) is visible in the store, so waiters
        // queued on the lock never retrigger the provider, and a caller
        // observing the new generation always reads post-renewal state.
        self.generation.fetch_add(1, Ordering::AcqRel);
        result
    }

    async fn renew(&self) -> Result<(), RenewError> {
        let fresh_token = self.identity.fresh_provider_token().await?;
        let current = self.identity.current().ok_or(IdentityError::NotSignedIn)?;

        let credentials = LoginCredentials::renewal(current.email.clone());
        let session = self
            .exchanger
            .exchange(&fresh_token, &current.provider_uid, &credentials)
            .await?;

        self.store.set(&PersistedSession {
            admin_token: session.token,
            uid: session.issued_for_uid,
            remember_me: true,
        })?;
        tracing::info!("Session renewed for uid {}", current.provider_uid);
        Ok(())
    }

    /// Clear the persisted session and the identity session in one logical
    /// step; the route guard learns about it through the normal sign-out
    /// event.
    async fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::error!("Failed to clear session store during logout: {}", e);
        }
        self.identity.sign_out().await;
    }
}
