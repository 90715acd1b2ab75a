use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use crate::identity::errors::IdentityError;
use crate::identity::types::{IdentityProvider, IdentitySession, SessionEvent};

type EventCallback = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

struct SourceState {
    current: Option<IdentitySession>,
    seq: u64,
    subscribers: HashMap<u64, EventCallback>,
    next_subscriber: u64,
}

struct SourceInner {
    provider: Arc<dyn IdentityProvider>,
    state: Mutex<SourceState>,
    // Held across state update + callback invocation so subscribers observe
    // events in emission order. Callbacks must not announce re-entrantly.
    dispatch: Mutex<()>,
}

/// Wraps the federated identity provider SDK: exposes the current
/// [`IdentitySession`] and an observer subscription for sign-in/sign-out
/// events.
///
/// Cloning is cheap; all clones share the same state.
#[derive(Clone)]
pub struct IdentitySource {
    inner: Arc<SourceInner>,
}

/// Handle returned by [`IdentitySource::subscribe`]. Dropping it removes the
/// listener, so a page navigating away stops receiving redirect decisions.
pub struct Subscription {
    inner: Weak<SourceInner>,
    id: u64,
}

impl IdentitySource {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            inner: Arc::new(SourceInner {
                provider,
                state: Mutex::new(SourceState {
                    current: None,
                    seq: 0,
                    subscribers: HashMap::new(),
                    next_subscriber: 0,
                }),
                dispatch: Mutex::new(()),
            }),
        }
    }

    /// The current identity session, if any.
    pub fn current(&self) -> Option<IdentitySession> {
        self.lock_state().current.clone()
    }

    /// Register a listener. Fires once immediately with the current state,
    /// then on every sign-in/sign-out announcement.
    pub fn subscribe(
        &self,
        callback: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let callback: EventCallback = Arc::new(callback);
        let snapshot = {
            let mut state = self.lock_state();
            let id = state.next_subscriber;
            state.next_subscriber += 1;
            state.subscribers.insert(id, callback.clone());
            (
                id,
                SessionEvent {
                    seq: state.seq,
                    session: state.current.clone(),
                },
            )
        };
        let (id, event) = snapshot;
        callback(&event);
        Subscription {
            inner: Arc::downgrade(&self.inner),
            id,
        }
    }

    /// Announce a provider sign-in. Invoked by the SDK integration once the
    /// provider reports an authenticated user.
    pub fn announce_sign_in(&self, session: IdentitySession) {
        tracing::debug!("Identity sign-in announced for uid {}", session.provider_uid);
        self.emit(Some(session));
    }

    /// Announce a provider sign-out. A no-op when no session is active, so
    /// repeated logouts do not produce spurious events.
    pub fn announce_sign_out(&self) {
        let _order = self.lock_dispatch();
        let (event, callbacks) = {
            let mut state = self.lock_state();
            if state.current.is_none() {
                return;
            }
            state.current = None;
            state.seq += 1;
            (
                SessionEvent {
                    seq: state.seq,
                    session: None,
                },
                state.subscribers.values().cloned().collect::<Vec<_>>(),
            )
        };
        tracing::debug!("Identity sign-out announced (seq {})", event.seq);
        for callback in callbacks {
            callback(&event);
        }
    }

    /// Force the provider to mint a non-expired token for the active session
    /// and replace the session value with it.
    ///
    /// Fails with [`IdentityError::NotSignedIn`] when no session is active
    /// and [`IdentityError::ProviderUnavailable`] when the provider cannot
    /// be reached.
    pub async fn fresh_provider_token(&self) -> Result<String, IdentityError> {
        let session = self.current().ok_or(IdentityError::NotSignedIn)?;
        let token = self
            .inner
            .provider
            .mint_token(&session.provider_uid)
            .await?;
        // Token replacement is not a sign-in/sign-out transition; no event.
        let mut state = self.lock_state();
        if let Some(current) = &state.current {
            state.current = Some(current.with_token(token.clone()));
        }
        Ok(token)
    }

    /// Terminate the provider-side session and announce the sign-out.
    ///
    /// A provider that cannot be reached does not keep the console signed
    /// in: the local session is cleared regardless and the failure is only
    /// logged.
    pub async fn sign_out(&self) {
        if let Err(e) = self.inner.provider.sign_out().await {
            tracing::warn!("Provider sign-out failed: {}; clearing local session anyway", e);
        }
        self.announce_sign_out();
    }

    fn emit(&self, session: Option<IdentitySession>) {
        let _order = self.lock_dispatch();
        let (event, callbacks) = {
            let mut state = self.lock_state();
            state.current = session.clone();
            state.seq += 1;
            (
                SessionEvent {
                    seq: state.seq,
                    session,
                },
                state.subscribers.values().cloned().collect::<Vec<_>>(),
            )
        };
        for callback in callbacks {
            callback(&event);
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SourceState> {
        self.inner.state.lock().expect("identity state lock poisoned")
    }

    fn lock_dispatch(&self) -> std::sync::MutexGuard<'_, ()> {
        self.inner
            .dispatch
            .lock()
            .expect("identity dispatch lock poisoned")
    }
}

impl Subscription {
    /// Remove the listener. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}

    fn remove(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .state
                .lock()
                .expect("identity state lock poisoned")
                .subscribers
                .remove(&self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove();
    }
}
