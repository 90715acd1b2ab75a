use std::sync::Arc;

use crate::client::{ApiClient, RefreshController};
use crate::config::AuthConfig;
use crate::coordination::errors::AuthFlowError;
use crate::exchange::{BackendSession, LoginCredentials, SessionExchanger};
use crate::guard::{GuardDecision, RouteGuard};
use crate::identity::{IdentityProvider, IdentitySession, IdentitySource};
use crate::store::{PersistedSession, SessionStore};

/// One-stop construction and coordination of the session components.
///
/// Built once at application start; pages and slices receive the pieces they
/// need (`api()`, `identity()`, guards) by reference instead of reaching for
/// ambient globals.
pub struct AuthStack {
    config: AuthConfig,
    identity: IdentitySource,
    store: Arc<dyn SessionStore>,
    exchanger: Arc<SessionExchanger>,
    client: ApiClient,
}

impl AuthStack {
    pub fn new(
        config: AuthConfig,
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let identity = IdentitySource::new(provider);
        let exchanger = Arc::new(SessionExchanger::new(&config.base_url, config.api_key.clone()));
        let refresh = Arc::new(RefreshController::new(
            identity.clone(),
            exchanger.clone(),
            store.clone(),
        ));
        let client = ApiClient::new(
            config.base_url.clone(),
            config.api_key.clone(),
            store.clone(),
            refresh,
        );
        Self {
            config,
            identity,
            store,
            exchanger,
            client,
        }
    }

    pub fn identity(&self) -> &IdentitySource {
        &self.identity
    }

    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// The request authorizer every API call goes through.
    pub fn api(&self) -> &ApiClient {
        &self.client
    }

    /// Mount a route guard for a page, using the stack's configured sign-in
    /// and landing routes.
    pub fn guard(
        &self,
        route: impl Into<String>,
        sink: impl Fn(&GuardDecision) + Send + Sync + 'static,
    ) -> RouteGuard {
        RouteGuard::mount_with_routes(
            &self.identity,
            route,
            self.config.sign_in_route.clone(),
            self.config.landing_route.clone(),
            sink,
        )
    }

    /// Sign in: exchange the provider session for a backend session, persist
    /// it, then announce the identity.
    ///
    /// The exchange runs first so a rejected login leaves both the store and
    /// the identity source untouched; the backend session never exists
    /// without the identity that produced it.
    pub async fn sign_in(
        &self,
        session: IdentitySession,
        password: impl Into<String>,
        remember_me: bool,
    ) -> Result<BackendSession, AuthFlowError> {
        let credentials = LoginCredentials::new(session.email.clone(), password);
        let backend = self
            .exchanger
            .exchange(&session.provider_token, &session.provider_uid, &credentials)
            .await?;

        self.store.set(&PersistedSession {
            admin_token: backend.token.clone(),
            uid: backend.issued_for_uid.clone(),
            remember_me,
        })?;
        self.identity.announce_sign_in(session);
        tracing::info!("Signed in uid {}", backend.issued_for_uid);
        Ok(backend)
    }

    /// Re-enter a signed-in state after a process restart: the provider
    /// still has an authenticated user, so mint a fresh backend session for
    /// it instead of trusting whatever token survived on disk.
    pub async fn resume(
        &self,
        session: IdentitySession,
        remember_me: bool,
    ) -> Result<BackendSession, AuthFlowError> {
        let credentials = LoginCredentials::renewal(session.email.clone());
        let backend = self
            .exchanger
            .exchange(&session.provider_token, &session.provider_uid, &credentials)
            .await?;

        self.store.set(&PersistedSession {
            admin_token: backend.token.clone(),
            uid: backend.issued_for_uid.clone(),
            remember_me,
        })?;
        self.identity.announce_sign_in(session);
        tracing::info!("Resumed session for uid {}", backend.issued_for_uid);
        Ok(backend)
    }

    /// Sign out: clear the persisted session and the provider session in
    /// one logical step. Guards learn about it through the sign-out event.
    pub async fn sign_out(&self) -> Result<(), AuthFlowError> {
        self.store.clear()?;
        self.identity.sign_out().await;
        tracing::info!("Signed out");
        Ok(())
    }
}
