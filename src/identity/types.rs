use async_trait::async_trait;

use crate::identity::errors::IdentityError;

/// A signed-in identity as reported by the federated provider.
///
/// Immutable once issued: a fresh provider token replaces the whole value
/// rather than mutating it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySession {
    pub provider_uid: String,
    pub email: String,
    pub display_name: String,
    /// Short-lived, opaque, provider-signed token.
    pub provider_token: String,
}

impl IdentitySession {
    /// The same identity carrying a newly minted provider token.
    pub fn with_token(&self, provider_token: impl Into<String>) -> Self {
        Self {
            provider_token: provider_token.into(),
            ..self.clone()
        }
    }
}

/// One sign-in/sign-out notification, tagged with its emission sequence so
/// consumers can discard superseded events.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub seq: u64,
    pub session: Option<IdentitySession>,
}

/// Seam to the federated identity provider SDK.
///
/// The console talks to the provider only through this trait; tests supply
/// stub implementations.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Force the provider to mint a non-expired token for the given user.
    async fn mint_token(&self, provider_uid: &str) -> Result<String, IdentityError>;

    /// Terminate the provider-side session.
    async fn sign_out(&self) -> Result<(), IdentityError>;
}
