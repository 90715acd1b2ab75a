//! Central configuration for the admin-session crate

use std::sync::LazyLock;
use url::Url;

/// Base URL of the admin backend.
///
/// Default: "http://127.0.0.1:8000"
pub static ADMIN_API_BASE_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
});

/// Shared application secret sent as the `key` header with every backend
/// call. A build-time constant, distinct from the per-user session token.
pub static ADMIN_API_KEY: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_API_KEY").unwrap_or_else(|_| DEFAULT_ADMIN_API_KEY.to_string())
});

const DEFAULT_ADMIN_API_KEY: &str = "admin-console-shared-key";

/// Name of the HTTP-only cookie mirroring the session token for
/// server-rendered routes.
pub(crate) static SESSION_COOKIE_NAME: LazyLock<String> =
    LazyLock::new(|| std::env::var("SESSION_COOKIE_NAME").unwrap_or_else(|_| "token".to_string()));

/// Route unauthenticated sessions are redirected to.
pub static ADMIN_SIGN_IN_ROUTE: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_SIGN_IN_ROUTE").unwrap_or_else(|_| "/login".to_string())
});

/// Default landing route for authenticated sessions.
pub static ADMIN_LANDING_ROUTE: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ADMIN_LANDING_ROUTE").unwrap_or_else(|_| "/dashboard".to_string())
});

/// Configuration handed to [`crate::AuthStack`] at construction time.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub base_url: Url,
    pub api_key: String,
    pub sign_in_route: String,
    pub landing_route: String,
}

impl AuthConfig {
    /// Build a configuration for the given backend, taking the shared key
    /// and guard routes from the environment defaults.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: ADMIN_API_KEY.to_string(),
            sign_in_route: ADMIN_SIGN_IN_ROUTE.to_string(),
            landing_route: ADMIN_LANDING_ROUTE.to_string(),
        }
    }

    /// Build a configuration entirely from the environment, loading a
    /// `.env` file first when one is present.
    ///
    /// Panics when `ADMIN_API_BASE_URL` is not a valid URL; the console
    /// cannot start without a reachable backend address.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let base_url = Url::parse(&ADMIN_API_BASE_URL)
            .expect("ADMIN_API_BASE_URL must be a valid absolute URL");
        Self::new(base_url)
    }
}
