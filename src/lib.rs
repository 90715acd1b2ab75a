//! admin-session - session lifecycle and request authorization for the
//! platform admin console
//!
//! This crate implements the client side of the console's authentication
//! pipeline: a federated-identity session source, the backend login exchange
//! that derives an opaque session token from a provider token, a persistent
//! session store, a request authorizer that attaches credentials to every
//! API call, single-flight token renewal on expiry, and the route guard that
//! gates protected views.

mod client;
mod config;
mod coordination;
mod exchange;
mod guard;
mod identity;
mod store;
mod utils;


pub use client::{
    ApiClient, ApiError, ApiRequest, ApiResponse, MultipartField, RefreshController, RequestBody,
};
pub use config::{ADMIN_API_KEY, AuthConfig};
pub use coordination::{AuthFlowError, AuthStack};
pub use exchange::{
    BackendSession, DisplayClaims, ExchangeError, LoginCredentials, SessionExchanger,
};
pub use guard::{GuardDecision, GuardState, RouteClass, RouteGuard, classify_route};
pub use identity::{
    IdentityError, IdentityProvider, IdentitySession, IdentitySource, SessionEvent, Subscription,
};
pub use store::{
    ADMIN_SESSION_FILE, FileSessionStore, InMemorySessionStore, PersistedSession, SessionStore,
    StoreError,
};
pub use utils::{UtilError, header_clear_session_cookie, header_set_session_cookie};
