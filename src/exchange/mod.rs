mod errors;
mod main;
mod types;

pub use errors::ExchangeError;
pub use main::SessionExchanger;
pub use types::{BackendSession, DisplayClaims, LoginCredentials};
