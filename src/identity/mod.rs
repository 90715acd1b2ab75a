mod errors;
mod main;
mod types;

pub use errors::IdentityError;
pub use main::{IdentitySource, Subscription};
pub use types::{IdentityProvider, IdentitySession, SessionEvent};
