mod auth;
mod errors;

pub use auth::AuthStack;
pub use errors::AuthFlowError;
