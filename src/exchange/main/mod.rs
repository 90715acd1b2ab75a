mod claims;
mod login;

pub use login::SessionExchanger;
