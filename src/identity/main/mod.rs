mod source;

pub use source::{IdentitySource, Subscription};
