mod main;
mod types;

pub use main::{RouteGuard, classify_route};
pub use types::{GuardDecision, GuardState, RouteClass};
