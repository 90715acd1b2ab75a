mod guard;
mod routes;

pub use guard::RouteGuard;
pub use routes::classify_route;
