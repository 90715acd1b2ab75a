use crate::guard::types::RouteClass;

/// Routes reachable without a session.
const PUBLIC_ROUTES: &[&str] = &["/", "/login", "/register", "/forgot-password"];

/// Public route prefixes (token-carrying password-reset links).
const PUBLIC_ROUTE_PREFIXES: &[&str] = &["/reset-password"];

/// Classify a console route as public or protected. The query string is
/// ignored; reset links carry their token in the path or query.
pub fn classify_route(path: &str) -> RouteClass {
    let path = path.split('?').next().unwrap_or(path);
    if PUBLIC_ROUTES.contains(&path) {
        return RouteClass::Public;
    }
    if PUBLIC_ROUTE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        return RouteClass::Public;
    }
    RouteClass::Protected
}
