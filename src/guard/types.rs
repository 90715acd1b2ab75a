/// Visibility class of a console route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Reachable without a session (sign-in, registration, password flows).
    Public,
    /// Everything else.
    Protected,
}

/// Resolution state of a mounted guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No identity event observed yet.
    Resolving,
    Authenticated,
    Unauthenticated,
}

/// What the page should do right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session state not resolved yet: render a blocking loading indicator,
    /// never protected content.
    Loading,
    /// Render the page's children.
    Render,
    /// Navigate to the given route.
    Redirect(String),
}
