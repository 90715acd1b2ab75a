use std::sync::{Arc, Mutex};

use crate::config::{ADMIN_LANDING_ROUTE, ADMIN_SIGN_IN_ROUTE};
use crate::guard::types::{GuardDecision, GuardState, RouteClass};
use crate::identity::{IdentitySource, SessionEvent, Subscription};

use super::routes::classify_route;

type DecisionSink = Box<dyn Fn(&GuardDecision) + Send + Sync>;

struct GuardShared {
    route: String,
    sign_in_route: String,
    landing_route: String,
    sink: DecisionSink,
    inner: Mutex<GuardInner>,
}

struct GuardInner {
    state: GuardState,
    decision: GuardDecision,
    last_seq: Option<u64>,
}

/// Gates rendering of one mounted page.
///
/// Starts in `Resolving` (blocking loading indicator, no protected content),
/// then follows identity events: redirects unauthenticated sessions away
/// from protected routes and authenticated sessions away from public ones.
/// Dropping the guard unsubscribes, so a page navigated away from stops
/// acting on later events.
pub struct RouteGuard {
    shared: Arc<GuardShared>,
    _subscription: Subscription,
}

impl RouteGuard {
    /// Mount a guard for `route` using the configured sign-in and landing
    /// routes.
    pub fn mount(identity: &IdentitySource, route: impl Into<String>) -> Self {
        Self::mount_with_sink(identity, route, |_| {})
    }

    /// Mount a guard that pushes every decision into `sink` (typically the
    /// page's render/navigation callback).
    pub fn mount_with_sink(
        identity: &IdentitySource,
        route: impl Into<String>,
        sink: impl Fn(&GuardDecision) + Send + Sync + 'static,
    ) -> Self {
        Self::mount_with_routes(
            identity,
            route,
            ADMIN_SIGN_IN_ROUTE.to_string(),
            ADMIN_LANDING_ROUTE.to_string(),
            sink,
        )
    }

    pub fn mount_with_routes(
        identity: &IdentitySource,
        route: impl Into<String>,
        sign_in_route: impl Into<String>,
        landing_route: impl Into<String>,
        sink: impl Fn(&GuardDecision) + Send + Sync + 'static,
    ) -> Self {
        let shared = Arc::new(GuardShared {
            route: route.into(),
            sign_in_route: sign_in_route.into(),
            landing_route: landing_route.into(),
            sink: Box::new(sink),
            inner: Mutex::new(GuardInner {
                state: GuardState::Resolving,
                decision: GuardDecision::Loading,
                last_seq: None,
            }),
        });

        let listener = shared.clone();
        let subscription = identity.subscribe(move |event| listener.apply(event));

        Self {
            shared,
            _subscription: subscription,
        }
    }

    /// Current resolution state.
    pub fn state(&self) -> GuardState {
        self.shared.lock_inner().state
    }

    /// The decision the page should act on right now.
    pub fn decision(&self) -> GuardDecision {
        self.shared.lock_inner().decision.clone()
    }

    /// Tear the guard down. Equivalent to dropping it.
    pub fn unmount(self) {}
}

impl GuardShared {
    fn apply(self: &Arc<Self>, event: &SessionEvent) {
        let decision = {
            let mut inner = self.lock_inner();
            // Events are keyed off the latest sequence only; a redirect
            // decision from a superseded event must not fire.
            if inner.last_seq.is_some_and(|last| event.seq <= last) {
                tracing::debug!("Discarding stale identity event seq {}", event.seq);
                return;
            }
            inner.last_seq = Some(event.seq);

            let signed_in = event.session.is_some();
            inner.state = if signed_in {
                GuardState::Authenticated
            } else {
                GuardState::Unauthenticated
            };
            inner.decision = decide(
                &self.route,
                signed_in,
                &self.sign_in_route,
                &self.landing_route,
            );
            inner.decision.clone()
        };
        (self.sink)(&decision);
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, GuardInner> {
        self.inner.lock().expect("guard state lock poisoned")
    }
}

fn decide(
    route: &str,
    signed_in: bool,
    sign_in_route: &str,
    landing_route: &str,
) -> GuardDecision {
    match (classify_route(route), signed_in) {
        (RouteClass::Public, true) => GuardDecision::Redirect(landing_route.to_string()),
        (RouteClass::Public, false) => GuardDecision::Render,
        (RouteClass::Protected, true) => GuardDecision::Render,
        (RouteClass::Protected, false) => GuardDecision::Redirect(sign_in_route.to_string()),
    }
}
