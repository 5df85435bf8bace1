//! Role gate evaluated once when a protected page mounts.
//!
//! Authorization is decided locally from the session store. The stored token
//! is trusted until the API rejects it. `bootstrap` couples the decision to
//! the page's initial load: the load is built only for an authorized session,
//! so a redirect never reaches the network.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

use super::role::{Role, Route};
use super::session::{Session, SessionStore};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum GateState {
    /// Not decided yet; the page shows a placeholder.
    #[default]
    Checking,
    /// Session present and its role grants the page.
    Authorized(Session),
    /// Leaving for `Route`; the page does nothing else.
    Redirecting(Route),
}

impl GateState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authorized(session) => Some(session),
            Self::Checking | Self::Redirecting(_) => None,
        }
    }

    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Authorized(_))
    }
}

/// Decide access to a page that requires `required`.
///
/// A session held by the wrong role is cleared, so the user signs in again
/// under the right one.
pub fn evaluate_gate(store: &mut SessionStore, required: Role) -> GateState {
    store.initialize();
    match store.get_session() {
        None => GateState::Redirecting(Route::Auth),
        Some(session) if session.role().grants(required) => GateState::Authorized(session.clone()),
        Some(session) => {
            let role = session.role();
            leptos::logging::warn!("{role} session cannot open a {required} page");
            store.clear_session();
            GateState::Redirecting(Route::Auth)
        }
    }
}

/// Evaluate the gate and, only when it authorizes, build the page's initial
/// load from the stored session.
///
/// The returned future is not polled here; the caller spawns or awaits it.
pub fn bootstrap<F, Fut>(store: &mut SessionStore, required: Role, load: F) -> (GateState, Option<Fut>)
where
    F: FnOnce(Session) -> Fut,
{
    let state = evaluate_gate(store, required);
    let pending = state.session().cloned().map(load);
    (state, pending)
}
