//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page installs the same role gate, starts its first load
//! through it, and reacts the same way when the API stops accepting its token.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::net::error::ApiError;
use crate::state::auth::{expire_session, logout};
use crate::state::gate::{GateState, bootstrap};
use crate::state::role::{Role, Route};
use crate::state::session::{Session, SessionStore};

/// Navigation options for session-driven redirects; the guarded page is
/// replaced in history so "back" does not bounce through it again.
pub fn redirect_options() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Install the role gate for a page requiring `required`.
///
/// The check runs once, after mount, so server and hydrated renders agree on
/// the initial `Checking` state.
pub fn use_role_gate(required: Role) -> RwSignal<GateState> {
    use_gated_load(required, |_| async {})
}

/// [`use_role_gate`] plus the page's initial load, started from the stored
/// session only when the gate authorizes. A redirecting gate never builds the
/// load.
pub fn use_gated_load<F, Fut>(required: Role, load: F) -> RwSignal<GateState>
where
    F: FnOnce(Session) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let session = expect_context::<RwSignal<SessionStore>>();
    let navigate = use_navigate();
    let gate = RwSignal::new(GateState::Checking);
    let mut load = Some(load);

    Effect::new(move || {
        if gate.get_untracked() != GateState::Checking {
            return;
        }
        let Some(load) = load.take() else {
            return;
        };
        let (outcome, pending) = session
            .try_update(|store| bootstrap(store, required, load))
            .unwrap_or((GateState::Redirecting(Route::Auth), None));
        if let GateState::Redirecting(route) = &outcome {
            navigate(route.path(), redirect_options());
        }
        gate.set(outcome);
        if let Some(pending) = pending {
            spawn_local(pending);
        }
    });

    gate
}

/// Route to leave for when `err` means the API no longer accepts the token.
/// The session is expired as a side effect; other errors change nothing.
pub fn unauthorized_redirect(err: &ApiError, store: &mut SessionStore) -> Option<Route> {
    err.is_unauthorized().then(|| expire_session(store))
}

/// Signal-backed [`unauthorized_redirect`] that also navigates. Returns
/// whether the page is being left.
pub fn redirect_if_unauthorized<F>(err: &ApiError, session: RwSignal<SessionStore>, navigate: &F) -> bool
where
    F: Fn(&str, NavigateOptions),
{
    if !err.is_unauthorized() {
        return false;
    }
    let route = session
        .try_update(|store| unauthorized_redirect(err, store))
        .flatten()
        .unwrap_or(Route::Auth);
    navigate(route.path(), redirect_options());
    true
}

/// Click handler body for every logout button.
pub fn sign_out<F>(session: RwSignal<SessionStore>, navigate: &F)
where
    F: Fn(&str, NavigateOptions),
{
    let route = session.try_update(logout).unwrap_or(Route::Landing);
    navigate(route.path(), NavigateOptions::default());
}
