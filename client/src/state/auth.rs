//! Authentication flows: turning API credentials into a stored session.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth page runs `authenticate` (async, network) and then
//! `establish_session` (sync, store write) before navigating, so the session
//! is readable by the next page's gate before that page mounts. A response
//! that lands after the page was left, or after the user changed role, is
//! dropped by `finish_authentication` without touching the store. Logout and
//! session expiry are the only other writers.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::role::{Role, Route};
use super::session::{Session, SessionError, SessionStore};
use crate::net::api::ApiClient;
use crate::net::error::ApiError;
use crate::net::transport::Transport;
use crate::net::types::{Credentials, Registration};
use crate::util::lifecycle::LoadTicket;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl AuthError {
    /// Text for the auth form's error banner.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api(err) => err.user_message(fallback),
            Self::Session(SessionError::EmptyToken) => fallback.to_owned(),
            Self::Session(_) => "Could not save your session. Check that site storage is enabled.".to_owned(),
        }
    }
}

/// The three ways to obtain a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthRequest {
    Login(Credentials),
    Register(Registration),
    AdminLogin(Credentials),
}

impl AuthRequest {
    /// Banner text when the API gives no reason.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Login(_) => "Login failed",
            Self::Register(_) => "Registration failed",
            Self::AdminLogin(_) => "Admin login failed",
        }
    }
}

/// Call the matching auth endpoint and pair the returned token and user.
///
/// # Errors
///
/// Any API failure, or a response carrying a blank token.
pub async fn authenticate<T: Transport>(api: &ApiClient<T>, request: &AuthRequest) -> Result<Session, AuthError> {
    let (token, user) = match request {
        AuthRequest::Login(credentials) => {
            let resp = api.login(credentials).await?;
            (resp.token, resp.user)
        }
        AuthRequest::Register(registration) => {
            let resp = api.register(registration).await?;
            (resp.token, resp.user)
        }
        AuthRequest::AdminLogin(credentials) => {
            let data = api.admin_login(credentials).await?;
            (data.token, data.admin)
        }
    };
    Ok(Session::new(token, user)?)
}

/// Store `session` and return the dashboard to navigate to.
///
/// # Errors
///
/// The store could not persist the session; nothing was stored.
pub fn establish_session(store: &mut SessionStore, session: Session) -> Result<Route, AuthError> {
    let role: Role = session.role();
    store.set_session(session)?;
    leptos::logging::log!("signed in as {role}");
    Ok(role.dashboard())
}

/// Apply a settled [`authenticate`] outcome if `ticket` is still current.
///
/// Returns `None` for a stale outcome; the store is left as it is.
pub fn finish_authentication(
    store: &mut SessionStore,
    outcome: Result<Session, AuthError>,
    ticket: &LoadTicket,
) -> Option<Result<Route, AuthError>> {
    if !ticket.is_current() {
        leptos::logging::log!("discarding auth response for a superseded request");
        return None;
    }
    Some(outcome.and_then(|session| establish_session(store, session)))
}

/// End the session on request and return the public landing page.
pub fn logout(store: &mut SessionStore) -> Route {
    store.clear_session();
    Route::Landing
}

/// End a session the API no longer accepts and return the auth entry page.
pub fn expire_session(store: &mut SessionStore) -> Route {
    leptos::logging::warn!("session rejected by API; signing out");
    store.clear_session();
    Route::Auth
}
