//! Session store: the single owner of "am I logged in, and as whom".
//!
//! SYSTEM CONTEXT
//! ==============
//! The store is provided to every page as `RwSignal<SessionStore>`. Pages read
//! it during their role gate and attach the token to API calls; only the auth
//! flows and logout write to it.
//!
//! DESIGN
//! ======
//! Token and user are persisted together under one key as a single JSON
//! document, so a half-written session cannot exist in storage. The store
//! holds its backend as `Arc<dyn KeyValueStorage>` which lets tests swap in
//! `MemoryStorage`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::sync::Arc;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use super::role::Role;
use crate::util::storage::{BrowserStorage, KeyValueStorage, StorageError};

/// Storage key holding the serialized `{token, user}` pair.
pub const SESSION_KEY: &str = "junky_session";

/// Keys used by older builds that persisted token and user separately.
pub const LEGACY_TOKEN_KEY: &str = "token";
pub const LEGACY_USER_KEY: &str = "user";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session token is empty")]
    EmptyToken,

    #[error("session could not be encoded: {0}")]
    Encode(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Profile of the authenticated user as returned by the auth endpoints.
///
/// Only `id` and `role` are required. The id may arrive as `id`, `_id` or
/// both; `id` wins when both are present. Fields the client does not model
/// are kept in `extra` so a persisted session round-trips unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "WireUser")]
pub struct SessionUser {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl SessionUser {
    /// Minimal user with just an id and a role.
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: None,
            role,
            name: None,
            first_name: None,
            last_name: None,
            phone: None,
            extra: serde_json::Map::new(),
        }
    }

    /// Best available human name: `name`, then first + last, then email, then id.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
            return name.to_owned();
        }
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        self.email.clone().unwrap_or_else(|| self.id.clone())
    }
}

/// Decoding shape of [`SessionUser`]: both id spellings are read separately
/// and merged afterwards.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUser {
    #[serde(default, deserialize_with = "deserialize_id")]
    id: Option<String>,
    #[serde(rename = "_id", default, deserialize_with = "deserialize_id")]
    mongo_id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    role: Role,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(flatten)]
    extra: serde_json::Map<String, serde_json::Value>,
}

impl TryFrom<WireUser> for SessionUser {
    type Error = String;

    fn try_from(wire: WireUser) -> Result<Self, Self::Error> {
        let id = wire.id.or(wire.mongo_id).ok_or_else(|| "missing field `id`".to_owned())?;
        Ok(Self {
            id,
            email: wire.email,
            role: wire.role,
            name: wire.name,
            first_name: wire.first_name,
            last_name: wire.last_name,
            phone: wire.phone,
            extra: wire.extra,
        })
    }
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(id) => Ok(Some(id)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!("invalid user id: {other}"))),
    }
}

/// A bearer token paired with the user it authorizes.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

impl Session {
    /// Pair a token with its user.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyToken` when the token is blank.
    pub fn new(token: impl Into<String>, user: SessionUser) -> Result<Self, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        Ok(Self { token, user })
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    /// `Authorization` header value for this session.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// The token stays out of debug output.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// In-memory session mirrored to a `KeyValueStorage`.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    current: Option<Session>,
    initialized: bool,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("current", &self.current)
            .field("initialized", &self.initialized)
            .finish_non_exhaustive()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::browser()
    }
}

impl SessionStore {
    /// Store backed by `storage`. Nothing is read until `initialize`.
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self { storage: Arc::new(storage), current: None, initialized: false }
    }

    /// Store backed by the browser's `localStorage`.
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Load the persisted session into memory. Runs once; later calls are no-ops.
    ///
    /// Never fails: missing or unreadable state leaves the store unauthenticated.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        self.current = self.load();
        self.initialized = true;
    }

    /// Replace the current session, persisting token and user in one write.
    ///
    /// On error neither memory nor storage changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be encoded or the storage
    /// backend rejects the write.
    pub fn set_session(&mut self, session: Session) -> Result<(), SessionError> {
        let raw = serde_json::to_string(&session).map_err(|e| SessionError::Encode(e.to_string()))?;
        self.storage.set(SESSION_KEY, &raw)?;
        self.remove_legacy_keys();
        self.current = Some(session);
        self.initialized = true;
        Ok(())
    }

    /// Drop the session from memory and storage. Safe to call repeatedly.
    pub fn clear_session(&mut self) {
        self.current = None;
        self.initialized = true;
        self.storage.remove(SESSION_KEY);
        self.remove_legacy_keys();
    }

    /// Current session, or `None` when unauthenticated.
    pub fn get_session(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    fn load(&self) -> Option<Session> {
        if let Some(raw) = self.storage.get(SESSION_KEY) {
            return match decode_session(&raw) {
                Ok(session) => Some(session),
                Err(e) => {
                    leptos::logging::warn!("discarding malformed stored session: {e}");
                    self.storage.remove(SESSION_KEY);
                    None
                }
            };
        }
        self.migrate_legacy()
    }

    /// Fold the old two-key layout into the single session key.
    ///
    /// Both keys must be present and valid; otherwise whatever is there is
    /// discarded.
    fn migrate_legacy(&self) -> Option<Session> {
        let token = self.storage.get(LEGACY_TOKEN_KEY);
        let user = self.storage.get(LEGACY_USER_KEY);
        if token.is_none() && user.is_none() {
            return None;
        }
        self.remove_legacy_keys();

        let (Some(token), Some(user)) = (token, user) else {
            leptos::logging::warn!("discarding half-persisted legacy session");
            return None;
        };
        let user = match serde_json::from_str::<SessionUser>(&user) {
            Ok(user) => user,
            Err(e) => {
                leptos::logging::warn!("discarding malformed legacy user: {e}");
                return None;
            }
        };
        let session = Session::new(token, user).ok()?;
        match serde_json::to_string(&session) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(SESSION_KEY, &raw) {
                    leptos::logging::warn!("legacy session kept in memory only: {e}");
                }
            }
            Err(e) => leptos::logging::warn!("legacy session kept in memory only: {e}"),
        }
        Some(session)
    }

    fn remove_legacy_keys(&self) {
        self.storage.remove(LEGACY_TOKEN_KEY);
        self.storage.remove(LEGACY_USER_KEY);
    }
}

fn decode_session(raw: &str) -> Result<Session, String> {
    let session: Session = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    if session.token.trim().is_empty() {
        return Err(SessionError::EmptyToken.to_string());
    }
    Ok(session)
}
