//! REST error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Pages never let these escape: each one is turned into local view state via
//! `user_message`, except `Unauthorized`, which ends the session.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message shown whenever a request could not complete.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// No response within the configured timeout.
    #[error("request timed out after {0} ms")]
    Timeout(u32),

    /// The API rejected the bearer token.
    #[error("unauthorized")]
    Unauthorized,

    /// Non-success status, with the server's `message` when it sent one.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, message: Option<String> },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Requests are only issued from the browser build.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// Text to show the user. `fallback` names the failed operation
    /// (e.g. "Login failed") and is used when the server gave no message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Network(_) | Self::Timeout(_) | Self::Unavailable => NETWORK_ERROR_MESSAGE.to_owned(),
            Self::Rejected { message: Some(message), .. } if !message.trim().is_empty() => message.clone(),
            Self::Unauthorized | Self::Rejected { .. } | Self::Decode(_) => fallback.to_owned(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
