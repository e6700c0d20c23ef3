//! Authenticated session identity
//!
//! The original product reads the signed-in user from an ambient auth
//! context; here it is an explicit value the caller resolves once and passes
//! into the assistant. No session means suggestion retrieval is disabled.

use crate::config::Config;

/// Identity of the signed-in support agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user_id: String,
}

impl Session {
    /// Create a session for a user id
    ///
    /// Returns `None` for a blank id, so callers never hold a session that
    /// cannot be sent to the backend.
    pub fn new(user_id: impl Into<String>) -> Option<Self> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return None;
        }
        Some(Session { user_id })
    }

    /// Resolve the session from a CLI override or the config file
    ///
    /// The CLI flag wins over `[session] user_id`.
    pub fn resolve(cli_user: Option<&str>, config: &Config) -> Option<Self> {
        match cli_user {
            Some(user) => Session::new(user),
            None => config
                .session
                .user_id
                .as_deref()
                .and_then(Session::new),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}
