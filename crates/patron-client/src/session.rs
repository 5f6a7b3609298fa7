//! Session Store
//!
//! Holds the bearer token for the current session. The store is created by
//! the host application and passed into the API client at construction, so
//! no component reads authentication state out of a global. A missing token
//! is a precondition failure surfaced before any request goes out; the host
//! reacts by routing to its login entry point.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// A bearer token issued by the server at login
#[derive(Clone, Debug)]
pub struct BearerToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
}

/// Process-local session state
#[derive(Default)]
pub struct SessionStore {
    token: RwLock<Option<BearerToken>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly issued token
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write() = Some(BearerToken {
            token: token.into(),
            issued_at: Utc::now(),
        });
    }

    /// Drop the session (logout)
    pub fn clear(&self) {
        *self.token.write() = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    /// Get the current token, if any
    pub fn token(&self) -> Option<String> {
        self.token.read().as_ref().map(|t| t.token.clone())
    }

    /// Get the current token or fail; callers must not fetch without one
    pub fn require_token(&self) -> Result<String, SessionError> {
        self.token().ok_or(SessionError::NotAuthenticated)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No session token; login required")]
    NotAuthenticated,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_is_unauthenticated() {
        let store = SessionStore::new();
        assert!(!store.is_authenticated());
        assert_eq!(store.require_token(), Err(SessionError::NotAuthenticated));
    }

    #[test]
    fn test_set_and_require_token() {
        let store = SessionStore::new();
        store.set_token("abc123");

        assert!(store.is_authenticated());
        assert_eq!(store.require_token().unwrap(), "abc123");
    }

    #[test]
    fn test_clear_revokes_access() {
        let store = SessionStore::new();
        store.set_token("abc123");
        store.clear();

        assert_eq!(store.require_token(), Err(SessionError::NotAuthenticated));
    }
}
