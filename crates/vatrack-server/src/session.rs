//! Session gate for the admin dashboard.
//!
//! A configured credential pair and an in-process token set. Sessions live
//! only in memory, so a restart logs every admin out. This is a gate, not a
//! security boundary.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Admin credentials, supplied through configuration.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: String,
}

impl AdminCredentials {
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// In-process store of live session tokens.
#[derive(Clone, Default)]
pub struct SessionStore {
    tokens: Arc<Mutex<HashSet<String>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint and remember a new session token.
    pub fn create(&self) -> String {
        let token = Uuid::new_v4().to_string();
        if let Ok(mut tokens) = self.tokens.lock() {
            tokens.insert(token.clone());
        }
        token
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.tokens
            .lock()
            .map(|tokens| tokens.contains(token))
            .unwrap_or(false)
    }

    /// Forget a token. Returns whether it was known.
    pub fn revoke(&self, token: &str) -> bool {
        self.tokens
            .lock()
            .map(|mut tokens| tokens.remove(token))
            .unwrap_or(false)
    }
}

/// `Set-Cookie` value for a fresh session. No `Max-Age`: the cookie lives
/// for the browser session only.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; SameSite=Lax; HttpOnly")
}

/// `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Max-Age=0; Path=/; SameSite=Lax; HttpOnly")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_match_exactly() {
        let creds = AdminCredentials {
            username: "admin".into(),
            password: "hunter2".into(),
        };
        assert!(creds.matches("admin", "hunter2"));
        assert!(!creds.matches("admin", "wrong"));
        assert!(!creds.matches("root", "hunter2"));
    }

    #[test]
    fn created_tokens_validate_until_revoked() {
        let store = SessionStore::new();
        let token = store.create();

        assert!(store.is_valid(&token));
        assert!(!store.is_valid("unknown"));

        assert!(store.revoke(&token));
        assert!(!store.is_valid(&token));
        assert!(!store.revoke(&token));
    }

    #[test]
    fn session_cookie_is_browser_session_scoped() {
        let cookie = session_cookie("t1");
        assert!(cookie.starts_with("session=t1"));
        assert!(!cookie.contains("Max-Age"));

        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
