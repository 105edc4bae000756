use axum::http::{header, HeaderMap};
use std::{
    collections::HashSet,
    sync::{Arc, RwLock},
};
use tracing::warn;

/// Cookie the session token is read from unless configured otherwise.
pub const DEFAULT_SESSION_COOKIE: &str = "session";

/// Decides whether the caller of a request is logged in.
pub trait Authenticator: Send + Sync {
    fn is_logged_in(&self, headers: &HeaderMap) -> bool;
}

/// In-memory set of valid session tokens, matched against a cookie.
#[derive(Clone)]
pub struct SessionStore {
    cookie: String,
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl SessionStore {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
            tokens: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub fn with_tokens<I, T>(cookie: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let store = Self::new(cookie);
        for token in tokens {
            store.insert(token);
        }
        store
    }

    pub fn insert(&self, token: impl Into<String>) {
        match self.tokens.write() {
            Ok(mut tokens) => {
                tokens.insert(token.into());
            }
            Err(e) => warn!("Failed to acquire write lock in insert: {}", e),
        }
    }

    pub fn revoke(&self, token: &str) -> bool {
        match self.tokens.write() {
            Ok(mut tokens) => tokens.remove(token),
            Err(e) => {
                warn!("Failed to acquire write lock in revoke: {}", e);
                false
            }
        }
    }

    pub fn is_valid(&self, token: &str) -> bool {
        match self.tokens.read() {
            Ok(tokens) => tokens.contains(token),
            Err(e) => {
                warn!("Failed to acquire read lock in is_valid: {}", e);
                false
            }
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_COOKIE)
    }
}

impl Authenticator for SessionStore {
    fn is_logged_in(&self, headers: &HeaderMap) -> bool {
        cookie_values(headers, &self.cookie).any(|token| self.is_valid(token))
    }
}

/// Values of every cookie called `name` across all `Cookie` headers.
///
/// Headers that are not valid visible ASCII are skipped.
pub fn cookie_values<'a>(headers: &'a HeaderMap, name: &'a str) -> impl Iterator<Item = &'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(move |pair| {
            let (key, value) = pair.trim().split_once('=')?;
            (key.trim() == name).then(|| value.trim().trim_matches('"'))
        })
        .filter(|value| !value.is_empty())
}
