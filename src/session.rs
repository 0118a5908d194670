//! In-process login sessions, carried in a cookie.
//!
//! Sessions exist only after a successful login and are lost on restart.
//! Expired entries are evicted lazily on lookup.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use dashmap::DashMap;
use rand::rngs::OsRng;
use rand::RngCore;

pub const SESSION_COOKIE_NAME: &str = "tokendesk_session";

#[derive(Clone, Debug)]
pub struct Session {
    pub username: String,
    pub authenticated: bool,
    expires_at: Instant,
}

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<String, Session>>,
    ttl: Duration,
    secure_cookie: bool,
}

impl SessionStore {
    pub fn new(ttl: Duration, secure_cookie: bool) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            ttl,
            secure_cookie,
        }
    }

    /// Start an authenticated session and return its id.
    pub fn create(&self, username: &str) -> String {
        let mut bytes = [0u8; 32];
        OsRng.fill_bytes(&mut bytes);
        let id = hex::encode(bytes);

        self.sessions.insert(
            id.clone(),
            Session {
                username: username.to_string(),
                authenticated: true,
                expires_at: Instant::now() + self.ttl,
            },
        );
        id
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        let entry = self.sessions.get(id)?;
        if Instant::now() < entry.expires_at {
            return Some(entry.value().clone());
        }
        // expired — drop the ref before removing
        drop(entry);
        self.sessions.remove(id);
        None
    }

    /// True when `headers` carry a cookie for a live, authenticated session.
    pub fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        session_id_from_headers(headers)
            .and_then(|id| self.get(&id))
            .map(|s| s.authenticated)
            .unwrap_or(false)
    }

    pub fn destroy(&self, id: &str) {
        self.sessions.remove(id);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn cookie_header(&self, id: &str) -> String {
        format!(
            "{}={}; HttpOnly; {}SameSite=Lax; Path=/; Max-Age={}",
            SESSION_COOKIE_NAME,
            id,
            if self.secure_cookie { "Secure; " } else { "" },
            self.ttl.as_secs()
        )
    }

    pub fn clear_cookie_header() -> String {
        format!(
            "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0",
            SESSION_COOKIE_NAME
        )
    }
}

pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|c| c.trim().strip_prefix(SESSION_COOKIE_NAME)?.strip_prefix('='))
        .find(|v| !v.is_empty())
        .map(String::from)
}
