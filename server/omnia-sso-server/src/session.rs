//! In-memory stand-in for the host application's session storage.

use auth_identity::AuthResult;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;

/// Name of the cookie carrying the local session token
pub const SESSION_COOKIE: &str = "sso_session";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostSession {
    pub login: String,
    pub superuser: bool,
    pub password_verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, HostSession>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `token` names a session this process issued.
    pub fn is_established(&self, token: &str) -> bool {
        self.sessions.contains_key(token)
    }

    pub fn get(&self, token: &str) -> Option<HostSession> {
        self.sessions.get(token).map(|entry| entry.value().clone())
    }

    /// Record the session for a successful sign-on, replacing whatever the
    /// token pointed at before.
    pub fn start(&self, auth: &AuthResult) {
        self.sessions.insert(
            auth.session_token.clone(),
            HostSession {
                login: auth.login.clone(),
                superuser: auth.is_superuser(),
                password_verified: false,
                created_at: Utc::now(),
            },
        );
    }

    /// Returns `false` if there is no such session.
    pub fn mark_password_verified(&self, token: &str) -> bool {
        match self.sessions.get_mut(token) {
            Some(mut session) => {
                session.password_verified = true;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
