//! Session record and the auth slice of the store.

use std::time::{Duration, SystemTime};

/// Authenticated identity record.
///
/// A session is only ever installed with `expires_at` in the future;
/// the effect runner enforces that at the persistence and network
/// boundaries.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub email: String,
    pub user_id: String,
    pub token: String,
    pub expires_at: SystemTime,
}

impl Session {
    /// Time left until expiry, or `None` if the session has already
    /// expired.
    pub fn remaining(&self) -> Option<Duration> {
        self.expires_at.duration_since(SystemTime::now()).ok()
    }
}

/// Auth slice of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// The current session, or `None` when logged out.
    pub session: Option<Session>,
    /// User-visible failure message, surfaced for UI display.
    pub message: Option<String>,
    /// True while a login or signup request is in flight.
    pub loading: bool,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}
