//! Staff session lifecycle.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{StaffMember, StaffSession};

/// Default session lifetime: one eight-hour shift.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 480;

/// Tracks open staff sessions.
///
/// Sessions are created on login, checked on every resume, and destroyed
/// on logout. The manager holds no global state; callers own it and pass
/// it where it is needed.
///
/// # Example
///
/// ```
/// use rate_engine::models::{StaffMember, StaffRole};
/// use rate_engine::session::SessionManager;
/// use chrono::{Duration, Utc};
///
/// let mut sessions = SessionManager::new(Duration::hours(8));
/// let member = StaffMember {
///     id: "staff_mgr".to_string(),
///     name: "Aminata".to_string(),
///     role: StaffRole::Manager,
///     pin: "4321".to_string(),
/// };
///
/// let now = Utc::now();
/// let session = sessions.login(&member, now);
/// assert!(sessions.validate(session.token, now).is_ok());
///
/// sessions.logout(session.token)?;
/// assert!(sessions.validate(session.token, now).is_err());
/// # Ok::<(), rate_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SessionManager {
    sessions: HashMap<Uuid, StaffSession>,
    ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(Duration::minutes(DEFAULT_SESSION_TTL_MINUTES))
    }
}

impl SessionManager {
    /// Creates an empty manager whose sessions live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: HashMap::new(),
            ttl,
        }
    }

    /// Opens a session for `member`. Sessions already expired at `now` are
    /// purged first.
    pub fn login(&mut self, member: &StaffMember, now: DateTime<Utc>) -> StaffSession {
        self.purge_and_log(now);

        let session = StaffSession {
            token: Uuid::new_v4(),
            staff_id: member.id.clone(),
            staff_name: member.name.clone(),
            role: member.role,
            created_at: now,
            expires_at: now + self.ttl,
        };

        info!(staff_id = %member.id, role = %member.role, "Staff session opened");
        self.sessions.insert(session.token, session.clone());
        session
    }

    /// Resumes a session. Every session expired at `now` is purged first,
    /// the resumed one included.
    ///
    /// # Errors
    ///
    /// - [`EngineError::SessionNotFound`] if the token is unknown
    /// - [`EngineError::SessionExpired`] if the session has expired; the
    ///   session is removed
    pub fn validate(&mut self, token: Uuid, now: DateTime<Utc>) -> EngineResult<StaffSession> {
        let expires_at = self
            .sessions
            .get(&token)
            .map(|session| session.expires_at)
            .ok_or(EngineError::SessionNotFound)?;

        self.purge_and_log(now);

        match self.sessions.get(&token) {
            Some(session) => Ok(session.clone()),
            None => Err(EngineError::SessionExpired { expired_at: expires_at }),
        }
    }

    /// Closes a session.
    pub fn logout(&mut self, token: Uuid) -> EngineResult<()> {
        let session = self
            .sessions
            .remove(&token)
            .ok_or(EngineError::SessionNotFound)?;

        info!(staff_id = %session.staff_id, "Staff session closed");
        Ok(())
    }

    /// Removes every session expired at `now`, returning how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired(now));
        before - self.sessions.len()
    }

    fn purge_and_log(&mut self, now: DateTime<Utc>) {
        let purged = self.purge_expired(now);
        if purged > 0 {
            debug!(purged, "Purged expired staff sessions");
        }
    }

    /// Number of open sessions, expired or not.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns true if no session is open.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
