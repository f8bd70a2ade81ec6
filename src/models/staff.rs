//! POS staff models.
//!
//! Defines staff roles with a total order, configured staff members, and the
//! session object handed out on login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// A staff role. Later variants outrank earlier ones.
///
/// # Example
///
/// ```
/// use rate_engine::models::StaffRole;
///
/// assert!(StaffRole::Manager > StaffRole::Cashier);
/// assert!(StaffRole::Admin.has_at_least(StaffRole::Supervisor));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    /// Table service staff.
    Server,
    /// Till operator.
    Cashier,
    /// Shift supervisor.
    Supervisor,
    /// Venue manager.
    Manager,
    /// System administrator.
    Admin,
}

impl StaffRole {
    /// Returns true if this role is `required` or outranks it.
    pub fn has_at_least(self, required: StaffRole) -> bool {
        self >= required
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StaffRole::Server => write!(f, "server"),
            StaffRole::Cashier => write!(f, "cashier"),
            StaffRole::Supervisor => write!(f, "supervisor"),
            StaffRole::Manager => write!(f, "manager"),
            StaffRole::Admin => write!(f, "admin"),
        }
    }
}

/// A configured staff member allowed to open a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    /// Unique identifier for the staff member.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The staff member's role.
    pub role: StaffRole,
    /// POS PIN code.
    #[serde(skip_serializing)]
    pub pin: String,
}

/// An authenticated staff session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffSession {
    /// Opaque session token.
    pub token: Uuid,
    /// The ID of the staff member who logged in.
    pub staff_id: String,
    /// The name of the staff member.
    pub staff_name: String,
    /// The role held for the lifetime of the session.
    pub role: StaffRole,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
    /// When the session stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl StaffSession {
    /// Returns true if the session has expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Fails with [`EngineError::InsufficientRole`] unless the session's role
    /// is at least `required`.
    pub fn require_role(&self, required: StaffRole) -> EngineResult<()> {
        if self.role.has_at_least(required) {
            Ok(())
        } else {
            Err(EngineError::InsufficientRole {
                required,
                actual: self.role,
            })
        }
    }
}
