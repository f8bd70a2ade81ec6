//! POS staff sessions.
//!
//! Sessions are explicit objects owned by the caller (the API state holds
//! one [`SessionManager`]) rather than ambient global state.

mod manager;

pub use manager::{DEFAULT_SESSION_TTL_MINUTES, SessionManager};
