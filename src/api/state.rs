//! Application state for the Rate Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::Duration;
use tokio::sync::RwLock;

use crate::config::{ConfigLoader, RateWindowRegistry};
use crate::error::EngineResult;
use crate::session::SessionManager;

/// Shared application state.
///
/// Holds the loaded hotel configuration, the live rate window registry
/// (seeded from configuration) and the open staff sessions.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    windows: Arc<RwLock<RateWindowRegistry>>,
    sessions: Arc<RwLock<SessionManager>>,
}

impl AppState {
    /// Creates application state with the default session lifetime.
    pub fn new(config: ConfigLoader) -> EngineResult<Self> {
        Self::build(config, SessionManager::default())
    }

    /// Creates application state whose sessions live for `ttl`.
    pub fn with_session_ttl(config: ConfigLoader, ttl: Duration) -> EngineResult<Self> {
        Self::build(config, SessionManager::new(ttl))
    }

    fn build(config: ConfigLoader, sessions: SessionManager) -> EngineResult<Self> {
        let registry = RateWindowRegistry::new(config.rate_windows().to_vec())?;
        Ok(Self {
            config: Arc::new(config),
            windows: Arc::new(RwLock::new(registry)),
            sessions: Arc::new(RwLock::new(sessions)),
        })
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the rate window registry.
    pub fn windows(&self) -> &RwLock<RateWindowRegistry> {
        &self.windows
    }

    /// Returns the session manager.
    pub fn sessions(&self) -> &RwLock<SessionManager> {
        &self.sessions
    }
}
