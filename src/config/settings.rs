//! Process-level settings read from the environment.

use std::net::SocketAddr;

use chrono::Duration;

use crate::error::{EngineError, EngineResult};
use crate::session::DEFAULT_SESSION_TTL_MINUTES;

/// Environment variable naming the hotel configuration directory.
pub const CONFIG_DIR_VAR: &str = "RATE_ENGINE_CONFIG";
/// Environment variable naming the listen address.
pub const ADDR_VAR: &str = "RATE_ENGINE_ADDR";
/// Environment variable setting the staff session lifetime in minutes.
pub const SESSION_TTL_VAR: &str = "RATE_ENGINE_SESSION_TTL_MINUTES";

const DEFAULT_CONFIG_DIR: &str = "./config/grand_hotel";
const DEFAULT_ADDR: &str = "0.0.0.0:8080";

/// Settings for running the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    /// Directory holding the hotel YAML configuration.
    pub config_dir: String,
    /// Address the server listens on.
    pub addr: SocketAddr,
    /// Lifetime of a staff session.
    pub session_ttl: Duration,
}

impl ServerSettings {
    /// Reads settings from the process environment, falling back to defaults.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns a variable's value if set.
    pub fn from_lookup<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_dir = lookup(CONFIG_DIR_VAR).unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string());

        let addr_raw = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr_raw
            .parse::<SocketAddr>()
            .map_err(|e| invalid_setting(ADDR_VAR, e.to_string()))?;

        let ttl_minutes = match lookup(SESSION_TTL_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|e| invalid_setting(SESSION_TTL_VAR, e.to_string()))?,
            None => DEFAULT_SESSION_TTL_MINUTES,
        };
        if ttl_minutes <= 0 {
            return Err(invalid_setting(SESSION_TTL_VAR, "must be positive".to_string()));
        }

        Ok(Self {
            config_dir,
            addr,
            session_ttl: Duration::minutes(ttl_minutes),
        })
    }
}

fn invalid_setting(var: &str, message: String) -> EngineError {
    EngineError::ConfigParseError {
        path: format!("${}", var),
        message,
    }
}
