//! HTTP API module for the Rate Engine.
//!
//! This module provides the REST endpoints for rate calculation, rate
//! window administration and staff sessions.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{SESSION_HEADER, create_router};
pub use request::{ActivationRequest, LoginRequest, RateCalculationRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
