//! Response types for the Rate Engine API.
//!
//! This module defines the error response structures and error handling
//! for the HTTP API.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// A 401 response for a missing or unreadable session token.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", message))
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        let error = match rejection {
            JsonRejection::JsonDataError(err) => {
                // The body text carries serde's description of the problem
                let body_text = err.body_text();
                if body_text.contains("missing field") {
                    ApiError::validation_error(body_text)
                } else {
                    ApiError::malformed_json(body_text)
                }
            }
            JsonRejection::JsonSyntaxError(err) => {
                ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
            }
            _ => ApiError::malformed_json("Failed to parse request body"),
        };
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
            EngineError::RoomTypeNotFound { code } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "ROOM_TYPE_NOT_FOUND",
                    message,
                    format!("The room type '{}' is not configured for this hotel", code),
                ),
            ),
            EngineError::TariffNotFound { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "TARIFF_NOT_FOUND",
                    message,
                    "No base tariff is effective for the requested arrival date",
                ),
            ),
            EngineError::InvalidContext { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::validation_error(message),
            ),
            EngineError::InvalidRateWindow { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_RATE_WINDOW", message),
            ),
            EngineError::RateWindowNotFound { .. } => Self::new(
                StatusCode::NOT_FOUND,
                ApiError::new("RATE_WINDOW_NOT_FOUND", message),
            ),
            EngineError::DuplicateRateWindow { .. } => Self::new(
                StatusCode::CONFLICT,
                ApiError::new("DUPLICATE_RATE_WINDOW", message),
            ),
            EngineError::InvalidCredentials => Self::new(
                StatusCode::UNAUTHORIZED,
                ApiError::new("INVALID_CREDENTIALS", message),
            ),
            EngineError::SessionNotFound => Self::unauthorized(message),
            EngineError::SessionExpired { .. } => Self::new(
                StatusCode::UNAUTHORIZED,
                ApiError::new("SESSION_EXPIRED", message),
            ),
            EngineError::InsufficientRole { .. } => Self::new(
                StatusCode::FORBIDDEN,
                ApiError::new("FORBIDDEN", message),
            ),
            // Only reachable through request magnitudes the engine cannot represent
            EngineError::CalculationError { message } => Self::new(
                StatusCode::BAD_REQUEST,
                ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            ),
        }
    }
}
