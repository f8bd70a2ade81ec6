//! Error types for the Rate Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions raised by configuration loading, rate window
//! management and staff sessions. The rate calculation itself never fails.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use crate::models::StaffRole;

/// The main error type for the Rate Engine.
///
/// # Example
///
/// ```
/// use rate_engine::error::EngineError;
///
/// let error = EngineError::RoomTypeNotFound {
///     code: "PENTHOUSE".to_string(),
/// };
/// assert_eq!(error.to_string(), "Room type not found: PENTHOUSE");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Room type code was not found in the configuration.
    #[error("Room type not found: {code}")]
    RoomTypeNotFound {
        /// The room type code that was not found.
        code: String,
    },

    /// No base tariff was found for the given room type and date.
    #[error("Tariff not found for room type '{room_type}' on date {date}")]
    TariffNotFound {
        /// The room type code.
        room_type: String,
        /// The arrival date for which the tariff was requested.
        date: NaiveDate,
    },

    /// A calculation context field was invalid.
    #[error("Invalid context field '{field}': {message}")]
    InvalidContext {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A rate window failed write-time validation.
    #[error("Invalid rate window '{window_id}': {message}")]
    InvalidRateWindow {
        /// The ID of the invalid window.
        window_id: String,
        /// A description of what made the window invalid.
        message: String,
    },

    /// No rate window exists with the given ID.
    #[error("Rate window not found: {id}")]
    RateWindowNotFound {
        /// The window ID that was not found.
        id: String,
    },

    /// A rate window with the same ID already exists.
    #[error("Duplicate rate window id: {id}")]
    DuplicateRateWindow {
        /// The duplicated window ID.
        id: String,
    },

    /// Staff ID or PIN did not match any configured staff member.
    #[error("Invalid staff credentials")]
    InvalidCredentials,

    /// The session token is unknown or has been logged out.
    #[error("Session not found")]
    SessionNotFound,

    /// The session token has expired.
    #[error("Session expired at {expired_at}")]
    SessionExpired {
        /// When the session expired.
        expired_at: DateTime<Utc>,
    },

    /// The session's role is below the role required for the operation.
    #[error("Role '{actual}' is insufficient, '{required}' required")]
    InsufficientRole {
        /// The minimum role required.
        required: StaffRole,
        /// The role held by the session.
        actual: StaffRole,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
