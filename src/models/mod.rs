//! Core data models for the Rate Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod context;
mod rate_window;
mod staff;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, RateAdjustment, RateCalculationResult, RateQuote,
    StayQuote, StepOutcome,
};
pub use context::{MAX_BASE_TARIFF, RateCalculationContext};
pub use rate_window::{DayOfWeek, RateType, RateWindow, RateWindowDraft};
pub use staff::{StaffMember, StaffRole, StaffSession};
