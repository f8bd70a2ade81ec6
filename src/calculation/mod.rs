//! Calculation logic for the Rate Engine.
//!
//! This module contains the rate window resolution engine: arrival weekday
//! detection, window applicability filtering, per-window adjustment amounts,
//! the priority-ordered adjustment fold, and stay quotes built on top of it.

mod adjustment;
mod day_detection;
mod rate_resolution;
mod stay_quote;
mod window_filter;

pub use adjustment::{checked_adjustment, compute_adjustment};
pub use day_detection::weekday_of;
pub use rate_resolution::{
    calculate_rate, calculate_rate_with_audit, try_calculate_rate, try_calculate_rate_with_audit,
};
pub use stay_quote::quote_stay;
pub use window_filter::{
    Applicability, SkipReason, check_applicability, select_applicable_windows,
};
