//! Write-time validation of rate windows.
//!
//! Windows are validated when they enter the configuration (file load or
//! registry write). The calculation path does not validate; it skips
//! windows it cannot interpret.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::RateWindow;

/// Largest `|adjustment_value|` a rate window may carry: 10^15.
pub const MAX_ADJUSTMENT_VALUE: Decimal =
    Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

fn invalid(window: &RateWindow, message: impl Into<String>) -> EngineError {
    EngineError::InvalidRateWindow {
        window_id: window.id.clone(),
        message: message.into(),
    }
}

/// Validates a rate window.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRateWindow`] if:
/// - `id` or `name` is blank
/// - `start_date` is after `end_date`
/// - `min_stay` or `max_stay` is zero, or `min_stay > max_stay`
/// - `applicable_days` or `client_types` is empty
/// - any client type or room type entry is blank
/// - `|adjustment_value|` exceeds [`MAX_ADJUSTMENT_VALUE`]
///
/// # Example
///
/// ```
/// use rate_engine::config::validate_rate_window;
/// use rate_engine::models::{DayOfWeek, RateType, RateWindow};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut window = RateWindow {
///     id: "rw_winter".to_string(),
///     name: "Winter".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2027, 2, 28).unwrap(),
///     rate_type: RateType::Percentage,
///     adjustment_value: Decimal::new(-15, 0),
///     min_stay: None,
///     max_stay: None,
///     applicable_days: DayOfWeek::ALL.to_vec(),
///     client_types: vec!["individual".to_string()],
///     room_types: vec![],
///     is_active: true,
///     priority: 0,
/// };
/// assert!(validate_rate_window(&window).is_ok());
///
/// window.end_date = NaiveDate::from_ymd_opt(2026, 11, 1).unwrap();
/// assert!(validate_rate_window(&window).is_err());
/// ```
pub fn validate_rate_window(window: &RateWindow) -> EngineResult<()> {
    if window.id.trim().is_empty() {
        return Err(invalid(window, "id must not be empty"));
    }
    if window.name.trim().is_empty() {
        return Err(invalid(window, "name must not be empty"));
    }
    if window.start_date > window.end_date {
        return Err(invalid(
            window,
            format!(
                "start_date {} is after end_date {}",
                window.start_date, window.end_date
            ),
        ));
    }
    if window.min_stay == Some(0) {
        return Err(invalid(window, "min_stay must be at least 1 night"));
    }
    if window.max_stay == Some(0) {
        return Err(invalid(window, "max_stay must be at least 1 night"));
    }
    if let (Some(min), Some(max)) = (window.min_stay, window.max_stay) {
        if min > max {
            return Err(invalid(
                window,
                format!("min_stay {} is greater than max_stay {}", min, max),
            ));
        }
    }
    if window.applicable_days.is_empty() {
        return Err(invalid(window, "applicable_days must not be empty"));
    }
    if window.client_types.is_empty() {
        return Err(invalid(window, "client_types must not be empty"));
    }
    if window.client_types.iter().any(|c| c.trim().is_empty()) {
        return Err(invalid(window, "client_types must not contain blank entries"));
    }
    if window.room_types.iter().any(|r| r.trim().is_empty()) {
        return Err(invalid(window, "room_types must not contain blank entries"));
    }
    check_adjustment_bound(window)
}

/// Rejects a window whose `|adjustment_value|` exceeds [`MAX_ADJUSTMENT_VALUE`].
///
/// This is the only check applied to windows supplied inline with a
/// calculation request.
pub fn check_adjustment_bound(window: &RateWindow) -> EngineResult<()> {
    if window.adjustment_value.abs() > MAX_ADJUSTMENT_VALUE {
        return Err(invalid(
            window,
            format!("adjustment_value must be within +/-{}", MAX_ADJUSTMENT_VALUE),
        ));
    }
    Ok(())
}

/// Validates every window and rejects duplicate IDs.
pub fn validate_rate_windows(windows: &[RateWindow]) -> EngineResult<()> {
    let mut seen = HashSet::new();
    for window in windows {
        validate_rate_window(window)?;
        if !seen.insert(window.id.as_str()) {
            return Err(EngineError::DuplicateRateWindow {
                id: window.id.clone(),
            });
        }
    }
    Ok(())
}
