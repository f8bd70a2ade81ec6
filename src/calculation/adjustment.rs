//! Per-window adjustment amounts.

use rust_decimal::Decimal;

use crate::models::{RateType, RateWindow};

/// Computes the signed amount `window` adds to `running_rate`.
///
/// Percentage windows apply to the running rate, not the original base, so
/// successive percentage windows compound. Fixed windows add their value
/// as-is. An amount beyond the `Decimal` range is clamped to
/// `Decimal::MAX` or `Decimal::MIN`; use [`checked_adjustment`] to detect it.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::compute_adjustment;
/// use rate_engine::models::{DayOfWeek, RateType, RateWindow};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let window = RateWindow {
///     id: "rw_peak".to_string(),
///     name: "Peak".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2027, 1, 5).unwrap(),
///     rate_type: RateType::Percentage,
///     adjustment_value: Decimal::new(10, 0),
///     min_stay: None,
///     max_stay: None,
///     applicable_days: DayOfWeek::ALL.to_vec(),
///     client_types: vec!["individual".to_string()],
///     room_types: vec![],
///     is_active: true,
///     priority: 1,
/// };
///
/// assert_eq!(compute_adjustment(&window, Decimal::new(50000, 0)), Decimal::new(5000, 0));
/// ```
pub fn compute_adjustment(window: &RateWindow, running_rate: Decimal) -> Decimal {
    checked_adjustment(window, running_rate)
        .unwrap_or_else(|| running_rate.saturating_mul(window.adjustment_value))
}

/// Like [`compute_adjustment`], but returns `None` when the amount does not
/// fit in a `Decimal`.
pub fn checked_adjustment(window: &RateWindow, running_rate: Decimal) -> Option<Decimal> {
    match window.rate_type {
        RateType::Percentage => running_rate
            .checked_mul(window.adjustment_value)
            .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
            // The product can overflow where the percentage itself fits
            .or_else(|| (running_rate / Decimal::ONE_HUNDRED).checked_mul(window.adjustment_value)),
        RateType::Fixed => Some(window.adjustment_value),
    }
}
