//! Arrival weekday detection.
//!
//! Rate windows are filtered on the weekday of the arrival date, named in
//! lowercase English regardless of the host locale.

use chrono::{Datelike, NaiveDate};

use crate::models::DayOfWeek;

/// Returns the weekday of `date`.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::weekday_of;
/// use rate_engine::models::DayOfWeek;
/// use chrono::NaiveDate;
///
/// // 2026-01-17 is a Saturday
/// let date = NaiveDate::from_ymd_opt(2026, 1, 17).unwrap();
/// assert_eq!(weekday_of(date), DayOfWeek::Saturday);
/// assert_eq!(weekday_of(date).as_str(), "saturday");
/// ```
pub fn weekday_of(date: NaiveDate) -> DayOfWeek {
    date.weekday().into()
}
