//! Rate window applicability filtering.
//!
//! A window applies to a stay only when every one of its conditions holds.
//! [`check_applicability`] reports the first condition that failed so the
//! audit trace can explain why a window was left out.

use serde::{Deserialize, Serialize};

use crate::models::{DayOfWeek, RateCalculationContext, RateWindow};

use super::day_detection::weekday_of;

/// Why a window did not apply to a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Inverted date range or stay bounds; the window cannot be interpreted.
    Malformed,
    /// The window is switched off.
    Inactive,
    /// The arrival date is outside `[start_date, end_date]`.
    OutsideDateRange,
    /// The arrival weekday is not listed.
    DayNotApplicable,
    /// The client type is not listed.
    ClientTypeExcluded,
    /// The room type is not listed.
    RoomTypeExcluded,
    /// The stay is shorter than `min_stay`.
    BelowMinStay,
    /// The stay is longer than `max_stay`.
    AboveMaxStay,
}

impl SkipReason {
    /// A short machine-readable code for the reason.
    pub fn code(&self) -> &'static str {
        match self {
            SkipReason::Malformed => "malformed",
            SkipReason::Inactive => "inactive",
            SkipReason::OutsideDateRange => "outside_date_range",
            SkipReason::DayNotApplicable => "day_not_applicable",
            SkipReason::ClientTypeExcluded => "client_type_excluded",
            SkipReason::RoomTypeExcluded => "room_type_excluded",
            SkipReason::BelowMinStay => "below_min_stay",
            SkipReason::AboveMaxStay => "above_max_stay",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SkipReason::Malformed => "window is malformed (inverted date range or stay bounds)",
            SkipReason::Inactive => "window is inactive",
            SkipReason::OutsideDateRange => "arrival date is outside the window's date range",
            SkipReason::DayNotApplicable => "arrival weekday is not an applicable day",
            SkipReason::ClientTypeExcluded => "client type is not covered by the window",
            SkipReason::RoomTypeExcluded => "room type is not covered by the window",
            SkipReason::BelowMinStay => "stay is shorter than the window's minimum stay",
            SkipReason::AboveMaxStay => "stay is longer than the window's maximum stay",
        };
        f.write_str(text)
    }
}

/// The result of checking one window against a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    /// Every condition holds.
    Applicable,
    /// The first failing condition.
    Skipped(SkipReason),
}

impl Applicability {
    /// Returns true if the window applies.
    pub fn is_applicable(&self) -> bool {
        matches!(self, Applicability::Applicable)
    }
}

/// Checks whether `window` applies to the stay described by `context`.
///
/// `weekday` is the weekday of `context.date`, passed in so that callers
/// checking many windows compute it once. A zero night count is treated as
/// a single night.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::{check_applicability, weekday_of, Applicability, SkipReason};
/// use rate_engine::models::{DayOfWeek, RateCalculationContext, RateType, RateWindow};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let context = RateCalculationContext {
///     date: NaiveDate::from_ymd_opt(2026, 7, 14).unwrap(),
///     room_type: "STD".to_string(),
///     client_type: "individual".to_string(),
///     nights_count: 1,
///     base_tariff: Decimal::new(50000, 0),
/// };
/// let window = RateWindow {
///     id: "rw_dlx".to_string(),
///     name: "Deluxe promo".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 7, 31).unwrap(),
///     rate_type: RateType::Fixed,
///     adjustment_value: Decimal::new(-5000, 0),
///     min_stay: None,
///     max_stay: None,
///     applicable_days: DayOfWeek::ALL.to_vec(),
///     client_types: vec!["individual".to_string()],
///     room_types: vec!["DLX".to_string()],
///     is_active: true,
///     priority: 0,
/// };
///
/// assert_eq!(
///     check_applicability(&window, &context, weekday_of(context.date)),
///     Applicability::Skipped(SkipReason::RoomTypeExcluded)
/// );
/// ```
pub fn check_applicability(
    window: &RateWindow,
    context: &RateCalculationContext,
    weekday: DayOfWeek,
) -> Applicability {
    let nights = context.effective_nights();

    let reason = if !window.is_well_formed() {
        SkipReason::Malformed
    } else if !window.is_active {
        SkipReason::Inactive
    } else if !window.covers_date(context.date) {
        SkipReason::OutsideDateRange
    } else if !window.applies_on(weekday) {
        SkipReason::DayNotApplicable
    } else if !window.applies_to_client_type(&context.client_type) {
        SkipReason::ClientTypeExcluded
    } else if !window.applies_to_room_type(&context.room_type) {
        SkipReason::RoomTypeExcluded
    } else if window.min_stay.is_some_and(|min| nights < min) {
        SkipReason::BelowMinStay
    } else if window.max_stay.is_some_and(|max| nights > max) {
        SkipReason::AboveMaxStay
    } else {
        return Applicability::Applicable;
    };

    Applicability::Skipped(reason)
}

/// Returns the windows that apply to `context`, in application order.
///
/// Windows are ordered by priority, highest first. The sort is stable:
/// windows with equal priority keep their relative input order.
pub fn select_applicable_windows<'a>(
    context: &RateCalculationContext,
    windows: &'a [RateWindow],
) -> Vec<&'a RateWindow> {
    let weekday = weekday_of(context.date);

    let mut applicable: Vec<&RateWindow> = windows
        .iter()
        .filter(|w| check_applicability(w, context, weekday).is_applicable())
        .collect();

    sort_by_priority(&mut applicable);
    applicable
}

/// Stable sort by descending priority.
pub(crate) fn sort_by_priority(windows: &mut [&RateWindow]) {
    windows.sort_by(|a, b| b.priority.cmp(&a.priority));
}
