//! Rate window models.
//!
//! A [`RateWindow`] is a configured seasonal or contextual pricing override
//! that adjusts a base nightly tariff. Several windows may match the same
//! stay; they stack in priority order.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a window's `adjustment_value` is interpreted.
///
/// # Example
///
/// ```
/// use rate_engine::models::RateType;
///
/// let rate_type: RateType = serde_json::from_str("\"percentage\"").unwrap();
/// assert_eq!(rate_type, RateType::Percentage);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateType {
    /// The adjustment is `running_rate * value / 100`.
    Percentage,
    /// The adjustment is `value`, an absolute currency amount.
    Fixed,
}

impl std::fmt::Display for RateType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RateType::Percentage => write!(f, "percentage"),
            RateType::Fixed => write!(f, "fixed"),
        }
    }
}

/// A day of the week, named in lowercase English independent of locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOfWeek {
    /// Sunday.
    Sunday,
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
    /// Saturday.
    Saturday,
}

impl DayOfWeek {
    /// All seven days, Sunday first.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Returns the lowercase English name of the day.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "sunday",
            DayOfWeek::Monday => "monday",
            DayOfWeek::Tuesday => "tuesday",
            DayOfWeek::Wednesday => "wednesday",
            DayOfWeek::Thursday => "thursday",
            DayOfWeek::Friday => "friday",
            DayOfWeek::Saturday => "saturday",
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_active() -> bool {
    true
}

/// A configured pricing override applied on top of a base nightly tariff.
///
/// # Example
///
/// ```
/// use rate_engine::models::{DayOfWeek, RateType, RateWindow};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let window = RateWindow {
///     id: "rw_summer".to_string(),
///     name: "Summer season".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
///     rate_type: RateType::Percentage,
///     adjustment_value: Decimal::new(15, 0),
///     min_stay: None,
///     max_stay: None,
///     applicable_days: DayOfWeek::ALL.to_vec(),
///     client_types: vec!["individual".to_string()],
///     room_types: vec![],
///     is_active: true,
///     priority: 1,
/// };
///
/// assert!(window.covers_date(NaiveDate::from_ymd_opt(2026, 7, 14).unwrap()));
/// assert!(window.applies_to_room_type("STD"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateWindow {
    /// Opaque unique identifier.
    pub id: String,
    /// Display label.
    pub name: String,
    /// First date (inclusive) on which the window may apply.
    pub start_date: NaiveDate,
    /// Last date (inclusive) on which the window may apply.
    pub end_date: NaiveDate,
    /// How `adjustment_value` is interpreted.
    pub rate_type: RateType,
    /// Signed adjustment; positive values are surcharges, negative discounts.
    pub adjustment_value: Decimal,
    /// Minimum stay length in nights (inclusive).
    #[serde(default)]
    pub min_stay: Option<u32>,
    /// Maximum stay length in nights (inclusive).
    #[serde(default)]
    pub max_stay: Option<u32>,
    /// Arrival weekdays on which the window applies.
    pub applicable_days: Vec<DayOfWeek>,
    /// Client type tags the window applies to.
    pub client_types: Vec<String>,
    /// Room type codes the window applies to; empty means all room types.
    #[serde(default)]
    pub room_types: Vec<String>,
    /// Inactive windows never apply.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Higher priorities are applied first.
    #[serde(default)]
    pub priority: i32,
}

impl RateWindow {
    /// Returns true if `date` falls within `[start_date, end_date]`.
    pub fn covers_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Returns true if the window applies on arrivals on `day`.
    pub fn applies_on(&self, day: DayOfWeek) -> bool {
        self.applicable_days.contains(&day)
    }

    /// Returns true if the window applies to `client_type`.
    pub fn applies_to_client_type(&self, client_type: &str) -> bool {
        self.client_types.iter().any(|c| c == client_type)
    }

    /// Returns true if the window applies to `room_type`.
    ///
    /// An empty room type list is a wildcard.
    pub fn applies_to_room_type(&self, room_type: &str) -> bool {
        self.room_types.is_empty() || self.room_types.iter().any(|r| r == room_type)
    }

    /// Returns true if the date range and stay bounds are internally consistent.
    pub fn is_well_formed(&self) -> bool {
        if self.start_date > self.end_date {
            return false;
        }
        match (self.min_stay, self.max_stay) {
            (Some(min), Some(max)) => min <= max,
            _ => true,
        }
    }
}

/// The editable fields of a rate window, without its identifier.
///
/// Used by the registry to create and update windows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateWindowDraft {
    /// Display label.
    pub name: String,
    /// First date (inclusive).
    pub start_date: NaiveDate,
    /// Last date (inclusive).
    pub end_date: NaiveDate,
    /// How `adjustment_value` is interpreted.
    pub rate_type: RateType,
    /// Signed adjustment value.
    pub adjustment_value: Decimal,
    /// Minimum stay length in nights.
    #[serde(default)]
    pub min_stay: Option<u32>,
    /// Maximum stay length in nights.
    #[serde(default)]
    pub max_stay: Option<u32>,
    /// Arrival weekdays on which the window applies.
    pub applicable_days: Vec<DayOfWeek>,
    /// Client type tags.
    pub client_types: Vec<String>,
    /// Room type codes; empty means all.
    #[serde(default)]
    pub room_types: Vec<String>,
    /// Whether the window is active.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Application priority.
    #[serde(default)]
    pub priority: i32,
}

impl RateWindowDraft {
    /// Builds a window from this draft with the given identifier.
    pub fn into_window(self, id: impl Into<String>) -> RateWindow {
        RateWindow {
            id: id.into(),
            name: self.name,
            start_date: self.start_date,
            end_date: self.end_date,
            rate_type: self.rate_type,
            adjustment_value: self.adjustment_value,
            min_stay: self.min_stay,
            max_stay: self.max_stay,
            applicable_days: self.applicable_days,
            client_types: self.client_types,
            room_types: self.room_types,
            is_active: self.is_active,
            priority: self.priority,
        }
    }
}
