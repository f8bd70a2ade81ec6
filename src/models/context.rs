//! Rate calculation context.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest base tariff accepted by [`RateCalculationContext::validate`]: 10^15.
pub const MAX_BASE_TARIFF: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// The stay a rate is being calculated for.
///
/// Supplied per call; never persisted.
///
/// # Example
///
/// ```
/// use rate_engine::models::RateCalculationContext;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let context = RateCalculationContext {
///     date: NaiveDate::from_ymd_opt(2026, 7, 14).unwrap(),
///     room_type: "DLX".to_string(),
///     client_type: "corporate".to_string(),
///     nights_count: 3,
///     base_tariff: Decimal::new(50000, 0),
/// };
/// assert!(context.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCalculationContext {
    /// The arrival date.
    pub date: NaiveDate,
    /// The room type code.
    pub room_type: String,
    /// The client type tag (e.g. "individual", "corporate", "group").
    pub client_type: String,
    /// Length of stay in nights.
    pub nights_count: u32,
    /// The un-adjusted nightly tariff.
    pub base_tariff: Decimal,
}

impl RateCalculationContext {
    /// Checks the preconditions callers must satisfy before calculating.
    ///
    /// The calculation itself tolerates violations (zero nights are
    /// treated as one night); this is for boundaries that should reject
    /// bad input instead.
    pub fn validate(&self) -> EngineResult<()> {
        if self.nights_count == 0 {
            return Err(EngineError::InvalidContext {
                field: "nights_count".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.base_tariff < Decimal::ZERO {
            return Err(EngineError::InvalidContext {
                field: "base_tariff".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if self.base_tariff > MAX_BASE_TARIFF {
            return Err(EngineError::InvalidContext {
                field: "base_tariff".to_string(),
                message: format!("must not exceed {}", MAX_BASE_TARIFF),
            });
        }
        if self.room_type.trim().is_empty() {
            return Err(EngineError::InvalidContext {
                field: "room_type".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.client_type.trim().is_empty() {
            return Err(EngineError::InvalidContext {
                field: "client_type".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the stay length used by the calculation, at least one night.
    pub fn effective_nights(&self) -> u32 {
        self.nights_count.max(1)
    }
}
