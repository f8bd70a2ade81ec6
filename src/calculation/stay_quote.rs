//! Stay quotes.
//!
//! Extends a nightly rate over the full length of a stay. Windows are
//! resolved once, on the arrival date, and the resulting nightly rate is
//! charged for every night.

use crate::error::EngineResult;
use crate::models::{RateCalculationContext, RateWindow, StayQuote};

use super::rate_resolution::try_calculate_rate;

/// Quotes a whole stay at the adjusted nightly rate.
///
/// A zero night count is quoted as a single night.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if the nightly rate or the stay total does not fit in a `Decimal`.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::quote_stay;
/// use rate_engine::models::RateCalculationContext;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let context = RateCalculationContext {
///     date: NaiveDate::from_ymd_opt(2026, 7, 14).unwrap(),
///     room_type: "STD".to_string(),
///     client_type: "individual".to_string(),
///     nights_count: 3,
///     base_tariff: Decimal::new(50000, 0),
/// };
///
/// let quote = quote_stay(&context, &[])?;
/// assert_eq!(quote.stay_total, Decimal::new(150000, 0));
/// # Ok::<(), rate_engine::error::EngineError>(())
/// ```
pub fn quote_stay(
    context: &RateCalculationContext,
    windows: &[RateWindow],
) -> EngineResult<StayQuote> {
    StayQuote::new(try_calculate_rate(context, windows)?, context.effective_nights())
}
