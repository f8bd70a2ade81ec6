//! Request types for the Rate Engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::check_adjustment_bound;
use crate::error::EngineResult;
use crate::models::{RateCalculationContext, RateWindow};

/// Request body for the `/rates/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCalculationRequest {
    /// The arrival date.
    pub date: NaiveDate,
    /// The room type code.
    pub room_type: String,
    /// The client type tag.
    pub client_type: String,
    /// Length of stay in nights.
    pub nights_count: u32,
    /// Base tariff override; looked up from configuration when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_tariff: Option<Decimal>,
    /// Inline windows; the live registry is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<RateWindow>>,
}

impl RateCalculationRequest {
    /// Builds the calculation context with the given base tariff.
    pub fn to_context(&self, base_tariff: Decimal) -> RateCalculationContext {
        RateCalculationContext {
            date: self.date,
            room_type: self.room_type.clone(),
            client_type: self.client_type.clone(),
            nights_count: self.nights_count,
            base_tariff,
        }
    }

    /// Bounds the adjustment values of inline windows.
    ///
    /// Inline windows are otherwise taken as-is; ones the engine cannot
    /// interpret are skipped during calculation.
    pub fn check_inline_windows(&self) -> EngineResult<()> {
        self.windows
            .iter()
            .flatten()
            .try_for_each(check_adjustment_bound)
    }
}

/// Request body for `/rate-windows/:id/activation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivationRequest {
    /// The new activation state.
    pub is_active: bool,
}

/// Request body for the `/sessions` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The staff member's ID.
    pub staff_id: String,
    /// The staff member's PIN.
    pub pin: String,
}
