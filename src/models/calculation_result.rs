//! Calculation result models for the Rate Engine.
//!
//! This module contains the [`RateCalculationResult`] produced by the rate
//! resolution engine, the [`StayQuote`] built on top of it, the audit trace
//! that explains a calculation, and the [`RateQuote`] envelope returned by
//! the HTTP API.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::{RateCalculationContext, RateType};

/// The contribution of a single rate window to a calculation.
///
/// # Example
///
/// ```
/// use rate_engine::models::{RateAdjustment, RateType};
/// use rust_decimal::Decimal;
///
/// let adjustment = RateAdjustment {
///     window_id: "rw_summer".to_string(),
///     window_name: "Summer season".to_string(),
///     rate_type: RateType::Percentage,
///     value: Decimal::new(10, 0),
///     amount: Decimal::new(5000, 0),
///     priority: 1,
/// };
/// assert!(adjustment.is_surcharge());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateAdjustment {
    /// The ID of the contributing window.
    pub window_id: String,
    /// The name of the contributing window.
    pub window_name: String,
    /// How the window's value was interpreted.
    #[serde(rename = "type")]
    pub rate_type: RateType,
    /// The window's configured adjustment value.
    pub value: Decimal,
    /// The signed currency delta this window contributed.
    pub amount: Decimal,
    /// The window's priority.
    pub priority: i32,
}

impl RateAdjustment {
    /// Returns true if this adjustment raised the rate (or left it unchanged).
    pub fn is_surcharge(&self) -> bool {
        self.amount >= Decimal::ZERO
    }
}

/// The outcome of resolving rate windows against a base tariff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCalculationResult {
    /// Echo of the input base tariff.
    pub base_tariff: Decimal,
    /// Adjustments in application order (priority descending).
    pub adjustments: Vec<RateAdjustment>,
    /// The adjusted nightly rate, never negative.
    pub final_rate: Decimal,
    /// Sum of the absolute values of all negative adjustments.
    pub total_discount: Decimal,
    /// Sum of all non-negative adjustments.
    pub total_surcharge: Decimal,
}

impl RateCalculationResult {
    /// A result that leaves the base tariff untouched.
    pub fn unadjusted(base_tariff: Decimal) -> Self {
        Self {
            base_tariff,
            adjustments: Vec::new(),
            final_rate: base_tariff,
            total_discount: Decimal::ZERO,
            total_surcharge: Decimal::ZERO,
        }
    }
}

/// A nightly rate extended over the length of a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayQuote {
    /// The nightly rate calculation.
    pub nightly: RateCalculationResult,
    /// Number of nights quoted.
    pub nights: u32,
    /// `nightly.final_rate * nights`.
    pub stay_total: Decimal,
}

impl StayQuote {
    /// Charges `nightly.final_rate` for each of `nights`, with at least one night.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CalculationError`] if the stay total does not
    /// fit in a `Decimal`.
    pub fn new(nightly: RateCalculationResult, nights: u32) -> EngineResult<Self> {
        let nights = nights.max(1);
        let stay_total = nightly
            .final_rate
            .checked_mul(Decimal::from(nights))
            .ok_or_else(|| EngineError::CalculationError {
                message: format!(
                    "stay total overflows for {} nights at {}",
                    nights, nightly.final_rate
                ),
            })?;
        Ok(Self {
            nightly,
            nights,
            stay_total,
        })
    }
}

/// Whether a window took part in a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOutcome {
    /// The window matched and its adjustment was folded in.
    Applied,
    /// The window did not match the context.
    Skipped,
}

/// A single step in the audit trace, one per evaluated window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The ID of the evaluated window.
    pub window_id: String,
    /// The name of the evaluated window.
    pub window_name: String,
    /// Whether the window was applied or skipped.
    pub outcome: StepOutcome,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag configuration problems that did not stop the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use rate_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.applied_steps().next().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of evaluation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

impl AuditTrace {
    /// Iterates over the steps whose window was applied.
    pub fn applied_steps(&self) -> impl Iterator<Item = &AuditStep> {
        self.steps
            .iter()
            .filter(|s| s.outcome == StepOutcome::Applied)
    }
}

/// The API envelope for a rate calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateQuote {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The context the rate was calculated for.
    pub context: RateCalculationContext,
    /// The nightly rate calculation.
    pub result: RateCalculationResult,
    /// The final nightly rate multiplied by the number of nights.
    pub stay_total: Decimal,
    /// Explanation of every window evaluated.
    pub audit_trace: AuditTrace,
}
