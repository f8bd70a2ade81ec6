//! Rate window resolution.
//!
//! Resolves a base nightly tariff against the configured rate windows:
//! filter to the applicable windows, order them by priority, then fold each
//! window's adjustment onto a running rate.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, RateAdjustment, RateCalculationContext,
    RateCalculationResult, RateType, RateWindow, StepOutcome,
};

use super::adjustment::{checked_adjustment, compute_adjustment};
use super::day_detection::weekday_of;
use super::window_filter::{
    Applicability, SkipReason, check_applicability, select_applicable_windows, sort_by_priority,
};

/// Running state of the adjustment fold.
///
/// Sums that leave the `Decimal` range saturate and set `overflowed`.
struct RateFold {
    base_tariff: Decimal,
    running_rate: Decimal,
    adjustments: Vec<RateAdjustment>,
    total_discount: Decimal,
    total_surcharge: Decimal,
    overflowed: bool,
}

fn accumulate(total: &mut Decimal, amount: Decimal, overflowed: &mut bool) {
    match total.checked_add(amount) {
        Some(sum) => *total = sum,
        None => {
            *overflowed = true;
            *total = total.saturating_add(amount);
        }
    }
}

impl RateFold {
    fn new(base_tariff: Decimal) -> Self {
        Self {
            base_tariff,
            running_rate: base_tariff,
            adjustments: Vec::new(),
            total_discount: Decimal::ZERO,
            total_surcharge: Decimal::ZERO,
            overflowed: false,
        }
    }

    fn apply(&mut self, window: &RateWindow) -> Decimal {
        let amount = match checked_adjustment(window, self.running_rate) {
            Some(amount) => amount,
            None => {
                self.overflowed = true;
                compute_adjustment(window, self.running_rate)
            }
        };

        self.adjustments.push(RateAdjustment {
            window_id: window.id.clone(),
            window_name: window.name.clone(),
            rate_type: window.rate_type,
            value: window.adjustment_value,
            amount,
            priority: window.priority,
        });
        accumulate(&mut self.running_rate, amount, &mut self.overflowed);

        if amount < Decimal::ZERO {
            accumulate(&mut self.total_discount, amount.abs(), &mut self.overflowed);
        } else {
            accumulate(&mut self.total_surcharge, amount, &mut self.overflowed);
        }

        amount
    }

    fn finish(self) -> RateCalculationResult {
        RateCalculationResult {
            base_tariff: self.base_tariff,
            adjustments: self.adjustments,
            final_rate: self.running_rate.max(Decimal::ZERO),
            total_discount: self.total_discount,
            total_surcharge: self.total_surcharge,
        }
    }
}

/// Calculates the adjusted nightly rate for a stay.
///
/// This is a pure function of its inputs: it performs no I/O and never
/// fails. Windows that cannot be interpreted (inverted date range or stay
/// bounds) are skipped rather than rejected. Amounts and totals that leave
/// the `Decimal` range saturate at `Decimal::MAX`/`Decimal::MIN`;
/// [`try_calculate_rate`] reports that case as an error instead.
///
/// # Algorithm
///
/// 1. Keep the windows that apply to the context (see
///    [`check_applicability`](super::check_applicability)).
/// 2. Order them by priority, highest first; equal priorities keep their
///    input order.
/// 3. Starting from `base_tariff`, add each window's adjustment to the
///    running rate. Percentage adjustments compound on the running rate.
/// 4. Floor the final rate at zero.
///
/// # Example
///
/// ```
/// use rate_engine::calculation::calculate_rate;
/// use rate_engine::models::{DayOfWeek, RateCalculationContext, RateType, RateWindow};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let context = RateCalculationContext {
///     date: NaiveDate::from_ymd_opt(2026, 7, 14).unwrap(),
///     room_type: "STD".to_string(),
///     client_type: "individual".to_string(),
///     nights_count: 2,
///     base_tariff: Decimal::new(50000, 0),
/// };
/// let summer = RateWindow {
///     id: "rw_summer".to_string(),
///     name: "Summer".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
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
/// let result = calculate_rate(&context, &[summer]);
/// assert_eq!(result.final_rate, Decimal::new(55000, 0));
/// assert_eq!(result.total_surcharge, Decimal::new(5000, 0));
/// ```
pub fn calculate_rate(
    context: &RateCalculationContext,
    windows: &[RateWindow],
) -> RateCalculationResult {
    fold_windows(context, windows).finish()
}

/// Calculates the adjusted nightly rate, failing instead of saturating.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if an adjustment or a running
/// total does not fit in a `Decimal`.
pub fn try_calculate_rate(
    context: &RateCalculationContext,
    windows: &[RateWindow],
) -> EngineResult<RateCalculationResult> {
    let fold = fold_windows(context, windows);
    if fold.overflowed {
        return Err(overflow_error(context));
    }
    Ok(fold.finish())
}

fn fold_windows(context: &RateCalculationContext, windows: &[RateWindow]) -> RateFold {
    let mut fold = RateFold::new(context.base_tariff);
    for window in select_applicable_windows(context, windows) {
        fold.apply(window);
    }
    fold
}

fn elapsed_micros(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX)
}

fn overflow_error(context: &RateCalculationContext) -> EngineError {
    EngineError::CalculationError {
        message: format!(
            "rate adjustments on base tariff {} exceed the decimal range",
            context.base_tariff
        ),
    }
}

/// Calculates the adjusted nightly rate and explains every decision.
///
/// Produces the same [`RateCalculationResult`] as [`calculate_rate`]. The
/// audit trace holds one step per skipped window (in input order, with the
/// reason) followed by one step per applied window (in application order).
/// Malformed windows, saturated arithmetic and a floored final rate also
/// raise warnings.
pub fn calculate_rate_with_audit(
    context: &RateCalculationContext,
    windows: &[RateWindow],
) -> (RateCalculationResult, AuditTrace) {
    let (result, trace, _) = resolve_with_audit(context, windows);
    (result, trace)
}

/// Like [`calculate_rate_with_audit`], but fails where the arithmetic would
/// saturate.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if an adjustment or a running
/// total does not fit in a `Decimal`.
pub fn try_calculate_rate_with_audit(
    context: &RateCalculationContext,
    windows: &[RateWindow],
) -> EngineResult<(RateCalculationResult, AuditTrace)> {
    match resolve_with_audit(context, windows) {
        (_, _, true) => Err(overflow_error(context)),
        (result, trace, false) => Ok((result, trace)),
    }
}

fn resolve_with_audit(
    context: &RateCalculationContext,
    windows: &[RateWindow],
) -> (RateCalculationResult, AuditTrace, bool) {
    let start_time = Instant::now();
    let weekday = weekday_of(context.date);
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let mut applicable: Vec<&RateWindow> = Vec::new();
    for window in windows {
        match check_applicability(window, context, weekday) {
            Applicability::Applicable => applicable.push(window),
            Applicability::Skipped(reason) => {
                if reason == SkipReason::Malformed {
                    warnings.push(AuditWarning {
                        code: "MALFORMED_RATE_WINDOW".to_string(),
                        message: format!(
                            "Rate window '{}' was skipped: {}",
                            window.id, reason
                        ),
                        severity: "medium".to_string(),
                    });
                }
                steps.push(AuditStep {
                    step_number,
                    window_id: window.id.clone(),
                    window_name: window.name.clone(),
                    outcome: StepOutcome::Skipped,
                    input: serde_json::json!({
                        "date": context.date.to_string(),
                        "weekday": weekday.as_str(),
                        "room_type": context.room_type,
                        "client_type": context.client_type,
                        "nights_count": context.nights_count
                    }),
                    output: serde_json::json!({
                        "applied": false,
                        "reason": reason.code()
                    }),
                    reasoning: format!("Skipped: {}", reason),
                });
                step_number += 1;
            }
        }
    }

    sort_by_priority(&mut applicable);

    let mut fold = RateFold::new(context.base_tariff);
    for window in applicable {
        let before = fold.running_rate;
        let amount = fold.apply(window);
        let after = fold.running_rate;

        let reasoning = match window.rate_type {
            RateType::Percentage => format!(
                "{} x {}% = {} (running rate {} -> {})",
                before.normalize(),
                window.adjustment_value.normalize(),
                amount.normalize(),
                before.normalize(),
                after.normalize()
            ),
            RateType::Fixed => format!(
                "Fixed adjustment of {} (running rate {} -> {})",
                amount.normalize(),
                before.normalize(),
                after.normalize()
            ),
        };

        steps.push(AuditStep {
            step_number,
            window_id: window.id.clone(),
            window_name: window.name.clone(),
            outcome: StepOutcome::Applied,
            input: serde_json::json!({
                "running_rate": before.normalize().to_string(),
                "rate_type": window.rate_type.to_string(),
                "adjustment_value": window.adjustment_value.normalize().to_string(),
                "priority": window.priority
            }),
            output: serde_json::json!({
                "applied": true,
                "amount": amount.normalize().to_string(),
                "running_rate": after.normalize().to_string()
            }),
            reasoning,
        });
        step_number += 1;
    }

    if fold.overflowed {
        warnings.push(AuditWarning {
            code: "ARITHMETIC_OVERFLOW".to_string(),
            message: "An adjustment or total exceeded the decimal range and was clamped"
                .to_string(),
            severity: "high".to_string(),
        });
    }

    if fold.running_rate < Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "FINAL_RATE_FLOORED".to_string(),
            message: format!(
                "Adjustments drove the rate to {}; final rate floored at 0",
                fold.running_rate.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    let overflowed = fold.overflowed;
    let result = fold.finish();
    let trace = AuditTrace {
        steps,
        warnings,
        duration_us: elapsed_micros(start_time.elapsed()),
    };

    (result, trace, overflowed)
}
