//! Billing interval arithmetic.
//!
//! Pure functions generating and checking the two cycle conventions:
//!
//! - **Calendar**: the 1st to the last day of one month.
//! - **Midmonth**: day D to the day before D in the following month.
//!
//! # Day overflow
//!
//! Adding a month to a day that does not exist in the target month (Jan 31
//! plus one month) follows [`MONTH_OVERFLOW_POLICY`], which is
//! [`MonthOverflowPolicy::Clamp`]: the day clamps to the last day of the
//! target month and the cycle then ends the day before.
//! `midmonth_period(2025-01-31)` is therefore `[2025-01-31, 2025-02-27]`.

use serde::{Deserialize, Serialize};

use crate::error::{RentError, RentResult};
use crate::types::{Date, Period, RentCycleType};

/// Days a midmonth period end may deviate from the expected end and still
/// validate.
pub const MIDMONTH_TOLERANCE_DAYS: i64 = 1;

/// How "plus one month" treats a start day missing from the target month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MonthOverflowPolicy {
    /// Clamp to the last day of the target month (Jan 31 -> Feb 28).
    #[default]
    Clamp,
    /// Carry the excess days into the month after (Jan 31 -> Mar 3 in 2025).
    Rollover,
}

/// Overflow policy used by every cycle computation in the workspace.
pub const MONTH_OVERFLOW_POLICY: MonthOverflowPolicy = MonthOverflowPolicy::Clamp;

/// Outcome of [`validate_period`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodValidation {
    /// True if the interval matches the convention.
    pub is_valid: bool,
    /// Why the interval was rejected.
    pub reason: Option<String>,
}

impl PeriodValidation {
    fn ok() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason.into()),
        }
    }
}

/// Calendar month containing `date`.
#[must_use]
pub fn calendar_period(date: Date) -> Period {
    Period {
        start: date.start_of_month(),
        end: date.end_of_month(),
    }
}

/// Midmonth period starting on `start`, under [`MONTH_OVERFLOW_POLICY`].
///
/// # Errors
///
/// Returns `RentError::InvalidDate` if the end falls outside the supported
/// date range.
pub fn midmonth_period(start: Date) -> RentResult<Period> {
    midmonth_period_with(start, MONTH_OVERFLOW_POLICY)
}

/// Midmonth period starting on `start`, under an explicit overflow policy.
///
/// # Errors
///
/// Returns `RentError::InvalidDate` if the end falls outside the supported
/// date range.
pub fn midmonth_period_with(start: Date, policy: MonthOverflowPolicy) -> RentResult<Period> {
    let next = add_one_month(start, policy)?;
    Ok(Period {
        start,
        end: next.checked_add_days(-1)?,
    })
}

/// Period of `cycle_type` beginning exactly on `start`.
///
/// A calendar period started mid-month runs to the end of that month.
///
/// # Errors
///
/// Returns `RentError::InvalidDate` if the end falls outside the supported
/// date range.
pub fn period_starting(start: Date, cycle_type: RentCycleType) -> RentResult<Period> {
    match cycle_type {
        RentCycleType::Calendar => Ok(Period {
            start,
            end: start.end_of_month(),
        }),
        RentCycleType::Midmonth => midmonth_period(start),
    }
}

/// Period following one that ended on `last_end`.
///
/// # Errors
///
/// Returns `RentError::InvalidDate` if the end falls outside the supported
/// date range.
pub fn next_period(last_end: Date, cycle_type: RentCycleType) -> RentResult<Period> {
    period_starting(last_end.checked_add_days(1)?, cycle_type)
}

/// Checks that `[start, end]` is one whole period of `cycle_type`.
#[must_use]
pub fn validate_period(start: Date, end: Date, cycle_type: RentCycleType) -> PeriodValidation {
    if end < start {
        return PeriodValidation::invalid(format!("end {end} is before start {start}"));
    }

    match cycle_type {
        RentCycleType::Calendar => {
            if start.day() != 1 {
                return PeriodValidation::invalid(format!(
                    "calendar period must start on the 1st, got {start}"
                ));
            }
            if end != start.end_of_month() {
                return PeriodValidation::invalid(format!(
                    "calendar period starting {start} must end on {}, got {end}",
                    start.end_of_month()
                ));
            }
            PeriodValidation::ok()
        }
        RentCycleType::Midmonth => {
            let expected = match midmonth_period(start) {
                Ok(period) => period.end,
                Err(e) => return PeriodValidation::invalid(e.to_string()),
            };
            let drift = expected.days_between(&end).abs();
            if drift > MIDMONTH_TOLERANCE_DAYS {
                return PeriodValidation::invalid(format!(
                    "midmonth period starting {start} should end on {expected} (±{MIDMONTH_TOLERANCE_DAYS} day), got {end}"
                ));
            }
            PeriodValidation::ok()
        }
    }
}

/// Number of days in `[start, end]`, both ends included; 0 when inverted.
#[must_use]
pub fn days_in_period(start: Date, end: Date) -> i64 {
    (start.days_between(&end) + 1).max(0)
}

fn add_one_month(date: Date, policy: MonthOverflowPolicy) -> RentResult<Date> {
    let clamped = date.add_months(1)?;
    match policy {
        MonthOverflowPolicy::Clamp => Ok(clamped),
        MonthOverflowPolicy::Rollover => {
            let excess = i64::from(date.day()) - i64::from(clamped.day());
            if excess > 0 {
                clamped.checked_add_days(excess)
            } else {
                Ok(clamped)
            }
        }
    }
}

/// Rejects a start day that cannot anchor a drift-free yearly schedule.
pub(crate) fn check_anchor_day(day: u32) -> RentResult<()> {
    if (1..=28).contains(&day) {
        Ok(())
    } else {
        Err(RentError::invalid_input(
            "starting_day",
            format!("must be between 1 and 28, got {day}"),
        ))
    }
}
