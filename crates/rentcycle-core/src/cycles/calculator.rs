//! Cycle generation bound to one billing convention.

use serde::{Deserialize, Serialize};

use super::math::{self, PeriodValidation};
use crate::error::{RentError, RentResult};
use crate::types::{Date, Period, RentCycleType};

/// Stateless cycle generator for a single [`RentCycleType`].
///
/// # Example
///
/// ```rust
/// use rentcycle_core::cycles::RentCycleCalculator;
/// use rentcycle_core::types::{Date, RentCycleType};
///
/// let calc = RentCycleCalculator::new(RentCycleType::Midmonth);
/// let periods = calc.yearly_periods(2025, Some(10)).unwrap();
/// assert_eq!(periods.len(), 12);
/// assert_eq!(periods[0].start, Date::from_ymd(2025, 1, 10).unwrap());
/// assert_eq!(periods[11].end, Date::from_ymd(2026, 1, 9).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RentCycleCalculator {
    cycle_type: RentCycleType,
}

impl RentCycleCalculator {
    /// Creates a calculator for the given convention.
    #[must_use]
    pub fn new(cycle_type: RentCycleType) -> Self {
        Self { cycle_type }
    }

    /// Returns the convention this calculator generates.
    #[must_use]
    pub fn cycle_type(&self) -> RentCycleType {
        self.cycle_type
    }

    /// Period beginning on `start`.
    pub fn period_for(&self, start: Date) -> RentResult<Period> {
        math::period_starting(start, self.cycle_type)
    }

    /// Period following one that ended on `last_end`.
    pub fn next_period(&self, last_end: Date) -> RentResult<Period> {
        math::next_period(last_end, self.cycle_type)
    }

    /// Checks that `[start, end]` is one whole period.
    #[must_use]
    pub fn validate(&self, start: Date, end: Date) -> PeriodValidation {
        math::validate_period(start, end, self.cycle_type)
    }

    /// Twelve consecutive periods for reporting on `year`.
    ///
    /// Calendar periods run January to December. Midmonth periods start on
    /// `starting_day` of January (default 1) and chain forward.
    ///
    /// # Errors
    ///
    /// Returns `RentError::InvalidInput` if `starting_day` is outside 1..=28.
    pub fn yearly_periods(&self, year: i32, starting_day: Option<u32>) -> RentResult<Vec<Period>> {
        let day = match self.cycle_type {
            RentCycleType::Calendar => 1,
            RentCycleType::Midmonth => starting_day.unwrap_or(1),
        };
        math::check_anchor_day(day)?;

        let mut period = self.period_for(Date::from_ymd(year, 1, day)?)?;
        let mut periods = Vec::with_capacity(12);
        periods.push(period);
        for _ in 1..12 {
            period = self.next_period(period.end)?;
            periods.push(period);
        }
        Ok(periods)
    }

    /// Consecutive periods starting on `from` while the period start is on or
    /// before `to`.
    ///
    /// # Errors
    ///
    /// Returns `RentError::RunawayComputation` if more than `max_periods`
    /// periods would be produced.
    pub fn periods_between(&self, from: Date, to: Date, max_periods: u32) -> RentResult<Vec<Period>> {
        let mut periods = Vec::new();
        if to < from {
            return Ok(periods);
        }

        let mut period = self.period_for(from)?;
        loop {
            if periods.len() as u32 >= max_periods {
                return Err(RentError::runaway(
                    max_periods,
                    format!("more than {max_periods} periods between {from} and {to}"),
                ));
            }
            periods.push(period);
            if period.end >= to {
                break;
            }
            period = self.next_period(period.end)?;
        }
        Ok(periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_yearly_calendar() {
        let calc = RentCycleCalculator::new(RentCycleType::Calendar);
        let periods = calc.yearly_periods(2024, Some(15)).unwrap();

        assert_eq!(periods.len(), 12);
        assert_eq!(periods[0], Period { start: d(2024, 1, 1), end: d(2024, 1, 31) });
        assert_eq!(periods[1].end, d(2024, 2, 29));
        assert_eq!(periods[11], Period { start: d(2024, 12, 1), end: d(2024, 12, 31) });
    }

    #[test]
    fn test_yearly_midmonth_consecutive() {
        let calc = RentCycleCalculator::new(RentCycleType::Midmonth);
        let periods = calc.yearly_periods(2025, Some(28)).unwrap();

        for pair in periods.windows(2) {
            assert_eq!(pair[0].end.add_days(1), pair[1].start);
        }
        assert!(periods.iter().all(|p| p.start.day() == 28));
        assert!(periods.iter().all(|p| calc.validate(p.start, p.end).is_valid));
    }

    #[test]
    fn test_yearly_rejects_overflowing_anchor() {
        let calc = RentCycleCalculator::new(RentCycleType::Midmonth);
        assert!(matches!(
            calc.yearly_periods(2025, Some(31)),
            Err(RentError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_periods_between() {
        let calc = RentCycleCalculator::new(RentCycleType::Midmonth);
        let periods = calc.periods_between(d(2025, 1, 10), d(2025, 3, 15), 100).unwrap();
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[2], Period { start: d(2025, 3, 10), end: d(2025, 4, 9) });
    }

    #[test]
    fn test_periods_between_cap() {
        let calc = RentCycleCalculator::new(RentCycleType::Calendar);
        let result = calc.periods_between(d(2000, 1, 1), d(2025, 1, 1), 12);
        assert!(matches!(result, Err(RentError::RunawayComputation { .. })));
    }

    #[test]
    fn test_periods_between_empty() {
        let calc = RentCycleCalculator::new(RentCycleType::Calendar);
        assert!(calc.periods_between(d(2025, 2, 1), d(2025, 1, 1), 10).unwrap().is_empty());
    }
}
