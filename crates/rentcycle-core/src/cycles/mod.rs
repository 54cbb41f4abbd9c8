//! Billing cycle math.
//!
//! - [`math`]: pure interval functions for both conventions
//! - [`RentCycleCalculator`]: the same functions bound to one convention,
//!   plus yearly and ranged enumeration

pub mod calculator;
pub mod math;

pub use calculator::RentCycleCalculator;
pub use math::{
    calendar_period, days_in_period, midmonth_period, midmonth_period_with, next_period,
    period_starting, validate_period, MonthOverflowPolicy, PeriodValidation,
    MIDMONTH_TOLERANCE_DAYS, MONTH_OVERFLOW_POLICY,
};
