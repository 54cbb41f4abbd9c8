//! Pending rent.
//!
//! Reconciles a tenant's rent ledger against calendar-month buckets and
//! summarises what is owed, what is overdue, the accrued penalty and the
//! suggested collection step.

mod bulk;
mod calculator;
mod recommendation;
mod types;

pub use bulk::PendingFilter;
pub use calculator::PendingRentCalculator;
pub use recommendation::{recommend, EVICTION_OVERDUE_MONTHS};
pub use types::{BillingPeriod, NextDue, PendingRentReport, PeriodStatus, RecommendedAction};
