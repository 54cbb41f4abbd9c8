//! Pending-rent report records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use rentcycle_core::types::{Date, TenantId};

use crate::ledger::PaymentHistory;

/// Collection state of a billing period with an outstanding balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodStatus {
    /// Nothing received.
    FullyPending,
    /// Something received, less than expected.
    PartiallyPaid,
    /// Unpaid balance past the grace period.
    Overdue,
}

/// One calendar month of a tenant's billing, reconciled against the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// First day of the month.
    pub start: Date,
    /// Last day of the month.
    pub end: Date,
    /// Rent expected for the month.
    pub expected_amount: Decimal,
    /// Amount attributed from overlapping payments.
    pub paid_amount: Decimal,
    /// Outstanding amount, never negative.
    pub balance: Decimal,
    /// Collection state.
    pub status: PeriodStatus,
    /// Days elapsed since the period ended.
    pub days_pending: i64,
    /// True once `days_pending` exceeds the grace period.
    pub is_overdue: bool,
}

/// Next amount the tenant should pay and by when.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextDue {
    /// Due date.
    pub due_date: Date,
    /// Amount due.
    pub amount: Decimal,
}

/// Collection step suggested by a pending-rent report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedAction {
    /// Nothing outstanding.
    NoAction,
    /// One current month outstanding.
    FollowUp,
    /// Several months outstanding, none overdue.
    UrgentFollowUp,
    /// One or two months overdue.
    Notice,
    /// More than two months overdue.
    EvictionWarning,
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecommendedAction::NoAction => "NO_ACTION",
            RecommendedAction::FollowUp => "FOLLOW_UP",
            RecommendedAction::UrgentFollowUp => "URGENT_FOLLOW_UP",
            RecommendedAction::Notice => "NOTICE",
            RecommendedAction::EvictionWarning => "EVICTION_WARNING",
        };
        f.write_str(name)
    }
}

/// What a tenant owes as of a date, bucketed by calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRentReport {
    /// Tenant the report is for.
    pub tenant_id: TenantId,
    /// Date the report was computed for.
    pub as_of: Date,
    /// Rent used as the expected amount of every month.
    pub rent_amount: Decimal,
    /// Months with a balance, oldest first.
    pub periods: Vec<BillingPeriod>,
    /// Sum of all balances.
    pub total_pending: Decimal,
    /// Number of months with a balance.
    pub pending_months: u32,
    /// Sum of balances still in PARTIALLY_PAID state.
    pub total_partial: Decimal,
    /// Number of PARTIALLY_PAID months.
    pub partial_months: u32,
    /// Sum of balances in OVERDUE state.
    pub total_overdue_amount: Decimal,
    /// Number of OVERDUE months.
    pub overdue_months: u32,
    /// Sum of PAID advance rows.
    pub total_advance_paid: Decimal,
    /// Advance left after offsetting everything pending, never negative.
    pub advance_balance: Decimal,
    /// Sum of settled refund rows, for reference.
    pub total_refunded: Decimal,
    /// Next due date and amount.
    pub next_due: NextDue,
    /// Penalty accrued on overdue months.
    pub penalty: Decimal,
    /// Summary of past payments.
    pub payment_history: PaymentHistory,
    /// Suggested collection step.
    pub recommended_action: RecommendedAction,
}

impl PendingRentReport {
    /// Returns true if any outstanding month has received some money.
    #[must_use]
    pub fn has_partial_payments(&self) -> bool {
        self.periods.iter().any(|p| p.paid_amount > Decimal::ZERO)
    }

    /// Oldest outstanding month, if any.
    #[must_use]
    pub fn oldest_pending(&self) -> Option<&BillingPeriod> {
        self.periods.first()
    }
}
