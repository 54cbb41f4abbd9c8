//! Per-tenant pending-rent reconciliation.

use rust_decimal::Decimal;

use rentcycle_core::cycles::calendar_period;
use rentcycle_core::types::{Date, PaymentRow, Period, TenantSnapshot};
use rentcycle_core::RentResult;

use super::recommendation::recommend;
use super::types::{BillingPeriod, NextDue, PendingRentReport, PeriodStatus};
use crate::config::CollectionConfig;
use crate::ledger::LedgerAggregator;

/// Days per penalty block.
const PENALTY_BLOCK_DAYS: i64 = 30;

/// Computes what tenants owe, bucketed by calendar month.
///
/// Buckets are always calendar months from the check-in month through the
/// month of `as_of` (or of check-out, if the tenant left earlier), whatever
/// cycle convention the property bills on.
///
/// # Example
///
/// ```rust
/// use rentcycle_analytics::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let tenant = TenantSnapshot::new("T-1", Date::from_ymd(2025, 1, 1).unwrap(), dec!(1000));
/// let report = PendingRentCalculator::default()
///     .calculate(&tenant, &[], Date::from_ymd(2025, 2, 10).unwrap())
///     .unwrap();
///
/// assert_eq!(report.pending_months, 2);
/// assert_eq!(report.total_pending, dec!(2000));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PendingRentCalculator {
    config: CollectionConfig,
}

impl PendingRentCalculator {
    /// Creates a calculator with the given configuration.
    #[must_use]
    pub fn new(config: CollectionConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    #[must_use]
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Calendar months billed to `tenant` as of `as_of`, oldest first.
    ///
    /// Empty when `as_of` is before check-in.
    ///
    /// # Errors
    ///
    /// Returns `RentError::InvalidDate` if a month would start past the
    /// supported date range.
    pub fn billing_months(&self, tenant: &TenantSnapshot, as_of: Date) -> RentResult<Vec<Period>> {
        let last = tenant.billable_until(as_of);
        let mut months = Vec::new();
        if last < tenant.check_in_date {
            return Ok(months);
        }

        let mut month = calendar_period(tenant.check_in_date);
        loop {
            months.push(month);
            if month.end >= last {
                break;
            }
            month = calendar_period(month.end.checked_add_days(1)?);
        }
        Ok(months)
    }

    /// Months with an outstanding balance, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RentError::ConfigError` for an invalid configuration, or
    /// `RentError::InvalidInput` if the snapshot or any ledger row is
    /// malformed.
    pub fn billing_periods(
        &self,
        tenant: &TenantSnapshot,
        rows: &[PaymentRow],
        as_of: Date,
    ) -> RentResult<Vec<BillingPeriod>> {
        self.config.validate()?;
        tenant.validate()?;
        let ledger = LedgerAggregator::new(rows)?.with_policy(self.config.overlap_policy);
        self.outstanding(tenant, &ledger, as_of)
    }

    /// Full pending-rent report for one tenant.
    ///
    /// # Errors
    ///
    /// - `RentError::ConfigError` if the configuration is invalid
    /// - `RentError::InvalidInput` if the snapshot or any ledger row is
    ///   malformed
    /// - `RentError::InvalidDate` if a month or the next due date falls
    ///   outside the supported range
    pub fn calculate(
        &self,
        tenant: &TenantSnapshot,
        rows: &[PaymentRow],
        as_of: Date,
    ) -> RentResult<PendingRentReport> {
        self.config.validate()?;
        tenant.validate()?;
        let ledger = LedgerAggregator::new(rows)?.with_policy(self.config.overlap_policy);
        let periods = self.outstanding(tenant, &ledger, as_of)?;

        let mut total_pending = Decimal::ZERO;
        let mut total_partial = Decimal::ZERO;
        let mut partial_months = 0u32;
        let mut total_overdue_amount = Decimal::ZERO;
        let mut overdue_months = 0u32;
        let mut penalty = Decimal::ZERO;

        for period in &periods {
            total_pending += period.balance;
            match period.status {
                PeriodStatus::PartiallyPaid => {
                    total_partial += period.balance;
                    partial_months += 1;
                }
                PeriodStatus::Overdue => {
                    total_overdue_amount += period.balance;
                    overdue_months += 1;
                    penalty += self.penalty_for(period);
                }
                PeriodStatus::FullyPending => {}
            }
        }
        let pending_months = periods.len() as u32;

        let total_advance_paid = ledger.total_advance_paid();
        let advance_balance = (total_advance_paid - total_pending).max(Decimal::ZERO);

        let next_due = match periods.first() {
            Some(oldest) => NextDue {
                due_date: oldest.end,
                amount: oldest.balance,
            },
            None => NextDue {
                due_date: as_of.add_months(1)?,
                amount: tenant.rent_amount,
            },
        };

        let recommended_action = recommend(total_pending, pending_months, overdue_months);

        tracing::debug!(
            tenant_id = %tenant.tenant_id,
            %as_of,
            pending_months,
            overdue_months,
            %total_pending,
            action = %recommended_action,
            "Pending rent calculated"
        );

        Ok(PendingRentReport {
            tenant_id: tenant.tenant_id.clone(),
            as_of,
            rent_amount: tenant.rent_amount,
            periods,
            total_pending,
            pending_months,
            total_partial,
            partial_months,
            total_overdue_amount,
            overdue_months,
            total_advance_paid,
            advance_balance,
            total_refunded: ledger.total_refunded(),
            next_due,
            penalty: penalty.round_dp(2),
            payment_history: ledger.payment_history(),
            recommended_action,
        })
    }

    fn outstanding(
        &self,
        tenant: &TenantSnapshot,
        ledger: &LedgerAggregator<'_>,
        as_of: Date,
    ) -> RentResult<Vec<BillingPeriod>> {
        Ok(self
            .billing_months(tenant, as_of)?
            .into_iter()
            .filter_map(|month| self.reconcile(month, tenant.rent_amount, ledger, as_of))
            .collect())
    }

    /// Reconciles one month; `None` when nothing is owed.
    fn reconcile(
        &self,
        month: Period,
        expected_amount: Decimal,
        ledger: &LedgerAggregator<'_>,
        as_of: Date,
    ) -> Option<BillingPeriod> {
        let paid_amount = ledger.paid_for(&month);
        let balance = (expected_amount - paid_amount).max(Decimal::ZERO);
        if balance <= Decimal::ZERO {
            return None;
        }

        let days_pending = month.end.days_between(&as_of).max(0);
        let is_overdue = days_pending > self.config.grace_period_days;
        let status = if is_overdue {
            PeriodStatus::Overdue
        } else if paid_amount > Decimal::ZERO {
            PeriodStatus::PartiallyPaid
        } else {
            PeriodStatus::FullyPending
        };

        Some(BillingPeriod {
            start: month.start,
            end: month.end,
            expected_amount,
            paid_amount,
            balance,
            status,
            days_pending,
            is_overdue,
        })
    }

    fn penalty_for(&self, period: &BillingPeriod) -> Decimal {
        // Every started block counts in full.
        let blocks = (period.days_pending + PENALTY_BLOCK_DAYS - 1) / PENALTY_BLOCK_DAYS;
        period.balance * self.config.penalty_rate * Decimal::from(blocks)
    }
}
