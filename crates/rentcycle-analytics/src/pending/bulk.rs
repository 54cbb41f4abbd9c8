//! Pending-rent reports across many tenants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rentcycle_core::types::Date;
use rentcycle_core::RentResult;

use super::calculator::PendingRentCalculator;
use super::types::PendingRentReport;
use crate::directory::TenantLedger;
use crate::parallel::try_fan_out;

/// Selects which tenants a bulk report keeps.
///
/// Tenants with nothing pending are always dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingFilter {
    /// Keep tenants owing at least this much.
    pub min_pending_amount: Option<Decimal>,
    /// Keep tenants with at most this many pending months.
    pub max_pending_months: Option<u32>,
    /// Keep tenants with overdue months.
    pub include_overdue: bool,
    /// Keep tenants with partially paid months.
    pub include_partial: bool,
}

impl Default for PendingFilter {
    fn default() -> Self {
        Self {
            min_pending_amount: None,
            max_pending_months: None,
            include_overdue: true,
            include_partial: true,
        }
    }
}

impl PendingFilter {
    /// Creates a filter that keeps every tenant with a balance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum total pending amount.
    #[must_use]
    pub fn with_min_pending_amount(mut self, amount: Decimal) -> Self {
        self.min_pending_amount = Some(amount);
        self
    }

    /// Sets the maximum number of pending months.
    #[must_use]
    pub fn with_max_pending_months(mut self, months: u32) -> Self {
        self.max_pending_months = Some(months);
        self
    }

    /// Sets whether tenants with overdue months are kept.
    #[must_use]
    pub fn with_overdue(mut self, include: bool) -> Self {
        self.include_overdue = include;
        self
    }

    /// Sets whether tenants with partially paid months are kept.
    #[must_use]
    pub fn with_partial(mut self, include: bool) -> Self {
        self.include_partial = include;
        self
    }

    /// Returns true if `report` passes the filter.
    #[must_use]
    pub fn matches(&self, report: &PendingRentReport) -> bool {
        if report.total_pending <= Decimal::ZERO {
            return false;
        }
        if self
            .min_pending_amount
            .is_some_and(|min| report.total_pending < min)
        {
            return false;
        }
        if self
            .max_pending_months
            .is_some_and(|max| report.pending_months > max)
        {
            return false;
        }
        if !self.include_overdue && report.overdue_months > 0 {
            return false;
        }
        if !self.include_partial && report.partial_months > 0 {
            return false;
        }
        true
    }
}

impl PendingRentCalculator {
    /// Pending-rent reports for many tenants, largest balance first.
    ///
    /// Reports are computed in parallel when the `parallel` feature is
    /// enabled and the tenant count reaches the configured threshold. Ties on
    /// `total_pending` are ordered by tenant id.
    ///
    /// # Errors
    ///
    /// Returns `RentError::ConfigError` for an invalid configuration.
    /// Otherwise fails on the first invalid tenant, and no partial result is
    /// returned.
    pub fn calculate_bulk<'a, I>(
        &self,
        tenants: I,
        filter: &PendingFilter,
        as_of: Date,
    ) -> RentResult<Vec<PendingRentReport>>
    where
        I: IntoIterator<Item = &'a TenantLedger>,
    {
        self.config().validate()?;
        let tenants: Vec<&TenantLedger> = tenants.into_iter().collect();

        let mut reports = try_fan_out(&tenants, self.config(), |entry| {
            self.calculate(&entry.tenant, &entry.payments, as_of)
                .map_err(|err| {
                    tracing::warn!(
                        tenant_id = %entry.tenant.tenant_id,
                        error = %err,
                        "Bulk pending rent failed"
                    );
                    err
                })
        })?;
        reports.retain(|report| filter.matches(report));

        reports.sort_by(|a, b| {
            b.total_pending
                .cmp(&a.total_pending)
                .then_with(|| a.tenant_id.cmp(&b.tenant_id))
        });

        tracing::debug!(
            tenants = tenants.len(),
            kept = reports.len(),
            %as_of,
            "Bulk pending rent calculated"
        );

        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CollectionConfig;
    use rentcycle_core::cycles::calendar_period;
    use rentcycle_core::types::{PaymentRow, PaymentStatus, TenantSnapshot};
    use rentcycle_core::RentError;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn ledger(id: &str, check_in: Date, rent: Decimal, payments: Vec<PaymentRow>) -> TenantLedger {
        TenantLedger::new(TenantSnapshot::new(id, check_in, rent), payments)
    }

    fn paid_month(amount: Decimal, y: i32, m: u32, status: PaymentStatus) -> PaymentRow {
        let cover = calendar_period(d(y, m, 1));
        PaymentRow::rent(amount, amount, cover.start, cover, status)
    }

    fn book() -> Vec<TenantLedger> {
        vec![
            // Owes Feb and Mar: 2000.
            ledger(
                "B",
                d(2025, 1, 1),
                dec!(1000),
                vec![paid_month(dec!(1000), 2025, 1, PaymentStatus::Paid)],
            ),
            // Owes Jan to Mar: 1500.
            ledger("A", d(2025, 1, 1), dec!(500), vec![]),
            // Fully paid.
            ledger(
                "C",
                d(2025, 3, 1),
                dec!(800),
                vec![paid_month(dec!(800), 2025, 3, PaymentStatus::Paid)],
            ),
            // Owes Mar only, same total as A once partial is applied.
            ledger(
                "D",
                d(2025, 3, 1),
                dec!(2000),
                vec![paid_month(dec!(500), 2025, 3, PaymentStatus::Partial)],
            ),
        ]
    }

    #[test]
    fn test_bulk_orders_by_pending_then_id() {
        let calc = PendingRentCalculator::new(CollectionConfig::sequential());
        let tenants = book();
        let reports = calc
            .calculate_bulk(&tenants, &PendingFilter::default(), d(2025, 3, 20))
            .unwrap();

        let order: Vec<(&str, Decimal)> = reports
            .iter()
            .map(|r| (r.tenant_id.as_str(), r.total_pending))
            .collect();
        assert_eq!(
            order,
            vec![("B", dec!(2000)), ("A", dec!(1500)), ("D", dec!(1500))]
        );
    }

    #[test]
    fn test_bulk_filters() {
        let calc = PendingRentCalculator::new(CollectionConfig::sequential());
        let tenants = book();
        let as_of = d(2025, 3, 20);

        let min = calc
            .calculate_bulk(&tenants, &PendingFilter::new().with_min_pending_amount(dec!(1600)), as_of)
            .unwrap();
        assert_eq!(min.len(), 1);

        let short = calc
            .calculate_bulk(&tenants, &PendingFilter::new().with_max_pending_months(1), as_of)
            .unwrap();
        assert_eq!(short[0].tenant_id.as_str(), "D");

        let no_partial = calc
            .calculate_bulk(&tenants, &PendingFilter::new().with_partial(false), as_of)
            .unwrap();
        assert!(no_partial.iter().all(|r| r.tenant_id.as_str() != "D"));

        let no_overdue = calc
            .calculate_bulk(&tenants, &PendingFilter::new().with_overdue(false), as_of)
            .unwrap();
        assert_eq!(no_overdue.len(), 1);
        assert_eq!(no_overdue[0].tenant_id.as_str(), "D");
    }

    #[test]
    fn test_bulk_fails_on_invalid_tenant() {
        let calc = PendingRentCalculator::new(CollectionConfig::sequential());
        let mut tenants = book();
        tenants.push(ledger("E", d(2025, 1, 1), dec!(-1), vec![]));

        let result = calc.calculate_bulk(&tenants, &PendingFilter::default(), d(2025, 3, 20));
        assert!(result.is_err());
    }

    #[test]
    fn test_bulk_rejects_invalid_config() {
        let calc = PendingRentCalculator::new(CollectionConfig::sequential().with_penalty_rate(dec!(-0.5)));
        let result = calc.calculate_bulk(&book(), &PendingFilter::default(), d(2025, 3, 20));
        assert!(matches!(result, Err(RentError::ConfigError { .. })));

        let empty: Vec<TenantLedger> = Vec::new();
        assert!(calc
            .calculate_bulk(&empty, &PendingFilter::default(), d(2025, 3, 20))
            .is_err());
    }

    #[test]
    fn test_bulk_parallel_matches_sequential() {
        let tenants: Vec<TenantLedger> = (0..200)
            .map(|i| ledger(&format!("T{i:03}"), d(2025, 1, 1), Decimal::from(100 + i), vec![]))
            .collect();
        let as_of = d(2025, 6, 15);

        let sequential = PendingRentCalculator::new(CollectionConfig::sequential())
            .calculate_bulk(&tenants, &PendingFilter::default(), as_of)
            .unwrap();
        let parallel = PendingRentCalculator::new(CollectionConfig::new().with_threshold(1))
            .calculate_bulk(&tenants, &PendingFilter::default(), as_of)
            .unwrap();

        assert_eq!(sequential, parallel);
        assert_eq!(sequential[0].tenant_id.as_str(), "T199");
    }
}
