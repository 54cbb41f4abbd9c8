//! Next-payment advice.

use serde::{Deserialize, Serialize};
use std::fmt;

use rentcycle_core::cycles::next_period;
use rentcycle_core::types::{Date, PaymentRow, RentCycleType, TenantId, TenantSnapshot};
use rentcycle_core::RentResult;

use crate::config::CollectionConfig;
use crate::directory::TenantDirectory;
use crate::gaps::{Gap, PaymentGapDetector};
use crate::ledger::LedgerAggregator;

/// Why a period was suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionReason {
    /// No settled rent on record yet.
    FirstPayment,
    /// An earlier cycle is still uncovered.
    FillGap,
    /// The cycle after the latest settled coverage.
    NextCycle,
}

impl fmt::Display for SuggestionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuggestionReason::FirstPayment => write!(f, "FIRST_PAYMENT"),
            SuggestionReason::FillGap => write!(f, "FILL_GAP"),
            SuggestionReason::NextCycle => write!(f, "NEXT_CYCLE"),
        }
    }
}

/// Period the next rent payment should cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPaymentSuggestion {
    /// Tenant the advice is for.
    pub tenant_id: TenantId,
    /// Convention the period follows.
    pub cycle_type: RentCycleType,
    /// First day to cover.
    pub start: Date,
    /// Last day to cover; absent for a first payment.
    pub end: Option<Date>,
    /// Why this period was chosen.
    pub reason: SuggestionReason,
    /// The gap being filled, for [`SuggestionReason::FillGap`].
    pub gap: Option<Gap>,
}

/// Suggests the period a tenant's next payment should cover.
#[derive(Debug, Clone, Default)]
pub struct NextPaymentDateAdvisor {
    detector: PaymentGapDetector,
}

impl NextPaymentDateAdvisor {
    /// Creates an advisor with the given configuration.
    #[must_use]
    pub fn new(config: CollectionConfig) -> Self {
        Self {
            detector: PaymentGapDetector::new(config),
        }
    }

    /// Suggests the next period to collect for.
    ///
    /// With no settled rent the suggestion starts at check-in. Otherwise the
    /// most urgent gap wins, unless `skip_gaps` is set or there is none, in
    /// which case the cycle after the latest covered date is suggested.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`PaymentGapDetector::detect`].
    pub fn next_payment_dates(
        &self,
        tenant: &TenantSnapshot,
        rows: &[PaymentRow],
        cycle_type: RentCycleType,
        skip_gaps: bool,
        as_of: Date,
    ) -> RentResult<NextPaymentSuggestion> {
        self.detector.config().validate()?;
        tenant.validate()?;
        let ledger = LedgerAggregator::new(rows)?;

        let Some(latest_end) = ledger.latest_coverage_end() else {
            return Ok(NextPaymentSuggestion {
                tenant_id: tenant.tenant_id.clone(),
                cycle_type,
                start: tenant.check_in_date,
                end: None,
                reason: SuggestionReason::FirstPayment,
                gap: None,
            });
        };

        if !skip_gaps {
            let report = self.detector.detect(tenant, rows, cycle_type, as_of)?;
            if let Some(gap) = report.most_urgent() {
                tracing::debug!(
                    tenant_id = %tenant.tenant_id,
                    gap_start = %gap.start,
                    priority = gap.priority,
                    "Suggesting gap fill"
                );
                return Ok(NextPaymentSuggestion {
                    tenant_id: tenant.tenant_id.clone(),
                    cycle_type,
                    start: gap.start,
                    end: Some(gap.end),
                    reason: SuggestionReason::FillGap,
                    gap: Some(gap.clone()),
                });
            }
        }

        let next = next_period(latest_end, cycle_type)?;
        Ok(NextPaymentSuggestion {
            tenant_id: tenant.tenant_id.clone(),
            cycle_type,
            start: next.start,
            end: Some(next.end),
            reason: SuggestionReason::NextCycle,
            gap: None,
        })
    }

    /// Resolves `tenant_id` through `directory` and suggests its next period.
    ///
    /// # Errors
    ///
    /// Returns `RentError::NotFound` for an unknown tenant, otherwise as
    /// [`next_payment_dates`](Self::next_payment_dates).
    pub fn for_tenant<D>(
        &self,
        directory: &D,
        tenant_id: &TenantId,
        cycle_type: RentCycleType,
        skip_gaps: bool,
        as_of: Date,
    ) -> RentResult<NextPaymentSuggestion>
    where
        D: TenantDirectory + ?Sized,
    {
        let (tenant, rows) = directory.resolve(tenant_id)?;
        self.next_payment_dates(tenant, rows, cycle_type, skip_gaps, as_of)
    }
}
