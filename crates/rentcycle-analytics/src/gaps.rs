//! Payment gap detection.
//!
//! Walks a tenant's billing cycles from check-in under the property's cycle
//! convention and flags every finished cycle that no settling rent payment
//! overlaps.
//!
//! # Horizon
//!
//! The walk runs up to `max(latest settled coverage end, as_of)`, capped at
//! the check-out date. A cycle still running at the horizon is not a gap yet,
//! unless the tenant has already checked out inside it.
//!
//! CALENDAR cycles are whole calendar months, starting with the check-in
//! month. MIDMONTH cycles start on the check-in date.

use serde::{Deserialize, Serialize};

use rentcycle_core::cycles::{calendar_period, midmonth_period, next_period};
use rentcycle_core::types::{Date, PaymentRow, Period, RentCycleType, TenantId, TenantSnapshot};
use rentcycle_core::{RentError, RentResult};

use crate::config::CollectionConfig;
use crate::directory::TenantDirectory;
use crate::ledger::LedgerAggregator;

/// Priority of the move-in cycle; lower sorts first.
pub const CHECKIN_GAP_PRIORITY: i32 = -1;

/// A billing cycle with no settled rent on record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    /// First day of the cycle.
    pub start: Date,
    /// Last day of the cycle.
    pub end: Date,
    /// Inclusive length of the cycle.
    pub days_missing: i64,
    /// [`CHECKIN_GAP_PRIORITY`] for the move-in cycle, otherwise the 1-based
    /// cycle index.
    pub priority: i32,
    /// True for the move-in cycle: the check-in month for CALENDAR, the
    /// cycle starting on check-in for MIDMONTH.
    pub is_checkin_gap: bool,
}

impl Gap {
    /// The cycle as a period.
    #[must_use]
    pub fn period(&self) -> Period {
        Period {
            start: self.start,
            end: self.end,
        }
    }
}

/// Result of a gap walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapReport {
    /// Tenant walked.
    pub tenant_id: TenantId,
    /// Convention the cycles were generated with.
    pub cycle_type: RentCycleType,
    /// Last date the walk considered.
    pub horizon: Date,
    /// True when at least one gap was found.
    pub has_gaps: bool,
    /// Number of gaps.
    pub gap_count: u32,
    /// Gaps in walk order.
    pub gaps: Vec<Gap>,
}

impl GapReport {
    /// Gap that should be filled first: lowest priority, then earliest start.
    #[must_use]
    pub fn most_urgent(&self) -> Option<&Gap> {
        self.gaps.iter().min_by_key(|gap| (gap.priority, gap.start))
    }

    /// Total uncovered days across all gaps.
    #[must_use]
    pub fn total_days_missing(&self) -> i64 {
        self.gaps.iter().map(|gap| gap.days_missing).sum()
    }
}

/// Finds billing cycles with no settled rent.
#[derive(Debug, Clone, Default)]
pub struct PaymentGapDetector {
    config: CollectionConfig,
}

impl PaymentGapDetector {
    /// Creates a detector with the given configuration.
    #[must_use]
    pub fn new(config: CollectionConfig) -> Self {
        Self { config }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    /// Walks `tenant`'s cycles and reports every uncovered one.
    ///
    /// # Errors
    ///
    /// - `RentError::ConfigError` if the configuration is invalid
    /// - `RentError::InvalidInput` if the snapshot or a ledger row is malformed
    /// - `RentError::InvalidDate` if a cycle would leave the supported date range
    /// - `RentError::RunawayComputation` if the walk visits more than
    ///   `max_cycle_iterations` cycles
    pub fn detect(
        &self,
        tenant: &TenantSnapshot,
        rows: &[PaymentRow],
        cycle_type: RentCycleType,
        as_of: Date,
    ) -> RentResult<GapReport> {
        self.config.validate()?;
        tenant.validate()?;
        let ledger = LedgerAggregator::new(rows)?;
        let horizon = Self::horizon(tenant, &ledger, as_of);
        let max = self.config.max_cycle_iterations;

        let mut gaps = Vec::new();
        let mut cycle = Self::first_cycle(tenant.check_in_date, cycle_type)?;
        let mut index: u32 = 0;

        while cycle.start <= horizon {
            index += 1;
            if index > max {
                tracing::warn!(
                    tenant_id = %tenant.tenant_id,
                    iterations = max,
                    %horizon,
                    "Gap walk exceeded iteration cap"
                );
                return Err(RentError::runaway(
                    max,
                    format!(
                        "gap walk for tenant {} from {} to {horizon}",
                        tenant.tenant_id, tenant.check_in_date
                    ),
                ));
            }

            let ended_inside = tenant.has_left_by(as_of)
                && tenant.check_out_date.is_some_and(|d| cycle.contains(d));
            if cycle.end > horizon && !ended_inside {
                break;
            }

            if !ledger.is_covered(&cycle) {
                let is_checkin_gap = Self::is_move_in(&cycle, tenant.check_in_date, cycle_type);
                gaps.push(Gap {
                    start: cycle.start,
                    end: cycle.end,
                    days_missing: cycle.days(),
                    priority: if is_checkin_gap {
                        CHECKIN_GAP_PRIORITY
                    } else {
                        index as i32
                    },
                    is_checkin_gap,
                });
            }

            if cycle.end >= horizon {
                break;
            }
            cycle = next_period(cycle.end, cycle_type)?;
        }

        tracing::debug!(
            tenant_id = %tenant.tenant_id,
            cycle_type = %cycle_type,
            cycles = index,
            gaps = gaps.len(),
            "Payment gaps detected"
        );

        Ok(GapReport {
            tenant_id: tenant.tenant_id.clone(),
            cycle_type,
            horizon,
            has_gaps: !gaps.is_empty(),
            gap_count: gaps.len() as u32,
            gaps,
        })
    }

    /// Resolves `tenant_id` through `directory` and walks its cycles.
    ///
    /// # Errors
    ///
    /// Returns `RentError::NotFound` for an unknown tenant, otherwise as
    /// [`detect`](Self::detect).
    pub fn detect_for<D>(
        &self,
        directory: &D,
        tenant_id: &TenantId,
        cycle_type: RentCycleType,
        as_of: Date,
    ) -> RentResult<GapReport>
    where
        D: TenantDirectory + ?Sized,
    {
        let (tenant, rows) = directory.resolve(tenant_id)?;
        self.detect(tenant, rows, cycle_type, as_of)
    }

    fn first_cycle(check_in: Date, cycle_type: RentCycleType) -> RentResult<Period> {
        match cycle_type {
            RentCycleType::Calendar => Ok(calendar_period(check_in)),
            RentCycleType::Midmonth => midmonth_period(check_in),
        }
    }

    fn is_move_in(cycle: &Period, check_in: Date, cycle_type: RentCycleType) -> bool {
        match cycle_type {
            RentCycleType::Calendar => cycle.start.same_month(&check_in),
            RentCycleType::Midmonth => cycle.contains(check_in),
        }
    }

    fn horizon(tenant: &TenantSnapshot, ledger: &LedgerAggregator<'_>, as_of: Date) -> Date {
        let reach = ledger
            .latest_coverage_end()
            .map_or(as_of, |end| end.max(as_of));
        match tenant.check_out_date {
            Some(check_out) => reach.min(check_out),
            None => reach,
        }
    }
}
