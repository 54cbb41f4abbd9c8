//! Ledger aggregation.
//!
//! [`LedgerAggregator`] classifies a tenant's raw rows by ledger and status
//! and answers "how much was paid against this interval".
//!
//! # Overlap attribution
//!
//! A rent row counts against every interval its coverage overlaps
//! (`payment_start <= interval_end && payment_end >= interval_start`). Under
//! the default [`OverlapPolicy::FullAmountPerPeriod`] a payment spanning
//! three months contributes its **full** amount to each of the three.
//! This is the accepted attribution rule; [`OverlapPolicy::ProRataByDays`]
//! is available to callers that opt in through configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use rentcycle_core::types::{Date, LedgerKind, PaymentRow, PaymentStatus, Period};
use rentcycle_core::RentResult;

/// How a payment spanning several periods is attributed to each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverlapPolicy {
    /// Each overlapping period receives the payment's full amount.
    #[default]
    FullAmountPerPeriod,
    /// Each overlapping period receives the share of the amount
    /// proportional to the days it shares with the payment's coverage.
    ProRataByDays,
}

/// Overlap policy applied unless configuration says otherwise.
pub const DEFAULT_OVERLAP_POLICY: OverlapPolicy = OverlapPolicy::FullAmountPerPeriod;

/// Summary of the settled rent payments on a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentHistory {
    /// Date of the most recent PAID/PARTIAL rent payment.
    pub last_payment_date: Option<Date>,
    /// Amount of that payment.
    pub last_payment_amount: Option<Decimal>,
    /// Number of PAID/PARTIAL rent payments.
    pub payment_count: u32,
    /// Average amount per payment (not per period), 2 dp.
    pub average_payment: Decimal,
}

/// Read-only view over one tenant's ledger rows.
#[derive(Debug, Clone)]
pub struct LedgerAggregator<'a> {
    rent_rows: Vec<&'a PaymentRow>,
    total_advance_paid: Decimal,
    total_refunded: Decimal,
    policy: OverlapPolicy,
}

impl<'a> LedgerAggregator<'a> {
    /// Validates and classifies `rows`.
    ///
    /// Rent rows are kept sorted by payment date (stable for equal dates).
    ///
    /// # Errors
    ///
    /// Returns `RentError::InvalidInput` if any row fails validation.
    pub fn new(rows: &'a [PaymentRow]) -> RentResult<Self> {
        let mut rent_rows = Vec::new();
        let mut total_advance_paid = Decimal::ZERO;
        let mut total_refunded = Decimal::ZERO;

        for row in rows {
            row.validate()?;
            match row.ledger {
                LedgerKind::Rent => rent_rows.push(row),
                LedgerKind::Advance => {
                    if row.status == PaymentStatus::Paid {
                        total_advance_paid += row.amount_paid;
                    }
                }
                LedgerKind::Refund => {
                    if matches!(row.status, PaymentStatus::Paid | PaymentStatus::Refunded) {
                        total_refunded += row.amount_paid;
                    }
                }
            }
        }
        rent_rows.sort_by_key(|row| row.payment_date);

        Ok(Self {
            rent_rows,
            total_advance_paid,
            total_refunded,
            policy: DEFAULT_OVERLAP_POLICY,
        })
    }

    /// Sets the overlap attribution policy.
    #[must_use]
    pub fn with_policy(mut self, policy: OverlapPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rent rows in payment-date order.
    #[must_use]
    pub fn rent_rows(&self) -> &[&'a PaymentRow] {
        &self.rent_rows
    }

    /// PAID/PARTIAL rent rows in payment-date order.
    pub fn settling_rows(&self) -> impl Iterator<Item = &'a PaymentRow> + '_ {
        self.rent_rows.iter().copied().filter(|row| row.settles_rent())
    }

    /// Sum of PAID advance rows.
    #[must_use]
    pub fn total_advance_paid(&self) -> Decimal {
        self.total_advance_paid
    }

    /// Sum of settled refund rows. Reported only; never netted.
    #[must_use]
    pub fn total_refunded(&self) -> Decimal {
        self.total_refunded
    }

    /// Settling rows whose coverage overlaps `interval`.
    #[must_use]
    pub fn covering(&self, interval: &Period) -> Vec<&'a PaymentRow> {
        self.settling_rows()
            .filter(|row| row.coverage().is_some_and(|c| c.overlaps(interval)))
            .collect()
    }

    /// Returns true if any settling row overlaps `interval`.
    #[must_use]
    pub fn is_covered(&self, interval: &Period) -> bool {
        self.settling_rows()
            .any(|row| row.coverage().is_some_and(|c| c.overlaps(interval)))
    }

    /// Amount paid against `interval` under the configured overlap policy.
    #[must_use]
    pub fn paid_for(&self, interval: &Period) -> Decimal {
        let total: Decimal = self
            .settling_rows()
            .filter_map(|row| row.coverage().map(|coverage| (row, coverage)))
            .filter(|(_, coverage)| coverage.overlaps(interval))
            .map(|(row, coverage)| match self.policy {
                OverlapPolicy::FullAmountPerPeriod => row.amount_paid,
                OverlapPolicy::ProRataByDays => {
                    row.amount_paid * Decimal::from(coverage.overlap_days(interval))
                        / Decimal::from(coverage.days())
                }
            })
            .sum();

        match self.policy {
            OverlapPolicy::FullAmountPerPeriod => total,
            OverlapPolicy::ProRataByDays => total.round_dp(2),
        }
    }

    /// Latest coverage end over settling rows.
    #[must_use]
    pub fn latest_coverage_end(&self) -> Option<Date> {
        self.settling_rows()
            .filter_map(PaymentRow::coverage)
            .map(|c| c.end)
            .max()
    }

    /// Most recent payment, count and per-payment average of settling rows.
    #[must_use]
    pub fn payment_history(&self) -> PaymentHistory {
        let mut count = 0u32;
        let mut total = Decimal::ZERO;
        let mut last: Option<&PaymentRow> = None;

        for row in self.settling_rows() {
            count += 1;
            total += row.amount_paid;
            // Rows are date-sorted, so the last one seen is the most recent.
            last = Some(row);
        }

        let average_payment = if count == 0 {
            Decimal::ZERO
        } else {
            (total / Decimal::from(count)).round_dp(2)
        };

        PaymentHistory {
            last_payment_date: last.map(|row| row.payment_date),
            last_payment_amount: last.map(|row| row.amount_paid),
            payment_count: count,
            average_payment,
        }
    }
}
