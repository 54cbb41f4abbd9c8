//! Payment ledger rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Date, Period};
use crate::error::{RentError, RentResult};

/// Lifecycle status of a payment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Raised but nothing received yet.
    Pending,
    /// Part of the expected amount received.
    Partial,
    /// Expected amount received in full.
    Paid,
    /// Past due without settlement.
    Overdue,
    /// Voided before settlement.
    Cancelled,
    /// Money returned to the tenant.
    Refunded,
}

impl PaymentStatus {
    /// Returns true for statuses that represent money actually received.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self, PaymentStatus::Paid | PaymentStatus::Partial)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Partial => "PARTIAL",
            PaymentStatus::Paid => "PAID",
            PaymentStatus::Overdue => "OVERDUE",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Refunded => "REFUNDED",
        };
        f.write_str(name)
    }
}

/// Ledger a payment row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerKind {
    /// Periodic rent; rows carry a coverage interval.
    Rent,
    /// Money paid ahead of any billing period.
    Advance,
    /// Money returned to the tenant.
    Refund,
}

/// A single row of a tenant's payment ledger.
///
/// Soft-deleted rows are filtered out by the caller before they reach the
/// engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// Amount actually received.
    pub amount_paid: Decimal,
    /// Amount the row was raised for.
    pub expected_amount: Decimal,
    /// Date the payment was recorded.
    pub payment_date: Date,
    /// First day of the covered rent period (rent rows only).
    #[serde(default)]
    pub period_start: Option<Date>,
    /// Last day of the covered rent period (rent rows only).
    #[serde(default)]
    pub period_end: Option<Date>,
    /// Lifecycle status.
    pub status: PaymentStatus,
    /// Ledger the row belongs to.
    pub ledger: LedgerKind,
}

impl PaymentRow {
    /// Creates a rent row covering `[period_start, period_end]`.
    #[must_use]
    pub fn rent(
        amount_paid: Decimal,
        expected_amount: Decimal,
        payment_date: Date,
        coverage: Period,
        status: PaymentStatus,
    ) -> Self {
        Self {
            amount_paid,
            expected_amount,
            payment_date,
            period_start: Some(coverage.start),
            period_end: Some(coverage.end),
            status,
            ledger: LedgerKind::Rent,
        }
    }

    /// Creates an advance row.
    #[must_use]
    pub fn advance(amount_paid: Decimal, payment_date: Date, status: PaymentStatus) -> Self {
        Self {
            amount_paid,
            expected_amount: amount_paid,
            payment_date,
            period_start: None,
            period_end: None,
            status,
            ledger: LedgerKind::Advance,
        }
    }

    /// Creates a refund row.
    #[must_use]
    pub fn refund(amount_paid: Decimal, payment_date: Date, status: PaymentStatus) -> Self {
        Self {
            ledger: LedgerKind::Refund,
            ..Self::advance(amount_paid, payment_date, status)
        }
    }

    /// Returns the coverage interval of a rent row.
    ///
    /// Advance and refund rows, and rent rows without both bounds, cover
    /// nothing.
    #[must_use]
    pub fn coverage(&self) -> Option<Period> {
        if self.ledger != LedgerKind::Rent {
            return None;
        }
        match (self.period_start, self.period_end) {
            (Some(start), Some(end)) if start <= end => Some(Period { start, end }),
            _ => None,
        }
    }

    /// Returns true for a PAID or PARTIAL rent row.
    #[must_use]
    pub fn settles_rent(&self) -> bool {
        self.ledger == LedgerKind::Rent && self.status.is_settled()
    }

    /// Checks the row against the ledger rules.
    ///
    /// # Errors
    ///
    /// Returns `RentError::InvalidInput` for negative amounts, a coverage
    /// interval with only one bound, or an inverted interval.
    pub fn validate(&self) -> RentResult<()> {
        if self.amount_paid < Decimal::ZERO {
            return Err(RentError::invalid_input(
                "amount_paid",
                format!("must not be negative, got {}", self.amount_paid),
            ));
        }
        if self.expected_amount < Decimal::ZERO {
            return Err(RentError::invalid_input(
                "expected_amount",
                format!("must not be negative, got {}", self.expected_amount),
            ));
        }
        match (self.period_start, self.period_end) {
            (Some(start), Some(end)) if end < start => Err(RentError::invalid_input(
                "period_end",
                format!("{end} is before period_start {start}"),
            )),
            (Some(_), None) | (None, Some(_)) => Err(RentError::invalid_input(
                "period",
                "period_start and period_end must be given together",
            )),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_only_rent_rows_cover() {
        let jan = Period::new(d(2025, 1, 1), d(2025, 1, 31)).unwrap();
        let rent = PaymentRow::rent(dec!(500), dec!(500), d(2025, 1, 3), jan, PaymentStatus::Paid);
        let advance = PaymentRow::advance(dec!(1000), d(2025, 1, 3), PaymentStatus::Paid);

        assert_eq!(rent.coverage(), Some(jan));
        assert_eq!(advance.coverage(), None);
        assert!(rent.settles_rent());
        assert!(!advance.settles_rent());
    }

    #[test]
    fn test_settled_statuses() {
        assert!(PaymentStatus::Paid.is_settled());
        assert!(PaymentStatus::Partial.is_settled());
        assert!(!PaymentStatus::Pending.is_settled());
        assert!(!PaymentStatus::Overdue.is_settled());
        assert!(!PaymentStatus::Cancelled.is_settled());
        assert!(!PaymentStatus::Refunded.is_settled());
    }

    #[test]
    fn test_validate_rejects_negative_amount() {
        let row = PaymentRow::advance(dec!(-1), d(2025, 1, 3), PaymentStatus::Paid);
        assert!(matches!(
            row.validate(),
            Err(RentError::InvalidInput { ref field, .. }) if field == "amount_paid"
        ));
    }

    #[test]
    fn test_validate_rejects_half_interval() {
        let mut row = PaymentRow::advance(dec!(100), d(2025, 1, 3), PaymentStatus::Paid);
        row.ledger = LedgerKind::Rent;
        row.period_start = Some(d(2025, 1, 1));
        assert!(row.validate().is_err());

        row.period_end = Some(d(2024, 12, 31));
        assert!(row.validate().is_err());

        row.period_end = Some(d(2025, 1, 31));
        assert!(row.validate().is_ok());
    }

    #[test]
    fn test_serde_wire_names() {
        let row = PaymentRow::advance(dec!(250), d(2025, 3, 1), PaymentStatus::Partial);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["status"], "PARTIAL");
        assert_eq!(json["ledger"], "ADVANCE");
        assert!(json["period_start"].is_null());
    }
}
