//! Tenant identity and occupancy snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;
use crate::error::{RentError, RentResult};

/// Tenant identifier.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl TenantId {
    /// Create a new tenant ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TenantId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TenantId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Immutable view of a tenant's occupancy, as fetched by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSnapshot {
    /// Tenant identifier.
    pub tenant_id: TenantId,
    /// Move-in date.
    pub check_in_date: Date,
    /// Move-out date, if the tenant has left or is scheduled to.
    #[serde(default)]
    pub check_out_date: Option<Date>,
    /// Current rent per billing cycle.
    pub rent_amount: Decimal,
}

impl TenantSnapshot {
    /// Creates a snapshot for a tenant that has not checked out.
    pub fn new(tenant_id: impl Into<TenantId>, check_in_date: Date, rent_amount: Decimal) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            check_in_date,
            check_out_date: None,
            rent_amount,
        }
    }

    /// Sets the check-out date.
    #[must_use]
    pub fn with_check_out(mut self, date: Date) -> Self {
        self.check_out_date = Some(date);
        self
    }

    /// Checks the snapshot against the occupancy rules.
    ///
    /// # Errors
    ///
    /// Returns `RentError::InvalidInput` for a negative rent amount or a
    /// check-out before check-in.
    pub fn validate(&self) -> RentResult<()> {
        if self.rent_amount < Decimal::ZERO {
            return Err(RentError::invalid_input(
                "rent_amount",
                format!("must not be negative, got {}", self.rent_amount),
            ));
        }
        if let Some(check_out) = self.check_out_date {
            if check_out < self.check_in_date {
                return Err(RentError::invalid_input(
                    "check_out_date",
                    format!("{check_out} is before check-in {}", self.check_in_date),
                ));
            }
        }
        Ok(())
    }

    /// Last day the tenant is billable as of `as_of`.
    ///
    /// This is `as_of` itself, or the check-out date when the tenant left
    /// earlier.
    #[must_use]
    pub fn billable_until(&self, as_of: Date) -> Date {
        match self.check_out_date {
            Some(check_out) if check_out < as_of => check_out,
            _ => as_of,
        }
    }

    /// Returns true if the tenant had left on or before `as_of`.
    #[must_use]
    pub fn has_left_by(&self, as_of: Date) -> bool {
        self.check_out_date.is_some_and(|d| d <= as_of)
    }
}
