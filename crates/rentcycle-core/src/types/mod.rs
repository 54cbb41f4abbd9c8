//! Domain types for rent reconciliation.
//!
//! - [`Date`]: Calendar date with clamped month arithmetic
//! - [`Period`]: Inclusive date interval
//! - [`RentCycleType`]: Calendar or midmonth billing convention
//! - [`PaymentRow`]: One row of a tenant's ledger
//! - [`TenantSnapshot`]: Occupancy and rent of a tenant

mod cycle_type;
mod date;
mod payment;
mod period;
mod tenant;

pub use cycle_type::RentCycleType;
pub use date::Date;
pub use payment::{LedgerKind, PaymentRow, PaymentStatus};
pub use period::Period;
pub use tenant::{TenantId, TenantSnapshot};
