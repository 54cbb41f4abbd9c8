//! # Rentcycle Core
//!
//! Core types and billing-cycle arithmetic for the Rentcycle rent
//! reconciliation engine.
//!
//! - **Types**: `Date`, `Period`, `PaymentRow`, `TenantSnapshot`, `RentCycleType`
//! - **Cycle math**: calendar and midmonth intervals, next-cycle projection,
//!   period validation, inclusive day counts
//! - **Errors**: one structured error type shared by the workspace
//!
//! Everything here is pure: no I/O, no clock reads unless a caller asks for
//! [`Date::today`].
//!
//! ## Example
//!
//! ```rust
//! use rentcycle_core::prelude::*;
//!
//! let period = calendar_period(Date::from_ymd(2024, 2, 15).unwrap());
//! assert_eq!(period.end, Date::from_ymd(2024, 2, 29).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]

pub mod cycles;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cycles::{
        calendar_period, days_in_period, midmonth_period, next_period, validate_period,
        PeriodValidation, RentCycleCalculator,
    };
    pub use crate::error::{RentError, RentResult};
    pub use crate::types::{
        Date, LedgerKind, PaymentRow, PaymentStatus, Period, RentCycleType, TenantId,
        TenantSnapshot,
    };
}

// Re-export commonly used types at crate root
pub use error::{RentError, RentResult};
pub use types::{Date, PaymentRow, Period, RentCycleType, TenantSnapshot};
