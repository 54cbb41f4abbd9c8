//! # Rentcycle Analytics
//!
//! Rent reconciliation services over already-fetched tenant snapshots and
//! payment ledgers.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: every computation takes `as_of` explicitly and reads
//!   nothing but its arguments
//! - **Stateless services**: build once, share across threads
//! - **Config-driven parallelism**: optional rayon fan-out for bulk reports
//!
//! ## Services
//!
//! - [`PendingRentCalculator`]: calendar-month pending balances, overdue
//!   escalation, penalty, advance offset and a recommended collection step
//! - [`PaymentGapDetector`]: cycle-aware walk that flags uncovered billing
//!   cycles
//! - [`NextPaymentDateAdvisor`]: the period the next payment should cover
//!
//! The pending report always buckets by calendar month; the gap walk follows
//! the property's [`RentCycleType`](rentcycle_core::RentCycleType).
//!
//! ## Quick Start
//!
//! ```rust
//! use rentcycle_analytics::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let tenant = TenantSnapshot::new("T-1", Date::from_ymd(2025, 1, 10).unwrap(), dec!(8000));
//! let as_of = Date::from_ymd(2025, 4, 15).unwrap();
//!
//! let gaps = PaymentGapDetector::default()
//!     .detect(&tenant, &[], RentCycleType::Midmonth, as_of)
//!     .unwrap();
//! assert_eq!(gaps.gap_count, 3);
//!
//! let advice = NextPaymentDateAdvisor::default()
//!     .next_payment_dates(&tenant, &[], RentCycleType::Midmonth, false, as_of)
//!     .unwrap();
//! assert_eq!(advice.reason, SuggestionReason::FirstPayment);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: enable rayon-based parallel processing for bulk reports

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod advisor;
pub mod config;
pub mod directory;
pub mod gaps;
pub mod ledger;
pub mod parallel;
pub mod pending;

pub use advisor::{NextPaymentDateAdvisor, NextPaymentSuggestion, SuggestionReason};
pub use config::CollectionConfig;
pub use directory::{TenantBook, TenantDirectory, TenantLedger};
pub use gaps::{Gap, GapReport, PaymentGapDetector};
pub use ledger::{LedgerAggregator, OverlapPolicy, PaymentHistory};
pub use pending::{PendingFilter, PendingRentCalculator, PendingRentReport, RecommendedAction};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::advisor::{NextPaymentDateAdvisor, NextPaymentSuggestion, SuggestionReason};
    pub use crate::config::CollectionConfig;
    pub use crate::directory::{TenantBook, TenantDirectory, TenantLedger};
    pub use crate::gaps::{Gap, GapReport, PaymentGapDetector};
    pub use crate::ledger::{LedgerAggregator, OverlapPolicy};
    pub use crate::pending::{
        BillingPeriod, PendingFilter, PendingRentCalculator, PendingRentReport, PeriodStatus,
        RecommendedAction,
    };

    pub use rentcycle_core::prelude::*;
}
