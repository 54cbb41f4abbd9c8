//! Collection recommendation policy.

use rust_decimal::Decimal;

use super::types::RecommendedAction;

/// Overdue months above which eviction is warned.
pub const EVICTION_OVERDUE_MONTHS: u32 = 2;

/// Picks the collection step for a tenant's totals.
///
/// Rules are checked in order; the first match wins:
///
/// 1. nothing pending -> `NoAction`
/// 2. more than [`EVICTION_OVERDUE_MONTHS`] overdue -> `EvictionWarning`
/// 3. any overdue -> `Notice`
/// 4. more than one month pending -> `UrgentFollowUp`
/// 5. otherwise -> `FollowUp`
#[must_use]
pub fn recommend(total_pending: Decimal, pending_months: u32, overdue_months: u32) -> RecommendedAction {
    if total_pending <= Decimal::ZERO {
        RecommendedAction::NoAction
    } else if overdue_months > EVICTION_OVERDUE_MONTHS {
        RecommendedAction::EvictionWarning
    } else if overdue_months >= 1 {
        RecommendedAction::Notice
    } else if pending_months > 1 {
        RecommendedAction::UrgentFollowUp
    } else {
        RecommendedAction::FollowUp
    }
}
