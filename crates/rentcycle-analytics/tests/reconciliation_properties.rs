//! Property-based tests for reconciliation invariants.
//!
//! - Pending balances are never negative and sum to the reported total
//! - Paying a pending month never increases what is owed
//! - Gaps never overlap settled coverage and always lie inside the tenancy
//! - The advance balance is never negative

use proptest::prelude::*;
use rentcycle_analytics::prelude::*;
use rentcycle_core::cycles::calendar_period;
use rust_decimal::Decimal;

// =============================================================================
// GENERATORS
// =============================================================================

fn check_in() -> impl Strategy<Value = Date> {
    (2022i32..2025, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| Date::from_ymd(y, m, d).unwrap())
}

fn rent() -> impl Strategy<Value = Decimal> {
    (1_000i64..20_000).prop_map(Decimal::from)
}

fn any_cycle() -> impl Strategy<Value = RentCycleType> {
    prop_oneof![Just(RentCycleType::Calendar), Just(RentCycleType::Midmonth)]
}

/// Month offsets from check-in paid in full, plus days from check-in to as_of.
fn scenario() -> impl Strategy<Value = (Date, Decimal, Vec<u32>, i64)> {
    (
        check_in(),
        rent(),
        prop::collection::vec(0u32..24, 0..12),
        0i64..700,
    )
}

fn monthly_rows(check_in: Date, rent: Decimal, offsets: &[u32]) -> Vec<PaymentRow> {
    offsets
        .iter()
        .map(|&offset| {
            let month = calendar_period(check_in.start_of_month().add_months(offset as i32).unwrap());
            PaymentRow::rent(rent, rent, month.start, month, PaymentStatus::Paid)
        })
        .collect()
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn pending_totals_are_consistent((check_in, rent, offsets, days) in scenario()) {
        let tenant = TenantSnapshot::new("P-1", check_in, rent);
        let rows = monthly_rows(check_in, rent, &offsets);
        let report = PendingRentCalculator::default()
            .calculate(&tenant, &rows, check_in.add_days(days))
            .unwrap();

        let sum: Decimal = report.periods.iter().map(|p| p.balance).sum();
        prop_assert_eq!(sum, report.total_pending);
        prop_assert_eq!(report.periods.len() as u32, report.pending_months);
        prop_assert!(report.periods.iter().all(|p| p.balance > Decimal::ZERO));
        prop_assert!(report.periods.windows(2).all(|w| w[0].start < w[1].start));
        prop_assert!(report.overdue_months + report.partial_months <= report.pending_months);
        prop_assert!(report.advance_balance >= Decimal::ZERO);
        prop_assert!(report.penalty >= Decimal::ZERO);
    }

    #[test]
    fn paying_oldest_month_never_increases_pending((check_in, rent, offsets, days) in scenario()) {
        let tenant = TenantSnapshot::new("P-2", check_in, rent);
        let mut rows = monthly_rows(check_in, rent, &offsets);
        let calc = PendingRentCalculator::default();
        let as_of = check_in.add_days(days);

        let before = calc.calculate(&tenant, &rows, as_of).unwrap();
        if let Some(oldest) = before.periods.first() {
            let month = Period::new(oldest.start, oldest.end).unwrap();
            rows.push(PaymentRow::rent(rent, rent, as_of, month, PaymentStatus::Paid));
            let after = calc.calculate(&tenant, &rows, as_of).unwrap();

            prop_assert!(after.total_pending < before.total_pending);
            prop_assert!(after.periods.iter().all(|p| p.start != month.start));
        }
    }

    #[test]
    fn gaps_never_overlap_coverage(
        (check_in, rent, offsets, days) in scenario(),
        cycle_type in any_cycle(),
    ) {
        let tenant = TenantSnapshot::new("P-3", check_in, rent);
        let rows = monthly_rows(check_in, rent, &offsets);
        let report = PaymentGapDetector::default()
            .detect(&tenant, &rows, cycle_type, check_in.add_days(days))
            .unwrap();

        prop_assert_eq!(report.gap_count as usize, report.gaps.len());
        prop_assert_eq!(report.has_gaps, !report.gaps.is_empty());
        for gap in &report.gaps {
            prop_assert!(gap.start >= check_in.start_of_month());
            prop_assert!(gap.start <= report.horizon);
            let period = gap.period();
            prop_assert!(rows
                .iter()
                .filter_map(PaymentRow::coverage)
                .all(|cover| !cover.overlaps(&period)));
        }
        prop_assert!(report.gaps.iter().filter(|g| g.is_checkin_gap).count() <= 1);
    }

    #[test]
    fn advice_starts_inside_tenancy(
        (check_in, rent, offsets, days) in scenario(),
        cycle_type in any_cycle(),
        skip_gaps in any::<bool>(),
    ) {
        let tenant = TenantSnapshot::new("P-4", check_in, rent);
        let rows = monthly_rows(check_in, rent, &offsets);
        let advice = NextPaymentDateAdvisor::default()
            .next_payment_dates(&tenant, &rows, cycle_type, skip_gaps, check_in.add_days(days))
            .unwrap();

        prop_assert!(advice.start >= check_in.start_of_month());
        if let Some(end) = advice.end {
            prop_assert!(end >= advice.start);
        }
        prop_assert_eq!(advice.gap.is_some(), advice.reason == SuggestionReason::FillGap);
    }
}
