//! Property-based tests for budget aggregation.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::aggregation::{BudgetSnapshot, percent_of, yoy_change};
use super::types::{BudgetLineItem, Taxonomy};

const YEARS: [&str; 3] = ["2024-25", "2025-26", "2026-27 Estimates"];

fn tolerance() -> Decimal {
    dec!(0.000001)
}

fn optional_name(names: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        4 => prop::sample::select(names).prop_map(|n| Some(n.to_string())),
    ]
}

fn line_item_strategy() -> impl Strategy<Value = BudgetLineItem> {
    (
        prop::sample::select(YEARS.to_vec()),
        optional_name(&["Education", "Health", "Transport", "Public Safety"]),
        optional_name(&["General Fund", "Federal", "Capital"]),
        optional_name(&["Personal Service", "OTPS", "Debt Service"]),
        optional_name(&["DOE", "DOH", "DOT", "NYPD"]),
        0i64..100_000_000,
    )
        .prop_map(|(year, function, fund_type, fp_category, agency, cents)| BudgetLineItem {
            fiscal_year: year.to_string(),
            function,
            fund_type,
            fp_category,
            agency,
            amount: Decimal::new(cents, 2),
        })
}

fn items_strategy() -> impl Strategy<Value = Vec<BudgetLineItem>> {
    prop::collection::vec(line_item_strategy(), 0..60)
}

fn taxonomy_strategy() -> impl Strategy<Value = Taxonomy> {
    prop::sample::select(Taxonomy::ALL.to_vec())
}

proptest! {
    /// Property 1: grouped rows plus unmapped items add up to the grand total
    #[test]
    fn test_rows_plus_unmapped_equal_grand_total(
        items in items_strategy(),
        taxonomy in taxonomy_strategy(),
    ) {
        let snapshot = BudgetSnapshot::new(items.clone());
        let breakdown = snapshot.breakdown(taxonomy);
        let totals = snapshot.grand_totals();

        let rows_sum: Decimal = breakdown.rows.iter().map(|r| r.amount).sum();
        let unmapped: Decimal = items
            .iter()
            .filter(|i| Some(i.fiscal_year.as_str()) == snapshot.current_year())
            .filter(|i| taxonomy.key(i).is_none())
            .map(|i| i.amount)
            .sum();

        prop_assert_eq!(breakdown.unmapped_amount, unmapped);
        prop_assert_eq!(rows_sum + unmapped, totals.current_total);
    }

    /// Property 2: drill-down rows add up to the group amount minus agency-less items
    #[test]
    fn test_drill_down_sums_to_group(
        items in items_strategy(),
        taxonomy in taxonomy_strategy(),
    ) {
        let snapshot = BudgetSnapshot::new(items.clone());

        for row in snapshot.breakdown(taxonomy).rows {
            let children: Decimal = snapshot
                .drill_down(taxonomy, &row.name)
                .iter()
                .map(|r| r.amount)
                .sum();
            let without_agency: Decimal = items
                .iter()
                .filter(|i| Some(i.fiscal_year.as_str()) == snapshot.current_year())
                .filter(|i| taxonomy.key(i) == Some(row.name.as_str()))
                .filter(|i| i.agency_key().is_none())
                .map(|i| i.amount)
                .sum();

            prop_assert_eq!(children + without_agency, row.amount);
        }
    }

    /// Property 3: a zero prior year always yields a zero change
    #[test]
    fn test_zero_prior_yields_zero_change(current in -1_000_000_000i64..1_000_000_000) {
        prop_assert_eq!(yoy_change(Decimal::from(current), Decimal::ZERO), Decimal::ZERO);
    }

    /// Property 4: shares never exceed 100 and reach it when nothing is unmapped
    #[test]
    fn test_pct_of_total_bounded(
        items in items_strategy(),
        taxonomy in taxonomy_strategy(),
    ) {
        let snapshot = BudgetSnapshot::new(items);
        let breakdown = snapshot.breakdown(taxonomy);
        let total_pct: Decimal = breakdown.rows.iter().map(|r| r.pct_of_total).sum();

        prop_assert!(total_pct <= Decimal::ONE_HUNDRED + tolerance());
        for row in &breakdown.rows {
            prop_assert!(row.pct_of_total >= Decimal::ZERO);
        }

        let grand_total = snapshot.grand_totals().current_total;
        if breakdown.unmapped_amount.is_zero() && !grand_total.is_zero() {
            prop_assert!((total_pct - Decimal::ONE_HUNDRED).abs() <= tolerance());
        }
    }

    /// Property 5: rows are ordered by amount descending, then name
    #[test]
    fn test_rows_are_sorted(
        items in items_strategy(),
        taxonomy in taxonomy_strategy(),
    ) {
        let rows = BudgetSnapshot::new(items).breakdown(taxonomy).rows;
        for pair in rows.windows(2) {
            prop_assert!(
                pair[0].amount > pair[1].amount
                    || (pair[0].amount == pair[1].amount && pair[0].name < pair[1].name)
            );
        }
    }

    /// Property 6: the overall history has one point per year and sums every item
    #[test]
    fn test_history_covers_every_year(items in items_strategy()) {
        let snapshot = BudgetSnapshot::new(items.clone());
        let points = snapshot.historical(None);

        prop_assert_eq!(points.len(), snapshot.years().len());
        let history_sum: Decimal = points.iter().map(|p| p.total).sum();
        let item_sum: Decimal = items.iter().map(|i| i.amount).sum();
        prop_assert_eq!(history_sum, item_sum);
    }
}

mod unit_tests {
    use super::*;

    fn worked_example() -> BudgetSnapshot {
        BudgetSnapshot::new(vec![
            BudgetLineItem::new("2025-26", dec!(1000)).with_function("Education"),
            BudgetLineItem::new("2026-27", dec!(1200)).with_function("Education"),
            BudgetLineItem::new("2026-27", dec!(800)).with_function("Health"),
        ])
    }

    #[test]
    fn test_worked_example() {
        let snapshot = worked_example();
        let rows = snapshot.by_function();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Education");
        assert_eq!(rows[0].amount, dec!(1200));
        assert_eq!(rows[0].yoy_change, dec!(20));
        assert_eq!(rows[0].pct_of_total, dec!(60));

        assert_eq!(rows[1].name, "Health");
        assert_eq!(rows[1].pct_of_total, dec!(40));
        assert_eq!(rows[1].yoy_change, Decimal::ZERO);

        let totals = snapshot.grand_totals();
        assert_eq!(totals.current_year.as_deref(), Some("2026-27"));
        assert_eq!(totals.prior_year.as_deref(), Some("2025-26"));
        assert_eq!(totals.current_total, dec!(2000));
        assert_eq!(totals.prior_total, dec!(1000));
        assert_eq!(totals.yoy_change, dec!(100));
    }

    #[test]
    fn test_zero_prior_current_500() {
        assert_eq!(yoy_change(dec!(500), dec!(0)), Decimal::ZERO);
        assert_eq!(yoy_change(dec!(0), dec!(0)), Decimal::ZERO);
    }

    #[test]
    fn test_negative_prior_uses_absolute_value() {
        // -100 -> 50 is an increase of 150 over |-100|
        assert_eq!(yoy_change(dec!(50), dec!(-100)), dec!(150));
    }

    #[test]
    fn test_unmapped_rows_leave_a_gap() {
        let snapshot = BudgetSnapshot::new(vec![
            BudgetLineItem::new("2026-27", dec!(750)).with_function("Education"),
            BudgetLineItem::new("2026-27", dec!(250)),
        ]);

        let breakdown = snapshot.breakdown(Taxonomy::Function);
        assert_eq!(breakdown.rows.len(), 1);
        assert_eq!(breakdown.rows[0].pct_of_total, dec!(75));
        assert_eq!(breakdown.unmapped_amount, dec!(250));
        assert_eq!(snapshot.grand_totals().current_total, dec!(1000));
    }

    #[test]
    fn test_each_taxonomy_groups_independently() {
        let snapshot = BudgetSnapshot::new(vec![
            BudgetLineItem::new("2026-27", dec!(10))
                .with_function("Education")
                .with_fund_type("City")
                .with_fp_category("OTPS"),
            BudgetLineItem::new("2026-27", dec!(30))
                .with_function("Health")
                .with_fund_type("City")
                .with_fp_category("Personal Service"),
        ]);

        assert_eq!(snapshot.by_function().len(), 2);
        let by_fund = snapshot.by_fund_type();
        assert_eq!(by_fund.len(), 1);
        assert_eq!(by_fund[0].amount, dec!(40));
        let by_fp = snapshot.by_fp_category();
        assert_eq!(by_fp[0].name, "Personal Service");
    }

    #[test]
    fn test_drill_down() {
        let snapshot = BudgetSnapshot::new(vec![
            BudgetLineItem::new("2025-26", dec!(400))
                .with_function("Education")
                .with_agency("DOE"),
            BudgetLineItem::new("2026-27", dec!(600))
                .with_function("Education")
                .with_agency("DOE"),
            BudgetLineItem::new("2026-27", dec!(300))
                .with_function("Education")
                .with_agency("CUNY"),
            BudgetLineItem::new("2026-27", dec!(100)).with_function("Education"),
            BudgetLineItem::new("2026-27", dec!(999))
                .with_function("Health")
                .with_agency("DOH"),
        ]);

        let rows = snapshot.drill_down(Taxonomy::Function, "Education");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "DOE");
        assert_eq!(rows[0].amount, dec!(600));
        assert_eq!(rows[0].yoy_change, dec!(50));
        assert_eq!(rows[0].pct_of_parent, dec!(60));
        assert_eq!(rows[1].name, "CUNY");
        assert_eq!(rows[1].pct_of_parent, dec!(30));

        assert!(snapshot.drill_down(Taxonomy::Function, "Parks").is_empty());
    }

    #[test]
    fn test_historical_for_group() {
        let snapshot = BudgetSnapshot::new(vec![
            BudgetLineItem::new("2024-25", dec!(5)).with_function("Health"),
            BudgetLineItem::new("2025-26", dec!(1000)).with_function("Education"),
            BudgetLineItem::new("2026-27", dec!(1200)).with_function("Education"),
        ]);

        let points = snapshot.historical_for_group(Taxonomy::Function, "Education");
        let years: Vec<&str> = points.iter().map(|p| p.year.as_str()).collect();
        assert_eq!(years, vec!["2024-25", "2025-26", "2026-27"]);
        assert_eq!(points[0].total, Decimal::ZERO);
        assert_eq!(points[1].total, dec!(1000));
        assert_eq!(points[2].total, dec!(1200));

        let overall = snapshot.historical(None);
        assert_eq!(overall[0].total, dec!(5));
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = BudgetSnapshot::empty();
        let totals = snapshot.grand_totals();

        assert_eq!(totals.current_year, None);
        assert_eq!(totals.current_total, Decimal::ZERO);
        assert_eq!(totals.yoy_change, Decimal::ZERO);
        assert!(snapshot.by_function().is_empty());
        assert!(snapshot.historical(None).is_empty());
    }

    #[test]
    fn test_single_year_has_no_prior() {
        let snapshot = BudgetSnapshot::new(vec![
            BudgetLineItem::new("2026-27", dec!(10)).with_function("Education"),
        ]);

        assert_eq!(snapshot.prior_year(), None);
        assert_eq!(snapshot.by_function()[0].yoy_change, Decimal::ZERO);
    }

    #[test]
    fn test_group_amount() {
        let snapshot = worked_example();
        assert_eq!(
            snapshot.group_amount(Taxonomy::Function, "Health"),
            Some(dec!(800))
        );
        assert_eq!(snapshot.group_amount(Taxonomy::Function, "Parks"), None);
    }

    #[test]
    fn test_extreme_change_saturates() {
        let snapshot = BudgetSnapshot::new(vec![
            BudgetLineItem::new("2025-26", dec!(0.01)).with_function("Debt Service"),
            BudgetLineItem::new("2026-27", dec!(10000000000000000000000000))
                .with_function("Debt Service"),
        ]);

        let rows = snapshot.by_function();
        assert_eq!(rows[0].yoy_change, Decimal::MAX);
        assert_eq!(rows[0].pct_of_total, dec!(100));
        assert_eq!(yoy_change(dec!(-10000000000000000000000000), dec!(0.01)), Decimal::MIN);
    }

    #[test]
    fn test_sums_saturate_at_decimal_range() {
        let snapshot = BudgetSnapshot::new(vec![
            BudgetLineItem::new("2026-27", Decimal::MAX).with_function("Education"),
            BudgetLineItem::new("2026-27", Decimal::MAX).with_function("Education"),
            BudgetLineItem::new("2026-27", Decimal::MAX),
        ]);

        assert_eq!(snapshot.grand_totals().current_total, Decimal::MAX);
        let breakdown = snapshot.breakdown(Taxonomy::Function);
        assert_eq!(breakdown.rows[0].amount, Decimal::MAX);
        assert_eq!(breakdown.unmapped_amount, Decimal::ZERO);
        assert_eq!(snapshot.historical(None)[0].total, Decimal::MAX);
        assert_eq!(
            snapshot.group_amount(Taxonomy::Function, "Education"),
            Some(Decimal::MAX)
        );
    }

    #[test]
    fn test_percent_of_saturates() {
        assert_eq!(percent_of(Decimal::MAX, dec!(0.5)), Decimal::MAX);
        assert_eq!(percent_of(Decimal::MAX, dec!(-0.5)), Decimal::MIN);
    }
}
