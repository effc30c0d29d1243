//! Rollup and classification tests, including property-based checks.

use chrono::{NaiveDate, Utc};
use finguru_shared::types::{BudgetId, ExpenseId};
use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::rollup::{classify, compute_spend_rollup, saturating_sum, utilization_percent};
use super::types::{
    BudgetItem, BudgetItemId, BudgetOverview, BudgetStatus, default_budgets,
};
use crate::category::{BudgetCategory, ExpenseCategory};
use crate::expense::Expense;

fn expense(category: ExpenseCategory, amount: Decimal) -> Expense {
    Expense {
        id: ExpenseId::new(),
        description: format!("{category} purchase"),
        amount,
        date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        category,
        created_at: Utc::now(),
    }
}

fn planned(category: BudgetCategory, amount: Decimal) -> BudgetItem {
    BudgetItem {
        id: BudgetItemId::Stored(BudgetId::new()),
        category,
        planned: amount,
    }
}

fn default_items() -> Vec<BudgetItem> {
    default_budgets()
        .iter()
        .map(|d| BudgetItem::default_for(d.category, d.planned))
        .collect()
}

#[test]
fn test_rollup_excludes_savings_and_unmapped() {
    let budgets = vec![
        planned(BudgetCategory::Food, dec!(1000)),
        planned(BudgetCategory::Savings, dec!(500)),
    ];
    let expenses = vec![
        expense(ExpenseCategory::Food, dec!(300)),
        expense(ExpenseCategory::Other, dec!(99)),
    ];

    let rollup = compute_spend_rollup(&budgets, &expenses);

    assert_eq!(rollup.by_category.len(), 2);
    assert_eq!(rollup.by_category[&BudgetCategory::Food], dec!(300));
    assert_eq!(rollup.by_category[&BudgetCategory::Savings], dec!(0));
    assert_eq!(rollup.total_planned, dec!(1000));
    assert_eq!(rollup.total_spent, dec!(300));
    assert_eq!(rollup.total_left, dec!(700));
}

#[test]
fn test_rollup_ignores_categories_without_budget() {
    let budgets = vec![planned(BudgetCategory::Food, dec!(100))];
    let expenses = vec![
        expense(ExpenseCategory::Housing, dec!(5000)),
        expense(ExpenseCategory::Food, dec!(40.25)),
    ];

    let rollup = compute_spend_rollup(&budgets, &expenses);

    assert!(!rollup.by_category.contains_key(&BudgetCategory::Rent));
    assert_eq!(rollup.total_spent, dec!(40.25));
}

#[test]
fn test_rollup_over_budget_goes_negative() {
    let budgets = vec![planned(BudgetCategory::Fun, dec!(50))];
    let expenses = vec![
        expense(ExpenseCategory::Entertainment, dec!(30)),
        expense(ExpenseCategory::Entertainment, dec!(45)),
    ];

    let rollup = compute_spend_rollup(&budgets, &expenses);

    assert_eq!(rollup.total_spent, dec!(75));
    assert_eq!(rollup.total_left, dec!(-25));
}

#[test]
fn test_rollup_empty_inputs() {
    let rollup = compute_spend_rollup(&[], &[expense(ExpenseCategory::Food, dec!(10))]);
    assert!(rollup.by_category.is_empty());
    assert_eq!(rollup.total_planned, Decimal::ZERO);
    assert_eq!(rollup.total_spent, Decimal::ZERO);
    assert_eq!(rollup.total_left, Decimal::ZERO);
}

#[test]
fn test_default_table_total_planned() {
    let rollup = compute_spend_rollup(&default_items(), &[]);
    assert_eq!(rollup.total_planned, dec!(46000));
    assert_eq!(rollup.by_category.len(), 6);
}

#[rstest]
#[case(dec!(50), dec!(100), BudgetStatus::Ok)]
#[case(dec!(80), dec!(100), BudgetStatus::Ok)]
#[case(dec!(80.01), dec!(100), BudgetStatus::Warning)]
#[case(dec!(85), dec!(100), BudgetStatus::Warning)]
#[case(dec!(100), dec!(100), BudgetStatus::Over)]
#[case(dec!(150), dec!(100), BudgetStatus::Over)]
#[case(dec!(0), dec!(0), BudgetStatus::Ok)]
#[case(dec!(10), dec!(0), BudgetStatus::Ok)]
fn test_classify(#[case] spent: Decimal, #[case] plan: Decimal, #[case] expected: BudgetStatus) {
    assert_eq!(classify(spent, plan), expected);
}

#[rstest]
#[case(dec!(300), dec!(1000), dec!(30))]
#[case(dec!(1), dec!(3), dec!(33.33))]
#[case(dec!(2), dec!(3), dec!(66.67))]
#[case(dec!(5), dec!(0), dec!(0))]
fn test_utilization_percent(#[case] spent: Decimal, #[case] plan: Decimal, #[case] expected: Decimal) {
    assert_eq!(utilization_percent(spent, plan), expected);
}

#[test]
fn test_rollup_saturates_instead_of_overflowing() {
    let huge = dec!(50000000000000000000000000000);
    let expenses = vec![
        expense(ExpenseCategory::Food, huge),
        expense(ExpenseCategory::Food, huge),
        expense(ExpenseCategory::Bills, huge),
    ];

    let rollup = compute_spend_rollup(&default_items(), &expenses);

    assert_eq!(rollup.by_category[&BudgetCategory::Food], Decimal::MAX);
    assert_eq!(rollup.total_spent, Decimal::MAX);
    assert!(rollup.total_left < Decimal::ZERO);

    let overview = BudgetOverview::build(default_items(), &expenses, None);
    assert_eq!(overview.rows[0].status, BudgetStatus::Over);
    assert_eq!(overview.rows[0].percent, Decimal::MAX);
    assert_eq!(overview.overall_status, BudgetStatus::Over);
}

#[test]
fn test_extreme_plans_classify_without_overflow() {
    assert_eq!(classify(Decimal::MAX - Decimal::ONE, Decimal::MAX), BudgetStatus::Warning);
    assert_eq!(classify(Decimal::MAX / Decimal::TWO, Decimal::MAX), BudgetStatus::Ok);
    assert_eq!(utilization_percent(Decimal::MAX, dec!(0.01)), Decimal::MAX);
    assert_eq!(saturating_sum([Decimal::MAX, Decimal::ONE]), Decimal::MAX);
}

#[test]
fn test_overview_rows_follow_budgets() {
    let expenses = vec![
        expense(ExpenseCategory::Food, dec!(11000)),
        expense(ExpenseCategory::Bills, dec!(7500)),
    ];

    let overview = BudgetOverview::build(default_items(), &expenses, Some(dec!(60000)));

    assert_eq!(overview.rows.len(), 6);
    assert_eq!(overview.rows[0].status, BudgetStatus::Warning);
    assert_eq!(overview.rows[3].status, BudgetStatus::Over);
    assert_eq!(overview.rows[1].status, BudgetStatus::Ok);
    assert!(!overview.rows[5].tracked);
    assert_eq!(overview.rollup.total_spent, dec!(18500));
    assert_eq!(overview.overall_status, BudgetStatus::Ok);
    assert_eq!(overview.monthly_income, Some(dec!(60000)));
}

fn expense_category() -> impl Strategy<Value = ExpenseCategory> {
    prop::sample::select(ExpenseCategory::ALL.to_vec())
}

proptest! {
    /// Total spent equals the sum of every expense that maps to a tracked budget.
    #[test]
    fn prop_total_spent_counts_mapped_expenses(
        entries in prop::collection::vec((expense_category(), 0i64..1_000_000), 0..40),
    ) {
        let expenses: Vec<_> = entries
            .iter()
            .map(|(c, cents)| expense(*c, Decimal::new(*cents, 2)))
            .collect();
        let expected: Decimal = expenses
            .iter()
            .filter(|e| e.category.budget_category().is_some())
            .map(|e| e.amount)
            .sum();

        let rollup = compute_spend_rollup(&default_items(), &expenses);

        prop_assert_eq!(rollup.total_spent, expected);
        prop_assert_eq!(rollup.total_left, rollup.total_planned - rollup.total_spent);
        prop_assert_eq!(rollup.by_category[&BudgetCategory::Savings], Decimal::ZERO);
    }

    /// The status thresholds are monotonic in spend.
    #[test]
    fn prop_classify_is_monotonic(
        plan in 1i64..10_000_000,
        a in 0i64..20_000_000,
        b in 0i64..20_000_000,
    ) {
        let rank = |s: BudgetStatus| match s {
            BudgetStatus::Ok => 0,
            BudgetStatus::Warning => 1,
            BudgetStatus::Over => 2,
        };
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let plan = Decimal::from(plan);

        prop_assert!(
            rank(classify(Decimal::from(low), plan)) <= rank(classify(Decimal::from(high), plan))
        );
    }

    /// Rollup never depends on expense order.
    #[test]
    fn prop_rollup_is_order_independent(
        entries in prop::collection::vec((expense_category(), 0i64..100_000), 0..20),
    ) {
        let expenses: Vec<_> = entries
            .iter()
            .map(|(c, n)| expense(*c, Decimal::from(*n)))
            .collect();
        let mut reversed = expenses.clone();
        reversed.reverse();

        prop_assert_eq!(
            compute_spend_rollup(&default_items(), &expenses),
            compute_spend_rollup(&default_items(), &reversed)
        );
    }
}
