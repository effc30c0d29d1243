//! Spend-vs-plan rollups and status classification.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::expense::Expense;

use super::types::{BudgetItem, BudgetOverview, BudgetStatus, CategoryProgress, SpendRollup};

/// Percentage of plan consumed, two decimal places.
///
/// Zero when nothing is planned; saturates at `Decimal::MAX` when the ratio
/// does not fit.
#[must_use]
pub fn utilization_percent(spent: Decimal, planned: Decimal) -> Decimal {
    if planned <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    spent
        .checked_div(planned)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map_or(Decimal::MAX, |percent| percent.round_dp(2))
}

/// Sum that clamps at the decimal range instead of overflowing.
#[must_use]
pub fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Classifies spend against plan.
///
/// `over` at or above 100%, `warning` above 80%, otherwise `ok`. A zero plan
/// is always `ok`.
#[must_use]
pub fn classify(spent: Decimal, planned: Decimal) -> BudgetStatus {
    if planned <= Decimal::ZERO {
        return BudgetStatus::Ok;
    }
    if spent >= planned {
        return BudgetStatus::Over;
    }
    // Cross-multiplied so no rounding is involved while it fits.
    let above_warning = match (
        spent.checked_mul(Decimal::from(5)),
        planned.checked_mul(Decimal::from(4)),
    ) {
        (Some(spent5), Some(planned4)) => spent5 > planned4,
        _ => spent / planned > Decimal::new(8, 1),
    };
    if above_warning {
        BudgetStatus::Warning
    } else {
        BudgetStatus::Ok
    }
}

/// Rolls an expense ledger up into the given budget categories.
///
/// Expenses whose category has no budget mapping, or maps to a category not
/// present in `budgets`, are excluded from every sum. Savings is reported in
/// `by_category` but excluded from the totals. Sums saturate at the decimal
/// range, so the rollup never fails.
#[must_use]
pub fn compute_spend_rollup(budgets: &[BudgetItem], expenses: &[Expense]) -> SpendRollup {
    let mut by_category: BTreeMap<_, Decimal> = budgets
        .iter()
        .map(|b| (b.category, Decimal::ZERO))
        .collect();

    for expense in expenses {
        let Some(category) = expense.category.budget_category() else {
            continue;
        };
        if let Some(spent) = by_category.get_mut(&category) {
            *spent = spent.saturating_add(expense.amount);
        }
    }

    let total_planned = saturating_sum(
        budgets
            .iter()
            .filter(|b| b.category.is_spend_tracked())
            .map(|b| b.planned),
    );
    let total_spent = saturating_sum(
        by_category
            .iter()
            .filter(|(category, _)| category.is_spend_tracked())
            .map(|(_, spent)| *spent),
    );

    SpendRollup {
        by_category,
        total_planned,
        total_spent,
        total_left: total_planned.saturating_sub(total_spent),
    }
}

impl BudgetOverview {
    /// Builds the budget page view from merged budgets and the ledger.
    #[must_use]
    pub fn build(
        budgets: Vec<BudgetItem>,
        expenses: &[Expense],
        monthly_income: Option<Decimal>,
    ) -> Self {
        let rollup = compute_spend_rollup(&budgets, expenses);
        let rows = budgets
            .iter()
            .map(|b| {
                let spent = rollup
                    .by_category
                    .get(&b.category)
                    .copied()
                    .unwrap_or_default();
                CategoryProgress {
                    category: b.category,
                    planned: b.planned,
                    spent,
                    percent: utilization_percent(spent, b.planned),
                    status: classify(spent, b.planned),
                    tracked: b.category.is_spend_tracked(),
                }
            })
            .collect();
        let overall_status = classify(rollup.total_spent, rollup.total_planned);

        Self {
            budgets,
            rollup,
            rows,
            overall_status,
            monthly_income,
        }
    }
}
