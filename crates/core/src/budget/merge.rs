//! Default-list merge.

use std::collections::HashMap;

use crate::category::BudgetCategory;

use super::types::{BudgetItem, DefaultBudget};

/// Builds the sparse override map from stored records.
///
/// Stores list records in ascending update order, so a later record for the
/// same category replaces an earlier stray one.
#[must_use]
pub fn override_map(stored: Vec<BudgetItem>) -> HashMap<BudgetCategory, BudgetItem> {
    stored
        .into_iter()
        .map(|item| (item.category, item))
        .collect()
}

/// Merges the default table with a user's overrides.
///
/// The result has exactly one item per default category, in table order.
/// Overrides for categories outside the table are ignored.
#[must_use]
pub fn merge_with_defaults(
    defaults: &[DefaultBudget],
    overrides: &HashMap<BudgetCategory, BudgetItem>,
) -> Vec<BudgetItem> {
    defaults
        .iter()
        .map(|default| {
            overrides.get(&default.category).cloned().unwrap_or_else(|| {
                BudgetItem::default_for(default.category, default.planned)
            })
        })
        .collect()
}
