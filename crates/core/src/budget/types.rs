//! Budget data types.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use finguru_shared::types::{AmountInput, AmountNumber, BudgetId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DeserializeFromStr, SerializeDisplay, serde_as};

use crate::category::BudgetCategory;

/// Prefix of placeholder ids handed out for categories without a stored record.
pub const DEFAULT_ID_PREFIX: &str = "default-";

/// Identifier of a budget item in the merged view.
///
/// Stored records carry their persisted id; categories the user never saved
/// get a stable placeholder derived from the category name so clients have a
/// key before the first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum BudgetItemId {
    /// Persisted record.
    Stored(BudgetId),
    /// Placeholder for an unsaved default, e.g. `default-Food`.
    Default(BudgetCategory),
}

impl BudgetItemId {
    /// Whether the id refers to a persisted record.
    #[must_use]
    pub const fn is_stored(&self) -> bool {
        matches!(self, Self::Stored(_))
    }
}

impl fmt::Display for BudgetItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored(id) => write!(f, "{id}"),
            Self::Default(category) => write!(f, "{DEFAULT_ID_PREFIX}{category}"),
        }
    }
}

impl FromStr for BudgetItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(name) = s.strip_prefix(DEFAULT_ID_PREFIX) {
            return name
                .parse()
                .map(Self::Default)
                .map_err(|e| e.to_string());
        }
        s.parse()
            .map(Self::Stored)
            .map_err(|_| format!("invalid budget item id `{s}`"))
    }
}

/// One category's plan in a user's budget set.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetItem {
    /// Stored id or default placeholder.
    pub id: BudgetItemId,
    /// Budget category (natural key within a user's set).
    pub category: BudgetCategory,
    /// Planned amount, never negative.
    #[serde_as(as = "AmountNumber")]
    pub planned: Decimal,
}

impl BudgetItem {
    /// Placeholder item for a category with no stored override.
    #[must_use]
    pub fn default_for(category: BudgetCategory, planned: Decimal) -> Self {
        Self {
            id: BudgetItemId::Default(category),
            category,
            planned,
        }
    }
}

/// A default category and its baseline plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultBudget {
    /// Category.
    pub category: BudgetCategory,
    /// Baseline planned amount.
    pub planned: Decimal,
}

/// Returns the fixed, ordered default budget table.
#[must_use]
pub fn default_budgets() -> [DefaultBudget; 6] {
    BudgetCategory::ALL.map(|category| DefaultBudget {
        category,
        planned: category.default_planned(),
    })
}

/// Raw upsert payload as submitted by clients.
///
/// A wrongly typed field reads as absent or unparsable so that validation
/// reports it by name.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDraft {
    /// Category name (canonical or legacy label).
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub category: Option<String>,
    /// Planned amount as number or numeric string.
    #[serde(default)]
    pub planned: Option<AmountInput>,
}

/// Spend-vs-plan status of one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    /// Below 80% of plan.
    Ok,
    /// Above 80% but below 100% of plan.
    Warning,
    /// At or above plan.
    Over,
}

/// Spend totals derived from a budget set and an expense ledger.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendRollup {
    /// Spend per budget category; every budget category is present.
    #[serde_as(as = "BTreeMap<_, AmountNumber>")]
    pub by_category: BTreeMap<BudgetCategory, Decimal>,
    /// Sum of plans over spend-tracked categories.
    #[serde_as(as = "AmountNumber")]
    pub total_planned: Decimal,
    /// Sum of mapped spend over spend-tracked categories.
    #[serde_as(as = "AmountNumber")]
    pub total_spent: Decimal,
    /// `total_planned - total_spent`; negative means overspent.
    #[serde_as(as = "AmountNumber")]
    pub total_left: Decimal,
}

/// One row of the budget page.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryProgress {
    /// Category.
    pub category: BudgetCategory,
    /// Planned amount.
    #[serde_as(as = "AmountNumber")]
    pub planned: Decimal,
    /// Spent amount.
    #[serde_as(as = "AmountNumber")]
    pub spent: Decimal,
    /// Utilization percentage, two decimal places.
    #[serde_as(as = "AmountNumber")]
    pub percent: Decimal,
    /// Status classification.
    pub status: BudgetStatus,
    /// False for categories whose progress is not shown (savings).
    pub tracked: bool,
}

/// Budget page view: merged plans, rollup and per-category progress.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    /// Merged budget items in default order.
    pub budgets: Vec<BudgetItem>,
    /// Totals.
    pub rollup: SpendRollup,
    /// One progress row per budget item.
    pub rows: Vec<CategoryProgress>,
    /// Status of total spend against total plan.
    pub overall_status: BudgetStatus,
    /// Monthly income from the user's profile, if known.
    #[serde_as(as = "Option<AmountNumber>")]
    pub monthly_income: Option<Decimal>,
}
