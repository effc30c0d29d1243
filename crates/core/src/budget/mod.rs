//! Budget reconciliation: default merge, upserts and spend rollups.

pub mod error;
pub mod merge;
pub mod rollup;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::BudgetError;
pub use merge::{merge_with_defaults, override_map};
pub use rollup::{classify, compute_spend_rollup, saturating_sum, utilization_percent};
pub use service::BudgetReconciler;
pub use types::{
    BudgetDraft, BudgetItem, BudgetItemId, BudgetOverview, BudgetStatus, CategoryProgress,
    DefaultBudget, SpendRollup, default_budgets,
};
