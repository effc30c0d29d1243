//! Budget reconciler: the user-facing budget set and its upserts.

use std::sync::Arc;

use finguru_shared::types::UserId;
use rust_decimal::Decimal;

use crate::category::BudgetCategory;
use crate::store::BudgetStore;

use super::error::BudgetError;
use super::merge::{merge_with_defaults, override_map};
use super::types::{BudgetDraft, BudgetItem, DefaultBudget, default_budgets};

/// Combines the default category table with a user's stored overrides.
pub struct BudgetReconciler {
    store: Arc<dyn BudgetStore>,
    defaults: [DefaultBudget; 6],
}

impl BudgetReconciler {
    /// Creates a reconciler over the standard default table.
    #[must_use]
    pub fn new(store: Arc<dyn BudgetStore>) -> Self {
        Self {
            store,
            defaults: default_budgets(),
        }
    }

    /// Returns the merged budget view: one item per default category, in
    /// default order.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::StorageUnavailable` if the store cannot be read.
    pub async fn merged_budgets(&self, user: &UserId) -> Result<Vec<BudgetItem>, BudgetError> {
        let stored = self.store.list_budgets(user).await?;
        Ok(merge_with_defaults(&self.defaults, &override_map(stored)))
    }

    /// Validates an upsert payload.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidArgument` for a missing, empty or unknown
    /// category, and for a planned amount that is missing, not a number or
    /// negative.
    pub fn validate_upsert(draft: &BudgetDraft) -> Result<(BudgetCategory, Decimal), BudgetError> {
        let raw_category = draft.category.as_deref().map(str::trim).unwrap_or_default();
        if raw_category.is_empty() {
            return Err(BudgetError::invalid("category", "category is required"));
        }
        let category: BudgetCategory = raw_category.parse().map_err(|_| {
            let known: Vec<_> = BudgetCategory::ALL.iter().map(|c| c.as_str()).collect();
            BudgetError::invalid(
                "category",
                format!(
                    "unknown category `{raw_category}`; expected one of {}",
                    known.join(", ")
                ),
            )
        })?;

        let planned = draft
            .planned
            .as_ref()
            .ok_or_else(|| BudgetError::invalid("planned", "planned amount is required"))?
            .to_decimal()
            .map_err(|e| BudgetError::invalid("planned", e.to_string()))?;
        if planned < Decimal::ZERO {
            return Err(BudgetError::invalid(
                "planned",
                "planned amount cannot be negative",
            ));
        }

        Ok((category, planned))
    }

    /// Creates or overwrites the user's plan for a category.
    ///
    /// Validation runs before any store access. The store performs the
    /// create-or-update atomically, keyed on `(user, category)`.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidArgument` for a bad payload and
    /// `BudgetError::StorageUnavailable` if the write fails.
    pub async fn upsert_budget(
        &self,
        user: &UserId,
        draft: &BudgetDraft,
    ) -> Result<BudgetItem, BudgetError> {
        let (category, planned) = Self::validate_upsert(draft)?;
        Ok(self.store.upsert_budget(user, category, planned).await?)
    }
}
