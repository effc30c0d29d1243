//! Budget repository.

use async_trait::async_trait;
use chrono::Utc;
use finguru_core::budget::{BudgetItem, BudgetItemId};
use finguru_core::category::BudgetCategory;
use finguru_core::store::{BudgetStore, StoreError};
use finguru_shared::types::{BudgetId, UserId};
use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::{corrupt, unavailable};
use crate::entities::budgets;

/// PostgreSQL-backed [`BudgetStore`].
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_item(model: budgets::Model) -> Result<BudgetItem, StoreError> {
    let category: BudgetCategory = model
        .category
        .parse()
        .map_err(|e| corrupt("budgets", e))?;
    Ok(BudgetItem {
        id: BudgetItemId::Stored(BudgetId::from_uuid(model.id)),
        category,
        planned: model.planned,
    })
}

#[async_trait]
impl BudgetStore for BudgetRepository {
    async fn list_budgets(&self, user: &UserId) -> Result<Vec<BudgetItem>, StoreError> {
        budgets::Entity::find()
            .filter(budgets::Column::UserId.eq(user.as_str()))
            .order_by_asc(budgets::Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| unavailable("list_budgets", e))?
            .into_iter()
            .map(to_item)
            .collect()
    }

    /// Single `INSERT … ON CONFLICT (user_id, category) DO UPDATE`; the
    /// unique constraint makes concurrent first saves converge on one row.
    async fn upsert_budget(
        &self,
        user: &UserId,
        category: BudgetCategory,
        planned: Decimal,
    ) -> Result<BudgetItem, StoreError> {
        let now = Utc::now().into();
        let row = budgets::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user.as_str().to_string()),
            category: Set(category.as_str().to_string()),
            planned: Set(planned),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = budgets::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([budgets::Column::UserId, budgets::Column::Category])
                    .update_columns([budgets::Column::Planned, budgets::Column::UpdatedAt])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| unavailable("upsert_budget", e))?;

        to_item(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn model(category: &str) -> budgets::Model {
        let now = Utc::now().into();
        budgets::Model {
            id: Uuid::now_v7(),
            user_id: "u1".into(),
            category: category.into(),
            planned: dec!(120.50),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_maps_to_item() {
        let row = model("Transport");
        let id = row.id;

        let item = to_item(row).unwrap();

        assert_eq!(item.id, BudgetItemId::Stored(BudgetId::from_uuid(id)));
        assert_eq!(item.category, BudgetCategory::Transport);
        assert_eq!(item.planned, dec!(120.50));
    }

    #[test]
    fn test_unknown_category_row_is_corrupt() {
        assert!(matches!(to_item(model("Groceries")), Err(StoreError::Corrupt(_))));
    }
}
