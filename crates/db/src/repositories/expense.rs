//! Expense repository.

use async_trait::async_trait;
use chrono::Utc;
use finguru_core::category::ExpenseCategory;
use finguru_core::expense::{Expense, NewExpense};
use finguru_core::store::{DateOrder, ExpenseStore, StoreError};
use finguru_shared::types::{ExpenseId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::{corrupt, unavailable};
use crate::entities::expenses;

/// PostgreSQL-backed [`ExpenseStore`].
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    db: DatabaseConnection,
}

impl ExpenseRepository {
    /// Creates a new expense repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_expense(model: expenses::Model) -> Result<Expense, StoreError> {
    let category: ExpenseCategory = model
        .category
        .parse()
        .map_err(|e| corrupt("expenses", e))?;
    Ok(Expense {
        id: ExpenseId::from_uuid(model.id),
        description: model.description,
        amount: model.amount,
        date: model.date,
        category,
        created_at: model.created_at.with_timezone(&Utc),
    })
}

#[async_trait]
impl ExpenseStore for ExpenseRepository {
    async fn insert_expense(
        &self,
        user: &UserId,
        expense: NewExpense,
    ) -> Result<Expense, StoreError> {
        let row = expenses::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user.as_str().to_string()),
            description: Set(expense.description),
            amount: Set(expense.amount),
            date: Set(expense.date),
            category: Set(expense.category.as_str().to_string()),
            created_at: Set(expense.created_at.into()),
        };

        let model = row
            .insert(&self.db)
            .await
            .map_err(|e| unavailable("insert_expense", e))?;
        to_expense(model)
    }

    async fn list_expenses(
        &self,
        user: &UserId,
        order: DateOrder,
    ) -> Result<Vec<Expense>, StoreError> {
        let query = expenses::Entity::find().filter(expenses::Column::UserId.eq(user.as_str()));
        let query = match order {
            DateOrder::Ascending => query
                .order_by_asc(expenses::Column::Date)
                .order_by_asc(expenses::Column::CreatedAt),
            DateOrder::Descending => query
                .order_by_desc(expenses::Column::Date)
                .order_by_desc(expenses::Column::CreatedAt),
        };

        query
            .all(&self.db)
            .await
            .map_err(|e| unavailable("list_expenses", e))?
            .into_iter()
            .map(to_expense)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn test_row_maps_to_expense() {
        let row = expenses::Model {
            id: Uuid::now_v7(),
            user_id: "u1".into(),
            description: "Groceries".into(),
            amount: dec!(54.20),
            date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            category: "Food".into(),
            created_at: Utc::now().into(),
        };

        let expense = to_expense(row).unwrap();

        assert_eq!(expense.category, ExpenseCategory::Food);
        assert_eq!(expense.amount, dec!(54.20));
    }
}
