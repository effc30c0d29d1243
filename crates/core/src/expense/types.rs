//! Expense data types.

use chrono::{DateTime, NaiveDate, Utc};
use finguru_shared::types::{AmountInput, AmountNumber, ExpenseId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};

use crate::category::ExpenseCategory;

/// A stored expense.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Expense ID.
    pub id: ExpenseId,
    /// What the money was spent on.
    pub description: String,
    /// Amount spent, always positive.
    #[serde_as(as = "AmountNumber")]
    pub amount: Decimal,
    /// Day of the purchase.
    pub date: NaiveDate,
    /// Expense category.
    pub category: ExpenseCategory,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

/// A validated expense ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Trimmed description.
    pub description: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Day of the purchase.
    pub date: NaiveDate,
    /// Category.
    pub category: ExpenseCategory,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Raw expense payload as submitted by clients.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDraft {
    /// Description.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub description: Option<String>,
    /// Amount as number or numeric string.
    #[serde(default)]
    pub amount: Option<AmountInput>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub date: Option<String>,
    /// Expense category name.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub category: Option<String>,
}

/// Spend in one expense category.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    /// Category.
    pub name: ExpenseCategory,
    /// Total spent.
    #[serde_as(as = "AmountNumber")]
    pub amount: Decimal,
    /// Share of the overall total, two decimal places.
    #[serde_as(as = "AmountNumber")]
    pub percent: Decimal,
}

/// Ledger total and its split by category.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdown {
    /// Sum of all expenses.
    #[serde_as(as = "AmountNumber")]
    pub total: Decimal,
    /// Non-empty categories, largest share first.
    pub categories: Vec<CategoryShare>,
}
