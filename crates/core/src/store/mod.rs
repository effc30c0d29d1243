//! Persistence traits.
//!
//! Every collection is scoped to one user. Implementations live in the
//! database crate (PostgreSQL) and in [`memory`] (tests and local runs).

pub mod memory;

use async_trait::async_trait;
use finguru_shared::types::UserId;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::budget::BudgetItem;
use crate::category::BudgetCategory;
use crate::expense::{Expense, NewExpense};
use crate::goal::{Goal, NewGoal};
use crate::profile::UserProfile;

pub use memory::MemoryStore;

/// Errors raised by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or rejected the operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A persisted record could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Sort direction for date-ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

/// Storage of per-user budget overrides.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// Lists a user's stored budget items in ascending update order.
    async fn list_budgets(&self, user: &UserId) -> Result<Vec<BudgetItem>, StoreError>;

    /// Atomically creates or updates the item for `(user, category)`.
    ///
    /// Implementations must guarantee at most one stored item per key, also
    /// under concurrent calls.
    async fn upsert_budget(
        &self,
        user: &UserId,
        category: BudgetCategory,
        planned: Decimal,
    ) -> Result<BudgetItem, StoreError>;
}

/// Storage of the expense ledger.
#[async_trait]
pub trait ExpenseStore: Send + Sync {
    /// Persists a validated expense.
    async fn insert_expense(&self, user: &UserId, expense: NewExpense)
    -> Result<Expense, StoreError>;

    /// Lists a user's expenses by date, ties broken by creation time.
    async fn list_expenses(
        &self,
        user: &UserId,
        order: DateOrder,
    ) -> Result<Vec<Expense>, StoreError>;
}

/// Storage of savings goals.
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Persists a validated goal.
    async fn insert_goal(&self, user: &UserId, goal: NewGoal) -> Result<Goal, StoreError>;

    /// Lists a user's goals by deadline, earliest first.
    async fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>, StoreError>;
}

/// Storage of user profiles.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetches a profile.
    async fn get_profile(&self, user: &UserId) -> Result<Option<UserProfile>, StoreError>;

    /// Creates or replaces a profile.
    async fn save_profile(&self, profile: UserProfile) -> Result<UserProfile, StoreError>;

    /// Sets the monthly income of an existing profile.
    ///
    /// Returns `None` when the user has no profile.
    async fn update_income(
        &self,
        user: &UserId,
        monthly_income: Decimal,
    ) -> Result<Option<UserProfile>, StoreError>;
}
