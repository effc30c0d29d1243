//! In-memory store backed by `DashMap`.
//!
//! Used by tests and by the server when no database URL is configured.
//! Data lives for the lifetime of the process.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use finguru_shared::types::{BudgetId, ExpenseId, GoalId, UserId};
use rust_decimal::Decimal;

use super::{BudgetStore, DateOrder, ExpenseStore, GoalStore, ProfileStore, StoreError};
use crate::budget::{BudgetItem, BudgetItemId};
use crate::category::BudgetCategory;
use crate::expense::{Expense, NewExpense};
use crate::goal::{Goal, GoalItemId, NewGoal};
use crate::profile::UserProfile;

#[derive(Debug, Clone)]
struct StoredBudget {
    item: BudgetItem,
    revision: u64,
}

/// Process-local implementation of every store trait.
#[derive(Debug)]
pub struct MemoryStore {
    budgets: DashMap<UserId, HashMap<BudgetCategory, StoredBudget>>,
    expenses: DashMap<UserId, Vec<Expense>>,
    goals: DashMap<UserId, Vec<Goal>>,
    profiles: DashMap<UserId, UserProfile>,
    revision: AtomicU64,
    writes: AtomicUsize,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty, available store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            budgets: DashMap::new(),
            expenses: DashMap::new(),
            goals: DashMap::new(),
            profiles: DashMap::new(),
            revision: AtomicU64::new(0),
            writes: AtomicUsize::new(0),
            available: AtomicBool::new(true),
        }
    }

    /// Simulates an outage: while unavailable every call fails.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store offline".to_string()))
        }
    }

    fn wrote(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn list_budgets(&self, user: &UserId) -> Result<Vec<BudgetItem>, StoreError> {
        self.check()?;
        let mut stored: Vec<StoredBudget> = self
            .budgets
            .get(user)
            .map(|set| set.values().cloned().collect())
            .unwrap_or_default();
        stored.sort_by_key(|s| s.revision);
        Ok(stored.into_iter().map(|s| s.item).collect())
    }

    async fn upsert_budget(
        &self,
        user: &UserId,
        category: BudgetCategory,
        planned: Decimal,
    ) -> Result<BudgetItem, StoreError> {
        self.check()?;
        // The user's shard stays write-locked for the whole create-or-update.
        let mut set = self.budgets.entry(user.clone()).or_default();
        let revision = self.revision.fetch_add(1, Ordering::SeqCst);
        let stored = set.entry(category).or_insert_with(|| StoredBudget {
            item: BudgetItem {
                id: BudgetItemId::Stored(BudgetId::new()),
                category,
                planned,
            },
            revision,
        });
        stored.item.planned = planned;
        stored.revision = revision;
        let item = stored.item.clone();
        drop(set);

        self.wrote();
        Ok(item)
    }
}

#[async_trait]
impl ExpenseStore for MemoryStore {
    async fn insert_expense(
        &self,
        user: &UserId,
        expense: NewExpense,
    ) -> Result<Expense, StoreError> {
        self.check()?;
        let expense = Expense {
            id: ExpenseId::new(),
            description: expense.description,
            amount: expense.amount,
            date: expense.date,
            category: expense.category,
            created_at: expense.created_at,
        };
        self.expenses
            .entry(user.clone())
            .or_default()
            .push(expense.clone());
        self.wrote();
        Ok(expense)
    }

    async fn list_expenses(
        &self,
        user: &UserId,
        order: DateOrder,
    ) -> Result<Vec<Expense>, StoreError> {
        self.check()?;
        let mut expenses = self
            .expenses
            .get(user)
            .map(|list| list.value().clone())
            .unwrap_or_default();
        expenses.sort_by(|a, b| (a.date, a.created_at).cmp(&(b.date, b.created_at)));
        if order == DateOrder::Descending {
            expenses.reverse();
        }
        Ok(expenses)
    }
}

#[async_trait]
impl GoalStore for MemoryStore {
    async fn insert_goal(&self, user: &UserId, goal: NewGoal) -> Result<Goal, StoreError> {
        self.check()?;
        let goal = Goal {
            id: GoalItemId::Stored(GoalId::new()),
            title: goal.title,
            goal_type: goal.goal_type,
            target: goal.target,
            saved: goal.saved,
            deadline: goal.deadline,
        };
        self.goals
            .entry(user.clone())
            .or_default()
            .push(goal.clone());
        self.wrote();
        Ok(goal)
    }

    async fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>, StoreError> {
        self.check()?;
        let mut goals = self
            .goals
            .get(user)
            .map(|list| list.value().clone())
            .unwrap_or_default();
        goals.sort_by_key(|g| g.deadline);
        Ok(goals)
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, user: &UserId) -> Result<Option<UserProfile>, StoreError> {
        self.check()?;
        Ok(self.profiles.get(user).map(|p| p.value().clone()))
    }

    async fn save_profile(&self, profile: UserProfile) -> Result<UserProfile, StoreError> {
        self.check()?;
        self.profiles.insert(profile.uid.clone(), profile.clone());
        self.wrote();
        Ok(profile)
    }

    async fn update_income(
        &self,
        user: &UserId,
        monthly_income: Decimal,
    ) -> Result<Option<UserProfile>, StoreError> {
        self.check()?;
        let updated = self.profiles.get_mut(user).map(|mut profile| {
            profile.monthly_income = monthly_income;
            profile.updated_at = chrono::Utc::now();
            profile.value().clone()
        });
        if updated.is_some() {
            self.wrote();
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn user(id: &str) -> UserId {
        UserId::parse(id).unwrap()
    }

    #[tokio::test]
    async fn test_budget_list_follows_update_order() {
        let store = MemoryStore::new();
        let u = user("order");

        store.upsert_budget(&u, BudgetCategory::Fun, dec!(1)).await.unwrap();
        store.upsert_budget(&u, BudgetCategory::Food, dec!(2)).await.unwrap();
        store.upsert_budget(&u, BudgetCategory::Fun, dec!(3)).await.unwrap();

        let listed: Vec<_> = store
            .list_budgets(&u)
            .await
            .unwrap()
            .into_iter()
            .map(|b| (b.category, b.planned))
            .collect();
        assert_eq!(
            listed,
            vec![(BudgetCategory::Food, dec!(2)), (BudgetCategory::Fun, dec!(3))]
        );
    }

    #[tokio::test]
    async fn test_upsert_keeps_id() {
        let store = MemoryStore::new();
        let u = user("same");

        let first = store.upsert_budget(&u, BudgetCategory::Rent, dec!(1)).await.unwrap();
        let second = store.upsert_budget(&u, BudgetCategory::Rent, dec!(9)).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.planned, dec!(9));
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_offline_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_available(false);
        let u = user("down");

        assert!(store.list_budgets(&u).await.is_err());
        assert!(store.list_expenses(&u, DateOrder::Ascending).await.is_err());
        assert!(store.list_goals(&u).await.is_err());
        assert!(store.get_profile(&u).await.is_err());

        store.set_available(true);
        assert!(store.list_budgets(&u).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_income_without_profile() {
        let store = MemoryStore::new();
        assert_eq!(
            store.update_income(&user("ghost"), dec!(10)).await.unwrap(),
            None
        );
        assert_eq!(store.write_count(), 0);
    }
}
