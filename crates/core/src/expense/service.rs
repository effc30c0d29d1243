//! Expense operations.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use finguru_shared::types::UserId;
use rust_decimal::Decimal;

use crate::budget::{saturating_sum, utilization_percent};
use crate::category::ExpenseCategory;
use crate::store::{DateOrder, ExpenseStore};

use super::error::ExpenseError;
use super::timeline::{TimelineInsight, TimelineInsights};
use super::types::{CategoryBreakdown, CategoryShare, Expense, ExpenseDraft, NewExpense};

/// Expense ledger operations for one store and insight source.
pub struct ExpenseService {
    store: Arc<dyn ExpenseStore>,
    insights: Arc<dyn TimelineInsights>,
}

impl ExpenseService {
    /// Creates the service.
    #[must_use]
    pub fn new(store: Arc<dyn ExpenseStore>, insights: Arc<dyn TimelineInsights>) -> Self {
        Self { store, insights }
    }

    /// Validates a submitted expense and stamps its creation time.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidArgument` when the description is blank,
    /// the amount is not a positive number, the date is not `YYYY-MM-DD` or
    /// the category is unknown.
    pub fn validate(draft: &ExpenseDraft) -> Result<NewExpense, ExpenseError> {
        let description = draft.description.as_deref().map(str::trim).unwrap_or_default();
        if description.is_empty() {
            return Err(ExpenseError::invalid("description", "description is required"));
        }

        let amount = draft
            .amount
            .as_ref()
            .ok_or_else(|| ExpenseError::invalid("amount", "amount is required"))?
            .to_decimal()
            .map_err(|e| ExpenseError::invalid("amount", e.to_string()))?;
        if amount <= Decimal::ZERO {
            return Err(ExpenseError::invalid("amount", "amount must be greater than zero"));
        }

        let raw_date = draft.date.as_deref().map(str::trim).unwrap_or_default();
        if raw_date.is_empty() {
            return Err(ExpenseError::invalid("date", "date is required"));
        }
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d").map_err(|_| {
            ExpenseError::invalid("date", format!("`{raw_date}` is not a YYYY-MM-DD date"))
        })?;

        let raw_category = draft.category.as_deref().map(str::trim).unwrap_or_default();
        if raw_category.is_empty() {
            return Err(ExpenseError::invalid("category", "category is required"));
        }
        let category = raw_category
            .parse::<ExpenseCategory>()
            .map_err(|e| ExpenseError::invalid("category", e.to_string()))?;

        Ok(NewExpense {
            description: description.to_string(),
            amount,
            date,
            category,
            created_at: Utc::now(),
        })
    }

    /// Records an expense.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::InvalidArgument` for a bad payload and
    /// `ExpenseError::StorageUnavailable` if the write fails.
    pub async fn add_expense(
        &self,
        user: &UserId,
        draft: &ExpenseDraft,
    ) -> Result<Expense, ExpenseError> {
        let expense = Self::validate(draft)?;
        Ok(self.store.insert_expense(user, expense).await?)
    }

    /// Lists expenses, newest date first.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::StorageUnavailable` if the store cannot be read.
    pub async fn list_expenses(&self, user: &UserId) -> Result<Vec<Expense>, ExpenseError> {
        Ok(self.store.list_expenses(user, DateOrder::Descending).await?)
    }

    /// Ledger total and per-category split.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::StorageUnavailable` if the store cannot be read.
    pub async fn breakdown(&self, user: &UserId) -> Result<CategoryBreakdown, ExpenseError> {
        let expenses = self.list_expenses(user).await?;
        Ok(category_breakdown(&expenses))
    }

    /// Spending-pattern insight for the user's ledger.
    ///
    /// Service failures are folded into [`TimelineInsight::Unavailable`]; only
    /// a store failure is an error.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::StorageUnavailable` if the store cannot be read.
    pub async fn timeline_insight(&self, user: &UserId) -> Result<TimelineInsight, ExpenseError> {
        let expenses = self.store.list_expenses(user, DateOrder::Ascending).await?;
        if expenses.is_empty() {
            return Ok(TimelineInsight::NoExpenses);
        }
        Ok(match self.insights.insight(&expenses).await {
            Ok(text) => TimelineInsight::Ready(text),
            Err(e) => TimelineInsight::Unavailable(e),
        })
    }
}

/// Splits a ledger by expense category.
///
/// Categories are sorted by share, largest first; ties keep category order.
/// The list is empty when the total is zero.
#[must_use]
pub fn category_breakdown(expenses: &[Expense]) -> CategoryBreakdown {
    let total = saturating_sum(expenses.iter().map(|e| e.amount));
    if total <= Decimal::ZERO {
        return CategoryBreakdown {
            total,
            categories: Vec::new(),
        };
    }

    let mut sums: BTreeMap<ExpenseCategory, Decimal> = BTreeMap::new();
    for expense in expenses {
        let sum = sums.entry(expense.category).or_default();
        *sum = sum.saturating_add(expense.amount);
    }

    let mut categories: Vec<CategoryShare> = sums
        .into_iter()
        .map(|(name, amount)| CategoryShare {
            name,
            amount,
            percent: utilization_percent(amount, total),
        })
        .collect();
    categories.sort_by(|a, b| b.percent.cmp(&a.percent));

    CategoryBreakdown { total, categories }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expense::timeline::{INSIGHT_UNAVAILABLE, InsightError, NO_EXPENSES_INSIGHT};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use finguru_shared::types::{AmountInput, ExpenseId};
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Insight source that counts calls and returns a canned result.
    struct StubInsights {
        calls: AtomicUsize,
        fail: bool,
    }

    impl StubInsights {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait]
    impl TimelineInsights for StubInsights {
        async fn insight(&self, expenses: &[Expense]) -> Result<String, InsightError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(InsightError::Unreachable("connection refused".into()));
            }
            Ok(format!("first: {}", expenses[0].date))
        }
    }

    fn user() -> UserId {
        UserId::parse("spender").unwrap()
    }

    fn draft(description: &str, amount: &str, date: &str, category: &str) -> ExpenseDraft {
        ExpenseDraft {
            description: Some(description.into()),
            amount: Some(AmountInput::Text(amount.into())),
            date: Some(date.into()),
            category: Some(category.into()),
        }
    }

    fn stored(category: ExpenseCategory, amount: Decimal) -> Expense {
        Expense {
            id: ExpenseId::new(),
            description: "x".into(),
            amount,
            date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
            category,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_validate_accepts_good_expense() {
        let new =
            ExpenseService::validate(&draft(" Lunch ", "12.50", "2025-09-14", "Food")).unwrap();
        assert_eq!(new.description, "Lunch");
        assert_eq!(new.amount, dec!(12.5));
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2025, 9, 14).unwrap());
        assert_eq!(new.category, ExpenseCategory::Food);
    }

    #[rstest]
    #[case(draft("", "10", "2025-09-14", "Food"), "description")]
    #[case(draft("Taxi", "0", "2025-09-14", "Transportation"), "amount")]
    #[case(draft("Taxi", "-3", "2025-09-14", "Transportation"), "amount")]
    #[case(draft("Taxi", "ten", "2025-09-14", "Transportation"), "amount")]
    #[case(draft("Taxi", "0.004", "2025-09-14", "Transportation"), "amount")]
    #[case(draft("Yacht", "50000000000000000000000000000", "2025-09-14", "Other"), "amount")]
    #[case(draft("Taxi", "10", "14/09/2025", "Transportation"), "date")]
    #[case(draft("Taxi", "10", "2025-02-30", "Transportation"), "date")]
    #[case(draft("Taxi", "10", "2025-09-14", "Travel"), "category")]
    #[case(draft("Taxi", "10", "2025-09-14", ""), "category")]
    fn test_validate_rejections(#[case] input: ExpenseDraft, #[case] expected_field: &str) {
        match ExpenseService::validate(&input) {
            Err(ExpenseError::InvalidArgument { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected invalid {expected_field}, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let service = ExpenseService::new(Arc::new(MemoryStore::new()), StubInsights::new(false));
        let u = user();
        for date in ["2025-09-01", "2025-09-20", "2025-09-10"] {
            service
                .add_expense(&u, &draft("Bus", "2", date, "Transportation"))
                .await
                .unwrap();
        }

        let dates: Vec<_> = service
            .list_expenses(&u)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2025-09-20", "2025-09-10", "2025-09-01"]);
    }

    #[test]
    fn test_breakdown_sorted_by_share() {
        let expenses = vec![
            stored(ExpenseCategory::Food, dec!(25)),
            stored(ExpenseCategory::Housing, dec!(50)),
            stored(ExpenseCategory::Food, dec!(5)),
            stored(ExpenseCategory::Other, dec!(20)),
        ];

        let breakdown = category_breakdown(&expenses);

        assert_eq!(breakdown.total, dec!(100));
        let shares: Vec<_> = breakdown
            .categories
            .iter()
            .map(|s| (s.name, s.amount, s.percent))
            .collect();
        assert_eq!(
            shares,
            vec![
                (ExpenseCategory::Housing, dec!(50), dec!(50)),
                (ExpenseCategory::Food, dec!(30), dec!(30)),
                (ExpenseCategory::Other, dec!(20), dec!(20)),
            ]
        );
    }

    #[test]
    fn test_breakdown_saturates_on_extreme_totals() {
        let huge = dec!(50000000000000000000000000000);
        let expenses = vec![
            stored(ExpenseCategory::Food, huge),
            stored(ExpenseCategory::Food, huge),
            stored(ExpenseCategory::Other, dec!(1)),
        ];

        let breakdown = category_breakdown(&expenses);

        assert_eq!(breakdown.total, Decimal::MAX);
        assert_eq!(breakdown.categories[0].name, ExpenseCategory::Food);
        assert_eq!(breakdown.categories[0].amount, Decimal::MAX);
        assert_eq!(breakdown.categories[0].percent, dec!(100));
    }

    #[test]
    fn test_breakdown_of_empty_ledger() {
        let breakdown = category_breakdown(&[]);
        assert_eq!(breakdown.total, Decimal::ZERO);
        assert!(breakdown.categories.is_empty());
    }

    #[tokio::test]
    async fn test_timeline_skips_service_without_expenses() {
        let insights = StubInsights::new(false);
        let service = ExpenseService::new(Arc::new(MemoryStore::new()), insights.clone());

        let outcome = service.timeline_insight(&user()).await.unwrap();

        assert_eq!(outcome.message(), NO_EXPENSES_INSIGHT);
        assert_eq!(insights.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_timeline_sends_oldest_first() {
        let insights = StubInsights::new(false);
        let service = ExpenseService::new(Arc::new(MemoryStore::new()), insights.clone());
        let u = user();
        service
            .add_expense(&u, &draft("Late", "5", "2025-09-30", "Food"))
            .await
            .unwrap();
        service
            .add_expense(&u, &draft("Early", "5", "2025-09-02", "Food"))
            .await
            .unwrap();

        let outcome = service.timeline_insight(&u).await.unwrap();

        assert_eq!(outcome.message(), "first: 2025-09-02");
        assert_eq!(insights.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeline_failure_degrades() {
        let service = ExpenseService::new(Arc::new(MemoryStore::new()), StubInsights::new(true));
        let u = user();
        service
            .add_expense(&u, &draft("Movie", "15", "2025-09-05", "Entertainment"))
            .await
            .unwrap();

        let outcome = service.timeline_insight(&u).await.unwrap();

        assert!(matches!(outcome, TimelineInsight::Unavailable(_)));
        assert_eq!(outcome.message(), INSIGHT_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_store_outage() {
        let store = Arc::new(MemoryStore::new());
        store.set_available(false);
        let service = ExpenseService::new(store, StubInsights::new(false));

        assert!(matches!(
            service.list_expenses(&user()).await,
            Err(ExpenseError::StorageUnavailable(_))
        ));
        assert!(matches!(
            service.timeline_insight(&user()).await,
            Err(ExpenseError::StorageUnavailable(_))
        ));
    }
}
