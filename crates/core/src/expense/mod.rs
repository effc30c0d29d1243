//! Expense ledger.
//!
//! Validation of new expenses, newest-first listing, per-category breakdowns
//! and the best-effort timeline insight.

pub mod error;
pub mod service;
pub mod timeline;
pub mod types;

pub use error::ExpenseError;
pub use service::{ExpenseService, category_breakdown};
pub use timeline::{
    INSIGHT_UNAVAILABLE, InsightError, NO_EXPENSES_INSIGHT, TimelineInsight, TimelineInsights,
};
pub use types::{CategoryBreakdown, CategoryShare, Expense, ExpenseDraft, NewExpense};
