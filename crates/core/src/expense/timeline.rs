//! Spending-timeline insight.
//!
//! The insight text comes from an external analysis service. It is
//! best-effort: any failure degrades to a fixed message instead of an error.

use async_trait::async_trait;
use thiserror::Error;

use super::types::Expense;

/// Returned when the user has no expenses; the service is not called.
pub const NO_EXPENSES_INSIGHT: &str = "Add some expenses to see your timeline.";

/// Returned when the analysis service fails in any way.
pub const INSIGHT_UNAVAILABLE: &str = "Timeline analysis service is currently unavailable.";

/// Failures of the analysis service.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Connection refused, DNS failure and similar.
    #[error("timeline service unreachable: {0}")]
    Unreachable(String),

    /// No response within the configured timeout.
    #[error("timeline service timed out")]
    Timeout,

    /// Non-success HTTP status.
    #[error("timeline service returned status {0}")]
    Status(u16),

    /// Response body was not `{"insight": string}`.
    #[error("malformed timeline response: {0}")]
    Malformed(String),
}

/// Source of spending-pattern insights.
#[async_trait]
pub trait TimelineInsights: Send + Sync {
    /// Analyzes expenses, oldest first, and returns a one-line insight.
    async fn insight(&self, expenses: &[Expense]) -> Result<String, InsightError>;
}

/// Outcome of a timeline request.
#[derive(Debug)]
pub enum TimelineInsight {
    /// Insight text from the service.
    Ready(String),
    /// The ledger is empty.
    NoExpenses,
    /// The service failed; the error is kept for logging.
    Unavailable(InsightError),
}

impl TimelineInsight {
    /// Text shown to the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Ready(text) => text,
            Self::NoExpenses => NO_EXPENSES_INSIGHT,
            Self::Unavailable(_) => INSIGHT_UNAVAILABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            TimelineInsight::Ready("Fridays".into()).message(),
            "Fridays"
        );
        assert_eq!(TimelineInsight::NoExpenses.message(), NO_EXPENSES_INSIGHT);
        assert_eq!(
            TimelineInsight::Unavailable(InsightError::Timeout).message(),
            INSIGHT_UNAVAILABLE
        );
    }
}
