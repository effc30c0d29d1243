//! Goal operations.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use finguru_shared::types::UserId;
use rust_decimal::Decimal;

use crate::budget::utilization_percent;
use crate::store::GoalStore;

use super::error::GoalError;
use super::types::{Goal, GoalDraft, GoalItemId, GoalProgress, NewGoal};

/// Goals shown to a user who has not created any.
#[must_use]
pub fn starter_goals() -> Vec<Goal> {
    let starter = |n, title: &str, goal_type: &str, target: u32, saved: u32, (y, m, d)| Goal {
        id: GoalItemId::Starter(n),
        title: title.to_string(),
        goal_type: goal_type.to_string(),
        target: Decimal::from(target),
        saved: Decimal::from(saved),
        deadline: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
    };
    vec![
        starter(1, "Emergency Fund 🛡️", "Emergency Fund", 50_000, 42_000, (2025, 10, 31)),
        starter(3, "New Laptop 💻", "Big Purchase", 65_000, 18_000, (2025, 11, 30)),
        starter(2, "Vacation Fund 🌴", "Vacation/Travel", 80_000, 25_000, (2025, 12, 31)),
    ]
}

/// Progress of `goal` as of `today`.
#[must_use]
pub fn goal_progress(goal: &Goal, today: NaiveDate) -> GoalProgress {
    let percent = utilization_percent(goal.saved, goal.target);
    let remaining = goal.target.saturating_sub(goal.saved).max(Decimal::ZERO);

    let months = i64::from(goal.deadline.year() - today.year()) * 12
        + i64::from(goal.deadline.month())
        - i64::from(today.month());

    GoalProgress {
        percent,
        remaining,
        months_left: u32::try_from(months).unwrap_or(0),
    }
}

/// Goal operations over a store.
pub struct GoalService {
    store: Arc<dyn GoalStore>,
}

impl GoalService {
    /// Creates the service.
    #[must_use]
    pub fn new(store: Arc<dyn GoalStore>) -> Self {
        Self { store }
    }

    /// Validates a goal payload.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::InvalidArgument` when title or type is blank, the
    /// target is not positive, saved is negative or the deadline is not a
    /// date.
    pub fn validate(draft: &GoalDraft) -> Result<NewGoal, GoalError> {
        let title = required_text(draft.title.as_deref(), "title")?;
        let goal_type = required_text(draft.goal_type.as_deref(), "type")?;

        let target = draft
            .target
            .as_ref()
            .ok_or_else(|| GoalError::invalid("target", "target is required"))?
            .to_decimal()
            .map_err(|e| GoalError::invalid("target", e.to_string()))?;
        if target <= Decimal::ZERO {
            return Err(GoalError::invalid("target", "target must be greater than zero"));
        }

        let saved = draft
            .saved
            .as_ref()
            .ok_or_else(|| GoalError::invalid("saved", "saved is required"))?
            .to_decimal()
            .map_err(|e| GoalError::invalid("saved", e.to_string()))?;
        if saved < Decimal::ZERO {
            return Err(GoalError::invalid("saved", "saved cannot be negative"));
        }

        let raw_deadline = required_text(draft.deadline.as_deref(), "deadline")?;
        let deadline = NaiveDate::parse_from_str(&raw_deadline, "%Y-%m-%d").map_err(|_| {
            GoalError::invalid(
                "deadline",
                format!("`{raw_deadline}` is not a YYYY-MM-DD date"),
            )
        })?;

        Ok(NewGoal {
            title,
            goal_type,
            target,
            saved,
            deadline,
        })
    }

    /// Creates a goal.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::InvalidArgument` for a bad payload and
    /// `GoalError::StorageUnavailable` if the write fails.
    pub async fn add_goal(&self, user: &UserId, draft: &GoalDraft) -> Result<Goal, GoalError> {
        let goal = Self::validate(draft)?;
        Ok(self.store.insert_goal(user, goal).await?)
    }

    /// Lists goals by deadline, or the starter goals when there are none.
    ///
    /// # Errors
    ///
    /// Returns `GoalError::StorageUnavailable` if the store cannot be read.
    pub async fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>, GoalError> {
        let goals = self.store.list_goals(user).await?;
        if goals.is_empty() {
            return Ok(starter_goals());
        }
        Ok(goals)
    }
}

fn required_text(value: Option<&str>, field: &'static str) -> Result<String, GoalError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(GoalError::invalid(field, format!("{field} is required"))),
    }
}
