//! Savings goals.

pub mod error;
pub mod service;
pub mod types;

pub use error::GoalError;
pub use service::{GoalService, goal_progress, starter_goals};
pub use types::{Goal, GoalDraft, GoalItemId, GoalProgress, GoalView, NewGoal};
