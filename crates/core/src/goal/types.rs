//! Goal data types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use finguru_shared::types::{AmountInput, AmountNumber, GoalId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, DeserializeFromStr, SerializeDisplay, serde_as};

/// Identifier of a goal in a listing.
///
/// Starter goals shown to users without goals of their own carry small
/// numeric ids (`"1"`, `"2"`, `"3"`) and are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum GoalItemId {
    /// Persisted goal.
    Stored(GoalId),
    /// Built-in starter goal.
    Starter(u8),
}

impl fmt::Display for GoalItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored(id) => write!(f, "{id}"),
            Self::Starter(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for GoalItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(n) = s.parse::<u8>() {
            return Ok(Self::Starter(n));
        }
        s.parse()
            .map(Self::Stored)
            .map_err(|_| format!("invalid goal id `{s}`"))
    }
}

/// A savings goal.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Goal ID.
    pub id: GoalItemId,
    /// Display title.
    pub title: String,
    /// Goal kind, e.g. "Emergency Fund".
    #[serde(rename = "type")]
    pub goal_type: String,
    /// Amount to reach.
    #[serde_as(as = "AmountNumber")]
    pub target: Decimal,
    /// Amount saved so far.
    #[serde_as(as = "AmountNumber")]
    pub saved: Decimal,
    /// Target date.
    pub deadline: NaiveDate,
}

/// A validated goal ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGoal {
    /// Title.
    pub title: String,
    /// Goal kind.
    pub goal_type: String,
    /// Positive target.
    pub target: Decimal,
    /// Non-negative saved amount.
    pub saved: Decimal,
    /// Target date.
    pub deadline: NaiveDate,
}

/// Raw goal payload.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoalDraft {
    /// Title.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub title: Option<String>,
    /// Goal kind.
    #[serde(default, rename = "type")]
    #[serde_as(as = "DefaultOnError")]
    pub goal_type: Option<String>,
    /// Target amount.
    #[serde(default)]
    pub target: Option<AmountInput>,
    /// Saved amount.
    #[serde(default)]
    pub saved: Option<AmountInput>,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub deadline: Option<String>,
}

/// Progress of a goal on a given day.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Saved as a share of target, two decimal places; may exceed 100.
    #[serde_as(as = "AmountNumber")]
    pub percent: Decimal,
    /// Amount still to save, never negative.
    #[serde_as(as = "AmountNumber")]
    pub remaining: Decimal,
    /// Calendar months until the deadline, never negative.
    pub months_left: u32,
}

/// A goal with its progress, as listed to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalView {
    /// The goal.
    #[serde(flatten)]
    pub goal: Goal,
    /// Progress as of today.
    pub progress: GoalProgress,
}
