//! Budget and expense categories.
//!
//! Both enumerations are closed. The expense → budget mapping is an
//! exhaustive `match`, so adding a variant on either side fails to compile
//! until the mapping is updated.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category used for budget planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetCategory {
    /// Groceries and eating out.
    Food,
    /// Rent or mortgage.
    Rent,
    /// Commute, fuel and fares.
    Transport,
    /// Utilities and subscriptions.
    Bills,
    /// Entertainment.
    Fun,
    /// Savings allocation; never spend-tracked.
    Savings,
}

impl BudgetCategory {
    /// Every budget category in default display order.
    pub const ALL: [Self; 6] = [
        Self::Food,
        Self::Rent,
        Self::Transport,
        Self::Bills,
        Self::Fun,
        Self::Savings,
    ];

    /// Canonical name used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Rent => "Rent",
            Self::Transport => "Transport",
            Self::Bills => "Bills",
            Self::Fun => "Fun",
            Self::Savings => "Savings",
        }
    }

    /// Display label with its icon, as older clients sent it.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Food => "Food 🍕",
            Self::Rent => "Rent 🏠",
            Self::Transport => "Transport 🚗",
            Self::Bills => "Bills 💼",
            Self::Fun => "Fun 🎉",
            Self::Savings => "Savings 💰",
        }
    }

    /// Baseline planned amount before the user saves an override.
    #[must_use]
    pub fn default_planned(self) -> Decimal {
        let amount: u32 = match self {
            Self::Food => 12_000,
            Self::Rent => 15_000,
            Self::Transport | Self::Bills => 7_000,
            Self::Fun => 5_000,
            Self::Savings => 16_500,
        };
        Decimal::from(amount)
    }

    /// Whether spending is tracked against this category's plan.
    #[must_use]
    pub const fn is_spend_tracked(self) -> bool {
        !matches!(self, Self::Savings)
    }
}

impl fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognised category names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for BudgetCategory {
    type Err = UnknownCategory;

    /// Accepts the canonical name (any case) or the legacy icon label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed) || c.label() == trimmed)
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

/// Category chosen when logging an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    /// Food.
    Food,
    /// Housing.
    Housing,
    /// Transportation.
    Transportation,
    /// Bills.
    Bills,
    /// Entertainment.
    Entertainment,
    /// Anything else; not tracked against a budget.
    Other,
}

impl ExpenseCategory {
    /// Every expense category.
    pub const ALL: [Self; 6] = [
        Self::Food,
        Self::Housing,
        Self::Transportation,
        Self::Bills,
        Self::Entertainment,
        Self::Other,
    ];

    /// Canonical name used on the wire and in storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Housing => "Housing",
            Self::Transportation => "Transportation",
            Self::Bills => "Bills",
            Self::Entertainment => "Entertainment",
            Self::Other => "Other",
        }
    }

    /// Budget category this expense counts against, if any.
    #[must_use]
    pub const fn budget_category(self) -> Option<BudgetCategory> {
        match self {
            Self::Food => Some(BudgetCategory::Food),
            Self::Housing => Some(BudgetCategory::Rent),
            Self::Transportation => Some(BudgetCategory::Transport),
            Self::Bills => Some(BudgetCategory::Bills),
            Self::Entertainment => Some(BudgetCategory::Fun),
            Self::Other => None,
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}
