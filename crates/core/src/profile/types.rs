//! Profile data types.

use chrono::{DateTime, Utc};
use finguru_shared::types::{AmountInput, AmountNumber, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};

/// A user's financial profile, created by onboarding.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Owner.
    pub uid: UserId,
    /// Email from the identity provider.
    pub email: Option<String>,
    /// Display name from the identity provider.
    pub display_name: Option<String>,
    /// Monthly income.
    #[serde_as(as = "AmountNumber")]
    pub monthly_income: Decimal,
    /// Estimated monthly expenses given at onboarding.
    #[serde_as(as = "AmountNumber")]
    pub estimated_monthly_expenses: Decimal,
    /// Goals picked at onboarding.
    pub financial_goals: Vec<String>,
    /// Set once onboarding finished.
    pub onboarding_completed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Profile plus derived figures.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
    /// Stored profile.
    #[serde(flatten)]
    pub profile: UserProfile,
    /// Whole-percent savings rate, when it is defined.
    #[serde_as(as = "Option<AmountNumber>")]
    pub savings_rate: Option<Decimal>,
}

impl From<UserProfile> for ProfileView {
    fn from(profile: UserProfile) -> Self {
        let savings_rate = super::savings_rate(
            profile.monthly_income,
            profile.estimated_monthly_expenses,
        );
        Self {
            profile,
            savings_rate,
        }
    }
}

/// Onboarding payload.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingDraft {
    /// Goals picked by the user.
    #[serde(default)]
    #[serde_as(as = "DefaultOnError")]
    pub selected_goals: Option<Vec<String>>,
    /// Monthly income.
    #[serde(default)]
    pub monthly_income: Option<AmountInput>,
    /// Estimated monthly expenses.
    #[serde(default)]
    pub monthly_expenses: Option<AmountInput>,
}

/// Income update payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeDraft {
    /// New monthly income.
    #[serde(default)]
    pub monthly_income: Option<AmountInput>,
}
