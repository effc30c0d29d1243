//! Profile operations.

use std::sync::Arc;

use chrono::Utc;
use finguru_shared::Claims;
use finguru_shared::types::{AmountInput, UserId};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::store::ProfileStore;

use super::error::ProfileError;
use super::types::{IncomeDraft, OnboardingDraft, UserProfile};

/// Share of income left after expenses, in whole percent.
///
/// Defined only when income is positive and expenses lie in `0..=income`.
#[must_use]
pub fn savings_rate(income: Decimal, expenses: Decimal) -> Option<Decimal> {
    if income <= Decimal::ZERO || expenses < Decimal::ZERO || expenses > income {
        return None;
    }
    let rate = (income - expenses) / income * Decimal::ONE_HUNDRED;
    Some(rate.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Profile operations over a store.
pub struct ProfileService {
    store: Arc<dyn ProfileStore>,
}

impl ProfileService {
    /// Creates the service.
    #[must_use]
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self { store }
    }

    /// Fetches the caller's profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::NotFound` when there is none and
    /// `ProfileError::StorageUnavailable` if the store cannot be read.
    pub async fn get_profile(&self, user: &UserId) -> Result<UserProfile, ProfileError> {
        self.store
            .get_profile(user)
            .await?
            .ok_or(ProfileError::NotFound)
    }

    /// Monthly income, if the user has a profile.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::StorageUnavailable` if the store cannot be read.
    pub async fn monthly_income(&self, user: &UserId) -> Result<Option<Decimal>, ProfileError> {
        Ok(self
            .store
            .get_profile(user)
            .await?
            .map(|p| p.monthly_income))
    }

    /// Creates or updates the caller's profile from the onboarding answers.
    ///
    /// Email and display name come from the token claims.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidArgument` when no goal is selected or an
    /// amount is missing, malformed or negative.
    pub async fn complete_onboarding(
        &self,
        claims: &Claims,
        draft: &OnboardingDraft,
    ) -> Result<UserProfile, ProfileError> {
        let goals: Vec<String> = draft
            .selected_goals
            .iter()
            .flatten()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect();
        if goals.is_empty() {
            return Err(ProfileError::invalid(
                "selectedGoals",
                "select at least one goal",
            ));
        }
        let income = non_negative(draft.monthly_income.as_ref(), "monthlyIncome")?;
        let expenses = non_negative(draft.monthly_expenses.as_ref(), "monthlyExpenses")?;

        let user = claims.user_id();
        let now = Utc::now();
        let created_at = self
            .store
            .get_profile(user)
            .await?
            .map_or(now, |existing| existing.created_at);

        let profile = UserProfile {
            uid: user.clone(),
            email: claims.email.clone(),
            display_name: claims.name.clone(),
            monthly_income: income,
            estimated_monthly_expenses: expenses,
            financial_goals: goals,
            onboarding_completed: true,
            created_at,
            updated_at: now,
        };
        Ok(self.store.save_profile(profile).await?)
    }

    /// Sets the caller's monthly income.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::InvalidArgument` for a missing, malformed or
    /// negative amount and `ProfileError::NotFound` when there is no profile.
    pub async fn update_income(
        &self,
        user: &UserId,
        draft: &IncomeDraft,
    ) -> Result<UserProfile, ProfileError> {
        let income = non_negative(draft.monthly_income.as_ref(), "monthlyIncome")?;
        self.store
            .update_income(user, income)
            .await?
            .ok_or(ProfileError::NotFound)
    }
}

fn non_negative(value: Option<&AmountInput>, field: &'static str) -> Result<Decimal, ProfileError> {
    let amount = value
        .ok_or_else(|| ProfileError::invalid(field, format!("{field} is required")))?
        .to_decimal()
        .map_err(|e| ProfileError::invalid(field, e.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(ProfileError::invalid(field, format!("{field} cannot be negative")));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileView;
    use crate::store::MemoryStore;
    use chrono::Duration;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn claims(uid: &str) -> Claims {
        Claims::new(
            UserId::parse(uid).unwrap(),
            Some(format!("{uid}@example.com")),
            Some("Asha".into()),
            Utc::now() + Duration::hours(1),
        )
    }

    fn onboarding(goals: &[&str], income: &str, expenses: &str) -> OnboardingDraft {
        OnboardingDraft {
            selected_goals: Some(goals.iter().map(|g| (*g).to_string()).collect()),
            monthly_income: Some(AmountInput::Text(income.into())),
            monthly_expenses: Some(AmountInput::Text(expenses.into())),
        }
    }

    #[rstest]
    #[case(dec!(60000), dec!(45000), Some(dec!(25)))]
    #[case(dec!(3), dec!(2), Some(dec!(33)))]
    #[case(dec!(8), dec!(7), Some(dec!(13)))]
    #[case(dec!(100), dec!(100), Some(dec!(0)))]
    #[case(dec!(100), dec!(0), Some(dec!(100)))]
    #[case(dec!(0), dec!(0), None)]
    #[case(dec!(100), dec!(120), None)]
    #[case(dec!(100), dec!(-1), None)]
    fn test_savings_rate(
        #[case] income: Decimal,
        #[case] expenses: Decimal,
        #[case] expected: Option<Decimal>,
    ) {
        assert_eq!(savings_rate(income, expenses), expected);
    }

    #[tokio::test]
    async fn test_missing_profile_is_not_found() {
        let service = ProfileService::new(Arc::new(MemoryStore::new()));
        let user = UserId::parse("nobody").unwrap();

        assert!(matches!(
            service.get_profile(&user).await,
            Err(ProfileError::NotFound)
        ));
        assert_eq!(service.monthly_income(&user).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_onboarding_creates_profile_from_claims() {
        let service = ProfileService::new(Arc::new(MemoryStore::new()));
        let claims = claims("asha");

        let profile = service
            .complete_onboarding(&claims, &onboarding(&["Emergency Fund", " "], "60000", "45000"))
            .await
            .unwrap();

        assert!(profile.onboarding_completed);
        assert_eq!(profile.email.as_deref(), Some("asha@example.com"));
        assert_eq!(profile.display_name.as_deref(), Some("Asha"));
        assert_eq!(profile.financial_goals, vec!["Emergency Fund"]);
        assert_eq!(service.get_profile(claims.user_id()).await.unwrap(), profile);

        let view = ProfileView::from(profile);
        assert_eq!(view.savings_rate, Some(dec!(25)));
    }

    #[tokio::test]
    async fn test_repeat_onboarding_keeps_creation_time() {
        let service = ProfileService::new(Arc::new(MemoryStore::new()));
        let claims = claims("repeat");

        let first = service
            .complete_onboarding(&claims, &onboarding(&["Retirement"], "1000", "900"))
            .await
            .unwrap();
        let second = service
            .complete_onboarding(&claims, &onboarding(&["Vacation/Travel"], "2000", "900"))
            .await
            .unwrap();

        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.monthly_income, dec!(2000));
        assert_eq!(second.financial_goals, vec!["Vacation/Travel"]);
    }

    #[rstest]
    #[case(onboarding(&[], "100", "10"), "selectedGoals")]
    #[case(onboarding(&["Retirement"], "-100", "10"), "monthlyIncome")]
    #[case(onboarding(&["Retirement"], "100", "lots"), "monthlyExpenses")]
    #[case(onboarding(&["Retirement"], "1e18", "10"), "monthlyIncome")]
    #[tokio::test]
    async fn test_onboarding_rejections(#[case] draft: OnboardingDraft, #[case] expected: &str) {
        let store = Arc::new(MemoryStore::new());
        let service = ProfileService::new(store.clone());

        match service.complete_onboarding(&claims("bad"), &draft).await {
            Err(ProfileError::InvalidArgument { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_update_income() {
        let service = ProfileService::new(Arc::new(MemoryStore::new()));
        let claims = claims("earner");
        let user = claims.user_id();
        let income = |raw: &str| IncomeDraft {
            monthly_income: Some(AmountInput::Text(raw.into())),
        };

        assert!(matches!(
            service.update_income(user, &income("5000")).await,
            Err(ProfileError::NotFound)
        ));

        service
            .complete_onboarding(&claims, &onboarding(&["Retirement"], "4000", "3000"))
            .await
            .unwrap();
        let updated = service.update_income(user, &income("5000")).await.unwrap();
        assert_eq!(updated.monthly_income, dec!(5000));
        assert_eq!(updated.estimated_monthly_expenses, dec!(3000));

        assert!(matches!(
            service.update_income(user, &income("-1")).await,
            Err(ProfileError::InvalidArgument { .. })
        ));
    }
}
