//! User profile repository.

use async_trait::async_trait;
use chrono::Utc;
use finguru_core::profile::UserProfile;
use finguru_core::store::{ProfileStore, StoreError};
use finguru_shared::types::UserId;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::{corrupt, unavailable};
use crate::entities::user_profiles;

/// PostgreSQL-backed [`ProfileStore`].
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    db: DatabaseConnection,
}

impl ProfileRepository {
    /// Creates a new profile repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_profile(model: user_profiles::Model) -> Result<UserProfile, StoreError> {
    let uid = UserId::parse(model.user_id).map_err(|e| corrupt("user_profiles", e))?;
    let financial_goals: Vec<String> =
        serde_json::from_value(model.financial_goals).map_err(|e| corrupt("user_profiles", e))?;
    Ok(UserProfile {
        uid,
        email: model.email,
        display_name: model.display_name,
        monthly_income: model.monthly_income,
        estimated_monthly_expenses: model.estimated_monthly_expenses,
        financial_goals,
        onboarding_completed: model.onboarding_completed,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn get_profile(&self, user: &UserId) -> Result<Option<UserProfile>, StoreError> {
        user_profiles::Entity::find_by_id(user.as_str())
            .one(&self.db)
            .await
            .map_err(|e| unavailable("get_profile", e))?
            .map(to_profile)
            .transpose()
    }

    async fn save_profile(&self, profile: UserProfile) -> Result<UserProfile, StoreError> {
        let row = user_profiles::ActiveModel {
            user_id: Set(profile.uid.as_str().to_string()),
            email: Set(profile.email),
            display_name: Set(profile.display_name),
            monthly_income: Set(profile.monthly_income),
            estimated_monthly_expenses: Set(profile.estimated_monthly_expenses),
            financial_goals: Set(serde_json::json!(profile.financial_goals)),
            onboarding_completed: Set(profile.onboarding_completed),
            created_at: Set(profile.created_at.into()),
            updated_at: Set(profile.updated_at.into()),
        };

        let model = user_profiles::Entity::insert(row)
            .on_conflict(
                OnConflict::column(user_profiles::Column::UserId)
                    .update_columns([
                        user_profiles::Column::Email,
                        user_profiles::Column::DisplayName,
                        user_profiles::Column::MonthlyIncome,
                        user_profiles::Column::EstimatedMonthlyExpenses,
                        user_profiles::Column::FinancialGoals,
                        user_profiles::Column::OnboardingCompleted,
                        user_profiles::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| unavailable("save_profile", e))?;

        to_profile(model)
    }

    async fn update_income(
        &self,
        user: &UserId,
        monthly_income: Decimal,
    ) -> Result<Option<UserProfile>, StoreError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let updated = user_profiles::Entity::update_many()
            .col_expr(user_profiles::Column::MonthlyIncome, Expr::value(monthly_income))
            .col_expr(user_profiles::Column::UpdatedAt, Expr::value(now))
            .filter(user_profiles::Column::UserId.eq(user.as_str()))
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| unavailable("update_income", e))?;

        updated.into_iter().next().map(to_profile).transpose()
    }
}
