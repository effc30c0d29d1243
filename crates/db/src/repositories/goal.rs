//! Goal repository.

use async_trait::async_trait;
use chrono::Utc;
use finguru_core::goal::{Goal, GoalItemId, NewGoal};
use finguru_core::store::{GoalStore, StoreError};
use finguru_shared::types::{GoalId, UserId};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::unavailable;
use crate::entities::goals;

/// PostgreSQL-backed [`GoalStore`].
#[derive(Debug, Clone)]
pub struct GoalRepository {
    db: DatabaseConnection,
}

impl GoalRepository {
    /// Creates a new goal repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<goals::Model> for Goal {
    fn from(model: goals::Model) -> Self {
        Self {
            id: GoalItemId::Stored(GoalId::from_uuid(model.id)),
            title: model.title,
            goal_type: model.goal_type,
            target: model.target,
            saved: model.saved,
            deadline: model.deadline,
        }
    }
}

#[async_trait]
impl GoalStore for GoalRepository {
    async fn insert_goal(&self, user: &UserId, goal: NewGoal) -> Result<Goal, StoreError> {
        let row = goals::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(user.as_str().to_string()),
            title: Set(goal.title),
            goal_type: Set(goal.goal_type),
            target: Set(goal.target),
            saved: Set(goal.saved),
            deadline: Set(goal.deadline),
            created_at: Set(Utc::now().into()),
        };

        row.insert(&self.db)
            .await
            .map(Goal::from)
            .map_err(|e| unavailable("insert_goal", e))
    }

    async fn list_goals(&self, user: &UserId) -> Result<Vec<Goal>, StoreError> {
        let rows = goals::Entity::find()
            .filter(goals::Column::UserId.eq(user.as_str()))
            .order_by_asc(goals::Column::Deadline)
            .order_by_asc(goals::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| unavailable("list_goals", e))?;
        Ok(rows.into_iter().map(Goal::from).collect())
    }
}
