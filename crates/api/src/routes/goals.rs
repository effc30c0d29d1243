//! Savings goal routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use finguru_core::goal::{GoalDraft, GoalView, goal_progress};
use tracing::info;

use crate::error::failure;
use crate::AppState;
use crate::middleware::{AppJson, AuthUser};

/// Creates the goal routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new().route("/goals", get(list_goals).post(add_goal))
}

/// Goals by deadline with progress as of today; starter goals when empty.
async fn list_goals(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    match state.goals.list_goals(auth.user_id()).await {
        Ok(goals) => {
            let today = Utc::now().date_naive();
            let views: Vec<GoalView> = goals
                .into_iter()
                .map(|goal| GoalView {
                    progress: goal_progress(&goal, today),
                    goal,
                })
                .collect();
            Json(views).into_response()
        }
        Err(e) => failure("list_goals", auth.user_id(), e),
    }
}

async fn add_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(draft): AppJson<GoalDraft>,
) -> impl IntoResponse {
    match state.goals.add_goal(auth.user_id(), &draft).await {
        Ok(goal) => {
            info!(user_id = %auth.user_id(), goal_id = %goal.id, "Goal created");
            (StatusCode::CREATED, Json(goal)).into_response()
        }
        Err(e) => failure("add_goal", auth.user_id(), e),
    }
}
