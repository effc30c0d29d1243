//! Budget routes: merged view, upsert by category and the overview page.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use finguru_core::budget::{BudgetDraft, BudgetError, BudgetOverview};
use tracing::{error, info};

use crate::error::{ApiError, failure};
use crate::AppState;
use crate::middleware::{AppJson, AuthUser};

/// Creates the budget routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budgets", get(list_budgets).post(upsert_budget))
        .route("/budgets/overview", get(budget_overview))
}

/// One item per default category, stored overrides in place of defaults.
async fn list_budgets(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    match state.budgets.merged_budgets(auth.user_id()).await {
        Ok(items) => Json(items).into_response(),
        Err(e) => failure("list_budgets", auth.user_id(), e),
    }
}

async fn upsert_budget(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(draft): AppJson<BudgetDraft>,
) -> impl IntoResponse {
    let user_id = auth.user_id();
    match state.budgets.upsert_budget(user_id, &draft).await {
        Ok(item) => {
            info!(user_id = %user_id, category = %item.category, planned = %item.planned, "Budget saved");
            (StatusCode::CREATED, Json(item)).into_response()
        }
        Err(BudgetError::StorageUnavailable(e)) => {
            error!(
                operation = "upsert_budget",
                user_id = %user_id,
                category = draft.category.as_deref().unwrap_or_default(),
                error = %e,
                "Failed to upsert budget"
            );
            ApiError::from(BudgetError::StorageUnavailable(e)).into_response()
        }
        Err(e) => failure("upsert_budget", user_id, e),
    }
}

async fn budget_overview(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    let user_id = auth.user_id();
    let budgets = match state.budgets.merged_budgets(user_id).await {
        Ok(budgets) => budgets,
        Err(e) => return failure("budget_overview", user_id, e),
    };
    let expenses = match state.expenses.list_expenses(user_id).await {
        Ok(expenses) => expenses,
        Err(e) => return failure("budget_overview", user_id, e),
    };
    let income = match state.profiles.monthly_income(user_id).await {
        Ok(income) => income,
        Err(e) => return failure("budget_overview", user_id, e),
    };

    Json(BudgetOverview::build(budgets, &expenses, income)).into_response()
}
