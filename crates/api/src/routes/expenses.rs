//! Expense routes: ledger, category breakdown and timeline insight.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use finguru_core::expense::{ExpenseDraft, TimelineInsight};
use serde::Serialize;
use tracing::{info, warn};

use crate::error::failure;
use crate::AppState;
use crate::middleware::{AppJson, AuthUser};

/// Creates the expense routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", get(list_expenses).post(add_expense))
        .route("/expenses/breakdown", get(expense_breakdown))
        .route("/expenses/timeline", get(timeline_insight))
}

/// Timeline insight response.
#[derive(Debug, Serialize)]
pub struct InsightResponse {
    /// One-line insight or fallback text.
    pub insight: String,
}

async fn list_expenses(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    match state.expenses.list_expenses(auth.user_id()).await {
        Ok(expenses) => Json(expenses).into_response(),
        Err(e) => failure("list_expenses", auth.user_id(), e),
    }
}

async fn add_expense(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(draft): AppJson<ExpenseDraft>,
) -> impl IntoResponse {
    match state.expenses.add_expense(auth.user_id(), &draft).await {
        Ok(expense) => {
            info!(user_id = %auth.user_id(), expense_id = %expense.id, "Expense recorded");
            (StatusCode::CREATED, Json(expense)).into_response()
        }
        Err(e) => failure("add_expense", auth.user_id(), e),
    }
}

async fn expense_breakdown(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    match state.expenses.breakdown(auth.user_id()).await {
        Ok(breakdown) => Json(breakdown).into_response(),
        Err(e) => failure("expense_breakdown", auth.user_id(), e),
    }
}

/// Always 200 unless the ledger itself cannot be read.
async fn timeline_insight(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    match state.expenses.timeline_insight(auth.user_id()).await {
        Ok(outcome) => {
            if let TimelineInsight::Unavailable(e) = &outcome {
                warn!(user_id = %auth.user_id(), error = %e, "Timeline service failed");
            }
            Json(InsightResponse {
                insight: outcome.message().to_string(),
            })
            .into_response()
        }
        Err(e) => failure("timeline_insight", auth.user_id(), e),
    }
}
