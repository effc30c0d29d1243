//! Profile routes for the authenticated user.

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post, put},
};
use finguru_core::profile::{IncomeDraft, OnboardingDraft, ProfileView};
use tracing::info;

use crate::error::failure;
use crate::AppState;
use crate::middleware::{AppJson, AuthUser};

/// Creates the profile routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/me", get(get_profile))
        .route("/users/me/onboarding", post(complete_onboarding))
        .route("/users/me/income", put(update_income))
}

async fn get_profile(State(state): State<AppState>, auth: AuthUser) -> impl IntoResponse {
    match state.profiles.get_profile(auth.user_id()).await {
        Ok(profile) => Json(ProfileView::from(profile)).into_response(),
        Err(e) => failure("get_profile", auth.user_id(), e),
    }
}

async fn complete_onboarding(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(draft): AppJson<OnboardingDraft>,
) -> impl IntoResponse {
    match state.profiles.complete_onboarding(auth.claims(), &draft).await {
        Ok(profile) => {
            info!(user_id = %auth.user_id(), "Onboarding completed");
            Json(ProfileView::from(profile)).into_response()
        }
        Err(e) => failure("complete_onboarding", auth.user_id(), e),
    }
}

async fn update_income(
    State(state): State<AppState>,
    auth: AuthUser,
    AppJson(draft): AppJson<IncomeDraft>,
) -> impl IntoResponse {
    match state.profiles.update_income(auth.user_id(), &draft).await {
        Ok(profile) => Json(ProfileView::from(profile)).into_response(),
        Err(e) => failure("update_income", auth.user_id(), e),
    }
}
