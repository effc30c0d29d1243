//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api`
//! - Bearer-token authentication middleware
//! - Error-to-response mapping
//! - The HTTP client for the timeline insight service

pub mod error;
pub mod middleware;
pub mod routes;
pub mod timeline;

use std::sync::Arc;

use axum::Router;
use finguru_core::budget::BudgetReconciler;
use finguru_core::expense::{ExpenseService, TimelineInsights};
use finguru_core::goal::GoalService;
use finguru_core::profile::ProfileService;
use finguru_core::store::{BudgetStore, ExpenseStore, GoalStore, MemoryStore, ProfileStore};
use finguru_shared::JwtService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Store implementations backing the services.
#[derive(Clone)]
pub struct Stores {
    /// Budget overrides.
    pub budgets: Arc<dyn BudgetStore>,
    /// Expense ledger.
    pub expenses: Arc<dyn ExpenseStore>,
    /// Savings goals.
    pub goals: Arc<dyn GoalStore>,
    /// User profiles.
    pub profiles: Arc<dyn ProfileStore>,
}

impl Stores {
    /// Every store served by one in-memory instance.
    #[must_use]
    pub fn in_memory(store: &Arc<MemoryStore>) -> Self {
        Self {
            budgets: store.clone(),
            expenses: store.clone(),
            goals: store.clone(),
            profiles: store.clone(),
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Budget reconciler.
    pub budgets: Arc<BudgetReconciler>,
    /// Expense ledger operations.
    pub expenses: Arc<ExpenseService>,
    /// Goal operations.
    pub goals: Arc<GoalService>,
    /// Profile operations.
    pub profiles: Arc<ProfileService>,
    /// JWT service for token verification.
    pub jwt_service: Arc<JwtService>,
}

impl AppState {
    /// Wires the services over the given stores.
    #[must_use]
    pub fn new(
        stores: Stores,
        insights: Arc<dyn TimelineInsights>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            budgets: Arc::new(BudgetReconciler::new(stores.budgets)),
            expenses: Arc::new(ExpenseService::new(stores.expenses, insights)),
            goals: Arc::new(GoalService::new(stores.goals)),
            profiles: Arc::new(ProfileService::new(stores.profiles)),
            jwt_service,
        }
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
