//! FinGuru API Server
//!
//! Main entry point for the FinGuru backend service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use finguru_api::timeline::HttpTimelineClient;
use finguru_api::{AppState, Stores, create_router};
use finguru_core::store::MemoryStore;
use finguru_db::{
    BudgetRepository, ExpenseRepository, GoalRepository, ProfileRepository, connect_with,
};
use finguru_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finguru=debug,finguru_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("failed to load configuration")?;

    let stores = match &config.database.url {
        Some(url) => {
            let db = connect_with(url, &config.database).await?;
            info!(
                max_connections = config.database.max_connections,
                "Connected to database"
            );
            Stores {
                budgets: Arc::new(BudgetRepository::new(db.clone())),
                expenses: Arc::new(ExpenseRepository::new(db.clone())),
                goals: Arc::new(GoalRepository::new(db.clone())),
                profiles: Arc::new(ProfileRepository::new(db)),
            }
        }
        None => {
            warn!("No database URL configured, data is kept in memory");
            Stores::in_memory(&Arc::new(MemoryStore::new()))
        }
    };

    let insights = HttpTimelineClient::new(&config.timeline)?;
    info!(
        base_url = %config.timeline.base_url,
        timeout_secs = config.timeline.timeout_secs,
        "Timeline insight client configured"
    );

    let jwt_service = JwtService::new(JwtConfig {
        secret: config.jwt.secret.clone(),
        token_expiry_secs: i64::try_from(config.jwt.token_expiry_secs)
            .context("jwt.token_expiry_secs is too large")?,
    });

    let state = AppState::new(stores, Arc::new(insights), Arc::new(jwt_service));
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
