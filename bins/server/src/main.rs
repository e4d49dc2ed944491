//! Balance API Server
//!
//! Main entry point for the balance service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use balance_api::{AppState, ReportStore, create_router};
use balance_db::{PgLedger, connect, migrate};
use balance_shared::AppConfig;

const DEFAULT_LOG_FILTER: &str =
    "balance=debug,balance_api=debug,balance_db=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database
    let db = connect(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(
        max_connections = config.database.max_connections,
        "Connected to database"
    );

    if config.database.auto_migrate {
        migrate(&db).await.context("Failed to run migrations")?;
    }

    // Create application state
    let reports = ReportStore::from_config(&config.reports);
    info!(dir = %config.reports.dir, "Report storage configured");
    let state = AppState {
        ledger: Arc::new(PgLedger::new(db)),
        reports: Arc::new(reports),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
