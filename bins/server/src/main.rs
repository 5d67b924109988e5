//! Weektally API Server
//!
//! Main entry point for the weekly expense tracker.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weektally_api::{AppState, create_router};
use weektally_db::{connect_with, migrate};
use weektally_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weektally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database and bring the schema up to date
    let db = connect_with(&config.database)
        .await
        .context("Failed to connect to database")?;
    info!(url = %config.database.url, "Connected to database");
    migrate(&db).await.context("Failed to run migrations")?;

    // Create router
    let app = create_router(AppState::new(db));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
