//! Statehouse API Server
//!
//! Main entry point for the budget dashboard service.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use statehouse_api::{AppState, create_router};
use statehouse_core::budget::BudgetLineSource;
use statehouse_db::{BudgetLineItemRepository, RestBudgetSource, connect_pool};
use statehouse_shared::{AppConfig, DataSourceConfig, DataSourceKind};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(8);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "statehouse=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    let source = build_source(
        &config.source,
        Duration::from_secs(config.dashboard.fetch_timeout_secs),
    )
    .await?;

    // Create application state
    let state = AppState::new(source, config.dashboard.clone());

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_source(
    config: &DataSourceConfig,
    timeout: Duration,
) -> anyhow::Result<Arc<dyn BudgetLineSource>> {
    match config.kind {
        DataSourceKind::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("source.database_url is required")?;
            let db = connect_pool(
                url,
                config.max_connections,
                config.min_connections,
                CONNECT_TIMEOUT,
            )
            .await?;
            info!(
                max_connections = config.max_connections,
                "Connected to database"
            );
            Ok(Arc::new(BudgetLineItemRepository::new(db)))
        }
        DataSourceKind::Rest => {
            let url = config
                .rest_url
                .as_deref()
                .context("source.rest_url is required")?;
            let source =
                RestBudgetSource::new(url, &config.table, config.api_key.clone(), timeout)?;
            info!(endpoint = %source.endpoint(), "Using REST budget source");
            Ok(Arc::new(source))
        }
    }
}
