//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST routes rendering the budget dashboard
//! - Error-to-response mapping

pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use statehouse_core::budget::BudgetLineSource;
use statehouse_core::dashboard::{AmountFormat, DashboardSession};
use statehouse_shared::DashboardConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where budget line items are read from.
    pub source: Arc<dyn BudgetLineSource>,
    /// Dashboard presentation settings.
    pub dashboard: Arc<DashboardConfig>,
}

impl AppState {
    /// Creates application state.
    #[must_use]
    pub fn new(source: Arc<dyn BudgetLineSource>, dashboard: DashboardConfig) -> Self {
        Self {
            source,
            dashboard: Arc::new(dashboard),
        }
    }

    /// Opens a dashboard session. Each request is its own mount with its own fetch.
    #[must_use]
    pub fn session(&self) -> DashboardSession {
        DashboardSession::new(Arc::clone(&self.source))
            .with_timeout(Duration::from_secs(self.dashboard.fetch_timeout_secs))
            .with_format(AmountFormat::new(self.dashboard.currency_symbol.clone()))
            .with_chat_route(self.dashboard.chat_route.clone())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
