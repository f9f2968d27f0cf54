//! Budget dashboard routes.
//!
//! Every request is one dashboard mount: a single line-item fetch followed by
//! in-memory derivation. If the client disconnects, the dropped handler
//! cancels the fetch.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use tracing::debug;

use statehouse_core::budget::{
    BudgetError, BudgetSnapshot, DrillDownRow, GrandTotals, HistoricalPoint, LoadState,
    Taxonomy, TaxonomyBreakdown,
};
use statehouse_core::dashboard::{DashboardModel, DashboardSession, RecordingNavigator};
use statehouse_shared::AppError;

use crate::{AppState, error::ApiError};

/// Creates the budget routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/budget/dashboard", get(get_dashboard))
        .route("/budget/totals", get(get_totals))
        .route("/budget/breakdown/{taxonomy}", get(get_breakdown))
        .route(
            "/budget/breakdown/{taxonomy}/drill-down",
            get(get_drill_down),
        )
        .route("/budget/history", get(get_history))
        .route("/budget/chat-link", post(create_chat_link))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the rendered dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Active tab (defaults to `function`).
    pub tab: Option<String>,
    /// Row selected for the chart.
    pub selected: Option<String>,
    /// Expanded rows, one `expanded=` parameter each.
    #[serde(default)]
    pub expanded: Vec<String>,
}

/// Query parameters for a drill-down.
#[derive(Debug, Deserialize)]
pub struct DrillDownQuery {
    /// Group to break down.
    pub group: String,
}

/// Query parameters for a historical series.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    /// Taxonomy of the group; omit with `group` for grand totals.
    pub taxonomy: Option<String>,
    /// Group to plot.
    pub group: Option<String>,
}

/// Request body for a chat link.
#[derive(Debug, Deserialize)]
pub struct ChatLinkRequest {
    /// Taxonomy the row belongs to.
    pub taxonomy: Taxonomy,
    /// Row name.
    pub row: String,
}

/// Response for a chat link.
#[derive(Debug, Serialize)]
pub struct ChatLinkResponse {
    /// Route carrying the encoded prompt.
    pub route: String,
}

// ============================================================================
// Helper Functions
// ============================================================================

fn parse_taxonomy(raw: &str) -> Result<Taxonomy, ApiError> {
    raw.parse::<Taxonomy>().map_err(ApiError::from)
}

/// Opens a session and runs its fetch, surfacing a failed fetch as an error.
async fn loaded_session(state: &AppState) -> Result<DashboardSession, ApiError> {
    let mut session = state.session();
    if session.load().await == LoadState::Failed {
        let err = session
            .loader()
            .error()
            .cloned()
            .unwrap_or_else(|| BudgetError::Fetch("unknown error".to_string()));
        return Err(err.into());
    }
    Ok(session)
}

async fn load_snapshot(state: &AppState) -> Result<Arc<BudgetSnapshot>, ApiError> {
    Ok(loaded_session(state).await?.loader().snapshot())
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /budget/dashboard
///
/// A failed fetch still renders, with the error in the banner field.
async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardModel>, ApiError> {
    let tab = query
        .tab
        .as_deref()
        .map(parse_taxonomy)
        .transpose()?
        .unwrap_or_default();

    let mut session = state.session();
    session.load().await;
    session.switch_tab(tab);

    for row in query.expanded.iter().filter(|r| !r.is_empty()) {
        if !session.state().is_expanded(row) {
            session.toggle_row(row);
        }
    }
    if let Some(row) = query.selected.as_deref().filter(|r| !r.is_empty()) {
        session.select_row(row);
    }

    Ok(Json(session.render()))
}

/// GET /budget/totals
async fn get_totals(State(state): State<AppState>) -> Result<Json<GrandTotals>, ApiError> {
    let snapshot = load_snapshot(&state).await?;
    Ok(Json(snapshot.grand_totals()))
}

/// GET /budget/breakdown/{taxonomy}
async fn get_breakdown(
    State(state): State<AppState>,
    Path(taxonomy): Path<String>,
) -> Result<Json<TaxonomyBreakdown>, ApiError> {
    let taxonomy = parse_taxonomy(&taxonomy)?;
    let snapshot = load_snapshot(&state).await?;
    Ok(Json(snapshot.breakdown(taxonomy)))
}

/// GET /budget/breakdown/{taxonomy}/drill-down?group=
async fn get_drill_down(
    State(state): State<AppState>,
    Path(taxonomy): Path<String>,
    Query(query): Query<DrillDownQuery>,
) -> Result<Json<Vec<DrillDownRow>>, ApiError> {
    let taxonomy = parse_taxonomy(&taxonomy)?;
    let snapshot = load_snapshot(&state).await?;

    if snapshot.group_amount(taxonomy, &query.group).is_none() {
        return Err(BudgetError::GroupNotFound {
            taxonomy,
            group: query.group,
        }
        .into());
    }

    debug!(%taxonomy, group = %query.group, "Computing drill-down");
    Ok(Json(snapshot.drill_down(taxonomy, &query.group)))
}

/// GET /budget/history?taxonomy=&group=
async fn get_history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoricalPoint>>, ApiError> {
    let focus = match (query.taxonomy.as_deref(), query.group.as_deref()) {
        (None, None) => None,
        (Some(taxonomy), Some(group)) => Some((parse_taxonomy(taxonomy)?, group)),
        _ => {
            return Err(AppError::Validation(
                "taxonomy and group must be given together".to_string(),
            )
            .into());
        }
    };

    let snapshot = load_snapshot(&state).await?;
    Ok(Json(snapshot.historical(focus)))
}

/// POST /budget/chat-link
async fn create_chat_link(
    State(state): State<AppState>,
    Json(request): Json<ChatLinkRequest>,
) -> Result<Json<ChatLinkResponse>, ApiError> {
    let mut session = loaded_session(&state).await?;
    session.switch_tab(request.taxonomy);

    let navigator = RecordingNavigator::new();
    let route = session.chat_about_row(&request.row, &navigator)?;
    Ok(Json(ChatLinkResponse { route }))
}
