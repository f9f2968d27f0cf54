//! A dashboard session: one mount of the budget dashboard.
//!
//! The session owns the loader and the view state. Derived views are
//! recomputed from the loaded snapshot on every call; nothing is re-fetched.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::budget::{
    BudgetError, BudgetLineSource, BudgetLoader, DrillDownRow, HistoricalPoint, LineItemQuery,
    LoadState, Taxonomy, TaxonomyBreakdown,
};

use super::chat::{Navigator, chat_route, row_prompt};
use super::format::AmountFormat;
use super::state::DashboardViewState;
use super::view::{DashboardModel, render};

const DEFAULT_CHAT_ROUTE: &str = "/chat";

/// One mounted budget dashboard.
#[derive(Debug)]
pub struct DashboardSession {
    loader: BudgetLoader,
    state: DashboardViewState,
    format: AmountFormat,
    chat_base: String,
}

impl DashboardSession {
    /// Creates a session reading from `source`. Nothing is fetched until [`Self::load`].
    #[must_use]
    pub fn new(source: Arc<dyn BudgetLineSource>) -> Self {
        Self {
            loader: BudgetLoader::new(source),
            state: DashboardViewState::default(),
            format: AmountFormat::default(),
            chat_base: DEFAULT_CHAT_ROUTE.to_string(),
        }
    }

    /// Narrows the line-item fetch.
    #[must_use]
    pub fn with_query(mut self, query: LineItemQuery) -> Self {
        self.loader = self.loader.with_query(query);
        self
    }

    /// Bounds the line-item fetch.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.loader = self.loader.with_timeout(timeout);
        self
    }

    /// Uses `format` for every amount.
    #[must_use]
    pub fn with_format(mut self, format: AmountFormat) -> Self {
        self.format = format;
        self
    }

    /// Route the chat action navigates to.
    #[must_use]
    pub fn with_chat_route(mut self, route: impl Into<String>) -> Self {
        self.chat_base = route.into();
        self
    }

    /// Runs the single fetch for this session.
    pub async fn load(&mut self) -> LoadState {
        self.loader.load().await
    }

    /// Token that aborts the fetch, for the code path that unmounts the session.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.loader.cancellation_token()
    }

    /// The underlying loader.
    #[must_use]
    pub const fn loader(&self) -> &BudgetLoader {
        &self.loader
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &DashboardViewState {
        &self.state
    }

    /// Switches the active taxonomy tab.
    pub fn switch_tab(&mut self, taxonomy: Taxonomy) {
        debug!(from = %self.state.active_tab(), to = %taxonomy, "Switching dashboard tab");
        self.state.switch_tab(taxonomy);
    }

    /// Expands or collapses a row. Returns whether it is now expanded.
    pub fn toggle_row(&mut self, row: &str) -> bool {
        self.state.toggle_expanded(row)
    }

    /// Selects a row for the chart, or clears it if already selected.
    pub fn select_row(&mut self, row: &str) {
        self.state.select_row(row);
    }

    /// Rows of the active tab.
    #[must_use]
    pub fn breakdown(&self) -> TaxonomyBreakdown {
        self.loader.snapshot().breakdown(self.state.active_tab())
    }

    /// Agency breakdown of one row in the active tab.
    #[must_use]
    pub fn drill_down(&self, row: &str) -> Vec<DrillDownRow> {
        self.loader
            .snapshot()
            .drill_down(self.state.active_tab(), row)
    }

    /// Chart series: the selected row's history, or grand totals.
    #[must_use]
    pub fn chart_series(&self) -> Vec<HistoricalPoint> {
        self.loader.snapshot().historical(self.state.chart_focus())
    }

    /// Builds the full view model.
    #[must_use]
    pub fn render(&self) -> DashboardModel {
        render(
            &self.loader.snapshot(),
            &self.state,
            &self.format,
            self.loader.is_loading(),
            self.loader.error(),
        )
    }

    /// Hands a prompt about `row` to `navigator` and returns the route used.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::GroupNotFound` if the active tab has no such row.
    pub fn chat_about_row(
        &self,
        row: &str,
        navigator: &dyn Navigator,
    ) -> Result<String, BudgetError> {
        let snapshot = self.loader.snapshot();
        let taxonomy = self.state.active_tab();
        let found = snapshot
            .breakdown(taxonomy)
            .rows
            .into_iter()
            .find(|r| r.name == row)
            .ok_or_else(|| BudgetError::GroupNotFound {
                taxonomy,
                group: row.to_string(),
            })?;

        let year = snapshot.current_year().unwrap_or("the current fiscal year");
        let prompt = row_prompt(&found, taxonomy, year, &self.format);
        let route = chat_route(&self.chat_base, &prompt);
        debug!(row, %taxonomy, "Navigating to chat");
        navigator.navigate(&route);
        Ok(route)
    }
}
