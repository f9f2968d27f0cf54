//! One-shot loading of budget line items for a dashboard session.
//!
//! A loader makes a single fetch attempt. A failure leaves the previous
//! snapshot in place and records the error; nothing is retried. Dropping
//! the loader cancels an in-flight fetch so a late response never lands.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::aggregation::BudgetSnapshot;
use super::error::BudgetError;
use super::source::{BudgetLineSource, LineItemQuery};

/// Lifecycle of the single fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadState {
    /// No fetch attempted yet.
    Idle,
    /// Fetch in flight.
    Loading,
    /// Fetch succeeded.
    Ready,
    /// Fetch failed, timed out or was cancelled.
    Failed,
}

/// Fetches line items once and holds the resulting snapshot.
pub struct BudgetLoader {
    source: Arc<dyn BudgetLineSource>,
    query: LineItemQuery,
    timeout: Option<Duration>,
    cancel: CancellationToken,
    state: LoadState,
    snapshot: Arc<BudgetSnapshot>,
    error: Option<BudgetError>,
}

impl BudgetLoader {
    /// Creates a loader that will fetch every line item from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn BudgetLineSource>) -> Self {
        Self {
            source,
            query: LineItemQuery::all(),
            timeout: None,
            cancel: CancellationToken::new(),
            state: LoadState::Idle,
            snapshot: Arc::new(BudgetSnapshot::empty()),
            error: None,
        }
    }

    /// Narrows the fetch, e.g. to the two most recent fiscal years.
    #[must_use]
    pub fn with_query(mut self, query: LineItemQuery) -> Self {
        self.query = query;
        self
    }

    /// Bounds the fetch duration. A zero duration disables the bound.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = (!timeout.is_zero()).then_some(timeout);
        self
    }

    /// Token that aborts the fetch when cancelled.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Aborts an in-flight fetch.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LoadState {
        self.state
    }

    /// True until the single fetch has settled.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Idle | LoadState::Loading)
    }

    /// Last successfully loaded snapshot (empty on a cold start).
    #[must_use]
    pub fn snapshot(&self) -> Arc<BudgetSnapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Error from the fetch, if it failed.
    #[must_use]
    pub const fn error(&self) -> Option<&BudgetError> {
        self.error.as_ref()
    }

    /// Performs the fetch. Later calls return the settled state without fetching again.
    pub async fn load(&mut self) -> LoadState {
        if self.state != LoadState::Idle {
            debug!(state = ?self.state, "Budget loader already ran, skipping fetch");
            return self.state;
        }

        self.state = LoadState::Loading;
        match self.fetch().await {
            Ok(snapshot) => {
                info!(
                    rows = snapshot.items().len(),
                    years = snapshot.years().len(),
                    current_year = snapshot.current_year().unwrap_or("-"),
                    "Loaded budget line items"
                );
                self.snapshot = Arc::new(snapshot);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                warn!(error = %e, "Budget line item fetch failed");
                self.error = Some(e);
                self.state = LoadState::Failed;
            }
        }
        self.state
    }

    async fn fetch(&self) -> Result<BudgetSnapshot, BudgetError> {
        let request = self.source.fetch_line_items(&self.query);
        let bounded = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, request)
                    .await
                    .unwrap_or_else(|_| Err(BudgetError::Timeout(limit))),
                None => request.await,
            }
        };

        let items = tokio::select! {
            biased;
            () = self.cancel.cancelled() => return Err(BudgetError::Cancelled),
            result = bounded => result?,
        };

        Ok(BudgetSnapshot::new(items))
    }
}

impl Drop for BudgetLoader {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl std::fmt::Debug for BudgetLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetLoader")
            .field("query", &self.query)
            .field("timeout", &self.timeout)
            .field("state", &self.state)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}
