//! "Chat about this row" hand-off.
//!
//! The dashboard only builds the prompt and asks the navigator to open the
//! chat route; the chat request itself belongs to the receiving page.

use std::sync::Mutex;

use crate::budget::{DashboardRow, Taxonomy};

use super::format::{AmountFormat, signed_percent};

/// Receives route transitions emitted by the dashboard.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigates to `route` (path plus encoded query string).
    fn navigate(&self, route: &str);
}

/// Navigator that records every route, for tests and server responses.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes navigated to so far, oldest first.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.routes
            .lock()
            .map(|routes| routes.clone())
            .unwrap_or_default()
    }

    /// The most recent route.
    #[must_use]
    pub fn last_route(&self) -> Option<String> {
        self.routes().pop()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        if let Ok(mut routes) = self.routes.lock() {
            routes.push(route.to_string());
        }
    }
}

/// Natural-language prompt about one dashboard row.
#[must_use]
pub fn row_prompt(
    row: &DashboardRow,
    taxonomy: Taxonomy,
    fiscal_year: &str,
    format: &AmountFormat,
) -> String {
    format!(
        "Tell me about the {name} budget ({taxonomy} view): {amount} in {fiscal_year}, \
         a {change} change from the prior year.",
        name = row.name,
        taxonomy = taxonomy.label(),
        amount = format.full(row.amount),
        change = signed_percent(row.yoy_change),
    )
}

/// Route carrying `prompt` as a URL-encoded `prompt` query parameter.
#[must_use]
pub fn chat_route(base: &str, prompt: &str) -> String {
    format!("{base}?prompt={}", urlencoding::encode(prompt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn education() -> DashboardRow {
        DashboardRow {
            name: "Education".to_string(),
            amount: dec!(1200000),
            yoy_change: dec!(20),
            pct_of_total: dec!(60),
        }
    }

    #[test]
    fn test_row_prompt() {
        let prompt = row_prompt(
            &education(),
            Taxonomy::Function,
            "2026-27",
            &AmountFormat::default(),
        );
        assert_eq!(
            prompt,
            "Tell me about the Education budget (Function view): $1,200,000 in 2026-27, \
             a +20.0% change from the prior year."
        );
    }

    #[test]
    fn test_chat_route_encodes_prompt() {
        let route = chat_route("/chat", "Health & Safety: $1,000 +5.0%");
        assert_eq!(
            route,
            "/chat?prompt=Health%20%26%20Safety%3A%20%241%2C000%20%2B5.0%25"
        );
    }

    #[test]
    fn test_recording_navigator() {
        let navigator = RecordingNavigator::new();
        navigator.navigate("/chat?prompt=a");
        navigator.navigate("/chat?prompt=b");

        assert_eq!(navigator.routes().len(), 2);
        assert_eq!(navigator.last_route().as_deref(), Some("/chat?prompt=b"));
    }
}
