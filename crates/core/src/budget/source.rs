//! Read-only access to the external budget line-items table.

use async_trait::async_trait;

use super::error::BudgetError;
use super::types::{BudgetLineItem, Taxonomy};

/// Filters pushed down to the table store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineItemQuery {
    /// Restrict to these fiscal year labels.
    pub fiscal_years: Option<Vec<String>>,
    /// Restrict to one group of one taxonomy.
    pub taxonomy_filter: Option<(Taxonomy, String)>,
}

impl LineItemQuery {
    /// Fetch every line item.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restricts the query to the given fiscal years.
    #[must_use]
    pub fn for_years<I, S>(mut self, years: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fiscal_years = Some(years.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts the query to one taxonomy group.
    #[must_use]
    pub fn in_group(mut self, taxonomy: Taxonomy, group: impl Into<String>) -> Self {
        self.taxonomy_filter = Some((taxonomy, group.into()));
        self
    }

    /// Returns true if `item` passes every filter.
    #[must_use]
    pub fn matches(&self, item: &BudgetLineItem) -> bool {
        let year_ok = self
            .fiscal_years
            .as_ref()
            .is_none_or(|years| years.iter().any(|y| *y == item.fiscal_year));
        let group_ok = self
            .taxonomy_filter
            .as_ref()
            .is_none_or(|(taxonomy, group)| taxonomy.key(item) == Some(group.as_str()));
        year_ok && group_ok
    }
}

/// A row-returning query interface over the budget line-items table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BudgetLineSource: Send + Sync {
    /// Fetches the line items matching `query`.
    async fn fetch_line_items(
        &self,
        query: &LineItemQuery,
    ) -> Result<Vec<BudgetLineItem>, BudgetError>;
}

/// Source backed by a vector, for tests and local demos.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    items: Vec<BudgetLineItem>,
}

impl InMemorySource {
    /// Creates a source serving `items`.
    #[must_use]
    pub const fn new(items: Vec<BudgetLineItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl BudgetLineSource for InMemorySource {
    async fn fetch_line_items(
        &self,
        query: &LineItemQuery,
    ) -> Result<Vec<BudgetLineItem>, BudgetError> {
        Ok(self
            .items
            .iter()
            .filter(|item| query.matches(item))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn items() -> Vec<BudgetLineItem> {
        vec![
            BudgetLineItem::new("2025-26", dec!(100)).with_function("Education"),
            BudgetLineItem::new("2026-27", dec!(200)).with_function("Education"),
            BudgetLineItem::new("2026-27", dec!(50)).with_function("Health"),
            BudgetLineItem::new("2026-27", dec!(5)),
        ]
    }

    #[tokio::test]
    async fn test_all_returns_everything() {
        let source = InMemorySource::new(items());
        let rows = source.fetch_line_items(&LineItemQuery::all()).await.unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[tokio::test]
    async fn test_year_filter() {
        let source = InMemorySource::new(items());
        let query = LineItemQuery::all().for_years(["2025-26"]);
        let rows = source.fetch_line_items(&query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, dec!(100));
    }

    #[tokio::test]
    async fn test_group_filter_skips_unmapped_rows() {
        let source = InMemorySource::new(items());
        let query = LineItemQuery::all()
            .for_years(["2026-27"])
            .in_group(Taxonomy::Function, "Education");
        let rows = source.fetch_line_items(&query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, dec!(200));
    }
}
