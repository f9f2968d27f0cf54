//! Line-item source for a hosted REST table endpoint (PostgREST dialect).
//!
//! Filters are pushed down as query parameters:
//! `fiscal_year=in.("2025-26","2026-27")` and `function_name=eq.Education`.

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use statehouse_core::budget::types::normalize;
use statehouse_core::budget::{BudgetError, BudgetLineItem, BudgetLineSource, LineItemQuery};

use crate::entities::budget_line_items::taxonomy_column_name;

const SELECT_COLUMNS: &str = "fiscal_year,function_name,fund_type,fp_category,agency_name,amount";

/// One row as returned by the REST endpoint.
#[derive(Debug, Deserialize)]
struct RestRow {
    fiscal_year: String,
    function_name: Option<String>,
    fund_type: Option<String>,
    fp_category: Option<String>,
    agency_name: Option<String>,
    amount: Decimal,
}

impl From<RestRow> for BudgetLineItem {
    fn from(row: RestRow) -> Self {
        Self {
            fiscal_year: row.fiscal_year,
            function: normalize(row.function_name),
            fund_type: normalize(row.fund_type),
            fp_category: normalize(row.fp_category),
            agency: normalize(row.agency_name),
            amount: row.amount,
        }
    }
}

/// Reads budget line items over HTTP.
#[derive(Debug, Clone)]
pub struct RestBudgetSource {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl RestBudgetSource {
    /// Creates a source for `table` under `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        table: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/{table}", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    /// Full URL of the table endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Query parameters expressing `query` in the PostgREST filter syntax.
#[must_use]
pub fn query_params(query: &LineItemQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), SELECT_COLUMNS.to_string())];

    if let Some(years) = &query.fiscal_years {
        let list: Vec<String> = years.iter().map(|y| quote(y)).collect();
        params.push(("fiscal_year".to_string(), format!("in.({})", list.join(","))));
    }
    if let Some((taxonomy, group)) = &query.taxonomy_filter {
        params.push((
            taxonomy_column_name(*taxonomy).to_string(),
            format!("eq.{group}"),
        ));
    }

    params.push(("order".to_string(), "fiscal_year.asc".to_string()));
    params
}

#[async_trait]
impl BudgetLineSource for RestBudgetSource {
    async fn fetch_line_items(
        &self,
        query: &LineItemQuery,
    ) -> Result<Vec<BudgetLineItem>, BudgetError> {
        let mut request = self.client.get(&self.endpoint).query(&query_params(query));
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key).bearer_auth(key);
        }

        let rows: Vec<RestRow> = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| BudgetError::Fetch(e.to_string()))?
            .json()
            .await
            .map_err(|e| BudgetError::Fetch(e.to_string()))?;

        debug!(rows = rows.len(), endpoint = %self.endpoint, "Fetched budget line items over REST");
        Ok(rows.into_iter().map(BudgetLineItem::from).collect())
    }
}
