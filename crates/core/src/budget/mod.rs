//! Budget line items and their derived taxonomy views.

pub mod aggregation;
pub mod error;
pub mod fiscal_year;
pub mod loader;
pub mod source;
pub mod types;

#[cfg(test)]
mod tests;

pub use aggregation::{BudgetSnapshot, percent_of, yoy_change};
pub use error::BudgetError;
pub use fiscal_year::FiscalYear;
pub use loader::{BudgetLoader, LoadState};
pub use source::{BudgetLineSource, InMemorySource, LineItemQuery};
pub use types::{
    BudgetLineItem, DashboardRow, DrillDownRow, GrandTotals, HistoricalPoint, Taxonomy,
    TaxonomyBreakdown,
};
