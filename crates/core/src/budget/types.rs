//! Budget data types.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;

/// One raw row of the budget line-items table.
///
/// Owned by the external table store; this crate only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLineItem {
    /// Fiscal year label, e.g. "2026-27 Estimates".
    pub fiscal_year: String,
    /// Function name.
    pub function: Option<String>,
    /// Fund type name.
    pub fund_type: Option<String>,
    /// Financial-plan category name.
    pub fp_category: Option<String>,
    /// Agency name.
    pub agency: Option<String>,
    /// Signed amount.
    pub amount: Decimal,
}

impl BudgetLineItem {
    /// Creates a line item with every taxonomy field unset.
    #[must_use]
    pub fn new(fiscal_year: impl Into<String>, amount: Decimal) -> Self {
        Self {
            fiscal_year: fiscal_year.into(),
            function: None,
            fund_type: None,
            fp_category: None,
            agency: None,
            amount,
        }
    }

    /// Sets the function name.
    #[must_use]
    pub fn with_function(mut self, name: impl Into<String>) -> Self {
        self.function = normalize(Some(name.into()));
        self
    }

    /// Sets the fund type name.
    #[must_use]
    pub fn with_fund_type(mut self, name: impl Into<String>) -> Self {
        self.fund_type = normalize(Some(name.into()));
        self
    }

    /// Sets the financial-plan category name.
    #[must_use]
    pub fn with_fp_category(mut self, name: impl Into<String>) -> Self {
        self.fp_category = normalize(Some(name.into()));
        self
    }

    /// Sets the agency name.
    #[must_use]
    pub fn with_agency(mut self, name: impl Into<String>) -> Self {
        self.agency = normalize(Some(name.into()));
        self
    }

    /// Returns the agency name, treating blank strings as missing.
    #[must_use]
    pub fn agency_key(&self) -> Option<&str> {
        non_blank(self.agency.as_deref())
    }
}

/// Maps empty or whitespace-only strings to `None`.
#[must_use]
pub fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// One of the three ways line items can be grouped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Taxonomy {
    /// Group by function.
    #[default]
    Function,
    /// Group by fund type.
    FundType,
    /// Group by financial-plan category.
    FpCategory,
}

impl Taxonomy {
    /// All taxonomies in tab order.
    pub const ALL: [Self; 3] = [Self::Function, Self::FundType, Self::FpCategory];

    /// Returns the grouping key of `item` for this taxonomy.
    #[must_use]
    pub fn key(self, item: &BudgetLineItem) -> Option<&str> {
        let value = match self {
            Self::Function => item.function.as_deref(),
            Self::FundType => item.fund_type.as_deref(),
            Self::FpCategory => item.fp_category.as_deref(),
        };
        non_blank(value)
    }

    /// Wire name of the taxonomy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::FundType => "fund_type",
            Self::FpCategory => "fp_category",
        }
    }

    /// Human label used for tabs and prompts.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Function => "Function",
            Self::FundType => "Fund Type",
            Self::FpCategory => "Financial Plan Category",
        }
    }
}

impl fmt::Display for Taxonomy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Taxonomy {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "function" | "byFunction" => Ok(Self::Function),
            "fund_type" | "byFundType" => Ok(Self::FundType),
            "fp_category" | "byFpCategory" => Ok(Self::FpCategory),
            other => Err(BudgetError::UnknownTaxonomy(other.to_string())),
        }
    }
}

/// One group of the active taxonomy for the primary fiscal year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardRow {
    /// Group label.
    pub name: String,
    /// Sum of matching line items.
    pub amount: Decimal,
    /// Percentage change against the prior fiscal year.
    pub yoy_change: Decimal,
    /// Share of the current grand total, in percent.
    pub pct_of_total: Decimal,
}

/// One agency inside an expanded group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillDownRow {
    /// Agency name.
    pub name: String,
    /// Sum of the agency's line items within the group.
    pub amount: Decimal,
    /// Percentage change against the prior fiscal year.
    pub yoy_change: Decimal,
    /// Share of the parent group's amount, in percent.
    pub pct_of_parent: Decimal,
}

/// Total for one fiscal year, used by the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalPoint {
    /// Fiscal year label.
    pub year: String,
    /// Total amount for that year.
    pub total: Decimal,
}

/// Header figures across all line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrandTotals {
    /// Primary fiscal year label.
    pub current_year: Option<String>,
    /// Prior fiscal year label.
    pub prior_year: Option<String>,
    /// Sum of all current-year items, unmapped ones included.
    pub current_total: Decimal,
    /// Sum of all prior-year items, unmapped ones included.
    pub prior_total: Decimal,
    /// Percentage change between the two totals.
    pub yoy_change: Decimal,
}

/// Grouped rows for one taxonomy plus the amount that fell outside every group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyBreakdown {
    /// Taxonomy the rows were grouped by.
    pub taxonomy: Taxonomy,
    /// Rows, amount descending.
    pub rows: Vec<DashboardRow>,
    /// Current-year amount of items with no key for this taxonomy.
    pub unmapped_amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_taxonomy_key_ignores_blank_values() {
        let mut item = BudgetLineItem::new("2026-27", dec!(10)).with_function("Education");
        item.fund_type = Some("   ".to_string());

        assert_eq!(Taxonomy::Function.key(&item), Some("Education"));
        assert_eq!(Taxonomy::FundType.key(&item), None);
        assert_eq!(Taxonomy::FpCategory.key(&item), None);
    }

    #[test]
    fn test_builder_normalizes_empty_strings() {
        let item = BudgetLineItem::new("2026-27", dec!(10)).with_agency("");
        assert_eq!(item.agency, None);
        assert_eq!(item.agency_key(), None);
    }

    #[test]
    fn test_taxonomy_parse_and_display() {
        assert_eq!("function".parse::<Taxonomy>().ok(), Some(Taxonomy::Function));
        assert_eq!("byFundType".parse::<Taxonomy>().ok(), Some(Taxonomy::FundType));
        assert_eq!("fp_category".parse::<Taxonomy>().ok(), Some(Taxonomy::FpCategory));
        assert!(matches!(
            "agency".parse::<Taxonomy>(),
            Err(BudgetError::UnknownTaxonomy(name)) if name == "agency"
        ));
        assert_eq!(Taxonomy::FundType.to_string(), "fund_type");
    }

    #[test]
    fn test_taxonomy_serde_names() {
        let json = serde_json::to_string(&Taxonomy::FpCategory).unwrap();
        assert_eq!(json, "\"fp_category\"");
    }
}
