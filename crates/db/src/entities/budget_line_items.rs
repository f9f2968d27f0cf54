//! `SeaORM` Entity for budget_line_items table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use statehouse_core::budget::Taxonomy;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "budget_line_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub fiscal_year: String,
    pub function_name: Option<String>,
    pub fund_type: Option<String>,
    pub fp_category: Option<String>,
    pub agency_name: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((20, 2)))")]
    pub amount: Decimal,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column holding the grouping key of `taxonomy`.
#[must_use]
pub const fn taxonomy_column(taxonomy: Taxonomy) -> Column {
    match taxonomy {
        Taxonomy::Function => Column::FunctionName,
        Taxonomy::FundType => Column::FundType,
        Taxonomy::FpCategory => Column::FpCategory,
    }
}

/// Column name of the grouping key of `taxonomy`, as exposed over REST.
#[must_use]
pub const fn taxonomy_column_name(taxonomy: Taxonomy) -> &'static str {
    match taxonomy {
        Taxonomy::Function => "function_name",
        Taxonomy::FundType => "fund_type",
        Taxonomy::FpCategory => "fp_category",
    }
}
