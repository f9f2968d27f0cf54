//! Budget line-item repository.
//!
//! Read path for the dashboard plus a bulk insert used by the seeder.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;
use uuid::Uuid;

use statehouse_core::budget::{BudgetError, BudgetLineItem, BudgetLineSource, LineItemQuery};
use statehouse_core::budget::types::normalize;

use crate::entities::budget_line_items::{self, taxonomy_column};

impl From<budget_line_items::Model> for BudgetLineItem {
    fn from(model: budget_line_items::Model) -> Self {
        Self {
            fiscal_year: model.fiscal_year,
            function: normalize(model.function_name),
            fund_type: normalize(model.fund_type),
            fp_category: normalize(model.fp_category),
            agency: normalize(model.agency_name),
            amount: model.amount,
        }
    }
}

/// Budget line-item repository.
#[derive(Debug)]
#[cfg_attr(not(feature = "mock"), derive(Clone))]
pub struct BudgetLineItemRepository {
    db: DatabaseConnection,
}

impl BudgetLineItemRepository {
    /// Creates a new budget line-item repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds line items matching `query`, ordered by fiscal year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find(
        &self,
        query: &LineItemQuery,
    ) -> Result<Vec<budget_line_items::Model>, DbErr> {
        let mut select = budget_line_items::Entity::find();

        if let Some(years) = &query.fiscal_years {
            select = select.filter(budget_line_items::Column::FiscalYear.is_in(years.clone()));
        }
        if let Some((taxonomy, group)) = &query.taxonomy_filter {
            select = select.filter(taxonomy_column(*taxonomy).eq(group.as_str()));
        }

        select
            .order_by_asc(budget_line_items::Column::FiscalYear)
            .order_by_asc(budget_line_items::Column::Id)
            .all(&self.db)
            .await
    }

    /// Inserts line items, returning how many were written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn insert_many(&self, items: &[BudgetLineItem]) -> Result<usize, DbErr> {
        if items.is_empty() {
            return Ok(0);
        }

        let now = chrono::Utc::now();
        let models = items.iter().map(|item| budget_line_items::ActiveModel {
            id: Set(Uuid::now_v7()),
            fiscal_year: Set(item.fiscal_year.clone()),
            function_name: Set(item.function.clone()),
            fund_type: Set(item.fund_type.clone()),
            fp_category: Set(item.fp_category.clone()),
            agency_name: Set(item.agency.clone()),
            amount: Set(item.amount),
            created_at: Set(now.into()),
        });

        budget_line_items::Entity::insert_many(models)
            .exec(&self.db)
            .await?;

        Ok(items.len())
    }
}

#[async_trait]
impl BudgetLineSource for BudgetLineItemRepository {
    async fn fetch_line_items(
        &self,
        query: &LineItemQuery,
    ) -> Result<Vec<BudgetLineItem>, BudgetError> {
        let models = self
            .find(query)
            .await
            .map_err(|e| BudgetError::Fetch(e.to_string()))?;

        debug!(rows = models.len(), "Fetched budget line items from database");
        Ok(models.into_iter().map(BudgetLineItem::from).collect())
    }
}
