//! Migration to create `budget_line_items` table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BudgetLineItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BudgetLineItems::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BudgetLineItems::FiscalYear).text().not_null())
                    .col(ColumnDef::new(BudgetLineItems::FunctionName).text().null())
                    .col(ColumnDef::new(BudgetLineItems::FundType).text().null())
                    .col(ColumnDef::new(BudgetLineItems::FpCategory).text().null())
                    .col(ColumnDef::new(BudgetLineItems::AgencyName).text().null())
                    .col(
                        ColumnDef::new(BudgetLineItems::Amount)
                            .decimal_len(20, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetLineItems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_budget_line_items_fiscal_year", BudgetLineItems::FiscalYear),
            ("idx_budget_line_items_function", BudgetLineItems::FunctionName),
            ("idx_budget_line_items_fund_type", BudgetLineItems::FundType),
            ("idx_budget_line_items_fp_category", BudgetLineItems::FpCategory),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(BudgetLineItems::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BudgetLineItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BudgetLineItems {
    Table,
    Id,
    FiscalYear,
    FunctionName,
    FundType,
    FpCategory,
    AgencyName,
    Amount,
    CreatedAt,
}
