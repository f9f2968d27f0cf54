//! Budget line-item data access.
//!
//! This crate provides:
//! - The `SeaORM` entity for the budget line-items table
//! - A repository implementing the core `BudgetLineSource` trait
//! - A REST source for the hosted table endpoint
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod remote;
pub mod repositories;

pub use remote::RestBudgetSource;
pub use repositories::BudgetLineItemRepository;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}

/// Establishes a pooled connection with explicit pool bounds.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_pool(
    database_url: &str,
    max_connections: u32,
    min_connections: u32,
    connect_timeout: Duration,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(max_connections)
        .min_connections(min_connections)
        .connect_timeout(connect_timeout)
        .sqlx_logging(false);
    Database::connect(options).await
}
