//! Shared errors and configuration for Statehouse.
//!
//! This crate provides common pieces used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, DashboardConfig, DataSourceConfig, DataSourceKind};
pub use error::{AppError, AppResult};
