//! Core budget logic for Statehouse.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, aggregation rules, and presentation state live here.
//!
//! # Modules
//!
//! - `budget` - Line items, taxonomy grouping, year-over-year math, data loading
//! - `dashboard` - Dashboard session, per-row view state, formatting, chat hand-off

pub mod budget;
pub mod dashboard;
