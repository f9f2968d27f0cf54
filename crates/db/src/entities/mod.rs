//! `SeaORM` entity definitions.

pub mod budget_line_items;
pub mod prelude;
