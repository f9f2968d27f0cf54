//! Entity re-exports.

pub use super::budget_line_items::Entity as BudgetLineItems;
