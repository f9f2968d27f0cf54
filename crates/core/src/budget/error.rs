//! Budget error types.

use std::time::Duration;

use thiserror::Error;

use super::types::Taxonomy;

/// Budget-related errors.
///
/// Fetch failures are deliberately coarse: network, auth and malformed
/// responses all surface as `Fetch`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    /// The line-item source failed.
    #[error("Failed to fetch budget line items: {0}")]
    Fetch(String),

    /// The fetch did not finish within the configured bound.
    #[error("Budget line item fetch timed out after {0:?}")]
    Timeout(Duration),

    /// The fetch was cancelled because its session ended.
    #[error("Budget line item fetch was cancelled")]
    Cancelled,

    /// Unrecognised taxonomy name.
    #[error("Unknown taxonomy: {0}")]
    UnknownTaxonomy(String),

    /// No group with this name in the taxonomy.
    #[error("No {taxonomy} group named {group:?}")]
    GroupNotFound {
        /// Taxonomy searched.
        taxonomy: Taxonomy,
        /// Group requested.
        group: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_keeps_sub_second_limit() {
        let err = BudgetError::Timeout(Duration::from_millis(250));
        assert_eq!(
            err.to_string(),
            "Budget line item fetch timed out after 250ms"
        );
    }
}
