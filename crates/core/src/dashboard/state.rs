//! Per-session view state: active tab, expanded rows, selected row.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::budget::Taxonomy;

/// Interaction state of one dashboard session.
///
/// Expansion is tracked per row and rows expand independently. At most one
/// row is selected; the selection drives the chart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardViewState {
    active_tab: Taxonomy,
    expanded: BTreeSet<String>,
    selected: Option<String>,
}

impl DashboardViewState {
    /// Fresh state on the given tab.
    #[must_use]
    pub fn new(active_tab: Taxonomy) -> Self {
        Self {
            active_tab,
            ..Self::default()
        }
    }

    /// Currently shown taxonomy.
    #[must_use]
    pub const fn active_tab(&self) -> Taxonomy {
        self.active_tab
    }

    /// Switches taxonomy, collapsing and deselecting every row.
    pub fn switch_tab(&mut self, taxonomy: Taxonomy) {
        self.active_tab = taxonomy;
        self.expanded.clear();
        self.selected = None;
    }

    /// Collapsed rows expand and expanded rows collapse. Returns the new state.
    pub fn toggle_expanded(&mut self, row: &str) -> bool {
        if self.expanded.remove(row) {
            false
        } else {
            self.expanded.insert(row.to_string());
            true
        }
    }

    /// Returns true if `row` is expanded.
    #[must_use]
    pub fn is_expanded(&self, row: &str) -> bool {
        self.expanded.contains(row)
    }

    /// Expanded row names.
    pub fn expanded(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    /// Selects `row`, or clears the selection if `row` is already selected.
    pub fn select_row(&mut self, row: &str) {
        if self.selected.as_deref() == Some(row) {
            self.selected = None;
        } else {
            self.selected = Some(row.to_string());
        }
    }

    /// Drops the selection so the chart shows grand totals.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected row, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Returns true if `row` is the selected row.
    #[must_use]
    pub fn is_selected(&self, row: &str) -> bool {
        self.selected.as_deref() == Some(row)
    }

    /// Series the chart should plot: a group of the active tab, or `None` for grand totals.
    #[must_use]
    pub fn chart_focus(&self) -> Option<(Taxonomy, &str)> {
        self.selected().map(|row| (self.active_tab, row))
    }
}
