//! Serializable dashboard view model.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::budget::{BudgetError, BudgetSnapshot, DashboardRow, DrillDownRow, Taxonomy};

use super::format::{AmountFormat, percent, signed_percent};
use super::state::DashboardViewState;

/// Everything the dashboard shows for one render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardModel {
    /// True until the line-item fetch has settled.
    pub loading: bool,
    /// Inline, non-fatal error banner text.
    pub error: Option<String>,
    /// Grand total header.
    pub header: HeaderModel,
    /// Taxonomy tabs, in order.
    pub tabs: Vec<TabModel>,
    /// Rows of the active tab.
    pub rows: Vec<RowModel>,
    /// Current-year amount with no key in the active tab.
    pub unmapped: AmountModel,
    /// Area chart series.
    pub chart: ChartModel,
}

/// A currency amount in raw and display forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountModel {
    /// Raw value.
    pub value: Decimal,
    /// Compact form for table cells.
    pub compact: String,
    /// Full form for tooltips.
    pub full: String,
}

impl AmountModel {
    fn new(value: Decimal, format: &AmountFormat) -> Self {
        Self {
            value,
            compact: format.compact(value),
            full: format.full(value),
        }
    }
}

/// A percentage in raw and display forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PercentModel {
    /// Raw value.
    pub value: Decimal,
    /// One-decimal display text.
    pub display: String,
}

impl PercentModel {
    fn signed(value: Decimal) -> Self {
        Self {
            value,
            display: signed_percent(value),
        }
    }

    fn share(value: Decimal) -> Self {
        Self {
            value,
            display: percent(value),
        }
    }
}

/// Grand total figure with its year-over-year delta.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderModel {
    /// Primary fiscal year.
    pub fiscal_year: Option<String>,
    /// Prior fiscal year.
    pub prior_year: Option<String>,
    /// Total across every line item.
    pub total: AmountModel,
    /// Change against the prior year.
    pub yoy_change: PercentModel,
}

/// One taxonomy tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabModel {
    /// Taxonomy behind the tab.
    pub taxonomy: Taxonomy,
    /// Tab caption.
    pub label: &'static str,
    /// Whether the tab is shown.
    pub active: bool,
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowModel {
    /// Group label.
    pub name: String,
    /// Group amount.
    pub amount: AmountModel,
    /// Year-over-year change.
    pub yoy_change: PercentModel,
    /// Share of the grand total.
    pub pct_of_total: PercentModel,
    /// Whether the drill-down is shown.
    pub expanded: bool,
    /// Whether the chart is focused on this row.
    pub selected: bool,
    /// Agency rows, only populated when expanded.
    pub children: Vec<ChildRowModel>,
}

/// One drill-down row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildRowModel {
    /// Agency name.
    pub name: String,
    /// Agency amount within the group.
    pub amount: AmountModel,
    /// Year-over-year change.
    pub yoy_change: PercentModel,
    /// Share of the parent group.
    pub pct_of_parent: PercentModel,
}

/// Area chart data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartModel {
    /// Chart caption: the selected row, or "All" for grand totals.
    pub title: String,
    /// Selected row, if any.
    pub focus: Option<String>,
    /// Points, oldest year first.
    pub points: Vec<ChartPoint>,
}

/// One chart point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    /// Fiscal year label.
    pub year: String,
    /// Total for the year.
    pub total: Decimal,
    /// Compact axis label.
    pub label: String,
}

fn row_model(
    snapshot: &BudgetSnapshot,
    state: &DashboardViewState,
    row: DashboardRow,
    format: &AmountFormat,
) -> RowModel {
    let expanded = state.is_expanded(&row.name);
    let children = if expanded {
        snapshot
            .drill_down(state.active_tab(), &row.name)
            .into_iter()
            .map(|child| child_model(child, format))
            .collect()
    } else {
        Vec::new()
    };

    RowModel {
        selected: state.is_selected(&row.name),
        amount: AmountModel::new(row.amount, format),
        yoy_change: PercentModel::signed(row.yoy_change),
        pct_of_total: PercentModel::share(row.pct_of_total),
        expanded,
        children,
        name: row.name,
    }
}

fn child_model(row: DrillDownRow, format: &AmountFormat) -> ChildRowModel {
    ChildRowModel {
        amount: AmountModel::new(row.amount, format),
        yoy_change: PercentModel::signed(row.yoy_change),
        pct_of_parent: PercentModel::share(row.pct_of_parent),
        name: row.name,
    }
}

/// Renders `snapshot` under `state`.
///
/// Drill-downs are computed only for expanded rows.
#[must_use]
pub fn render(
    snapshot: &BudgetSnapshot,
    state: &DashboardViewState,
    format: &AmountFormat,
    loading: bool,
    error: Option<&BudgetError>,
) -> DashboardModel {
    let totals = snapshot.grand_totals();
    let breakdown = snapshot.breakdown(state.active_tab());

    let header = HeaderModel {
        fiscal_year: totals.current_year,
        prior_year: totals.prior_year,
        total: AmountModel::new(totals.current_total, format),
        yoy_change: PercentModel::signed(totals.yoy_change),
    };

    let tabs = Taxonomy::ALL
        .iter()
        .map(|&taxonomy| TabModel {
            taxonomy,
            label: taxonomy.label(),
            active: taxonomy == state.active_tab(),
        })
        .collect();

    let rows = breakdown
        .rows
        .into_iter()
        .map(|row| row_model(snapshot, state, row, format))
        .collect();

    let points = snapshot
        .historical(state.chart_focus())
        .into_iter()
        .map(|point| ChartPoint {
            label: format.compact(point.total),
            year: point.year,
            total: point.total,
        })
        .collect();

    DashboardModel {
        loading,
        error: error.map(ToString::to_string),
        header,
        tabs,
        rows,
        unmapped: AmountModel::new(breakdown.unmapped_amount, format),
        chart: ChartModel {
            title: state.selected().unwrap_or("All").to_string(),
            focus: state.selected().map(str::to_string),
            points,
        },
    }
}
