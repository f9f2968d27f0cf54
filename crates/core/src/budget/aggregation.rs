//! Taxonomy grouping, year-over-year change and share-of-total math.
//!
//! Everything here is a pure function of the fetched line items. Percentages
//! keep full `Decimal` precision; rounding happens when they are formatted.
//! Arithmetic saturates at the `Decimal` range instead of overflowing.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::fiscal_year::{FiscalYear, ordered_years};
use super::types::{
    BudgetLineItem, DashboardRow, DrillDownRow, GrandTotals, HistoricalPoint, Taxonomy,
    TaxonomyBreakdown,
};

/// Percentage change from `prior` to `current`.
///
/// `(current - prior) / |prior| * 100`, and exactly zero when `prior` is zero.
#[must_use]
pub fn yoy_change(current: Decimal, prior: Decimal) -> Decimal {
    if prior.is_zero() {
        return Decimal::ZERO;
    }
    let change = current.saturating_sub(prior);
    saturating_div(change, prior.abs()).saturating_mul(Decimal::ONE_HUNDRED)
}

/// `part` as a percentage of `whole`, zero when `whole` is zero.
#[must_use]
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    saturating_div(part, whole).saturating_mul(Decimal::ONE_HUNDRED)
}

/// `lhs / rhs` for a non-zero `rhs`, clamped to the `Decimal` range.
fn saturating_div(lhs: Decimal, rhs: Decimal) -> Decimal {
    lhs.checked_div(rhs).unwrap_or_else(|| {
        if lhs.is_sign_negative() == rhs.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

fn add_amount(total: &mut Decimal, amount: Decimal) {
    *total = total.saturating_add(amount);
}

/// All line items from one fetch, with their fiscal years resolved.
#[derive(Debug, Clone, Default)]
pub struct BudgetSnapshot {
    items: Vec<BudgetLineItem>,
    years: Vec<FiscalYear>,
}

impl BudgetSnapshot {
    /// Builds a snapshot from fetched line items.
    #[must_use]
    pub fn new(items: Vec<BudgetLineItem>) -> Self {
        let years = ordered_years(items.iter().map(|i| i.fiscal_year.as_str()));
        Self { items, years }
    }

    /// A snapshot with no line items.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The raw line items.
    #[must_use]
    pub fn items(&self) -> &[BudgetLineItem] {
        &self.items
    }

    /// Returns true if nothing was fetched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct fiscal years, oldest first.
    #[must_use]
    pub fn years(&self) -> &[FiscalYear] {
        &self.years
    }

    /// The primary (most recent) fiscal year.
    #[must_use]
    pub fn current_year(&self) -> Option<&str> {
        self.years.last().map(FiscalYear::label)
    }

    /// The fiscal year before the primary one.
    #[must_use]
    pub fn prior_year(&self) -> Option<&str> {
        self.years
            .len()
            .checked_sub(2)
            .and_then(|i| self.years.get(i))
            .map(FiscalYear::label)
    }

    fn in_year<'a, 'y>(
        &'a self,
        year: Option<&'y str>,
    ) -> impl Iterator<Item = &'a BudgetLineItem> + use<'a, 'y> {
        self.items
            .iter()
            .filter(move |item| year.is_some_and(|y| item.fiscal_year == y))
    }

    fn year_total(&self, year: Option<&str>) -> Decimal {
        self.in_year(year)
            .map(|item| item.amount)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Current and prior totals across every line item, unmapped ones included.
    #[must_use]
    pub fn grand_totals(&self) -> GrandTotals {
        let current_total = self.year_total(self.current_year());
        let prior_total = self.year_total(self.prior_year());

        GrandTotals {
            current_year: self.current_year().map(str::to_string),
            prior_year: self.prior_year().map(str::to_string),
            current_total,
            prior_total,
            yoy_change: yoy_change(current_total, prior_total),
        }
    }

    fn group_sums(&self, year: Option<&str>, taxonomy: Taxonomy) -> BTreeMap<&str, Decimal> {
        let mut sums = BTreeMap::new();
        for item in self.in_year(year) {
            if let Some(key) = taxonomy.key(item) {
                add_amount(sums.entry(key).or_insert(Decimal::ZERO), item.amount);
            }
        }
        sums
    }

    /// Groups the primary year by `taxonomy`.
    ///
    /// Items without a key are left out of the rows but still count toward the
    /// grand total, so the shares can add up to less than 100. That gap is
    /// reported as `unmapped_amount`.
    #[must_use]
    pub fn breakdown(&self, taxonomy: Taxonomy) -> TaxonomyBreakdown {
        let current = self.group_sums(self.current_year(), taxonomy);
        let prior = self.group_sums(self.prior_year(), taxonomy);
        let grand_total = self.year_total(self.current_year());

        let mapped = current
            .values()
            .copied()
            .fold(Decimal::ZERO, Decimal::saturating_add);

        let mut rows: Vec<DashboardRow> = current
            .into_iter()
            .map(|(name, amount)| {
                let prior_amount = prior.get(name).copied().unwrap_or(Decimal::ZERO);
                DashboardRow {
                    name: name.to_string(),
                    amount,
                    yoy_change: yoy_change(amount, prior_amount),
                    pct_of_total: percent_of(amount, grand_total),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));

        TaxonomyBreakdown {
            taxonomy,
            rows,
            unmapped_amount: grand_total.saturating_sub(mapped),
        }
    }

    /// Rows grouped by function.
    #[must_use]
    pub fn by_function(&self) -> Vec<DashboardRow> {
        self.breakdown(Taxonomy::Function).rows
    }

    /// Rows grouped by fund type.
    #[must_use]
    pub fn by_fund_type(&self) -> Vec<DashboardRow> {
        self.breakdown(Taxonomy::FundType).rows
    }

    /// Rows grouped by financial-plan category.
    #[must_use]
    pub fn by_fp_category(&self) -> Vec<DashboardRow> {
        self.breakdown(Taxonomy::FpCategory).rows
    }

    /// Current-year amount of one group, `None` if the group has no items.
    #[must_use]
    pub fn group_amount(&self, taxonomy: Taxonomy, group: &str) -> Option<Decimal> {
        let mut found = false;
        let mut total = Decimal::ZERO;
        for item in self.in_year(self.current_year()) {
            if taxonomy.key(item) == Some(group) {
                found = true;
                add_amount(&mut total, item.amount);
            }
        }
        found.then_some(total)
    }

    fn agency_sums(
        &self,
        year: Option<&str>,
        taxonomy: Taxonomy,
        group: &str,
    ) -> BTreeMap<&str, Decimal> {
        let mut sums = BTreeMap::new();
        for item in self.in_year(year) {
            if taxonomy.key(item) != Some(group) {
                continue;
            }
            if let Some(agency) = item.agency_key() {
                add_amount(sums.entry(agency).or_insert(Decimal::ZERO), item.amount);
            }
        }
        sums
    }

    /// Agency breakdown of one group, computed on demand.
    ///
    /// Shares are relative to the whole group, so items without an agency
    /// leave the children summing to less than the parent.
    #[must_use]
    pub fn drill_down(&self, taxonomy: Taxonomy, group: &str) -> Vec<DrillDownRow> {
        let parent = self.group_amount(taxonomy, group).unwrap_or(Decimal::ZERO);
        let current = self.agency_sums(self.current_year(), taxonomy, group);
        let prior = self.agency_sums(self.prior_year(), taxonomy, group);

        let mut rows: Vec<DrillDownRow> = current
            .into_iter()
            .map(|(name, amount)| {
                let prior_amount = prior.get(name).copied().unwrap_or(Decimal::ZERO);
                DrillDownRow {
                    name: name.to_string(),
                    amount,
                    yoy_change: yoy_change(amount, prior_amount),
                    pct_of_parent: percent_of(amount, parent),
                }
            })
            .collect();
        rows.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.name.cmp(&b.name)));
        rows
    }

    /// One point per fiscal year in the data, oldest first.
    ///
    /// With `focus` set, only items in that taxonomy group are summed; years
    /// where the group has no items report zero.
    #[must_use]
    pub fn historical(&self, focus: Option<(Taxonomy, &str)>) -> Vec<HistoricalPoint> {
        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for item in &self.items {
            let matches = focus.is_none_or(|(taxonomy, group)| taxonomy.key(item) == Some(group));
            if matches {
                add_amount(
                    totals.entry(item.fiscal_year.as_str()).or_insert(Decimal::ZERO),
                    item.amount,
                );
            }
        }

        self.years
            .iter()
            .map(|year| HistoricalPoint {
                year: year.label().to_string(),
                total: totals.get(year.label()).copied().unwrap_or(Decimal::ZERO),
            })
            .collect()
    }

    /// Historical series for one group.
    #[must_use]
    pub fn historical_for_group(&self, taxonomy: Taxonomy, group: &str) -> Vec<HistoricalPoint> {
        self.historical(Some((taxonomy, group)))
    }
}
