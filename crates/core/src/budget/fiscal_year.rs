//! Fiscal year label ordering.
//!
//! Labels come straight from the table store ("2025-26", "2026-27 Estimates")
//! and are ordered by the first four-digit year they contain.

use std::cmp::Ordering;

/// A fiscal year label with its sort key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalYear {
    start: Option<u32>,
    label: String,
}

impl FiscalYear {
    /// Parses a label. Labels without a four-digit year still sort, before all dated ones.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            start: leading_year(&label),
            label,
        }
    }

    /// The original label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The starting calendar year, if the label contains one.
    #[must_use]
    pub const fn start_year(&self) -> Option<u32> {
        self.start
    }
}

impl Ord for FiscalYear {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.label.cmp(&other.label))
    }
}

impl PartialOrd for FiscalYear {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn leading_year(label: &str) -> Option<u32> {
    let bytes = label.as_bytes();
    bytes
        .windows(4)
        .enumerate()
        .find(|(i, w)| {
            w.iter().all(u8::is_ascii_digit)
                && (*i == 0 || !bytes[i - 1].is_ascii_digit())
                && bytes.get(i + 4).is_none_or(|b| !b.is_ascii_digit())
        })
        .and_then(|(i, _)| label.get(i..i + 4))
        .and_then(|s| s.parse().ok())
}

/// Sorts and de-duplicates labels, oldest first.
#[must_use]
pub fn ordered_years<'a>(labels: impl IntoIterator<Item = &'a str>) -> Vec<FiscalYear> {
    let mut years: Vec<FiscalYear> = labels.into_iter().map(FiscalYear::new).collect();
    years.sort();
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_year() {
        assert_eq!(FiscalYear::new("2026-27 Estimates").start_year(), Some(2026));
        assert_eq!(FiscalYear::new("FY2025").start_year(), Some(2025));
        assert_eq!(FiscalYear::new("Estimates").start_year(), None);
        assert_eq!(FiscalYear::new("12345").start_year(), None);
    }

    #[test]
    fn test_ordering_by_start_year() {
        let years = ordered_years(["2026-27 Estimates", "2024-25", "2025-26", "2024-25"]);
        let labels: Vec<&str> = years.iter().map(FiscalYear::label).collect();
        assert_eq!(labels, vec!["2024-25", "2025-26", "2026-27 Estimates"]);
    }

    #[test]
    fn test_undated_labels_sort_first() {
        let years = ordered_years(["2025-26", "Baseline"]);
        assert_eq!(years[0].label(), "Baseline");
    }

    #[test]
    fn test_same_start_year_breaks_ties_by_label() {
        let years = ordered_years(["2026-27 Estimates", "2026-27 Adopted"]);
        assert_eq!(years[0].label(), "2026-27 Adopted");
        assert_eq!(years[1].label(), "2026-27 Estimates");
    }
}
