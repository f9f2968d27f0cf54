//! Amount and percentage formatting for dashboard cells, tooltips and prompts.

use num_format::{Locale, ToFormattedString};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

fn round(value: Decimal, dp: u32) -> Decimal {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    // Avoid printing "-0.0".
    if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    }
}

fn units() -> [(Decimal, &'static str); 3] {
    [
        (Decimal::from(1_000_000_000_i64), "B"),
        (Decimal::from(1_000_000_i64), "M"),
        (Decimal::ONE_THOUSAND, "K"),
    ]
}

/// Formats currency amounts with a configurable symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountFormat {
    symbol: String,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self::new("$")
    }
}

impl AmountFormat {
    /// Creates a formatter using `symbol` as the currency prefix.
    #[must_use]
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    /// Abbreviated form for dense table cells, e.g. `$1.2B`.
    #[must_use]
    pub fn compact(&self, amount: Decimal) -> String {
        let body = compact_body(amount.abs());
        self.signed(amount, &body)
    }

    /// Complete digit expansion for tooltips and prompts, e.g. `$1,234,567`.
    #[must_use]
    pub fn full(&self, amount: Decimal) -> String {
        let whole = round(amount.abs(), 0);
        // Every whole `Decimal` fits in an i128.
        let body = whole.to_i128().map_or_else(
            || format!("{whole:.0}"),
            |digits| digits.to_formatted_string(&Locale::en),
        );
        self.signed(amount, &body)
    }

    fn signed(&self, amount: Decimal, body: &str) -> String {
        let sign = if amount.is_sign_negative() && body.chars().any(|c| matches!(c, '1'..='9')) {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{body}", self.symbol)
    }
}

fn compact_body(abs: Decimal) -> String {
    let units = units();
    for (i, (scale, suffix)) in units.iter().enumerate() {
        if abs < *scale {
            continue;
        }
        let scaled = round(abs / *scale, 1);
        // 999.96K rounds up to the next unit.
        if scaled >= Decimal::ONE_THOUSAND && i > 0 {
            let (bigger, bigger_suffix) = units[i - 1];
            return format!("{:.1}{bigger_suffix}", round(abs / bigger, 1));
        }
        return format!("{scaled:.1}{suffix}");
    }

    let whole = round(abs, 0);
    if whole >= Decimal::ONE_THOUSAND {
        return format!("{:.1}K", round(abs / Decimal::ONE_THOUSAND, 1));
    }
    format!("{whole:.0}")
}

/// Year-over-year style: one decimal, `+` for zero and above.
#[must_use]
pub fn signed_percent(value: Decimal) -> String {
    let rounded = round(value, 1);
    if rounded >= Decimal::ZERO {
        format!("+{rounded:.1}%")
    } else {
        format!("{rounded:.1}%")
    }
}

/// Share style: one decimal, no sign.
#[must_use]
pub fn percent(value: Decimal) -> String {
    format!("{:.1}%", round(value, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(dec!(0), "$0")]
    #[case(dec!(999.4), "$999")]
    #[case(dec!(999.6), "$1.0K")]
    #[case(dec!(1500), "$1.5K")]
    #[case(dec!(1250000), "$1.3M")]
    #[case(dec!(999960), "$1.0M")]
    #[case(dec!(2000000000), "$2.0B")]
    #[case(dec!(112400000000), "$112.4B")]
    #[case(dec!(-1500000), "-$1.5M")]
    #[case(dec!(-0.2), "$0")]
    fn test_compact(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(AmountFormat::default().compact(amount), expected);
    }

    #[rstest]
    #[case(dec!(0), "$0")]
    #[case(dec!(12), "$12")]
    #[case(dec!(1234), "$1,234")]
    #[case(dec!(1234567.5), "$1,234,568")]
    #[case(dec!(100000), "$100,000")]
    #[case(dec!(-9876543), "-$9,876,543")]
    fn test_full(#[case] amount: Decimal, #[case] expected: &str) {
        assert_eq!(AmountFormat::default().full(amount), expected);
    }

    #[test]
    fn test_full_at_decimal_limits() {
        let format = AmountFormat::default();
        assert_eq!(
            format.full(Decimal::MAX),
            "$79,228,162,514,264,337,593,543,950,335"
        );
        assert_eq!(
            format.full(Decimal::MIN),
            "-$79,228,162,514,264,337,593,543,950,335"
        );
    }

    #[test]
    fn test_custom_symbol() {
        assert_eq!(AmountFormat::new("€").full(dec!(1000)), "€1,000");
    }

    #[rstest]
    #[case(dec!(20), "+20.0%")]
    #[case(dec!(0), "+0.0%")]
    #[case(dec!(-0.04), "+0.0%")]
    #[case(dec!(-12.345), "-12.3%")]
    #[case(dec!(3.25), "+3.3%")]
    fn test_signed_percent(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(signed_percent(value), expected);
    }

    #[rstest]
    #[case(dec!(60), "60.0%")]
    #[case(dec!(33.333333), "33.3%")]
    #[case(dec!(0), "0.0%")]
    fn test_percent(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(percent(value), expected);
    }
}
