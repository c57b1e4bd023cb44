//! Fixed-point balance formatting.
//!
//! Chain balances are unsigned integers in base units with an implicit
//! decimal-point position (the chain's decimals count). Decoding is a pure
//! string-level operation on the decimal digit string: supply-scale values
//! do not fit the exact-integer range of an `f64`, so no floating-point
//! representation is ever involved.

use std::fmt;

/// A decoded fixed-point amount: whole and fractional digit strings.
///
/// The fractional part has trailing zeros stripped; `fraction()` reports
/// `"0"` when nothing is left so callers that always want a fractional
/// display have one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalAmount {
    whole: String,
    fraction: String,
}

impl DecimalAmount {
    /// Decode `raw` base units under a fixed decimals count.
    ///
    /// Never fails: every `u128` and every decimals count is a valid input.
    pub fn from_units(raw: u128, decimals: u32) -> Self {
        let digits = raw.to_string();
        let decimals = decimals as usize;

        let (whole, fraction) = if decimals == 0 {
            (digits, String::new())
        } else if digits.len() <= decimals {
            ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
        } else {
            let split = digits.len() - decimals;
            (digits[..split].to_string(), digits[split..].to_string())
        };

        let fraction = fraction.trim_end_matches('0').to_string();
        Self { whole, fraction }
    }

    pub fn whole(&self) -> &str {
        &self.whole
    }

    /// The fractional digits, `"0"` if the fraction stripped to nothing.
    pub fn fraction(&self) -> &str {
        if self.fraction.is_empty() {
            "0"
        } else {
            &self.fraction
        }
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fraction.is_empty() {
            write!(f, "{}", self.whole)
        } else {
            write!(f, "{}.{}", self.whole, self.fraction)
        }
    }
}

/// Format raw base units as a decimal string (`1500000000000000000, 18` → `"1.5"`).
pub fn format_units(raw: u128, decimals: u32) -> String {
    DecimalAmount::from_units(raw, decimals).to_string()
}

/// [`format_units`] with a token symbol suffix.
pub fn format_units_with_symbol(raw: u128, decimals: u32, symbol: &str) -> String {
    format!("{} {}", DecimalAmount::from_units(raw, decimals), symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_token_strips_fraction() {
        assert_eq!(format_units(1_000_000_000_000_000_000, 18), "1");
    }

    #[test]
    fn test_fraction_keeps_significant_digits() {
        assert_eq!(format_units(1_500_000_000_000_000_000, 18), "1.5");
        assert_eq!(format_units(1_234_500_000_000_000_000, 18), "1.2345");
    }

    #[test]
    fn test_zero_is_zero_for_any_decimals() {
        assert_eq!(format_units(0, 18), "0");
        assert_eq!(format_units(0, 0), "0");
    }

    #[test]
    fn test_zero_decimals_is_verbatim() {
        assert_eq!(format_units(42, 0), "42");
        let amount = DecimalAmount::from_units(42, 0);
        assert_eq!(amount.whole(), "42");
        assert_eq!(amount.fraction(), "0");
    }

    #[test]
    fn test_sub_unit_amounts_pad_left() {
        assert_eq!(format_units(1, 18), "0.000000000000000001");
        assert_eq!(format_units(10, 18), "0.00000000000000001");
        assert_eq!(format_units(123, 6), "0.000123");
    }

    #[test]
    fn test_supply_scale_amount_stays_exact() {
        // 21.3 million tokens at 18 decimals — far beyond f64's exact range.
        let raw: u128 = 21_300_000_000_000_000_000_000_123;
        assert_eq!(format_units(raw, 18), "21300000.000000000000000123");
    }

    #[test]
    fn test_parts_accessors() {
        let amount = DecimalAmount::from_units(1_500_000, 6);
        assert_eq!(amount.whole(), "1");
        assert_eq!(amount.fraction(), "5");
    }

    #[test]
    fn test_symbol_suffix() {
        assert_eq!(
            format_units_with_symbol(1_500_000_000_000_000_000, 18, "ETR"),
            "1.5 ETR"
        );
    }
}
