//! Display formatting (fixed English locale, Euro currency)
//!
//! The model always hands over raw numbers. Everything that reaches a card,
//! tooltip or report line goes through here, and this is the only place that
//! turns an unusable value into a displayable "0".

use rust_decimal::prelude::*;

/// Round half away from zero to `dp` decimal places
pub fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Format a figure for display.
///
/// Zero renders as `"0"`. Values of 1000 and above are shown as grouped
/// integers (`"1,234"`), everything else with exactly two decimals (`"2.04"`).
pub fn format_number(value: Decimal) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    let dp = if value >= Decimal::from(1000) { 0 } else { 2 };
    let rounded = round_dp(value, dp);
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::with_capacity(text.len() + 4);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a host number; NaN and infinities render as `"0"`
pub fn format_number_f64(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    match Decimal::from_f64(value) {
        Some(d) => format_number(d),
        None => "0".to_string(),
    }
}

pub fn format_euro(value: Decimal) -> String {
    format!("€{}", format_number(value))
}

pub fn format_kg(value: Decimal) -> String {
    format!("{} kg", format_number(value))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_small_values_two_decimals() {
        assert_eq!(format_number(dec("2.04")), "2.04");
        assert_eq!(format_number(dec("48")), "48.00");
        assert_eq!(format_number(dec("1.445")), "1.45");
        assert_eq!(format_number(dec("999.994")), "999.99");
    }

    #[test]
    fn test_large_values_grouped() {
        assert_eq!(format_number(dec("1000")), "1,000");
        assert_eq!(format_number(dec("1200")), "1,200");
        assert_eq!(format_number(dec("40000.5")), "40,001");
        assert_eq!(format_number(dec("1234567.2")), "1,234,567");
    }

    #[test]
    fn test_zero_renders_plain() {
        assert_eq!(format_number(Decimal::ZERO), "0");
        assert_eq!(format_number(dec("0.00")), "0");
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(format_number(dec("-2.5")), "-2.50");
        assert_eq!(format_number(dec("-1500")), "-1,500.00");
    }

    #[test]
    fn test_non_finite_host_values() {
        assert_eq!(format_number_f64(f64::NAN), "0");
        assert_eq!(format_number_f64(f64::INFINITY), "0");
        assert_eq!(format_number_f64(f64::NEG_INFINITY), "0");
        assert_eq!(format_number_f64(24.0), "24.00");
    }

    #[test]
    fn test_units() {
        assert_eq!(format_euro(dec("17.28")), "€17.28");
        assert_eq!(format_kg(dec("576")), "576.00 kg");
    }
}
