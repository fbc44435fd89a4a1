//! Input coercion and validation utilities
//!
//! The dashboard never rejects bean input. Anything that is not a usable
//! finite number becomes zero before it reaches the impact model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest bean quantity (kg/month) the model accepts.
///
/// Keeps every derived figure, including yearly scaling, inside `Decimal` range.
pub const MAX_BEAN_KG: f64 = 1e15;

/// [`MAX_BEAN_KG`] as a `Decimal`
pub const MAX_BEAN_KG_DECIMAL: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Handling of negative bean quantities
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum NegativeInputPolicy {
    /// Negative input is treated as zero
    #[default]
    Clamp,
    /// Negative input flows into the model unchanged
    PassThrough,
}

// ============================================================================
// Bean Input Coercion
// ============================================================================

/// Convert a host number to `Decimal`, mapping non-finite or unrepresentable
/// values to zero
pub fn coerce_finite(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

/// Coerce a host number into a bean quantity
pub fn coerce_bean_kg(value: f64) -> Decimal {
    if value.abs() > MAX_BEAN_KG {
        return Decimal::ZERO;
    }
    coerce_finite(value)
}

/// Whether an already decoded bean quantity is inside the accepted range
pub fn bean_kg_in_range(value: Decimal) -> bool {
    value.abs() <= MAX_BEAN_KG_DECIMAL
}

/// Parse the raw text of the bean input field
pub fn parse_bean_kg(raw: &str) -> Decimal {
    raw.trim()
        .parse::<f64>()
        .map(coerce_bean_kg)
        .unwrap_or(Decimal::ZERO)
}

/// Apply the configured negative-input policy
pub fn apply_negative_policy(value: Decimal, policy: NegativeInputPolicy) -> Decimal {
    match policy {
        NegativeInputPolicy::Clamp if value.is_sign_negative() => Decimal::ZERO,
        _ => value,
    }
}

// ============================================================================
// Configuration Validations
// ============================================================================

/// Validate a storage key (non-empty, no surrounding whitespace)
pub fn validate_storage_key(key: &str) -> Result<(), &'static str> {
    if key.is_empty() {
        return Err("Storage key cannot be empty");
    }
    if key.trim() != key {
        return Err("Storage key cannot have surrounding whitespace");
    }
    Ok(())
}

/// Validate a report download file name
pub fn validate_file_name(name: &str) -> Result<(), &'static str> {
    if !name.ends_with(".pdf") || name.len() <= ".pdf".len() {
        return Err("Report file name must end in .pdf");
    }
    if name.contains(['/', '\\']) {
        return Err("Report file name cannot contain path separators");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_bean_kg("60"), dec("60"));
        assert_eq!(parse_bean_kg(" 12.5 "), dec("12.5"));
        assert_eq!(parse_bean_kg("2.04"), dec("2.04"));
    }

    #[test]
    fn test_parse_non_numeric_is_zero() {
        assert_eq!(parse_bean_kg(""), Decimal::ZERO);
        assert_eq!(parse_bean_kg("abc"), Decimal::ZERO);
        assert_eq!(parse_bean_kg("NaN"), Decimal::ZERO);
        assert_eq!(parse_bean_kg("inf"), Decimal::ZERO);
    }

    #[test]
    fn test_coerce_out_of_range_is_zero() {
        assert_eq!(coerce_bean_kg(f64::INFINITY), Decimal::ZERO);
        assert_eq!(coerce_bean_kg(f64::NAN), Decimal::ZERO);
        assert_eq!(coerce_bean_kg(1e20), Decimal::ZERO);
        assert_eq!(coerce_bean_kg(1e12), dec("1000000000000"));
    }

    #[test]
    fn test_coerce_finite() {
        assert_eq!(coerce_finite(f64::NEG_INFINITY), Decimal::ZERO);
        assert_eq!(coerce_finite(f64::NAN), Decimal::ZERO);
        assert_eq!(coerce_finite(1e20), dec("100000000000000000000"));
        assert_eq!(coerce_finite(2.5), dec("2.5"));
    }

    #[test]
    fn test_decoded_bean_range() {
        assert_eq!(MAX_BEAN_KG_DECIMAL, dec("1000000000000000"));
        assert!(bean_kg_in_range(dec("1000000000000000")));
        assert!(bean_kg_in_range(dec("-60")));
        assert!(!bean_kg_in_range(dec("1000000000000000.5")));
        assert!(!bean_kg_in_range(dec("10000000000000000000000000000")));
    }

    #[test]
    fn test_negative_policy() {
        assert_eq!(
            apply_negative_policy(dec("-5"), NegativeInputPolicy::Clamp),
            Decimal::ZERO
        );
        assert_eq!(
            apply_negative_policy(dec("-5"), NegativeInputPolicy::PassThrough),
            dec("-5")
        );
        assert_eq!(
            apply_negative_policy(dec("5"), NegativeInputPolicy::Clamp),
            dec("5")
        );
    }

    #[test]
    fn test_validate_storage_key() {
        assert!(validate_storage_key("dashboardData").is_ok());
        assert!(validate_storage_key("").is_err());
        assert!(validate_storage_key(" key").is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("olor-sustainability-report.pdf").is_ok());
        assert!(validate_file_name(".pdf").is_err());
        assert!(validate_file_name("report.txt").is_err());
        assert!(validate_file_name("../report.pdf").is_err());
    }
}
