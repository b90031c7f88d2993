//! # Validation Module
//!
//! Input checks that run before any pricing computation.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validate, then compute                             │
//! │                                                                         │
//! │  Caller input (unit price, quantity, fraction, ...)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  THIS MODULE: domain checks                                            │
//! │  ├── quantity > 0                                                      │
//! │  ├── net ≥ 0                                                           │
//! │  └── 0 ≤ fraction ≤ 1                                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  PricingEngine: arithmetic + rounding (cannot fail from here on)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fareline_core::validation::{validate_quantity, validate_tax_number};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_quantity(0).is_err());
//! assert!(validate_tax_number("LV1234567890"));
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Amount;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Required prefix of a tax registration number.
pub const TAX_NUMBER_PREFIX: &str = "LV";

/// Required length of a tax registration number, prefix included.
pub const TAX_NUMBER_LEN: usize = 12;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a ticket quantity.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    validate_positive("quantity", qty)
}

/// Validates that a count is strictly positive.
pub fn validate_positive(field: &str, value: i64) -> ValidationResult<()> {
    if value <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates that an amount is zero or greater.
///
/// ## Example
/// ```rust
/// use fareline_core::validation::validate_non_negative;
/// use rust_decimal_macros::dec;
///
/// assert!(validate_non_negative("net", dec!(0)).is_ok());
/// assert!(validate_non_negative("net", dec!(-0.01)).is_err());
/// ```
pub fn validate_non_negative(field: &str, amount: Amount) -> ValidationResult<()> {
    if amount < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a percentage expressed on a 0-100 scale.
pub fn validate_percent(field: &str, percent: Decimal) -> ValidationResult<()> {
    let max = Decimal::ONE_HUNDRED;
    if percent < Decimal::ZERO || percent > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Checks a tax registration number.
///
/// ## Rules
/// - Starts with `LV` (case-sensitive)
/// - Exactly 12 characters long, prefix included
///
/// Only the shape is checked; the digits are not.
pub fn validate_tax_number(tax_number: &str) -> bool {
    tax_number.starts_with(TAX_NUMBER_PREFIX) && tax_number.chars().count() == TAX_NUMBER_LEN
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_positive_names_field() {
        let err = validate_positive("parts", 0).unwrap_err();
        assert_eq!(err.to_string(), "parts must be positive");
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("net", dec!(10)).is_ok());
        assert!(validate_non_negative("net", dec!(0)).is_ok());
        assert_eq!(
            validate_non_negative("net", dec!(-1)).unwrap_err(),
            ValidationError::MustBeNonNegative {
                field: "net".to_string()
            }
        );
    }

    #[test]
    fn test_validate_percent() {
        assert!(validate_percent("discount", dec!(0)).is_ok());
        assert!(validate_percent("discount", dec!(100)).is_ok());
        assert!(validate_percent("discount", dec!(-5)).is_err());
        assert!(validate_percent("discount", dec!(110)).is_err());
    }

    #[test]
    fn test_validate_tax_number() {
        assert!(validate_tax_number("LV1234567890"));

        assert!(!validate_tax_number("EE12345678901"));
        assert!(!validate_tax_number("LV123"));
        assert!(!validate_tax_number("LV12345678901"));
        assert!(!validate_tax_number("lv1234567890"));
        assert!(!validate_tax_number(""));
    }
}
