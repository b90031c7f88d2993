//! # Domain Types
//!
//! Value types used throughout Fareline.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CurrencyCode   │   │    Fraction     │   │  TaxBreakdown   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  EUR (base)     │   │  0 ≤ f ≤ 1      │   │  net            │       │
//! │  │  USD            │   │  refunds,       │   │  tax            │       │
//! │  │  GBP            │   │  discounts      │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these have identity. They are built from primitive input,
//! validated, used, and dropped.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, ValidationError};
use crate::money::Amount;

// =============================================================================
// Currency Code
// =============================================================================

/// A supported currency. Rates are expressed relative to EUR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    /// Euro, the base currency.
    Eur,
    /// US dollar.
    Usd,
    /// Pound sterling.
    Gbp,
}

impl CurrencyCode {
    /// Every supported currency, in display order.
    pub const ALL: [CurrencyCode; 3] = [CurrencyCode::Eur, CurrencyCode::Usd, CurrencyCode::Gbp];

    /// ISO 4217 code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Gbp => "GBP",
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse. Anything outside the supported set is
/// [`PricingError::UnknownCurrency`] carrying the original input.
impl FromStr for CurrencyCode {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EUR" => Ok(CurrencyCode::Eur),
            "USD" => Ok(CurrencyCode::Usd),
            "GBP" => Ok(CurrencyCode::Gbp),
            _ => Err(PricingError::UnknownCurrency(s.to_string())),
        }
    }
}

// =============================================================================
// Fraction
// =============================================================================

/// A value in the closed range [0, 1].
///
/// ## Example
/// ```rust
/// use fareline_core::types::Fraction;
/// use rust_decimal_macros::dec;
///
/// assert!(Fraction::new(dec!(0.5)).is_ok());
/// assert!(Fraction::new(dec!(1)).is_ok());
/// assert!(Fraction::new(dec!(1.1)).is_err());
/// assert!(Fraction::new(dec!(-0.1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Fraction(Decimal);

impl Fraction {
    /// Zero.
    pub const ZERO: Fraction = Fraction(Decimal::ZERO);

    /// Validates and wraps a fraction.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        Self::named("fraction", value)
    }

    /// Same as [`Fraction::new`], with a field name for the error message.
    pub fn named(field: &str, value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: Decimal::ZERO,
                max: Decimal::ONE,
            });
        }
        Ok(Fraction(value))
    }

    /// The wrapped value.
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// `1 - self`, the share that remains after a discount of this size.
    #[inline]
    pub fn complement(&self) -> Decimal {
        Decimal::ONE - self.0
    }
}

impl TryFrom<Decimal> for Fraction {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Fraction::new(value)
    }
}

impl From<Fraction> for Decimal {
    fn from(fraction: Fraction) -> Self {
        fraction.0
    }
}

// =============================================================================
// Tax Breakdown
// =============================================================================

/// The net/tax pair of a price.
///
/// `net` is the caller's input, untouched. Only `tax` is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub net: Amount,
    pub tax: Amount,
}

impl From<TaxBreakdown> for (Amount, Amount) {
    fn from(breakdown: TaxBreakdown) -> Self {
        (breakdown.net, breakdown.tax)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_parsing_is_case_insensitive() {
        assert_eq!("EUR".parse::<CurrencyCode>().unwrap(), CurrencyCode::Eur);
        assert_eq!("usd".parse::<CurrencyCode>().unwrap(), CurrencyCode::Usd);
        assert_eq!("Gbp".parse::<CurrencyCode>().unwrap(), CurrencyCode::Gbp);
    }

    #[test]
    fn test_unknown_currency_keeps_input() {
        let err = "jpy".parse::<CurrencyCode>().unwrap_err();
        assert!(matches!(err, PricingError::UnknownCurrency(ref code) if code == "jpy"));
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(CurrencyCode::Gbp.to_string(), "GBP");
        for code in CurrencyCode::ALL {
            assert_eq!(code.as_str().parse::<CurrencyCode>().unwrap(), code);
        }
    }

    #[test]
    fn test_fraction_bounds_are_inclusive() {
        assert_eq!(Fraction::new(dec!(0)).unwrap(), Fraction::ZERO);
        assert_eq!(Fraction::new(dec!(1)).unwrap().value(), Decimal::ONE);
        assert!(Fraction::new(dec!(1.0001)).is_err());
    }

    #[test]
    fn test_fraction_named_error() {
        let err = Fraction::named("percentage", dec!(2)).unwrap_err();
        assert_eq!(err.to_string(), "percentage must be between 0 and 1");
    }

    #[test]
    fn test_fraction_complement() {
        assert_eq!(Fraction::new(dec!(0.15)).unwrap().complement(), dec!(0.85));
    }

    #[test]
    fn test_tax_breakdown_into_tuple() {
        let breakdown = TaxBreakdown {
            net: dec!(100),
            tax: dec!(21.00),
        };
        let (net, tax): (Amount, Amount) = breakdown.into();
        assert_eq!(net, dec!(100));
        assert_eq!(tax, dec!(21));
    }
}
