//! # Money Module
//!
//! Decimal amounts and the rounding contract every price goes through.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    1.235 is stored as 1.23499999999999998667732370449812151491641998  │
//! │    round(1.235, 2) = 1.23  ❌ WRONG!                                    │
//! │                                                                         │
//! │  OUR SOLUTION: exact base-10 decimals                                   │
//! │    dec!(1.235) is exactly 1.235                                         │
//! │    round half up → 1.24  ✅                                             │
//! │                                                                         │
//! │  Floats entering the system go through their shortest decimal string   │
//! │  first, so 1.235_f64 also becomes exactly 1.235.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fareline_core::money::{round_cents, round_money};
//! use rust_decimal_macros::dec;
//!
//! assert_eq!(round_cents(dec!(1.235)), dec!(1.24));
//! assert_eq!(round_money(dec!(1.25), 1), dec!(1.3));
//! ```

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ValidationError;

// =============================================================================
// Amount Type
// =============================================================================

/// A monetary amount.
///
/// Named so signatures read as money, not as arbitrary numbers. Changing the
/// representation later only touches this alias.
pub type Amount = Decimal;

/// Number of fractional digits in a finalized price.
pub const CENT_PLACES: u32 = 2;

/// One cent.
pub const CENT: Amount = Decimal::from_parts(1, 0, 0, false, 2);

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to `decimals` places using round-half-up.
///
/// Ties round away from zero, which is what "half up" means for the
/// negative residuals that show up in payment splits.
///
/// ## Example
/// ```rust
/// use fareline_core::money::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
/// assert_eq!(round_money(dec!(-0.005), 2), dec!(-0.01));
/// assert_eq!(round_money(dec!(2.5), 0), dec!(3));
/// ```
pub fn round_money(value: Decimal, decimals: u32) -> Decimal {
    value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds to the cent. This is the rounding applied to every finalized price.
#[inline]
pub fn round_cents(value: Decimal) -> Amount {
    round_money(value, CENT_PLACES)
}

// =============================================================================
// Float Conversion
// =============================================================================

/// Converts a float into an exact decimal amount.
///
/// Goes through the shortest string that round-trips to the same `f64`
/// (Rust's `Display`), so the decimal matches the literal the caller wrote.
///
/// ## Example
/// ```rust
/// use fareline_core::money::amount_from_f64;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(amount_from_f64(1.235).unwrap(), dec!(1.235));
/// assert_eq!(amount_from_f64(0.1 + 0.2).unwrap(), dec!(0.30000000000000004));
/// assert!(amount_from_f64(f64::NAN).is_err());
/// ```
pub fn amount_from_f64(value: f64) -> Result<Amount, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "amount".to_string(),
        });
    }

    Decimal::from_str(&value.to_string()).map_err(|_| out_of_range("amount"))
}

// =============================================================================
// Checked Arithmetic
// =============================================================================
// Plain `Decimal` operators panic once a result leaves the ~7.9e28 range.
// Every price computation that multiplies or adds caller input goes through
// these instead, so overflow surfaces as `OutOfRange` on the named field.

/// `lhs × rhs`, or `OutOfRange` on `field` when the product does not fit.
///
/// ```rust
/// use fareline_core::money::checked_mul;
/// use rust_decimal::Decimal;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(checked_mul("subtotal", dec!(2.50), dec!(4)).unwrap(), dec!(10));
/// assert!(checked_mul("subtotal", Decimal::MAX, dec!(2)).is_err());
/// ```
pub fn checked_mul(field: &str, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ValidationError> {
    lhs.checked_mul(rhs).ok_or_else(|| out_of_range(field))
}

/// `lhs + rhs`, or `OutOfRange` on `field` when the sum does not fit.
pub fn checked_add(field: &str, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ValidationError> {
    lhs.checked_add(rhs).ok_or_else(|| out_of_range(field))
}

/// `lhs / rhs`, or `OutOfRange` on `field` when the quotient does not fit
/// or `rhs` is zero.
pub fn checked_div(field: &str, lhs: Decimal, rhs: Decimal) -> Result<Decimal, ValidationError> {
    lhs.checked_div(rhs).ok_or_else(|| out_of_range(field))
}

fn out_of_range(field: &str) -> ValidationError {
    ValidationError::OutOfRange {
        field: field.to_string(),
        min: Decimal::MIN,
        max: Decimal::MAX,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
