//! # Error Types
//!
//! Domain-specific error types for fareline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fareline-core errors (this file)                                      │
//! │  ├── PricingError     - Everything a pricing call can fail with        │
//! │  └── ValidationError  - Out-of-domain numeric input                    │
//! │                                                                         │
//! │  fareline-booking errors (separate crate)                              │
//! │  ├── ServiceError     - External collaborator failures                 │
//! │  └── BookingError     - What workflow callers see                      │
//! │                                                                         │
//! │  Flow: ValidationError → PricingError → BookingError → caller          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Malformed vs. Unrecognized
//! Invalid numeric input fails (`InvalidArgument`). An unrecognized lookup
//! key usually does not: unknown coupons mean zero discount and unknown
//! countries get the default tax rate. Currencies are the exception, since
//! there is no sensible fallback rate.

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Pricing Error
// =============================================================================

/// Errors returned by the pricing engine.
///
/// Every error is raised before any computation happens, so a failed call
/// never yields a partial result.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A numeric argument is outside its domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Currency code is not one of the supported codes, or has no rate.
    ///
    /// ## When This Occurs
    /// ```text
    /// convert_currency(100, "JPY")
    ///      │
    ///      ▼
    /// "JPY".parse::<CurrencyCode>() fails
    ///      │
    ///      ▼
    /// UnknownCurrency("JPY")
    /// ```
    #[error("Unsupported currency {0}")]
    UnknownCurrency(String),

    /// Date string is not valid ISO-8601.
    #[error("Invalid ISO-8601 date '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Pricing configuration was rejected at engine construction.
    #[error("Invalid pricing configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These wrap into [`PricingError::InvalidArgument`] through `?`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be strictly positive (quantities, split parts).
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater (net prices).
    #[error("{field} must be non-negative")]
    MustBeNonNegative { field: String },

    /// Value is outside an inclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Floating-point input was NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;

// =============================================================================
// Unit Tests
// =============================================================================
