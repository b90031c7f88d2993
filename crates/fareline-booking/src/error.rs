//! # Booking Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Booking Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Pricing      │  │    Services     │  │    Configuration        │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  PricingError   │  │  Unavailable    │  │  Config                 │ │
//! │  │  (from core)    │  │  Timeout        │  │  Io                     │ │
//! │  │                 │  │  Rejected       │  │  TomlDe / TomlSer       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use fareline_core::{PricingError, ValidationError};
use thiserror::Error;

/// Result type alias for booking operations.
pub type BookingResult<T> = Result<T, BookingError>;

// =============================================================================
// Service Error
// =============================================================================

/// Failure reported by an external collaborator (seat inventory, promo
/// registry, notification transport).
///
/// The workflow never looks inside these; it either propagates them or, for
/// notifications, logs and swallows them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service could not be reached.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// The service did not answer in time.
    #[error("Service timed out after {0} seconds")]
    Timeout(u64),

    /// The service answered but refused the request.
    #[error("Request rejected: {0}")]
    Rejected(String),
}

impl ServiceError {
    /// Returns true if retrying the same call could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Unavailable(_) | ServiceError::Timeout(_))
    }
}

// =============================================================================
// Booking Error
// =============================================================================

/// Everything a booking workflow caller can see.
#[derive(Debug, Error)]
pub enum BookingError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Pricing rule or input validation failure.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// External collaborator failure.
    #[error(transparent)]
    Service(#[from] ServiceError),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid booking configuration.
    #[error("Invalid booking configuration: {0}")]
    Config(String),

    /// Config file could not be read or written.
    #[error("Config file error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for this shape.
    #[error("Failed to parse config: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl From<ValidationError> for BookingError {
    fn from(err: ValidationError) -> Self {
        BookingError::Pricing(PricingError::InvalidArgument(err))
    }
}

impl BookingError {
    /// Returns true if the caller passed an out-of-domain argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, BookingError::Pricing(PricingError::InvalidArgument(_)))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BookingError::Config(_)
                | BookingError::Io(_)
                | BookingError::TomlDe(_)
                | BookingError::TomlSer(_)
                | BookingError::Pricing(PricingError::InvalidConfig(_))
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
