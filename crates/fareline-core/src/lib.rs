//! # fareline-core: Pricing Rules for Fareline
//!
//! Every rule that turns a ticket order into an amount of money lives here,
//! as pure functions with no I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Fareline Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 fareline-booking (async glue)                   │   │
//! │  │   availability ──► promo codes ──► booking ref ──► notification │   │
//! │  │   config file + env overrides                                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ PricingEngine                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ fareline-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   money   │  │  config   │  │ validation│  │   │
//! │  │   │  Engine   │  │  Amount   │  │  tables   │  │   rules   │  │   │
//! │  │   │  rules    │  │  rounding │  │  rates    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - The pricing engine and config-free price rules
//! - [`money`] - Decimal amounts and round-half-up rounding
//! - [`config`] - Rate tables (tax, fees, coupons, currencies, bulk tiers)
//! - [`types`] - Currency codes, fractions, tax breakdowns
//! - [`calendar`] - Event date parsing and weekend detection
//! - [`validation`] - Input checks
//! - [`error`] - Error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input and configuration, same output
//! 2. **Decimal Money**: no binary floats anywhere in a price
//! 3. **Round Every Result**: public amounts come back rounded to the cent
//! 4. **Immutable Configuration**: tables are fixed when the engine is built
//!
//! ## Example Usage
//!
//! ```rust
//! use fareline_core::{PricingEngine, round_money};
//! use rust_decimal_macros::dec;
//!
//! let engine = PricingEngine::default();
//!
//! // 2 × 10.00 + 2 × 0.50 fee = 21.00, taxed at 21% = 25.41
//! assert_eq!(engine.compute_total(dec!(10), 2, None).unwrap(), dec!(25.41));
//! assert_eq!(engine.apply_dynamic_tax(dec!(100), "EE").unwrap(), dec!(120));
//! assert_eq!(round_money(dec!(1.235), 2), dec!(1.24));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calendar;
pub mod config;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calendar::{is_weekend_rate, parse_date};
pub use config::{BulkTier, FeeSettings, LoyaltySettings, PricingConfig, TaxSettings, MAX_BOOKING_FEE};
pub use error::{PricingError, PricingResult, ValidationError};
pub use money::{amount_from_f64, round_cents, round_money, Amount, CENT};
pub use pricing::{cap_price, discounted_price, PricingEngine};
pub use types::*;
pub use validation::validate_tax_number;

