//! # Pricing Configuration
//!
//! The fixed tables every pricing rule reads: tax rates, booking fee, loyalty
//! rates, currency rates, coupons, and bulk tiers.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Where configuration comes from                       │
//! │                                                                         │
//! │  fareline-booking (I/O allowed)                                        │
//! │  ├── pricing.toml ──┐                                                  │
//! │  ├── FARELINE_* env ┼──► PricingConfig (this type)                     │
//! │  └── defaults ──────┘           │                                      │
//! │                                 ▼                                      │
//! │  fareline-core           PricingEngine::new(config)                    │
//! │                          validate + normalize, then immutable          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module never reads files or the environment. It only defines the
//! shape, the defaults, and the validation.
//!
//! ## Configuration File Format
//! ```toml
//! coupons = { SPORT10 = 0.10, NEWUSER5 = 0.05, BLACKFRIDAY = 0.25 }
//! currencies = { EUR = 1.0, USD = 0.92, GBP = 1.15 }
//!
//! [tax]
//! rate = 0.21
//! default_rate = 0.20
//! country_rates = { LV = 0.21 }
//!
//! [fees]
//! booking_fee_per_ticket = 0.50
//!
//! [loyalty]
//! earn_rate = 0.02
//! point_value = 0.01
//!
//! [[bulk_tiers]]
//! min_quantity = 20
//! discount = 0.15
//! ```

use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{PricingError, PricingResult};
use crate::types::CurrencyCode;

// =============================================================================
// Tax Settings
// =============================================================================

/// Tax rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxSettings {
    /// Rate used by `apply_tax`, `tax_breakdown` and the composite totals.
    #[serde(default = "default_tax_rate")]
    pub rate: Decimal,

    /// Rate for countries missing from `country_rates`.
    #[serde(default = "default_fallback_rate")]
    pub default_rate: Decimal,

    /// Per-country rates for `apply_dynamic_tax`, keyed by two-letter code.
    #[serde(default = "default_country_rates")]
    pub country_rates: BTreeMap<String, Decimal>,
}

fn default_tax_rate() -> Decimal {
    dec!(0.21)
}

fn default_country_rates() -> BTreeMap<String, Decimal> {
    BTreeMap::from([("LV".to_string(), dec!(0.21))])
}

fn default_fallback_rate() -> Decimal {
    dec!(0.20)
}

impl Default for TaxSettings {
    fn default() -> Self {
        TaxSettings {
            rate: default_tax_rate(),
            default_rate: default_fallback_rate(),
            country_rates: default_country_rates(),
        }
    }
}

// =============================================================================
// Fee Settings
// =============================================================================

/// Largest accepted per-ticket booking fee. Keeps `fee × qty` inside the
/// `Decimal` range for every `i64` quantity.
pub const MAX_BOOKING_FEE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Per-booking fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSettings {
    #[serde(default = "default_booking_fee")]
    pub booking_fee_per_ticket: Decimal,
}

fn default_booking_fee() -> Decimal {
    dec!(0.50)
}

impl Default for FeeSettings {
    fn default() -> Self {
        FeeSettings {
            booking_fee_per_ticket: default_booking_fee(),
        }
    }
}

// =============================================================================
// Loyalty Settings
// =============================================================================

/// Loyalty programme rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltySettings {
    /// Points earned per unit of net spend (truncated).
    #[serde(default = "default_earn_rate")]
    pub earn_rate: Decimal,

    /// Monetary value of one point when redeemed.
    #[serde(default = "default_point_value")]
    pub point_value: Decimal,
}

fn default_earn_rate() -> Decimal {
    dec!(0.02)
}

fn default_point_value() -> Decimal {
    dec!(0.01)
}

impl Default for LoyaltySettings {
    fn default() -> Self {
        LoyaltySettings {
            earn_rate: default_earn_rate(),
            point_value: default_point_value(),
        }
    }
}

// =============================================================================
// Bulk Tiers
// =============================================================================

/// A quantity threshold and the discount it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkTier {
    /// Smallest quantity that qualifies (inclusive).
    pub min_quantity: i64,
    /// Discount fraction applied to the subtotal.
    pub discount: Decimal,
}

fn default_bulk_tiers() -> Vec<BulkTier> {
    vec![
        BulkTier {
            min_quantity: 20,
            discount: dec!(0.15),
        },
        BulkTier {
            min_quantity: 10,
            discount: dec!(0.08),
        },
    ]
}

// =============================================================================
// Lookup Tables
// =============================================================================

fn default_currencies() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        (CurrencyCode::Eur.to_string(), dec!(1.0)),
        (CurrencyCode::Usd.to_string(), dec!(0.92)),
        (CurrencyCode::Gbp.to_string(), dec!(1.15)),
    ])
}

fn default_coupons() -> BTreeMap<String, Decimal> {
    BTreeMap::from([
        ("SPORT10".to_string(), dec!(0.10)),
        ("NEWUSER5".to_string(), dec!(0.05)),
        ("BLACKFRIDAY".to_string(), dec!(0.25)),
    ])
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Complete pricing configuration.
///
/// Every section is optional in a config file; missing sections take the
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub tax: TaxSettings,

    #[serde(default)]
    pub fees: FeeSettings,

    #[serde(default)]
    pub loyalty: LoyaltySettings,

    /// EUR value of one unit of each currency (USD = 0.92 means 1 USD is
    /// worth 0.92 EUR). Converting out of EUR divides by the rate.
    #[serde(default = "default_currencies")]
    pub currencies: BTreeMap<String, Decimal>,

    /// Coupon code → discount fraction in [0, 1).
    #[serde(default = "default_coupons")]
    pub coupons: BTreeMap<String, Decimal>,

    #[serde(default = "default_bulk_tiers")]
    pub bulk_tiers: Vec<BulkTier>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            tax: TaxSettings::default(),
            fees: FeeSettings::default(),
            loyalty: LoyaltySettings::default(),
            currencies: default_currencies(),
            coupons: default_coupons(),
            bulk_tiers: default_bulk_tiers(),
        }
    }
}

impl PricingConfig {
    /// Checks every rate and table entry.
    pub fn validate(&self) -> PricingResult<()> {
        check_unit_range("tax.rate", self.tax.rate)?;
        check_unit_range("tax.default_rate", self.tax.default_rate)?;
        check_unique_keys("tax.country_rates", &self.tax.country_rates)?;
        for (country, rate) in &self.tax.country_rates {
            if country.chars().count() != 2 {
                return Err(PricingError::InvalidConfig(format!(
                    "tax.country_rates key '{}' must be a two-letter country code",
                    country
                )));
            }
            check_unit_range(&format!("tax.country_rates.{}", country), *rate)?;
        }

        let fee = self.fees.booking_fee_per_ticket;
        if fee < Decimal::ZERO || fee > MAX_BOOKING_FEE {
            return Err(PricingError::InvalidConfig(format!(
                "fees.booking_fee_per_ticket must be between 0 and {}, got {}",
                MAX_BOOKING_FEE, fee
            )));
        }

        if self.loyalty.earn_rate < Decimal::ZERO || self.loyalty.point_value < Decimal::ZERO {
            return Err(PricingError::InvalidConfig(
                "loyalty rates must be non-negative".into(),
            ));
        }

        check_unique_keys("currencies", &self.currencies)?;
        for (code, rate) in &self.currencies {
            code.parse::<CurrencyCode>()
                .map_err(|_| PricingError::InvalidConfig(format!("Unknown currency '{}'", code)))?;
            if *rate <= Decimal::ZERO {
                return Err(PricingError::InvalidConfig(format!(
                    "currencies.{} must be positive, got {}",
                    code, rate
                )));
            }
        }

        check_unique_keys("coupons", &self.coupons)?;
        for (code, discount) in &self.coupons {
            if code.trim().is_empty() {
                return Err(PricingError::InvalidConfig("coupon code is empty".into()));
            }
            if *discount < Decimal::ZERO || *discount >= Decimal::ONE {
                return Err(PricingError::InvalidConfig(format!(
                    "coupons.{} must be in [0, 1), got {}",
                    code, discount
                )));
            }
        }

        for tier in &self.bulk_tiers {
            if tier.min_quantity <= 0 {
                return Err(PricingError::InvalidConfig(
                    "bulk_tiers.min_quantity must be positive".into(),
                ));
            }
            check_unit_range("bulk_tiers.discount", tier.discount)?;
        }

        Ok(())
    }

    /// Upper-cases every lookup key and orders bulk tiers from the largest
    /// threshold down, which is the order tier lookup walks them in.
    pub fn normalized(mut self) -> Self {
        self.tax.country_rates = upper_keys(self.tax.country_rates);
        self.currencies = upper_keys(self.currencies);
        self.coupons = upper_keys(self.coupons);
        self.bulk_tiers.sort_by(|a, b| b.min_quantity.cmp(&a.min_quantity));
        self
    }
}

fn check_unit_range(field: &str, value: Decimal) -> PricingResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(PricingError::InvalidConfig(format!(
            "{} must be between 0 and 1, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Lookup keys are case-insensitive, so `sport10` and `SPORT10` in one table
/// would silently collapse into a single entry.
fn check_unique_keys(table: &str, map: &BTreeMap<String, Decimal>) -> PricingResult<()> {
    let mut seen = HashSet::with_capacity(map.len());
    for key in map.keys() {
        if !seen.insert(normalize_key(key)) {
            return Err(PricingError::InvalidConfig(format!(
                "{} has more than one entry for '{}' (keys are case-insensitive)",
                table,
                normalize_key(key)
            )));
        }
    }
    Ok(())
}

fn normalize_key(key: &str) -> String {
    key.trim().to_uppercase()
}

fn upper_keys(map: BTreeMap<String, Decimal>) -> BTreeMap<String, Decimal> {
    map.into_iter()
        .map(|(key, value)| (normalize_key(&key), value))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PricingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tax.rate, dec!(0.21));
        assert_eq!(config.fees.booking_fee_per_ticket, dec!(0.50));
        assert_eq!(config.currencies["USD"], dec!(0.92));
        assert_eq!(config.coupons["SPORT10"], dec!(0.10));
    }

    #[test]
    fn test_rejects_out_of_range_tax_rate() {
        let mut config = PricingConfig::default();
        config.tax.rate = dec!(1.5);
        assert!(matches!(
            config.validate(),
            Err(PricingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_currency_and_zero_rate() {
        let mut config = PricingConfig::default();
        config.currencies.insert("JPY".to_string(), dec!(0.006));
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config.currencies.insert("USD".to_string(), Decimal::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_full_discount_coupon() {
        let mut config = PricingConfig::default();
        config.coupons.insert("FREE".to_string(), dec!(1));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_bulk_tier_and_country() {
        let mut config = PricingConfig::default();
        config.bulk_tiers.push(BulkTier {
            min_quantity: 0,
            discount: dec!(0.5),
        });
        assert!(config.validate().is_err());

        let mut config = PricingConfig::default();
        config
            .tax
            .country_rates
            .insert("LVA".to_string(), dec!(0.21));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_keys_differing_only_in_case() {
        let mut config = PricingConfig::default();
        config.coupons = BTreeMap::from([
            ("sport10".to_string(), dec!(0.10)),
            ("SPORT10".to_string(), dec!(0.20)),
        ]);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PricingError::InvalidConfig(ref msg) if msg.contains("SPORT10")));

        let mut config = PricingConfig::default();
        config.currencies.insert(" usd".to_string(), dec!(0.90));
        assert!(matches!(config.validate(), Err(PricingError::InvalidConfig(_))));

        let mut config = PricingConfig::default();
        config.tax.country_rates.insert("lv".to_string(), dec!(0.05));
        assert!(matches!(config.validate(), Err(PricingError::InvalidConfig(_))));
    }

    #[test]
    fn test_booking_fee_bounds() {
        let mut config = PricingConfig::default();
        config.fees.booking_fee_per_ticket = MAX_BOOKING_FEE;
        assert!(config.validate().is_ok());

        config.fees.booking_fee_per_ticket = MAX_BOOKING_FEE + dec!(0.01);
        assert!(matches!(config.validate(), Err(PricingError::InvalidConfig(_))));

        config.fees.booking_fee_per_ticket = dec!(-0.01);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_normalized_uppercases_and_sorts() {
        let mut config = PricingConfig::default();
        config.coupons = BTreeMap::from([("summer20".to_string(), dec!(0.20))]);
        config.currencies = BTreeMap::from([("usd".to_string(), dec!(0.92))]);
        config.bulk_tiers.reverse();

        let config = config.normalized();
        assert!(config.coupons.contains_key("SUMMER20"));
        assert!(config.currencies.contains_key("USD"));
        assert_eq!(config.bulk_tiers[0].min_quantity, 20);
        assert_eq!(config.bulk_tiers[1].min_quantity, 10);
    }
}
