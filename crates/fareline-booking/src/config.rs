//! # Booking Configuration
//!
//! Loads the pricing tables and booking settings.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FARELINE_TAX_RATE=0.21                                             │
//! │     FARELINE_REFERENCE_PREFIX=EVT                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     path passed to BookingConfig::load                                 │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     21% tax, €0.50 fee, BOOK- references                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # fareline.toml
//! [booking]
//! reference_prefix = "BOOK"
//! reference_suffix_len = 6
//! notification_timeout_secs = 10
//!
//! [pricing.tax]
//! rate = 0.21
//! default_rate = 0.20
//! country_rates = { LV = 0.21 }
//!
//! [pricing.fees]
//! booking_fee_per_ticket = 0.50
//!
//! [pricing.coupons]
//! SPORT10 = 0.10
//! ```

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use fareline_core::PricingConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{BookingError, BookingResult};

/// Environment variable overriding `pricing.tax.rate`.
pub const ENV_TAX_RATE: &str = "FARELINE_TAX_RATE";
/// Environment variable overriding `pricing.fees.booking_fee_per_ticket`.
pub const ENV_BOOKING_FEE: &str = "FARELINE_BOOKING_FEE";
/// Environment variable overriding `pricing.loyalty.earn_rate`.
pub const ENV_LOYALTY_RATE: &str = "FARELINE_LOYALTY_RATE";
/// Environment variable overriding `booking.reference_prefix`.
pub const ENV_REFERENCE_PREFIX: &str = "FARELINE_REFERENCE_PREFIX";
/// Environment variable overriding `booking.notification_timeout_secs`.
pub const ENV_NOTIFICATION_TIMEOUT: &str = "FARELINE_NOTIFICATION_TIMEOUT_SECS";

/// Longest booking reference suffix accepted.
pub const MAX_REFERENCE_SUFFIX_LEN: usize = 32;

// =============================================================================
// Booking Settings
// =============================================================================

/// Workflow settings that are not pricing rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSettings {
    /// First segment of every booking reference.
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,

    /// Number of random characters at the end of a booking reference.
    #[serde(default = "default_reference_suffix_len")]
    pub reference_suffix_len: usize,

    /// How long a notification transport gets before the send counts as
    /// failed (seconds).
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_secs: u64,
}

fn default_reference_prefix() -> String {
    "BOOK".to_string()
}

fn default_reference_suffix_len() -> usize {
    6
}

fn default_notification_timeout() -> u64 {
    10
}

impl Default for BookingSettings {
    fn default() -> Self {
        BookingSettings {
            reference_prefix: default_reference_prefix(),
            reference_suffix_len: default_reference_suffix_len(),
            notification_timeout_secs: default_notification_timeout(),
        }
    }
}

impl BookingSettings {
    /// Notification timeout as a `Duration`.
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }
}

// =============================================================================
// Main Booking Configuration
// =============================================================================

/// Complete configuration: pricing tables plus booking settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingConfig {
    #[serde(default)]
    pub booking: BookingSettings,

    #[serde(default)]
    pub pricing: PricingConfig,
}

impl BookingConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file, when `config_path` is given and exists
    /// 3. Environment variables
    pub fn load(config_path: Option<&Path>) -> BookingResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                info!(?path, "Loading booking config from file");
                let contents = std::fs::read_to_string(path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load booking config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing sections and keys take defaults.
    pub fn from_toml_str(contents: &str) -> BookingResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> BookingResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> BookingResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml_string()?)?;

        info!(?path, "Booking config saved");
        Ok(())
    }

    /// Validates booking settings and pricing tables.
    pub fn validate(&self) -> BookingResult<()> {
        let prefix = &self.booking.reference_prefix;
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(BookingError::Config(format!(
                "reference_prefix must be non-empty and alphanumeric, got '{}'",
                prefix
            )));
        }

        let suffix_len = self.booking.reference_suffix_len;
        if suffix_len == 0 || suffix_len > MAX_REFERENCE_SUFFIX_LEN {
            return Err(BookingError::Config(format!(
                "reference_suffix_len must be between 1 and {}, got {}",
                MAX_REFERENCE_SUFFIX_LEN, suffix_len
            )));
        }

        if self.booking.notification_timeout_secs == 0 {
            return Err(BookingError::Config(
                "notification_timeout_secs must be greater than 0".into(),
            ));
        }

        self.pricing.validate()?;

        Ok(())
    }

    /// Applies `FARELINE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source. Unparseable values are
    /// logged and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(rate) = lookup(ENV_TAX_RATE) {
            if let Some(rate) = parse_override::<Decimal>(ENV_TAX_RATE, &rate) {
                debug!(%rate, "Overriding tax rate from environment");
                self.pricing.tax.rate = rate;
            }
        }

        if let Some(fee) = lookup(ENV_BOOKING_FEE) {
            if let Some(fee) = parse_override::<Decimal>(ENV_BOOKING_FEE, &fee) {
                debug!(%fee, "Overriding booking fee from environment");
                self.pricing.fees.booking_fee_per_ticket = fee;
            }
        }

        if let Some(rate) = lookup(ENV_LOYALTY_RATE) {
            if let Some(rate) = parse_override::<Decimal>(ENV_LOYALTY_RATE, &rate) {
                self.pricing.loyalty.earn_rate = rate;
            }
        }

        if let Some(prefix) = lookup(ENV_REFERENCE_PREFIX) {
            debug!(prefix = %prefix, "Overriding reference prefix from environment");
            self.booking.reference_prefix = prefix;
        }

        if let Some(secs) = lookup(ENV_NOTIFICATION_TIMEOUT) {
            if let Some(secs) = parse_override::<u64>(ENV_NOTIFICATION_TIMEOUT, &secs) {
                self.booking.notification_timeout_secs = secs;
            }
        }
    }
}

fn parse_override<T: FromStr>(key: &str, raw: &str) -> Option<T> {
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = raw, "Ignoring unparseable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn overrides(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn temp_config_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("fareline-{}-{}", std::process::id(), name))
            .join("fareline.toml")
    }

    #[test]
    fn test_default_config() {
        let config = BookingConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.booking.reference_prefix, "BOOK");
        assert_eq!(config.booking.reference_suffix_len, 6);
        assert_eq!(config.booking.notification_timeout(), Duration::from_secs(10));
        assert_eq!(config.pricing.tax.rate, dec!(0.21));
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = BookingConfig::from_toml_str(
            r#"
            [booking]
            reference_prefix = "EVT"

            [pricing.tax]
            rate = 0.10

            [pricing.coupons]
            SUMMER = 0.2
            "#,
        )
        .unwrap();

        assert_eq!(config.booking.reference_prefix, "EVT");
        assert_eq!(config.booking.reference_suffix_len, 6);
        assert_eq!(config.pricing.tax.rate, dec!(0.10));
        assert_eq!(config.pricing.tax.default_rate, dec!(0.20));
        assert_eq!(config.pricing.coupons.len(), 1);
        assert_eq!(config.pricing.coupons["SUMMER"], dec!(0.2));
        assert_eq!(config.pricing.fees.booking_fee_per_ticket, dec!(0.50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(BookingConfig::from_toml_str("").unwrap(), BookingConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let err = BookingConfig::from_toml_str("[booking\nreference_prefix = ").unwrap_err();
        assert!(matches!(err, BookingError::TomlDe(_)));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = BookingConfig::default();
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[booking]"));
        assert!(toml_str.contains("[pricing.tax]"));
        assert_eq!(BookingConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_toml_writes_rates_as_numbers() {
        let toml_str = BookingConfig::default().to_toml_string().unwrap();
        assert!(toml_str.contains("rate = 0.21"), "{}", toml_str);
        assert!(toml_str.contains("booking_fee_per_ticket = 0.5"), "{}", toml_str);
        assert!(!toml_str.contains("\"0.21\""), "{}", toml_str);

        // Quoted rates written by hand still load
        let config = BookingConfig::from_toml_str("[pricing.tax]\nrate = \"0.18\"\n").unwrap();
        assert_eq!(config.pricing.tax.rate, dec!(0.18));
    }

    #[test]
    fn test_config_validation() {
        let mut config = BookingConfig::default();

        config.booking.reference_prefix = String::new();
        assert!(matches!(config.validate(), Err(BookingError::Config(_))));

        config.booking.reference_prefix = "BO-OK".to_string();
        assert!(config.validate().is_err());

        config.booking.reference_prefix = "BOOK".to_string();
        config.booking.reference_suffix_len = 0;
        assert!(config.validate().is_err());

        config.booking.reference_suffix_len = 6;
        config.booking.notification_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.booking.notification_timeout_secs = 5;
        config.pricing.tax.rate = dec!(2);
        assert!(matches!(config.validate(), Err(BookingError::Pricing(_))));
    }

    #[test]
    fn test_overrides_apply() {
        let env = overrides(&[
            (ENV_TAX_RATE, "0.19"),
            (ENV_BOOKING_FEE, "1.25"),
            (ENV_LOYALTY_RATE, " 0.05 "),
            (ENV_REFERENCE_PREFIX, "EVT"),
            (ENV_NOTIFICATION_TIMEOUT, "3"),
        ]);
        let mut config = BookingConfig::default();
        config.apply_overrides(|key| env.get(key).cloned());

        assert_eq!(config.pricing.tax.rate, dec!(0.19));
        assert_eq!(config.pricing.fees.booking_fee_per_ticket, dec!(1.25));
        assert_eq!(config.pricing.loyalty.earn_rate, dec!(0.05));
        assert_eq!(config.booking.reference_prefix, "EVT");
        assert_eq!(config.booking.notification_timeout_secs, 3);
    }

    #[test]
    fn test_unparseable_overrides_are_ignored() {
        let env = overrides(&[(ENV_TAX_RATE, "twenty"), (ENV_NOTIFICATION_TIMEOUT, "-1")]);
        let mut config = BookingConfig::default();
        config.apply_overrides(|key| env.get(key).cloned());

        assert_eq!(config, BookingConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_config_path("load");
        let mut config = BookingConfig::default();
        config.booking.reference_suffix_len = 8;
        config.save(&path).unwrap();

        let loaded = BookingConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.booking.reference_suffix_len, 8);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let path = temp_config_path("missing");
        let config = BookingConfig::load(Some(&path)).unwrap();
        assert_eq!(config.booking.reference_suffix_len, 6);
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let path = temp_config_path("invalid");
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).unwrap();
        }
        std::fs::write(&path, "[booking]\nreference_suffix_len = 0\n").unwrap();

        assert!(BookingConfig::load(Some(&path)).is_err());
        let config = BookingConfig::load_or_default(Some(&path));
        assert_eq!(config.booking.reference_suffix_len, 6);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
