//! # Pricing Engine
//!
//! Every booking price rule, as pure functions over an immutable
//! [`PricingConfig`].
//!
//! ## Booking Total Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      compute_total(unit, qty, coupon)                   │
//! │                                                                         │
//! │  unit × qty ──► round ──► subtotal                                     │
//! │                              │                                          │
//! │  fee × qty ──► round ──► + booking fee                                 │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                     × (1 + tax rate) ──► round ──► gross               │
//! │                                                      │                  │
//! │                                                      ▼                  │
//! │                            × (1 − coupon discount) ──► round ──► total │
//! │                                                                         │
//! │  The coupon applies to the TAX-INCLUSIVE amount. Do not reorder.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Contract
//! Every amount returned from a public method is rounded to the cent with
//! round-half-up, except the two pass-through cases that say so:
//! [`cap_price`] and the `net` half of [`PricingEngine::tax_breakdown`].
//!
//! ## Example
//! ```rust
//! use fareline_core::PricingEngine;
//! use rust_decimal_macros::dec;
//!
//! let engine = PricingEngine::default();
//!
//! assert_eq!(engine.apply_tax(dec!(100)).unwrap(), dec!(121));
//! assert_eq!(engine.apply_coupon(dec!(100), Some("sport10")), dec!(90));
//! assert_eq!(
//!     engine.split_payment(dec!(10), 3).unwrap(),
//!     vec![dec!(3.33), dec!(3.33), dec!(3.34)]
//! );
//! assert_eq!(engine.convert_currency(dec!(92), "USD").unwrap(), dec!(100));
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PricingConfig;
use crate::error::{PricingError, PricingResult, ValidationError};
use crate::money::{checked_add, checked_div, checked_mul, round_cents, Amount};
use crate::types::{CurrencyCode, Fraction, TaxBreakdown};
use crate::validation::{validate_non_negative, validate_percent, validate_positive, validate_quantity};

// =============================================================================
// Pricing Engine
// =============================================================================

/// Stateless pricing rules bound to one configuration.
///
/// Cheap to clone and safe to share between threads; nothing inside changes
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl Default for PricingEngine {
    /// Engine over the built-in tables (21% tax, €0.50 fee, EUR/USD/GBP, ...).
    fn default() -> Self {
        PricingEngine {
            config: PricingConfig::default().normalized(),
        }
    }
}

impl PricingEngine {
    /// Validates the configuration and builds an engine over it.
    ///
    /// Lookup keys are upper-cased here, which is what makes coupon, country
    /// and currency lookups case-insensitive.
    pub fn new(config: PricingConfig) -> PricingResult<Self> {
        config.validate()?;
        let config = config.normalized();

        debug!(
            tax_rate = %config.tax.rate,
            coupons = config.coupons.len(),
            currencies = config.currencies.len(),
            bulk_tiers = config.bulk_tiers.len(),
            "Pricing engine configured"
        );

        Ok(PricingEngine { config })
    }

    /// The normalized configuration in use.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    // =========================================================================
    // Tax
    // =========================================================================

    /// Net → gross at the standard tax rate.
    ///
    /// ## Errors
    /// `InvalidArgument` when `net` is negative or the gross amount does not
    /// fit in a `Decimal`.
    pub fn apply_tax(&self, net: Amount) -> PricingResult<Amount> {
        validate_non_negative("net", net)?;
        self.gross_at(net, self.config.tax.rate)
    }

    /// Splits a net price into `(net, tax)`.
    ///
    /// `net` is returned exactly as given; only the tax is rounded.
    pub fn tax_breakdown(&self, net: Amount) -> TaxBreakdown {
        TaxBreakdown {
            net,
            tax: round_cents(net * self.config.tax.rate),
        }
    }

    /// Tax rate for a two-letter country code (case-insensitive). Countries
    /// without an entry get the default rate.
    pub fn tax_rate_for(&self, country: &str) -> Decimal {
        self.config
            .tax
            .country_rates
            .get(&country.to_uppercase())
            .copied()
            .unwrap_or(self.config.tax.default_rate)
    }

    /// Net → gross at the rate of `country` (LV 21%, everyone else 20% by
    /// default).
    ///
    /// ## Errors
    /// `InvalidArgument` when the gross amount does not fit in a `Decimal`.
    pub fn apply_dynamic_tax(&self, net: Amount, country: &str) -> PricingResult<Amount> {
        self.gross_at(net, self.tax_rate_for(country))
    }

    fn gross_at(&self, net: Amount, rate: Decimal) -> PricingResult<Amount> {
        let gross = checked_mul("gross", net, Decimal::ONE + rate)?;
        Ok(round_cents(gross))
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// Discount fraction of a coupon; zero when the code is unknown.
    pub fn coupon_discount(&self, code: &str) -> Decimal {
        match self.config.coupons.get(&code.to_uppercase()) {
            Some(discount) => *discount,
            None => {
                debug!(coupon = code, "Unknown coupon, no discount applied");
                Decimal::ZERO
            }
        }
    }

    /// Applies a coupon to a gross amount.
    ///
    /// A missing or unknown coupon is not an error: the amount is only
    /// rounded.
    pub fn apply_coupon(&self, gross: Amount, coupon: Option<&str>) -> Amount {
        let discount = coupon.map_or(Decimal::ZERO, |code| self.coupon_discount(code));
        round_cents(gross * (Decimal::ONE - discount))
    }

    /// True when `code` is a known coupon (case-insensitive).
    pub fn validate_coupon(&self, code: &str) -> bool {
        self.config.coupons.contains_key(&code.to_uppercase())
    }

    // =========================================================================
    // Tickets
    // =========================================================================

    /// `unit_price × qty`, rounded.
    ///
    /// ## Errors
    /// `InvalidArgument` when `qty` is zero or negative, or the product does
    /// not fit in a `Decimal`.
    pub fn compute_subtotal(&self, unit_price: Amount, qty: i64) -> PricingResult<Amount> {
        validate_quantity(qty)?;
        let subtotal = checked_mul("subtotal", unit_price, Decimal::from(qty))?;
        Ok(round_cents(subtotal))
    }

    /// Per-ticket booking fee times `qty`. Zero tickets cost nothing.
    ///
    /// Config validation caps the fee at
    /// [`MAX_BOOKING_FEE`](crate::config::MAX_BOOKING_FEE), so this cannot
    /// overflow for any `i64` quantity.
    pub fn booking_fee(&self, qty: i64) -> Amount {
        round_cents(
            self.config
                .fees
                .booking_fee_per_ticket
                .saturating_mul(Decimal::from(qty)),
        )
    }

    /// Full booking price: subtotal plus fee, taxed, then discounted.
    ///
    /// ## Example
    /// ```rust
    /// use fareline_core::PricingEngine;
    /// use rust_decimal_macros::dec;
    ///
    /// let engine = PricingEngine::default();
    /// // (20.00 + 1.00) × 1.21 = 25.41, then 10% off = 22.869 → 22.87
    /// assert_eq!(engine.compute_total(dec!(10), 2, Some("SPORT10")).unwrap(), dec!(22.87));
    /// assert_eq!(engine.compute_total(dec!(10), 2, None).unwrap(), dec!(25.41));
    /// ```
    pub fn compute_total(
        &self,
        unit_price: Amount,
        qty: i64,
        coupon: Option<&str>,
    ) -> PricingResult<Amount> {
        let subtotal = self.compute_subtotal(unit_price, qty)?;
        let fee = self.booking_fee(qty);
        let gross = self.apply_tax(checked_add("net", subtotal, fee)?)?;
        let total = self.apply_coupon(gross, coupon);

        debug!(
            %unit_price, qty, %subtotal, %fee, %gross, %total,
            coupon = coupon.unwrap_or(""),
            "Computed booking total"
        );

        Ok(total)
    }

    // =========================================================================
    // Bulk Pricing
    // =========================================================================

    /// Discount fraction unlocked by `qty` tickets (15% from 20, 8% from 10
    /// with the default tiers).
    pub fn bulk_discount(&self, qty: i64) -> Decimal {
        self.bulk_fraction(qty).value()
    }

    fn bulk_fraction(&self, qty: i64) -> Fraction {
        self.config
            .bulk_tiers
            .iter()
            .find(|tier| qty >= tier.min_quantity)
            .and_then(|tier| Fraction::new(tier.discount).ok())
            .unwrap_or(Fraction::ZERO)
    }

    /// Bulk order price: subtotal, tier discount, tax.
    ///
    /// Rounds twice on purpose, once after the discount and again after tax.
    pub fn compute_bulk_total(&self, unit_price: Amount, qty: i64) -> PricingResult<Amount> {
        let subtotal = self.compute_subtotal(unit_price, qty)?;
        let discount = self.bulk_fraction(qty);
        let discounted = round_cents(subtotal * discount.complement());
        let total = self.apply_tax(discounted)?;

        debug!(
            %unit_price, qty, discount = %discount.value(), %discounted, %total,
            "Computed bulk total"
        );

        Ok(total)
    }

    // =========================================================================
    // Payments
    // =========================================================================

    /// Splits `total` into `parts` payments that add up to the rounded total.
    ///
    /// Every payment gets `total / parts` rounded (computed from the unrounded
    /// total); the last one absorbs whatever the shares over- or under-shoot
    /// against the rounded total.
    ///
    /// ## Errors
    /// `InvalidArgument` when `parts` is zero or negative, or the shares do
    /// not fit in a `Decimal`.
    pub fn split_payment(&self, total: Amount, parts: i64) -> PricingResult<Vec<Amount>> {
        validate_positive("parts", parts)?;
        let count = usize::try_from(parts).map_err(|_| ValidationError::OutOfRange {
            field: "parts".to_string(),
            min: Decimal::ONE,
            max: Decimal::from(usize::MAX),
        })?;

        let share = round_cents(checked_div("share", total, Decimal::from(parts))?);
        let residual = round_cents(total) - checked_mul("share", share, Decimal::from(parts))?;

        let mut amounts = vec![share; count];
        if let Some(last) = amounts.last_mut() {
            *last = round_cents(checked_add("share", *last, residual)?);
        }

        Ok(amounts)
    }

    /// Refund of `fraction` (0 to 1) of what was paid.
    ///
    /// ## Errors
    /// `InvalidArgument` when `fraction` is outside [0, 1].
    pub fn compute_refund(&self, amount_paid: Amount, fraction: Decimal) -> PricingResult<Amount> {
        let fraction = Fraction::named("fraction", fraction)?;
        Ok(round_cents(amount_paid * fraction.value()))
    }

    // =========================================================================
    // Currency
    // =========================================================================

    /// Converts a EUR amount into `target` (case-insensitive code).
    ///
    /// ## Errors
    /// `UnknownCurrency` when `target` is not EUR, USD or GBP.
    /// `InvalidArgument` when the converted amount does not fit in a `Decimal`.
    pub fn convert_currency(&self, amount_eur: Amount, target: &str) -> PricingResult<Amount> {
        let code: CurrencyCode = target.parse()?;
        self.convert_to(amount_eur, code)
    }

    /// Typed form of [`PricingEngine::convert_currency`].
    pub fn convert_to(&self, amount_eur: Amount, target: CurrencyCode) -> PricingResult<Amount> {
        let rate = self.rate_of(target)?;
        Ok(round_cents(checked_div("converted", amount_eur, rate)?))
    }

    /// EUR value of one unit of `code`.
    pub fn rate_of(&self, code: CurrencyCode) -> PricingResult<Decimal> {
        self.config
            .currencies
            .get(code.as_str())
            .copied()
            .ok_or_else(|| PricingError::UnknownCurrency(code.to_string()))
    }

    // =========================================================================
    // Loyalty
    // =========================================================================

    /// Points earned on a net spend.
    ///
    /// Truncates toward zero: 149.99 at 2% earns 2 points, not 3. Results
    /// beyond `i64` saturate.
    pub fn loyalty_points_earned(&self, net: Amount) -> i64 {
        let saturated = if net.is_sign_negative() { i64::MIN } else { i64::MAX };
        net.checked_mul(self.config.loyalty.earn_rate)
            .and_then(|points| points.trunc().to_i64())
            .unwrap_or(saturated)
    }

    /// Redeems `points` against a gross amount. Never goes below zero.
    pub fn apply_loyalty_discount(&self, gross: Amount, points: i64) -> Amount {
        let value = Decimal::from(points).saturating_mul(self.config.loyalty.point_value);
        let discount = round_cents(value);
        round_cents(gross.saturating_sub(discount)).max(Decimal::ZERO)
    }
}

// =============================================================================
// Config-Free Rules
// =============================================================================

/// The lower of `price` and `cap`, returned as-is (no rounding).
#[inline]
pub fn cap_price(price: Amount, cap: Amount) -> Amount {
    price.min(cap)
}

/// `base × count` less a percentage discount (0-100 scale), rounded.
///
/// ## Errors
/// `InvalidArgument` when the discount is outside [0, 100], `count` is not
/// positive, or `base × count` does not fit in a `Decimal`.
///
/// ## Example
/// ```rust
/// use fareline_core::pricing::discounted_price;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(discounted_price(dec!(100), dec!(10), 2).unwrap(), dec!(180));
/// assert_eq!(discounted_price(dec!(50), dec!(100), 1).unwrap(), dec!(0));
/// assert!(discounted_price(dec!(100), dec!(110), 1).is_err());
/// ```
pub fn discounted_price(base: Amount, discount_percent: Decimal, count: i64) -> PricingResult<Amount> {
    validate_percent("discount", discount_percent)?;
    validate_positive("count", count)?;

    let keep = Decimal::ONE - discount_percent / Decimal::ONE_HUNDRED;
    let gross = checked_mul("price", base, Decimal::from(count))?;
    Ok(round_cents(gross * keep))
}

// =============================================================================
// Unit Tests
// =============================================================================
