//! # Booking Workflow
//!
//! The steps around a booking that need the outside world: seat checks,
//! promo redemption, references and confirmations.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Booking a ticket                                │
//! │                                                                         │
//! │  check_availability(event, seats) ──► SeatAvailability                 │
//! │           │ true                                                        │
//! │           ▼                                                             │
//! │  quote(unit, qty, coupon) ──────────► PricingEngine (pure)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  apply_promo_code(order, code) ─────► PromoRegistry                    │
//! │           │                            valid? ─no─► false              │
//! │           │                            limit? ─yes► false              │
//! │           │                            commit ────► true               │
//! │           ▼                                                             │
//! │  generate_booking_ref(user, event) ─► BOOK-{user}-{event}-{XXXXXX}     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  send_notification(to, details) ────► NotificationTransport            │
//! │                                        failure/timeout ─► false, warn  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The workflow holds no mutable state. Share one instance behind an `Arc`.

use std::sync::Arc;

use fareline_core::validation::validate_positive;
use fareline_core::{Amount, PricingEngine};
use tracing::{debug, info, warn};

use crate::config::{BookingConfig, BookingSettings};
use crate::error::BookingResult;
use crate::reference::booking_reference;
use crate::services::{Notification, NotificationTransport, PromoRegistry, SeatAvailability};

/// Booking steps bound to a set of services and a pricing engine.
#[derive(Clone)]
pub struct BookingWorkflow {
    seats: Arc<dyn SeatAvailability>,
    promos: Arc<dyn PromoRegistry>,
    notifier: Arc<dyn NotificationTransport>,
    engine: PricingEngine,
    settings: BookingSettings,
}

impl BookingWorkflow {
    pub fn new(
        seats: Arc<dyn SeatAvailability>,
        promos: Arc<dyn PromoRegistry>,
        notifier: Arc<dyn NotificationTransport>,
        engine: PricingEngine,
        settings: BookingSettings,
    ) -> Self {
        BookingWorkflow {
            seats,
            promos,
            notifier,
            engine,
            settings,
        }
    }

    /// Validates `config` and builds the engine from its pricing tables.
    pub fn from_config(
        config: BookingConfig,
        seats: Arc<dyn SeatAvailability>,
        promos: Arc<dyn PromoRegistry>,
        notifier: Arc<dyn NotificationTransport>,
    ) -> BookingResult<Self> {
        config.validate()?;
        let engine = PricingEngine::new(config.pricing)?;
        Ok(Self::new(seats, promos, notifier, engine, config.booking))
    }

    pub fn engine(&self) -> &PricingEngine {
        &self.engine
    }

    pub fn settings(&self) -> &BookingSettings {
        &self.settings
    }

    // =========================================================================
    // Seats
    // =========================================================================

    /// True when `event_id` still has at least `seats_requested` free seats.
    ///
    /// ## Errors
    /// - `InvalidArgument` when `seats_requested` is zero or negative (the
    ///   inventory is not queried)
    /// - the inventory's own error, unchanged
    pub async fn check_availability(&self, event_id: &str, seats_requested: i64) -> BookingResult<bool> {
        validate_positive("seats_requested", seats_requested)?;

        let available = self.seats.available_seats(event_id).await?;
        debug!(event_id, seats_requested, available, "Checked seat availability");

        Ok(available >= seats_requested)
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Full booking price through the configured engine.
    pub fn quote(&self, unit_price: Amount, qty: i64, coupon: Option<&str>) -> BookingResult<Amount> {
        Ok(self.engine.compute_total(unit_price, qty, coupon)?)
    }

    // =========================================================================
    // Promo Codes
    // =========================================================================

    /// Redeems `code` on `order_id`.
    ///
    /// Returns `Ok(false)` for an invalid code or one whose limit is reached;
    /// the limit is only checked for valid codes. Registry errors propagate.
    pub async fn apply_promo_code(&self, order_id: &str, code: &str) -> BookingResult<bool> {
        if !self.promos.is_promo_valid(code).await? {
            debug!(order_id, code, "Promo code rejected: invalid");
            return Ok(false);
        }

        if self.promos.is_promo_limit_reached(code).await? {
            debug!(order_id, code, "Promo code rejected: limit reached");
            return Ok(false);
        }

        self.promos.apply_promo_to_order(order_id, code).await?;
        info!(order_id, code, "Promo code applied");

        Ok(true)
    }

    // =========================================================================
    // References
    // =========================================================================

    /// New booking reference, e.g. `BOOK-42-1001-7QX2ZD`.
    pub fn generate_booking_ref(&self, user_id: &str, event_id: &str) -> String {
        booking_reference(
            &mut rand::thread_rng(),
            &self.settings.reference_prefix,
            user_id,
            event_id,
            self.settings.reference_suffix_len,
        )
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Sends a booking confirmation.
    ///
    /// Never fails: a transport error or a timeout is logged and reported as
    /// `false`.
    pub async fn send_notification(&self, recipient: &str, details: &serde_json::Value) -> bool {
        let notification = Notification::booking_confirmation(recipient, details);
        let timeout = self.settings.notification_timeout();

        match tokio::time::timeout(timeout, self.notifier.deliver(&notification)).await {
            Ok(Ok(())) => {
                info!(recipient, "Booking confirmation sent");
                true
            }
            Ok(Err(e)) => {
                warn!(
                    recipient,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Failed to send booking confirmation"
                );
                false
            }
            Err(_) => {
                warn!(
                    recipient,
                    timeout_secs = self.settings.notification_timeout_secs,
                    "Booking confirmation timed out"
                );
                false
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
