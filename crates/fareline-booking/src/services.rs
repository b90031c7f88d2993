//! # External Services
//!
//! The collaborators a booking needs but does not own. Implementations live
//! with the caller (database, HTTP client, SMTP relay); the workflow only sees
//! these traits.
//!
//! ```text
//! ┌──────────────────────┐      ┌──────────────────────────────────────────┐
//! │   BookingWorkflow    │      │  Implementations (outside this crate)    │
//! │                      │      │                                          │
//! │  Arc<dyn Seat...>  ──┼─────►│  inventory service / database            │
//! │  Arc<dyn Promo...> ──┼─────►│  promo store with redemption limits      │
//! │  Arc<dyn Notif...> ──┼─────►│  SMTP relay, push gateway, ...           │
//! └──────────────────────┘      └──────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Subject line of every booking confirmation.
pub const CONFIRMATION_SUBJECT: &str = "Booking Confirmation";

// =============================================================================
// Service Traits
// =============================================================================

/// Seat inventory lookup.
#[async_trait]
pub trait SeatAvailability: Send + Sync {
    /// Seats still free for `event_id`.
    async fn available_seats(&self, event_id: &str) -> Result<i64, ServiceError>;
}

/// Promo code store.
#[async_trait]
pub trait PromoRegistry: Send + Sync {
    /// True when `code` exists and is active.
    async fn is_promo_valid(&self, code: &str) -> Result<bool, ServiceError>;

    /// True when `code` has been redeemed as often as it may be.
    async fn is_promo_limit_reached(&self, code: &str) -> Result<bool, ServiceError>;

    /// Records the redemption of `code` against `order_id`.
    async fn apply_promo_to_order(&self, order_id: &str, code: &str) -> Result<(), ServiceError>;
}

/// Outbound message delivery.
#[async_trait]
pub trait NotificationTransport: Send + Sync {
    /// Delivers one message. Any error means it was not sent.
    async fn deliver(&self, notification: &Notification) -> Result<(), ServiceError>;
}

// =============================================================================
// Notification
// =============================================================================

/// A message ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// Booking confirmation for `recipient` carrying the booking details.
    ///
    /// ```rust
    /// use fareline_booking::services::Notification;
    /// use serde_json::json;
    ///
    /// let n = Notification::booking_confirmation("a@b.c", &json!({"ref": "BOOK-1-2-ABC123"}));
    /// assert_eq!(n.subject, "Booking Confirmation");
    /// assert_eq!(n.body, r#"Details: {"ref":"BOOK-1-2-ABC123"}"#);
    /// ```
    pub fn booking_confirmation(recipient: &str, details: &serde_json::Value) -> Self {
        Notification {
            recipient: recipient.to_string(),
            subject: CONFIRMATION_SUBJECT.to_string(),
            body: format!("Details: {}", details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_confirmation_body_embeds_details() {
        let details = json!({"event": "E1", "seats": 2});
        let n = Notification::booking_confirmation("fan@example.com", &details);

        assert_eq!(n.recipient, "fan@example.com");
        assert_eq!(n.subject, CONFIRMATION_SUBJECT);
        assert!(n.body.starts_with("Details: "));
        let embedded: serde_json::Value =
            serde_json::from_str(n.body.trim_start_matches("Details: ")).unwrap();
        assert_eq!(embedded, details);
    }

    #[test]
    fn test_confirmation_with_plain_string_details() {
        let n = Notification::booking_confirmation("fan@example.com", &json!("2 seats"));
        assert_eq!(n.body, "Details: \"2 seats\"");
    }
}
