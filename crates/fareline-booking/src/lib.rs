//! # fareline-booking: Booking Workflow for Fareline
//!
//! Connects the pricing engine to the services a booking depends on: seat
//! inventory, promo codes and confirmation delivery. Also owns loading the
//! configuration from disk and the environment.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       fareline-booking                                  │
//! │                                                                         │
//! │  ┌──────────────┐    ┌──────────────────┐    ┌──────────────────────┐  │
//! │  │   config     │    │    workflow      │    │      services        │  │
//! │  │ toml + env   │───►│ BookingWorkflow  │───►│  SeatAvailability    │  │
//! │  └──────────────┘    │                  │    │  PromoRegistry       │  │
//! │                      │                  │    │  NotificationTransp. │  │
//! │  ┌──────────────┐    │                  │    └──────────────────────┘  │
//! │  │  reference   │◄───│                  │                              │
//! │  │ BOOK-u-e-XXX │    └────────┬─────────┘                              │
//! │  └──────────────┘             │                                        │
//! │                               ▼                                        │
//! │                    fareline-core::PricingEngine                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use fareline_booking::{BookingConfig, BookingWorkflow};
//! # use fareline_booking::services::*;
//! # use fareline_booking::ServiceError;
//! # struct Inventory;
//! # #[async_trait::async_trait]
//! # impl SeatAvailability for Inventory {
//! #     async fn available_seats(&self, _: &str) -> Result<i64, ServiceError> { Ok(10) }
//! # }
//! # struct Promos;
//! # #[async_trait::async_trait]
//! # impl PromoRegistry for Promos {
//! #     async fn is_promo_valid(&self, _: &str) -> Result<bool, ServiceError> { Ok(true) }
//! #     async fn is_promo_limit_reached(&self, _: &str) -> Result<bool, ServiceError> { Ok(false) }
//! #     async fn apply_promo_to_order(&self, _: &str, _: &str) -> Result<(), ServiceError> { Ok(()) }
//! # }
//! # struct Mailer;
//! # #[async_trait::async_trait]
//! # impl NotificationTransport for Mailer {
//! #     async fn deliver(&self, _: &Notification) -> Result<(), ServiceError> { Ok(()) }
//! # }
//! # async fn run() -> fareline_booking::BookingResult<()> {
//! let config = BookingConfig::load(Some(Path::new("fareline.toml")))?;
//! let workflow = BookingWorkflow::from_config(
//!     config,
//!     Arc::new(Inventory),
//!     Arc::new(Promos),
//!     Arc::new(Mailer),
//! )?;
//!
//! if workflow.check_availability("event-7", 2).await? {
//!     let total = workflow.quote(rust_decimal::Decimal::new(2500, 2), 2, Some("SPORT10"))?;
//!     let reference = workflow.generate_booking_ref("user-1", "event-7");
//!     let details = serde_json::json!({ "ref": reference, "total": total.to_string() });
//!     workflow.send_notification("fan@example.com", &details).await;
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod reference;
pub mod services;
pub mod workflow;

pub use config::{BookingConfig, BookingSettings};
pub use error::{BookingError, BookingResult, ServiceError};
pub use services::{Notification, NotificationTransport, PromoRegistry, SeatAvailability};
pub use workflow::BookingWorkflow;
