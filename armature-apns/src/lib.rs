//! # Armature APNS
//!
//! Payloads and delivery metadata for the Apple Push Notification service.
//!
//! ## Features
//!
//! - **Builder**: Assemble the `aps`/`alert` dictionaries and custom fields
//!   incrementally, then freeze them into an immutable [`Notification`]
//! - **Deterministic payloads**: Byte-stable JSON with a selectable key order
//! - **Delivery metadata**: Topic, collapse ID, expiration, priority, push
//!   type and notification ID, exposed as request headers
//! - **Transport seam**: A [`NotificationSender`] trait for the HTTP/2 client
//!
//! ## Quick Start
//!
//! ```rust
//! use armature_apns::{InterruptionLevel, NotificationBuilder, Priority};
//!
//! let mut builder = NotificationBuilder::new("device-token");
//! builder
//!     .alert_title("New Message")
//!     .alert_body("You have a new message!")
//!     .category(Some("MESSAGE"))
//!     .interruption_level(Some(InterruptionLevel::TimeSensitive))
//!     .relevance_score(0.8)
//!     .topic("com.example.app")
//!     .priority(Priority::Immediate);
//!
//! let notification = builder.build()?;
//! assert!(notification.payload().starts_with(r#"{"aps":{"#));
//! # Ok::<(), armature_apns::PushError>(())
//! ```
//!
//! ## Sending
//!
//! ```rust,ignore
//! use armature_apns::{ApnsConfig, NotificationSender};
//!
//! let config = ApnsConfig::from_env()?;
//! config.check_payload(&notification)?;
//!
//! let outcome = sender.send(&notification).await?;
//! outcome.into_result(notification.token())?;
//! ```

mod builder;
mod config;
mod error;
mod interruption;
mod notification;
mod order;
mod provider;
mod value;

pub use builder::NotificationBuilder;
pub use config::{ApnsConfig, ApnsEnvironment, MAX_PAYLOAD_SIZE, MAX_VOIP_PAYLOAD_SIZE};
pub use error::{PushError, Result};
pub use interruption::InterruptionLevel;
pub use notification::{Notification, Priority};
pub use order::KeyOrder;
pub use provider::{DeliveryOutcome, NotificationSender};
pub use value::{PayloadMap, PayloadValue};

/// Prelude for common imports.
///
/// ```
/// use armature_apns::prelude::*;
/// ```
pub mod prelude {
    pub use crate::builder::NotificationBuilder;
    pub use crate::config::{ApnsConfig, ApnsEnvironment};
    pub use crate::error::{PushError, Result};
    pub use crate::interruption::InterruptionLevel;
    pub use crate::notification::{Notification, Priority};
    pub use crate::order::KeyOrder;
    pub use crate::provider::{DeliveryOutcome, NotificationSender};
    pub use crate::value::{PayloadMap, PayloadValue};
}
