//! Transport seam for delivering notifications.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::{Notification, PushError, Result};

/// Delivers built notifications to the gateway.
///
/// Implementations send `payload()` unmodified as the request body and the
/// metadata from [`Notification::headers`] as request headers.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    /// Send a single notification.
    async fn send(&self, notification: &Notification) -> Result<DeliveryOutcome>;

    /// Send several notifications, one after another.
    async fn send_batch(&self, notifications: &[Notification]) -> Vec<Result<DeliveryOutcome>> {
        let mut results = Vec::with_capacity(notifications.len());
        for notification in notifications {
            results.push(self.send(notification).await);
        }
        results
    }
}

/// Gateway response to a single request.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOutcome {
    /// HTTP status code.
    pub status: u16,
    /// `apns-id` response header.
    pub apns_id: Option<Uuid>,
    /// Error reason from the response body.
    pub reason: Option<String>,
    /// Time the token became invalid (milliseconds), for 410 responses.
    pub timestamp: Option<i64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    reason: Option<String>,
    timestamp: Option<i64>,
}

impl DeliveryOutcome {
    /// A successful delivery.
    pub fn accepted(apns_id: Option<Uuid>) -> Self {
        Self {
            status: 200,
            apns_id,
            reason: None,
            timestamp: None,
        }
    }

    /// Build an outcome from a response status and JSON body.
    ///
    /// Bodies that are empty or not valid JSON leave `reason` unset.
    pub fn from_response(status: u16, apns_id: Option<Uuid>, body: &str) -> Self {
        let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
        let (reason, timestamp) = parsed.map_or((None, None), |b| (b.reason, b.timestamp));

        Self {
            status,
            apns_id,
            reason,
            timestamp,
        }
    }

    /// Check if the gateway accepted the notification.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Map the outcome to an error for `token` if delivery failed.
    pub fn into_result(self, token: &str) -> Result<Self> {
        if self.is_success() {
            debug!(apns_id = ?self.apns_id, "APNS notification accepted");
            return Ok(self);
        }

        let reason = self.reason.clone().unwrap_or_default();
        debug!(status = self.status, reason = %reason, "APNS notification rejected");

        Err(match self.status {
            410 => PushError::Unregistered(token.to_string()),
            400 if reason == "BadDeviceToken" || reason == "DeviceTokenNotForTopic" => {
                PushError::InvalidToken(token.to_string())
            }
            403 => PushError::Auth(reason),
            429 => PushError::RateLimited(60),
            status => PushError::Provider(format!("APNS error {}: {}", status, reason)),
        })
    }
}
