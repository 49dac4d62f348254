//! Assembled APNS notifications.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel stored when no expiration was set.
pub(crate) const EXPIRATION_UNSET: i64 = -1;

/// Delivery priority, sent as the `apns-priority` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Deliver immediately.
    Immediate,
    /// Deliver with the device's power state in mind.
    PowerConsideration,
}

impl Priority {
    /// Numeric header value.
    pub fn code(&self) -> u8 {
        match self {
            Self::Immediate => 10,
            Self::PowerConsideration => 5,
        }
    }
}

/// A fully assembled notification: the serialized payload plus delivery
/// metadata for the request headers.
///
/// Only [`NotificationBuilder::build`](crate::NotificationBuilder::build)
/// creates notifications, and they never change afterwards.
#[derive(Debug, Clone)]
pub struct Notification {
    payload: String,
    token: String,
    topic: Option<String>,
    collapse_id: Option<String>,
    expiration: i64,
    priority: Option<Priority>,
    push_type: Option<String>,
    uuid: Option<Uuid>,
}

impl Notification {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        payload: String,
        token: String,
        topic: Option<String>,
        collapse_id: Option<String>,
        expiration: i64,
        priority: Option<Priority>,
        push_type: Option<String>,
        uuid: Option<Uuid>,
    ) -> Self {
        Self {
            payload,
            token,
            topic,
            collapse_id,
            expiration,
            priority,
            push_type,
            uuid,
        }
    }

    /// The JSON request body.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// The device token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The topic, usually the app's bundle ID.
    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    /// The collapse ID.
    pub fn collapse_id(&self) -> Option<&str> {
        self.collapse_id.as_deref()
    }

    /// Expiration as a UNIX timestamp in seconds, if one was set.
    ///
    /// `Some(0)` is an explicit value (deliver once, do not store).
    pub fn expiration(&self) -> Option<i64> {
        (self.expiration > EXPIRATION_UNSET).then_some(self.expiration)
    }

    /// The delivery priority.
    pub fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// The push type (`alert`, `background`, `voip`, ...).
    pub fn push_type(&self) -> Option<&str> {
        self.push_type.as_deref()
    }

    /// The notification ID sent as `apns-id`.
    pub fn uuid(&self) -> Option<Uuid> {
        self.uuid
    }

    /// Payload size in bytes.
    pub fn size(&self) -> usize {
        self.payload.len()
    }

    /// Request headers carrying the delivery metadata.
    ///
    /// Metadata that was never set produces no header.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = Vec::new();

        if let Some(topic) = &self.topic {
            headers.push(("apns-topic", topic.clone()));
        }
        if let Some(collapse_id) = &self.collapse_id {
            headers.push(("apns-collapse-id", collapse_id.clone()));
        }
        if let Some(expiration) = self.expiration() {
            headers.push(("apns-expiration", expiration.to_string()));
        }
        if let Some(priority) = self.priority {
            headers.push(("apns-priority", priority.code().to_string()));
        }
        if let Some(push_type) = &self.push_type {
            headers.push(("apns-push-type", push_type.clone()));
        }
        if let Some(uuid) = self.uuid {
            headers.push(("apns-id", uuid.hyphenated().to_string()));
        }

        headers
    }
}
