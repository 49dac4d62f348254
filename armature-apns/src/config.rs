//! APNS configuration.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;
use url::Url;

use crate::{Notification, PushError, Result};

/// Payload limit for regular notifications.
pub const MAX_PAYLOAD_SIZE: usize = 4096;

/// Payload limit for VoIP notifications.
pub const MAX_VOIP_PAYLOAD_SIZE: usize = 5120;

/// APNS environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApnsEnvironment {
    /// Development/sandbox environment.
    #[serde(alias = "sandbox")]
    Development,
    /// Production environment.
    #[default]
    Production,
}

impl ApnsEnvironment {
    /// Gateway base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Development => "https://api.sandbox.push.apple.com",
            Self::Production => "https://api.push.apple.com",
        }
    }
}

/// APNS configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApnsConfig {
    /// Environment.
    pub environment: ApnsEnvironment,
    /// Topic used when a notification has none (usually the bundle ID).
    pub default_topic: Option<String>,
    /// Payload limit in bytes for non-VoIP notifications.
    pub max_payload_size: usize,
}

impl Default for ApnsConfig {
    fn default() -> Self {
        Self {
            environment: ApnsEnvironment::Production,
            default_topic: None,
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }
}

impl ApnsConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PushError::Config(e.to_string()))?;
        debug!(environment = ?config.environment, "Loaded APNS configuration");
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load configuration from `APNS_ENVIRONMENT`, `APNS_TOPIC` and
    /// `APNS_MAX_PAYLOAD_SIZE`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(env) = var("APNS_ENVIRONMENT") {
            config.environment = match env.to_lowercase().as_str() {
                "development" | "sandbox" => ApnsEnvironment::Development,
                "production" => ApnsEnvironment::Production,
                other => {
                    return Err(PushError::Config(format!(
                        "Unknown APNS environment: {}",
                        other
                    )));
                }
            };
        }

        config.default_topic = var("APNS_TOPIC");

        if let Some(size) = var("APNS_MAX_PAYLOAD_SIZE") {
            config.max_payload_size = size
                .parse()
                .map_err(|_| PushError::Config(format!("Invalid payload size: {}", size)))?;
        }

        debug!(environment = ?config.environment, "Loaded APNS configuration from environment");
        Ok(config)
    }

    /// Set the environment.
    pub fn environment(mut self, env: ApnsEnvironment) -> Self {
        self.environment = env;
        self
    }

    /// Use development environment.
    pub fn development(self) -> Self {
        self.environment(ApnsEnvironment::Development)
    }

    /// Use production environment.
    pub fn production(self) -> Self {
        self.environment(ApnsEnvironment::Production)
    }

    /// Set the default topic.
    pub fn default_topic(mut self, topic: impl Into<String>) -> Self {
        self.default_topic = Some(topic.into());
        self
    }

    /// Set the payload limit for non-VoIP notifications.
    pub fn max_payload_size(mut self, size: usize) -> Self {
        self.max_payload_size = size;
        self
    }

    /// Request URL for a device token.
    ///
    /// The token is written as a single percent-encoded path segment, so it
    /// can never change the path, query or fragment of the request.
    pub fn device_url(&self, token: &str) -> Result<Url> {
        if token.is_empty() || token == "." || token == ".." {
            return Err(PushError::InvalidToken(token.to_string()));
        }

        let mut url = Url::parse(self.environment.endpoint())?;
        url.path_segments_mut()
            .map_err(|_| PushError::Config("Gateway URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["3", "device", token]);
        Ok(url)
    }

    /// Topic to send a notification under.
    pub fn topic_for<'a>(&'a self, notification: &'a Notification) -> Option<&'a str> {
        notification
            .topic()
            .or(self.default_topic.as_deref())
    }

    /// Payload limit that applies to a notification.
    pub fn payload_limit(&self, notification: &Notification) -> usize {
        if notification.push_type() == Some("voip") {
            MAX_VOIP_PAYLOAD_SIZE
        } else {
            self.max_payload_size
        }
    }

    /// Check that a notification's payload fits the gateway limit.
    pub fn check_payload(&self, notification: &Notification) -> Result<()> {
        let size = notification.size();
        let limit = self.payload_limit(notification);
        if size > limit {
            return Err(PushError::PayloadTooLarge { size, limit });
        }
        Ok(())
    }
}
