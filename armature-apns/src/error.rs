//! APNS error types.

use thiserror::Error;

/// Result type for APNS operations.
pub type Result<T> = std::result::Result<T, PushError>;

/// APNS errors.
#[derive(Debug, Error)]
pub enum PushError {
    /// Device token rejected by the gateway.
    #[error("Invalid device token: {0}")]
    InvalidToken(String),

    /// Device unregistered.
    #[error("Device unregistered: {0}")]
    Unregistered(String),

    /// Authentication error.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limited.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Payload too large.
    #[error("Payload too large: {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge {
        /// Actual size.
        size: usize,
        /// Maximum allowed size.
        limit: usize,
    },

    /// Gateway error.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PushError {
    /// Check if this error indicates the device should be removed.
    pub fn should_remove_device(&self) -> bool {
        matches!(self, Self::InvalidToken(_) | Self::Unregistered(_))
    }

    /// Check if this error is retryable.
    ///
    /// Serialization failures are never retryable: the same builder state
    /// produces the same failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::Io(_))
    }

    /// Get retry-after duration if rate limited.
    pub fn retry_after(&self) -> Option<std::time::Duration> {
        if let Self::RateLimited(secs) = self {
            Some(std::time::Duration::from_secs(*secs))
        } else {
            None
        }
    }
}

impl From<serde_json::Error> for PushError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for PushError {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid gateway URL: {}", err))
    }
}
