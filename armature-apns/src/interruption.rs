//! Interruption levels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::PushError;

/// How strongly a notification may interrupt the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterruptionLevel {
    /// Added to the notification list without lighting the screen.
    Passive,
    /// Presented immediately, the system default.
    Active,
    /// Presented immediately, may break through focus modes.
    TimeSensitive,
    /// Presented immediately, bypasses the mute switch.
    Critical,
}

impl InterruptionLevel {
    /// Every level, least interruptive first.
    pub const ALL: [InterruptionLevel; 4] = [
        Self::Passive,
        Self::Active,
        Self::TimeSensitive,
        Self::Critical,
    ];

    /// Wire value written to `interruption-level`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passive => "passive",
            Self::Active => "active",
            Self::TimeSensitive => "time-sensitive",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for InterruptionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterruptionLevel {
    type Err = PushError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| PushError::Config(format!("Unknown interruption level: {}", s)))
    }
}
