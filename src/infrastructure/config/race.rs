//! Race window defaults and bot time-input rules.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Race configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RaceConfig {
    /// Start of the window used until an admin sets one (RFC 3339).
    #[serde(default = "default_start")]
    pub default_start: String,
    /// Length of the race in hours (default: 24).
    #[serde(default = "default_duration_hours")]
    pub duration_hours: u32,
    /// Offset used to read and show local race times (default: +03:00).
    #[serde(default = "default_display_offset")]
    pub display_offset: String,
    /// How far in the past a new start time may be, in days (default: 7).
    #[serde(default = "default_max_past_days")]
    pub max_past_days: u32,
    /// How far in the future a new start time may be, in days (default: 365).
    #[serde(default = "default_max_future_days")]
    pub max_future_days: u32,
}

fn default_start() -> String {
    "2025-10-04T10:00:00+03:00".to_string()
}

const fn default_duration_hours() -> u32 {
    24
}

fn default_display_offset() -> String {
    "+03:00".to_string()
}

const fn default_max_past_days() -> u32 {
    7
}

const fn default_max_future_days() -> u32 {
    365
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            default_start: default_start(),
            duration_hours: default_duration_hours(),
            display_offset: default_display_offset(),
            max_past_days: default_max_past_days(),
            max_future_days: default_max_future_days(),
        }
    }
}

impl RaceConfig {
    /// Parsed [`default_start`](Self::default_start).
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] for a non-RFC 3339 value.
    #[allow(clippy::result_large_err)]
    pub fn default_start(&self) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.default_start).map_err(|e| {
            ConfigError::InvalidValue {
                field: "race.default_start",
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Parsed [`display_offset`](Self::display_offset).
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] unless the value looks like `+03:00`.
    #[allow(clippy::result_large_err)]
    pub fn display_offset(&self) -> Result<FixedOffset> {
        self.display_offset.parse::<FixedOffset>().map_err(|e| {
            ConfigError::InvalidValue {
                field: "race.display_offset",
                reason: e.to_string(),
            }
            .into()
        })
    }
}
