//! Parsing of free-text replies to bot prompts.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta, TimeZone, Utc};

use crate::domain::error::ValidationError;

/// Format admins type race start times in.
pub const RACE_TIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Parse a decimal number, accepting `,` as the decimal separator.
///
/// # Errors
/// Returns [`ValidationError::InvalidNumber`] for anything that is not a
/// finite number.
pub fn parse_number(text: &str) -> Result<f64, ValidationError> {
    let trimmed = text.trim();
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            value: trimmed.to_string(),
        })
}

/// Limits applied to a race start typed into the bot.
#[derive(Debug, Clone, Copy)]
pub struct TimeInputRules {
    /// Offset the admin's local time is read in.
    pub offset: FixedOffset,
    /// Race length; the end is `start + race_duration`.
    pub race_duration: TimeDelta,
    /// Oldest acceptable start, relative to now.
    pub max_past: TimeDelta,
    /// Latest acceptable start, relative to now.
    pub max_future: TimeDelta,
}

impl TimeInputRules {
    /// Parse `DD.MM.YYYY HH:MM` in the configured offset and check it lies
    /// within `[now - max_past, now + max_future]`.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidRaceTimeFormat`],
    /// [`ValidationError::RaceStartTooEarly`] or
    /// [`ValidationError::RaceStartTooLate`].
    pub fn parse_race_start(
        &self,
        text: &str,
        now: DateTime<Utc>,
    ) -> Result<DateTime<FixedOffset>, ValidationError> {
        let trimmed = text.trim();
        let invalid = || ValidationError::InvalidRaceTimeFormat {
            value: trimmed.to_string(),
        };
        let naive = NaiveDateTime::parse_from_str(trimmed, RACE_TIME_FORMAT).map_err(|_| invalid())?;
        let start = self
            .offset
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(invalid)?;

        if start < now - self.max_past {
            return Err(ValidationError::RaceStartTooEarly {
                days: self.max_past.num_days(),
            });
        }
        if start > now + self.max_future {
            return Err(ValidationError::RaceStartTooLate {
                days: self.max_future.num_days(),
            });
        }
        Ok(start)
    }
}
