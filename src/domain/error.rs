//! Validation errors for race state inputs.
//!
//! Every write path (HTTP body, bot reply, store row) funnels its raw input
//! through a constructor that returns one of these errors instead of
//! accepting a bad value.
//!
//! # Examples
//!
//! ```
//! use chrono::Utc;
//! use ultratrack::domain::error::ValidationError;
//! use ultratrack::domain::race::RaceRecord;
//!
//! let result = RaceRecord::new(-1.0, Utc::now());
//! assert!(matches!(result, Err(ValidationError::NegativeDistance { .. })));
//! ```

use thiserror::Error;

/// Bad or missing user input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field was absent from the request.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },

    /// Distance is NaN or infinite.
    #[error("`{field}` must be a finite number")]
    NonFiniteDistance {
        /// Name of the offending field.
        field: &'static str,
    },

    /// Distance below zero.
    #[error("`{field}` must not be negative, got {value}")]
    NegativeDistance {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Increments must move the total forward.
    #[error("`delta_km` must be greater than 0, got {value}")]
    NonPositiveDelta {
        /// The rejected value.
        value: f64,
    },

    /// Lap count must be a positive integer.
    #[error("`laps` must be a positive integer, got {value}")]
    InvalidLaps {
        /// The rejected value, as received.
        value: String,
    },

    /// Free-text number could not be parsed.
    #[error("`{value}` is not a number")]
    InvalidNumber {
        /// The rejected text.
        value: String,
    },

    /// Timestamp is not RFC 3339 / ISO-8601 with an offset.
    #[error("`{field}` is not an ISO-8601 timestamp: `{value}`")]
    InvalidTimestamp {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected text.
        value: String,
    },

    /// Race end must come strictly after race start.
    #[error("race_end `{race_end}` must be after race_start `{race_start}`")]
    WindowNotOrdered {
        /// Start bound as received.
        race_start: String,
        /// End bound as received.
        race_end: String,
    },

    /// Bot input did not match `DD.MM.YYYY HH:MM`.
    #[error("`{value}` does not match DD.MM.YYYY HH:MM")]
    InvalidRaceTimeFormat {
        /// The rejected text.
        value: String,
    },

    /// Race start entered through the bot lies too far back.
    #[error("race start cannot be more than {days} days in the past")]
    RaceStartTooEarly {
        /// Allowed look-back in days.
        days: i64,
    },

    /// Race start entered through the bot lies too far ahead.
    #[error("race start cannot be more than {days} days in the future")]
    RaceStartTooLate {
        /// Allowed look-ahead in days.
        days: i64,
    },
}
