//! ISO-8601 timestamps that remember the text they were parsed from.

use std::fmt;

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::ValidationError;

/// A parsed instant plus its original ISO-8601 text.
///
/// Serializes back to exactly the text it was created from, so a race
/// window written as `2025-10-01T14:00:00+03:00` reads back unchanged
/// instead of being normalized to UTC.
#[derive(Debug, Clone)]
pub struct Timestamp {
    raw: String,
    at: DateTime<FixedOffset>,
}

impl Timestamp {
    /// Parse an RFC 3339 timestamp, keeping the input text verbatim.
    ///
    /// # Errors
    /// Returns the chrono parse error if `raw` is not RFC 3339.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let at = DateTime::parse_from_rfc3339(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            at,
        })
    }

    /// Parse an optional request field, trimming whitespace.
    ///
    /// # Errors
    /// Returns [`ValidationError::MissingField`] for an absent or blank value
    /// and [`ValidationError::InvalidTimestamp`] for unparseable text.
    pub fn parse_field(field: &'static str, value: Option<&str>) -> Result<Self, ValidationError> {
        let value = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ValidationError::MissingField { field })?;
        Self::parse(value).map_err(|_| ValidationError::InvalidTimestamp {
            field,
            value: value.to_string(),
        })
    }

    /// Wrap an instant, rendering it as RFC 3339 with whole seconds.
    #[must_use]
    pub fn from_datetime(at: DateTime<FixedOffset>) -> Self {
        Self {
            raw: at.to_rfc3339_opts(SecondsFormat::AutoSi, false),
            at,
        }
    }

    /// The original text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The instant in UTC.
    #[must_use]
    pub fn instant(&self) -> DateTime<Utc> {
        self.at.with_timezone(&Utc)
    }

    /// The instant in the offset it was written with.
    #[must_use]
    pub const fn with_offset(&self) -> DateTime<FixedOffset> {
        self.at
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Timestamp {}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
