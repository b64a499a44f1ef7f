//! Stored race state: the distance counter and the race window.

use chrono::{DateTime, FixedOffset, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::timestamp::Timestamp;

/// Length of one lap of the course.
pub const LAP_LENGTH_KM: f64 = 0.4;

/// Check that a distance is finite and not negative.
///
/// # Errors
/// Returns [`ValidationError::NonFiniteDistance`] or
/// [`ValidationError::NegativeDistance`].
pub fn validate_distance(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteDistance { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeDistance { field, value });
    }
    Ok(value)
}

/// Convert a lap count to kilometres, rounded to two decimals.
#[must_use]
pub fn laps_to_km(laps: u32) -> f64 {
    (f64::from(laps) * LAP_LENGTH_KM * 100.0).round() / 100.0
}

/// Accept a lap count that is a whole number, positive unless `allow_zero`.
///
/// # Errors
/// Returns [`ValidationError::InvalidLaps`] for fractions, negatives,
/// out-of-range values, or zero when not allowed.
pub fn validate_laps(value: f64, allow_zero: bool) -> Result<u32, ValidationError> {
    let min = if allow_zero { 0.0 } else { 1.0 };
    if !value.is_finite() || value.fract() != 0.0 || value < min || value > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidLaps {
            value: value.to_string(),
        });
    }
    Ok(value as u32)
}

/// Whole laps closest to a distance.
#[must_use]
pub fn km_to_laps(total_km: f64) -> u64 {
    if total_km <= 0.0 || !total_km.is_finite() {
        return 0;
    }
    (total_km / LAP_LENGTH_KM).round() as u64
}

/// Update stamps keep millisecond precision, the resolution every store
/// persists.
fn stamp(at: DateTime<Utc>) -> DateTime<Utc> {
    at.trunc_subsecs(3)
}

/// The cumulative distance covered so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRaceRecord")]
pub struct RaceRecord {
    total_km: f64,
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawRaceRecord {
    total_km: f64,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RawRaceRecord> for RaceRecord {
    type Error = ValidationError;

    fn try_from(raw: RawRaceRecord) -> Result<Self, Self::Error> {
        Self::new(raw.total_km, raw.updated_at)
    }
}

impl RaceRecord {
    /// Create a record, rejecting negative or non-finite distances.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] for a bad `total_km`.
    pub fn new(total_km: f64, updated_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        let total_km = validate_distance("total_km", total_km)?;
        Ok(Self {
            total_km,
            updated_at: stamp(updated_at),
        })
    }

    /// A fresh record with no distance.
    #[must_use]
    pub fn zero(updated_at: DateTime<Utc>) -> Self {
        Self {
            total_km: 0.0,
            updated_at: stamp(updated_at),
        }
    }

    #[must_use]
    pub const fn total_km(&self) -> f64 {
        self.total_km
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Completed laps, rounded to the nearest lap.
    #[must_use]
    pub fn total_laps(&self) -> u64 {
        km_to_laps(self.total_km)
    }
}

/// The `[race_start, race_end)` interval of the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRaceWindow")]
pub struct RaceWindow {
    race_start: Timestamp,
    race_end: Timestamp,
    updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawRaceWindow {
    race_start: Timestamp,
    race_end: Timestamp,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RawRaceWindow> for RaceWindow {
    type Error = ValidationError;

    fn try_from(raw: RawRaceWindow) -> Result<Self, Self::Error> {
        Self::new(raw.race_start, raw.race_end, raw.updated_at)
    }
}

impl RaceWindow {
    /// Create a window, requiring `race_end > race_start`.
    ///
    /// # Errors
    /// Returns [`ValidationError::WindowNotOrdered`] otherwise.
    pub fn new(
        race_start: Timestamp,
        race_end: Timestamp,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if race_end.instant() <= race_start.instant() {
            return Err(ValidationError::WindowNotOrdered {
                race_start: race_start.as_str().to_string(),
                race_end: race_end.as_str().to_string(),
            });
        }
        Ok(Self {
            race_start,
            race_end,
            updated_at: stamp(updated_at),
        })
    }

    /// Build a window from raw request fields.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if a bound is missing, unparseable,
    /// or the bounds are not ordered.
    pub fn parse(
        race_start: Option<&str>,
        race_end: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let race_start = Timestamp::parse_field("race_start", race_start)?;
        let race_end = Timestamp::parse_field("race_end", race_end)?;
        Self::new(race_start, race_end, updated_at)
    }

    /// A window of `duration` beginning at `start`.
    ///
    /// # Errors
    /// Returns [`ValidationError::WindowNotOrdered`] for a non-positive duration.
    pub fn starting_at(
        start: DateTime<FixedOffset>,
        duration: TimeDelta,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::new(
            Timestamp::from_datetime(start),
            Timestamp::from_datetime(start + duration),
            updated_at,
        )
    }

    #[must_use]
    pub const fn race_start(&self) -> &Timestamp {
        &self.race_start
    }

    #[must_use]
    pub const fn race_end(&self) -> &Timestamp {
        &self.race_end
    }

    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Start instant in UTC.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.race_start.instant()
    }

    /// End instant in UTC.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.race_end.instant()
    }

    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end() - self.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-10-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn record_rejects_negative_and_non_finite() {
        assert!(matches!(
            RaceRecord::new(-0.1, now()),
            Err(ValidationError::NegativeDistance { field: "total_km", .. })
        ));
        assert!(matches!(
            RaceRecord::new(f64::NAN, now()),
            Err(ValidationError::NonFiniteDistance { .. })
        ));
        assert!(matches!(
            RaceRecord::new(f64::INFINITY, now()),
            Err(ValidationError::NonFiniteDistance { .. })
        ));
    }

    #[test]
    fn update_stamps_drop_sub_millisecond_digits() {
        let at = DateTime::parse_from_rfc3339("2025-10-01T12:00:00.123456789Z")
            .unwrap()
            .with_timezone(&Utc);
        let millis = DateTime::parse_from_rfc3339("2025-10-01T12:00:00.123Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(RaceRecord::new(1.0, at).unwrap().updated_at(), millis);
        assert_eq!(RaceRecord::zero(at).updated_at(), millis);
        let window = RaceWindow::parse(
            Some("2025-10-04T10:00:00+03:00"),
            Some("2025-10-05T10:00:00+03:00"),
            at,
        )
        .unwrap();
        assert_eq!(window.updated_at(), millis);
    }

    #[test]
    fn record_counts_laps() {
        let record = RaceRecord::new(12.0, now()).unwrap();
        assert_eq!(record.total_laps(), 30);
        assert_eq!(RaceRecord::zero(now()).total_laps(), 0);
    }

    #[test]
    fn record_deserialize_validates() {
        let bad = r#"{"total_km": -5, "updated_at": "2025-10-01T12:00:00Z"}"#;
        assert!(serde_json::from_str::<RaceRecord>(bad).is_err());

        let good = r#"{"total_km": 5.5, "updated_at": "2025-10-01T12:00:00Z"}"#;
        let record: RaceRecord = serde_json::from_str(good).unwrap();
        assert_eq!(record.total_km(), 5.5);
    }

    #[test]
    fn laps_to_km_rounds_to_centimetres() {
        assert_eq!(laps_to_km(0), 0.0);
        assert_eq!(laps_to_km(1), 0.4);
        assert_eq!(laps_to_km(3), 1.2);
        assert_eq!(laps_to_km(550), 220.0);
    }

    #[test]
    fn validate_laps_wants_whole_numbers() {
        assert_eq!(validate_laps(5.0, false), Ok(5));
        assert_eq!(validate_laps(0.0, true), Ok(0));
        assert!(validate_laps(0.0, false).is_err());
        assert!(validate_laps(-1.0, true).is_err());
        assert!(validate_laps(2.5, false).is_err());
        assert!(validate_laps(f64::NAN, false).is_err());
    }

    #[test]
    fn window_requires_ordered_bounds() {
        let result = RaceWindow::parse(
            Some("2025-10-02T14:00:00+03:00"),
            Some("2025-10-01T14:00:00+03:00"),
            now(),
        );
        assert!(matches!(result, Err(ValidationError::WindowNotOrdered { .. })));

        let equal = RaceWindow::parse(
            Some("2025-10-01T14:00:00+03:00"),
            Some("2025-10-01T11:00:00Z"),
            now(),
        );
        assert!(matches!(equal, Err(ValidationError::WindowNotOrdered { .. })));
    }

    #[test]
    fn window_reports_missing_and_malformed_bounds() {
        assert_eq!(
            RaceWindow::parse(None, Some("2025-10-01T14:00:00+03:00"), now()),
            Err(ValidationError::MissingField {
                field: "race_start"
            })
        );
        assert_eq!(
            RaceWindow::parse(Some("2025-10-01T14:00:00+03:00"), Some("  "), now()),
            Err(ValidationError::MissingField { field: "race_end" })
        );
        assert!(matches!(
            RaceWindow::parse(Some("01.10.2025 14:00"), Some("2025-10-02T14:00:00+03:00"), now()),
            Err(ValidationError::InvalidTimestamp {
                field: "race_start",
                ..
            })
        ));
    }

    #[test]
    fn window_keeps_strings_and_duration() {
        let window = RaceWindow::parse(
            Some("2025-10-01T14:00:00+03:00"),
            Some("2025-10-02T14:00:00+03:00"),
            now(),
        )
        .unwrap();
        assert_eq!(window.race_start().as_str(), "2025-10-01T14:00:00+03:00");
        assert_eq!(window.race_end().as_str(), "2025-10-02T14:00:00+03:00");
        assert_eq!(window.duration(), TimeDelta::hours(24));
    }

    #[test]
    fn starting_at_adds_duration_in_same_offset() {
        let start = DateTime::parse_from_rfc3339("2025-10-04T10:00:00+03:00").unwrap();
        let window = RaceWindow::starting_at(start, TimeDelta::hours(24), now()).unwrap();
        assert_eq!(window.race_end().as_str(), "2025-10-05T10:00:00+03:00");

        assert!(RaceWindow::starting_at(start, TimeDelta::zero(), now()).is_err());
    }
}
