//! Race state derivation.
//!
//! Everything a viewer sees (rank, progress, clock, lap direction, pace and
//! forecast) is a pure function of the stored distance, the race window and
//! the current time. The bot renderer, the HTTP `/view` endpoint and the CLI
//! all call [`RaceView::derive`]; nothing here touches I/O or keeps state.
//!
//! # Example
//!
//! ```
//! use chrono::{DateTime, TimeDelta, Utc};
//! use ultratrack::domain::calculator::{LapDirection, RacePhase, RaceView};
//! use ultratrack::domain::rank::Rank;
//!
//! let start: DateTime<Utc> = "2025-10-01T11:00:00Z".parse().unwrap();
//! let end = start + TimeDelta::hours(24);
//! let view = RaceView::derive(50.0, start, end, start + TimeDelta::hours(10));
//!
//! assert_eq!(view.phase, RacePhase::InProgress);
//! assert_eq!(view.rank, None);
//! assert_eq!(view.next_rank, Some(Rank::Third));
//! assert_eq!(view.forecast_24h_km, 120.0);
//! assert_eq!(view.lap_number, 126);
//! assert_eq!(view.lap_direction, LapDirection::CounterClockwise);
//! ```

use chrono::{DateTime, TimeDelta, Utc};

use super::race::{km_to_laps, RaceRecord, RaceWindow, LAP_LENGTH_KM};
use super::rank::Rank;

/// Tolerance applied before flooring `km / lap length`.
///
/// Decimal distances such as 1.2 km are not exact in binary and would
/// otherwise land a hair below the lap boundary.
const LAP_EPSILON: f64 = 1e-9;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Where the race stands relative to its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RacePhase {
    /// `now < race_start`
    PreStart,
    /// `race_start <= now < race_end`
    InProgress,
    /// `now >= race_end`
    Finished,
}

impl RacePhase {
    #[must_use]
    pub fn at(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if now < start {
            Self::PreStart
        } else if now < end {
            Self::InProgress
        } else {
            Self::Finished
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PreStart => "pre_start",
            Self::InProgress => "in_progress",
            Self::Finished => "finished",
        }
    }
}

/// Time left in the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remaining {
    NotStarted,
    Running(TimeDelta),
    Finished,
}

/// Running direction for the current lap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LapDirection {
    Clockwise,
    CounterClockwise,
}

impl LapDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clockwise => "clockwise",
            Self::CounterClockwise => "counter-clockwise",
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Everything derived from one `(total_km, window, now)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceView {
    pub phase: RacePhase,
    pub total_km: f64,
    /// Completed laps, rounded to the nearest lap.
    pub total_laps: u64,
    pub rank: Option<Rank>,
    pub next_rank: Option<Rank>,
    /// Zero once the top rank is held.
    pub km_to_next_rank: f64,
    /// Share of the top threshold, clamped to `0..=100`.
    pub progress_percent: f64,
    /// Clamped to the window length.
    pub elapsed: TimeDelta,
    pub remaining: Remaining,
    pub countdown_to_start: TimeDelta,
    /// 1-based lap currently being run.
    pub lap_number: u64,
    pub lap_direction: LapDirection,
    pub average_pace_kmh: Option<f64>,
    pub pace_per_km: Option<TimeDelta>,
    pub forecast_24h_km: f64,
    /// The instant the view was computed for.
    pub computed_at: DateTime<Utc>,
}

impl RaceView {
    /// Derive the full view.
    ///
    /// Callers must pass `total_km >= 0` and `race_end > race_start`; stores
    /// reject anything else before it gets here.
    #[must_use]
    pub fn derive(
        total_km: f64,
        race_start: DateTime<Utc>,
        race_end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let elapsed = elapsed(race_start, race_end, now);
        let average_pace_kmh = average_pace_kmh(total_km, elapsed);
        Self {
            phase: RacePhase::at(race_start, race_end, now),
            total_km,
            total_laps: km_to_laps(total_km),
            rank: Rank::for_distance(total_km),
            next_rank: Rank::next_after(total_km),
            km_to_next_rank: km_to_next_rank(total_km),
            progress_percent: progress_percent(total_km),
            elapsed,
            remaining: remaining(race_start, race_end, now),
            countdown_to_start: countdown_to_start(race_start, now),
            lap_number: lap_number(total_km),
            lap_direction: lap_direction(total_km),
            average_pace_kmh,
            pace_per_km: average_pace_kmh.and_then(pace_per_km),
            forecast_24h_km: forecast_24h_km(total_km, elapsed),
            computed_at: now,
        }
    }

    /// Derive from stored records.
    #[must_use]
    pub fn from_state(record: &RaceRecord, window: &RaceWindow, now: DateTime<Utc>) -> Self {
        Self::derive(record.total_km(), window.start(), window.end(), now)
    }
}

/// Stored state read together, with the view derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceSnapshot {
    pub record: RaceRecord,
    pub window: RaceWindow,
    pub view: RaceView,
}

impl RaceSnapshot {
    #[must_use]
    pub fn at(record: RaceRecord, window: RaceWindow, now: DateTime<Utc>) -> Self {
        let view = RaceView::from_state(&record, &window, now);
        Self {
            record,
            window,
            view,
        }
    }
}

/// Distance to the next threshold above `total_km`, or zero at the top.
#[must_use]
pub fn km_to_next_rank(total_km: f64) -> f64 {
    Rank::next_after(total_km).map_or(0.0, |next| next.threshold_km() - total_km)
}

/// `min(100, total_km / 220 * 100)`.
#[must_use]
pub fn progress_percent(total_km: f64) -> f64 {
    (total_km / Rank::top().threshold_km() * 100.0).clamp(0.0, 100.0)
}

/// `clamp(now - start, 0, end - start)`.
#[must_use]
pub fn elapsed(race_start: DateTime<Utc>, race_end: DateTime<Utc>, now: DateTime<Utc>) -> TimeDelta {
    let full = race_end - race_start;
    (now - race_start).clamp(TimeDelta::zero(), full.max(TimeDelta::zero()))
}

#[must_use]
pub fn remaining(race_start: DateTime<Utc>, race_end: DateTime<Utc>, now: DateTime<Utc>) -> Remaining {
    match RacePhase::at(race_start, race_end, now) {
        RacePhase::PreStart => Remaining::NotStarted,
        RacePhase::InProgress => Remaining::Running(race_end - now),
        RacePhase::Finished => Remaining::Finished,
    }
}

/// `max(0, start - now)`.
#[must_use]
pub fn countdown_to_start(race_start: DateTime<Utc>, now: DateTime<Utc>) -> TimeDelta {
    (race_start - now).max(TimeDelta::zero())
}

/// `floor(total_km / 0.4) + 1`, and lap 1 for no distance.
#[must_use]
pub fn lap_number(total_km: f64) -> u64 {
    if total_km <= 0.0 || !total_km.is_finite() {
        return 1;
    }
    (total_km / LAP_LENGTH_KM + LAP_EPSILON).floor() as u64 + 1
}

/// Odd laps run clockwise, even laps counter-clockwise.
#[must_use]
pub fn lap_direction(total_km: f64) -> LapDirection {
    if lap_number(total_km) % 2 == 1 {
        LapDirection::Clockwise
    } else {
        LapDirection::CounterClockwise
    }
}

fn elapsed_hours(elapsed: TimeDelta) -> f64 {
    elapsed.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_HOUR
}

/// `total_km / elapsed_hours`, or `None` before any time has passed.
#[must_use]
pub fn average_pace_kmh(total_km: f64, elapsed: TimeDelta) -> Option<f64> {
    let hours = elapsed_hours(elapsed);
    (hours > 0.0).then(|| total_km / hours)
}

/// Time per kilometre at `kmh`, rounded to whole seconds.
#[must_use]
pub fn pace_per_km(kmh: f64) -> Option<TimeDelta> {
    if kmh <= 0.0 || !kmh.is_finite() {
        return None;
    }
    Some(TimeDelta::seconds((SECONDS_PER_HOUR / kmh).round() as i64))
}

/// Linear extrapolation of the current pace to 24 hours, zero before start.
#[must_use]
pub fn forecast_24h_km(total_km: f64, elapsed: TimeDelta) -> f64 {
    average_pace_kmh(total_km, elapsed).map_or(0.0, |kmh| kmh * 24.0)
}
