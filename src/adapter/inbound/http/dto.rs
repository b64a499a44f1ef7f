//! Request and response bodies.
//!
//! Request fields are optional so a missing field surfaces as a
//! validation error naming it rather than a generic decode failure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::calculator::{RaceSnapshot, Remaining};
use crate::domain::duration;
use crate::domain::race::{RaceRecord, RaceWindow};
use crate::domain::rank::{Rank, RANK_LADDER};
use crate::domain::timestamp::Timestamp;

#[derive(Debug, Deserialize)]
pub struct SetDistanceRequest {
    pub total_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct IncrementRequest {
    pub delta_km: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct LapsRequest {
    pub laps: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct WindowRequest {
    pub race_start: Option<String>,
    pub race_end: Option<String>,
}

/// `GET /stats` and every distance write.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatsResponse {
    pub total_km: f64,
    pub total_laps: u64,
    pub updated_at: DateTime<Utc>,
}

impl From<&RaceRecord> for StatsResponse {
    fn from(record: &RaceRecord) -> Self {
        Self {
            total_km: record.total_km(),
            total_laps: record.total_laps(),
            updated_at: record.updated_at(),
        }
    }
}

/// `POST /distance/laps`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LapsAddedResponse {
    #[serde(flatten)]
    pub stats: StatsResponse,
    pub added_laps: u32,
}

/// `GET`/`POST /race-window`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WindowResponse {
    pub race_start: Timestamp,
    pub race_end: Timestamp,
    pub updated_at: DateTime<Utc>,
}

impl From<&RaceWindow> for WindowResponse {
    fn from(window: &RaceWindow) -> Self {
        Self {
            race_start: window.race_start().clone(),
            race_end: window.race_end().clone(),
            updated_at: window.updated_at(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
}

/// One entry of the rank ladder with whether it has been reached.
#[derive(Debug, Serialize, Deserialize)]
pub struct RankCard {
    pub label: String,
    pub threshold_km: f64,
    pub reached: bool,
}

/// `GET /view`: the derived race view, with durations as both seconds and
/// display text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ViewResponse {
    pub phase: String,
    pub total_km: f64,
    pub total_laps: u64,
    pub rank: Option<String>,
    pub next_rank: Option<String>,
    pub km_to_next_rank: f64,
    pub progress_percent: f64,
    pub ranks: Vec<RankCard>,
    pub elapsed_seconds: i64,
    pub elapsed_text: String,
    pub elapsed_clock: String,
    pub remaining_seconds: Option<i64>,
    pub remaining_clock: Option<String>,
    pub countdown_seconds: i64,
    pub countdown_text: String,
    pub lap_number: u64,
    pub lap_direction: String,
    pub average_pace_kmh: Option<f64>,
    pub pace_per_km: Option<String>,
    pub forecast_24h_km: f64,
    pub race_start: Timestamp,
    pub race_end: Timestamp,
    pub updated_at: DateTime<Utc>,
    pub computed_at: DateTime<Utc>,
}

fn label(rank: Option<Rank>) -> Option<String> {
    rank.map(|r| r.label().to_string())
}

impl From<&RaceSnapshot> for ViewResponse {
    fn from(snapshot: &RaceSnapshot) -> Self {
        let RaceSnapshot {
            record,
            window,
            view,
        } = snapshot;
        let remaining = match view.remaining {
            Remaining::Running(left) => Some(left),
            Remaining::NotStarted | Remaining::Finished => None,
        };
        Self {
            phase: view.phase.as_str().to_string(),
            total_km: view.total_km,
            total_laps: view.total_laps,
            rank: label(view.rank),
            next_rank: label(view.next_rank),
            km_to_next_rank: view.km_to_next_rank,
            progress_percent: view.progress_percent,
            ranks: RANK_LADDER
                .iter()
                .map(|rank| RankCard {
                    label: rank.label().to_string(),
                    threshold_km: rank.threshold_km(),
                    reached: view.rank.is_some_and(|current| current >= *rank),
                })
                .collect(),
            elapsed_seconds: view.elapsed.num_seconds(),
            elapsed_text: duration::hours_minutes(view.elapsed),
            elapsed_clock: duration::clock(view.elapsed),
            remaining_seconds: remaining.map(|left| left.num_seconds()),
            remaining_clock: remaining.map(duration::clock),
            countdown_seconds: view.countdown_to_start.num_seconds(),
            countdown_text: duration::countdown(view.countdown_to_start),
            lap_number: view.lap_number,
            lap_direction: view.lap_direction.as_str().to_string(),
            average_pace_kmh: view.average_pace_kmh,
            pace_per_km: view.pace_per_km.map(duration::pace),
            forecast_24h_km: view.forecast_24h_km,
            race_start: window.race_start().clone(),
            race_end: window.race_end().clone(),
            updated_at: record.updated_at(),
            computed_at: view.computed_at,
        }
    }
}
