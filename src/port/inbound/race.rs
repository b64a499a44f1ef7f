//! Race use-case port for operator and viewer surfaces.
//!
//! Keeps the HTTP handlers and the Telegram control surface decoupled from
//! the concrete service and its storage backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::calculator::RaceSnapshot;
use crate::domain::race::{RaceRecord, RaceWindow};
use crate::domain::timestamp::Timestamp;
use crate::error::Result;

/// Reads and mutates the shared race state.
///
/// Every mutation validates its input before touching the store and
/// returns the state as persisted. Reads of a store that has never been
/// written return defaults (zero distance, the configured window) and
/// persist them.
///
/// # Errors
///
/// All methods return [`Error::Validation`](crate::error::Error::Validation)
/// for bad input and [`Error::StoreUnavailable`](crate::error::Error::StoreUnavailable)
/// (or another store error) when the backend fails or times out.
#[async_trait]
pub trait RaceTracker: Send + Sync {
    /// Name of the storage backend, for health output.
    fn store_name(&self) -> &'static str;

    /// Current distance record.
    async fn record(&self) -> Result<RaceRecord>;

    /// Current race window.
    async fn window(&self) -> Result<RaceWindow>;

    /// Replace the race window. Requires `race_end > race_start`.
    async fn set_window(&self, race_start: Timestamp, race_end: Timestamp) -> Result<RaceWindow>;

    /// Set the absolute distance.
    async fn set_total_km(&self, total_km: f64) -> Result<RaceRecord>;

    /// Add a positive distance to the current total.
    async fn increment_km(&self, delta_km: f64) -> Result<RaceRecord>;

    /// Add `laps` whole laps to the current total.
    async fn add_laps(&self, laps: u32) -> Result<RaceRecord>;

    /// Set the absolute distance from a lap count.
    async fn set_laps(&self, laps: u32) -> Result<RaceRecord>;

    /// Zero the distance. The window is left alone.
    async fn reset(&self) -> Result<RaceRecord>;

    /// Read the record and the window and derive the race view at `now`.
    async fn snapshot(&self, now: DateTime<Utc>) -> Result<RaceSnapshot>;
}
