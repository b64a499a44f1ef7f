//! Persistence port for race state.
//!
//! The state is two singleton documents: the distance record and the race
//! window. Backends store them however they like (SQLite rows, memory,
//! another tracker's HTTP API) as long as a save followed by a load
//! returns the same values.

use async_trait::async_trait;

use crate::domain::race::{RaceRecord, RaceWindow};
use crate::error::Result;

/// Storage backend for the distance record and race window.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the HTTP server and the bot share
/// one store.
///
/// # Errors
///
/// Every method returns an error when the backend cannot be reached or
/// returns data that does not validate.
#[async_trait]
pub trait RaceStore: Send + Sync {
    /// Backend name for logging and health output.
    fn name(&self) -> &'static str;

    /// Load the distance record, or `None` if it was never written.
    async fn load_record(&self) -> Result<Option<RaceRecord>>;

    /// Overwrite the distance record.
    async fn save_record(&self, record: &RaceRecord) -> Result<()>;

    /// Load the race window, or `None` if it was never written.
    async fn load_window(&self) -> Result<Option<RaceWindow>>;

    /// Overwrite the race window.
    async fn save_window(&self, window: &RaceWindow) -> Result<()>;
}
