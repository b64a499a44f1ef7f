//! Race service: the [`RaceTracker`] implementation over a [`RaceStore`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeDelta, Utc};
use tracing::{debug, info, warn};

use crate::domain::calculator::RaceSnapshot;
use crate::domain::error::ValidationError;
use crate::domain::race::{laps_to_km, validate_distance, RaceRecord, RaceWindow};
use crate::domain::timestamp::Timestamp;
use crate::error::{Error, Result};
use crate::port::inbound::race::RaceTracker;
use crate::port::outbound::store::RaceStore;

/// Defaults and limits the service applies on top of the store.
#[derive(Debug, Clone)]
pub struct RaceSettings {
    /// Start of the window persisted when none is stored.
    pub default_start: DateTime<FixedOffset>,
    /// Length of a race window built from a start time.
    pub race_duration: TimeDelta,
    /// Upper bound on every store call.
    pub store_timeout: Duration,
}

impl Default for RaceSettings {
    fn default() -> Self {
        let default_start = DateTime::parse_from_rfc3339("2025-10-04T10:00:00+03:00")
            .unwrap_or_else(|_| Utc::now().fixed_offset());
        Self {
            default_start,
            race_duration: TimeDelta::hours(24),
            store_timeout: Duration::from_secs(5),
        }
    }
}

/// Race use cases over a shared store.
pub struct RaceService {
    store: Arc<dyn RaceStore>,
    settings: RaceSettings,
}

impl RaceService {
    #[must_use]
    pub fn new(store: Arc<dyn RaceStore>, settings: RaceSettings) -> Self {
        Self { store, settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &RaceSettings {
        &self.settings
    }

    /// Run a store call under the configured timeout.
    async fn bounded<T>(&self, op: &'static str, call: impl Future<Output = Result<T>>) -> Result<T> {
        match tokio::time::timeout(self.settings.store_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(store = self.store.name(), op, error = %e, "Store call failed");
                Err(e)
            }
            Err(_) => {
                warn!(
                    store = self.store.name(),
                    op,
                    timeout_ms = self.settings.store_timeout.as_millis() as u64,
                    "Store call timed out"
                );
                Err(Error::StoreUnavailable(format!("{op} timed out")))
            }
        }
    }

    fn default_window(&self, now: DateTime<Utc>) -> Result<RaceWindow> {
        Ok(RaceWindow::starting_at(
            self.settings.default_start,
            self.settings.race_duration,
            now,
        )?)
    }

    async fn write_record(&self, total_km: f64) -> Result<RaceRecord> {
        let record = RaceRecord::new(total_km, Utc::now())?;
        self.bounded("save_record", self.store.save_record(&record))
            .await?;
        info!(total_km = record.total_km(), laps = record.total_laps(), "Distance updated");
        Ok(record)
    }
}

#[async_trait]
impl RaceTracker for RaceService {
    fn store_name(&self) -> &'static str {
        self.store.name()
    }

    async fn record(&self) -> Result<RaceRecord> {
        if let Some(record) = self.bounded("load_record", self.store.load_record()).await? {
            return Ok(record);
        }
        let record = RaceRecord::zero(Utc::now());
        self.bounded("save_record", self.store.save_record(&record))
            .await?;
        debug!("Created empty distance record");
        Ok(record)
    }

    async fn window(&self) -> Result<RaceWindow> {
        if let Some(window) = self.bounded("load_window", self.store.load_window()).await? {
            return Ok(window);
        }
        let window = self.default_window(Utc::now())?;
        self.bounded("save_window", self.store.save_window(&window))
            .await?;
        debug!(race_start = %window.race_start(), "Created default race window");
        Ok(window)
    }

    async fn set_window(&self, race_start: Timestamp, race_end: Timestamp) -> Result<RaceWindow> {
        let window = RaceWindow::new(race_start, race_end, Utc::now())?;
        self.bounded("save_window", self.store.save_window(&window))
            .await?;
        info!(
            race_start = %window.race_start(),
            race_end = %window.race_end(),
            "Race window updated"
        );
        Ok(window)
    }

    async fn set_total_km(&self, total_km: f64) -> Result<RaceRecord> {
        self.write_record(total_km).await
    }

    async fn increment_km(&self, delta_km: f64) -> Result<RaceRecord> {
        let delta_km = validate_distance("delta_km", delta_km)?;
        if delta_km <= 0.0 {
            return Err(ValidationError::NonPositiveDelta { value: delta_km }.into());
        }
        let current = self.record().await?;
        self.write_record(current.total_km() + delta_km).await
    }

    async fn add_laps(&self, laps: u32) -> Result<RaceRecord> {
        if laps == 0 {
            return Err(ValidationError::InvalidLaps {
                value: laps.to_string(),
            }
            .into());
        }
        let current = self.record().await?;
        self.write_record(current.total_km() + laps_to_km(laps))
            .await
    }

    async fn set_laps(&self, laps: u32) -> Result<RaceRecord> {
        self.write_record(laps_to_km(laps)).await
    }

    async fn reset(&self) -> Result<RaceRecord> {
        let record = self.write_record(0.0).await?;
        info!("Distance reset");
        Ok(record)
    }

    async fn snapshot(&self, now: DateTime<Utc>) -> Result<RaceSnapshot> {
        let record = self.record().await?;
        let window = self.window().await?;
        Ok(RaceSnapshot::at(record, window, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::domain::calculator::RacePhase;
    use crate::error::ErrorKind;

    fn service() -> (Arc<MemoryStore>, RaceService) {
        let store = Arc::new(MemoryStore::new());
        let service = RaceService::new(store.clone(), RaceSettings::default());
        (store, service)
    }

    struct StalledStore;

    #[async_trait]
    impl RaceStore for StalledStore {
        fn name(&self) -> &'static str {
            "stalled"
        }

        async fn load_record(&self) -> Result<Option<RaceRecord>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(None)
        }

        async fn save_record(&self, _record: &RaceRecord) -> Result<()> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }

        async fn load_window(&self) -> Result<Option<RaceWindow>> {
            Err(Error::Database("disk I/O error".into()))
        }

        async fn save_window(&self, _window: &RaceWindow) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn first_read_persists_defaults() {
        let (store, service) = service();

        let record = service.record().await.unwrap();
        assert_eq!(record.total_km(), 0.0);
        assert_eq!(store.load_record().await.unwrap(), Some(record));

        let window = service.window().await.unwrap();
        assert_eq!(window.race_start().as_str(), "2025-10-04T10:00:00+03:00");
        assert_eq!(window.race_end().as_str(), "2025-10-05T10:00:00+03:00");
        assert_eq!(store.load_window().await.unwrap(), Some(window));
    }

    #[tokio::test]
    async fn second_read_returns_stored_record() {
        let (_store, service) = service();
        let first = service.set_total_km(12.5).await.unwrap();
        let again = service.record().await.unwrap();
        assert_eq!(first, again);
    }

    #[tokio::test]
    async fn set_total_rejects_bad_values_without_writing() {
        let (store, service) = service();
        service.set_total_km(10.0).await.unwrap();

        let err = service.set_total_km(-1.0).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        let err = service.set_total_km(f64::NAN).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let stored = store.load_record().await.unwrap().unwrap();
        assert_eq!(stored.total_km(), 10.0);
    }

    #[tokio::test]
    async fn increment_is_additive_and_positive() {
        let (_store, service) = service();
        service.set_total_km(10.0).await.unwrap();
        let record = service.increment_km(2.5).await.unwrap();
        assert_eq!(record.total_km(), 12.5);

        assert!(matches!(
            service.increment_km(0.0).await,
            Err(Error::Validation(ValidationError::NonPositiveDelta { .. }))
        ));
        assert!(service.increment_km(-3.0).await.is_err());
        assert!(service.increment_km(f64::INFINITY).await.is_err());
    }

    #[tokio::test]
    async fn laps_add_and_set() {
        let (_store, service) = service();
        service.set_total_km(1.0).await.unwrap();

        let added = service.add_laps(3).await.unwrap();
        assert!((added.total_km() - 2.2).abs() < 1e-9);

        let set = service.set_laps(550).await.unwrap();
        assert_eq!(set.total_km(), 220.0);

        assert!(service.add_laps(0).await.is_err());
        assert_eq!(service.set_laps(0).await.unwrap().total_km(), 0.0);
    }

    #[tokio::test]
    async fn reset_zeroes_distance_and_keeps_window() {
        let (_store, service) = service();
        let window = service
            .set_window(
                Timestamp::parse("2025-12-31T18:00:00+03:00").unwrap(),
                Timestamp::parse("2026-01-01T18:00:00+03:00").unwrap(),
            )
            .await
            .unwrap();
        let before = service.set_total_km(99.0).await.unwrap();

        let after = service.reset().await.unwrap();
        assert_eq!(after.total_km(), 0.0);
        assert!(after.updated_at() >= before.updated_at());
        assert_eq!(service.window().await.unwrap(), window);
    }

    #[tokio::test]
    async fn set_window_rejects_inverted_bounds() {
        let (_store, service) = service();
        let result = service
            .set_window(
                Timestamp::parse("2025-10-02T10:00:00+03:00").unwrap(),
                Timestamp::parse("2025-10-02T10:00:00+03:00").unwrap(),
            )
            .await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::WindowNotOrdered { .. }))
        ));
    }

    #[tokio::test]
    async fn snapshot_combines_record_and_window() {
        let (_store, service) = service();
        let stored = service.set_total_km(200.0).await.unwrap();
        let now = DateTime::parse_from_rfc3339("2025-10-04T22:00:00+03:00")
            .unwrap()
            .with_timezone(&Utc);

        let snapshot = service.snapshot(now).await.unwrap();
        assert_eq!(snapshot.record, stored);
        assert_eq!(snapshot.window, service.window().await.unwrap());
        assert_eq!(snapshot.view.phase, RacePhase::InProgress);
        assert_eq!(snapshot.view.total_laps, 500);
        assert_eq!(snapshot.view.elapsed, TimeDelta::hours(12));
        assert_eq!(snapshot.view.computed_at, now);
    }

    #[tokio::test]
    async fn stalled_store_times_out() {
        let settings = RaceSettings {
            store_timeout: Duration::from_millis(50),
            ..RaceSettings::default()
        };
        let service = RaceService::new(Arc::new(StalledStore), settings);

        let err = service.record().await.unwrap_err();
        assert!(matches!(err, Error::StoreUnavailable(_)));
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }

    #[tokio::test]
    async fn store_errors_pass_through() {
        let service = RaceService::new(Arc::new(StalledStore), RaceSettings::default());
        let err = service.window().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StoreUnavailable);
    }
}
