//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use tracing::info;

use crate::adapter::inbound::telegram::{AdminList, BotControl, TimeInputRules};
use crate::adapter::outbound::memory::MemoryStore;
use crate::adapter::outbound::remote::RemoteStore;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::SqliteRaceStore;
use crate::application::race::{RaceService, RaceSettings};
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::storage::StorageBackend;
use crate::port::inbound::race::RaceTracker;
use crate::port::outbound::store::RaceStore;

/// Service settings derived from `[race]` and `[storage]`.
///
/// # Errors
/// Returns an error if `race.default_start` does not parse.
#[allow(clippy::result_large_err)]
pub fn race_settings(config: &Config) -> Result<RaceSettings> {
    Ok(RaceSettings {
        default_start: config.race.default_start()?,
        race_duration: TimeDelta::hours(i64::from(config.race.duration_hours)),
        store_timeout: Duration::from_secs(config.storage.timeout_secs),
    })
}

/// Build the configured race store.
///
/// # Errors
/// Returns an error if the database cannot be opened or migrated, or the
/// remote URL is missing or invalid.
pub fn build_store(config: &Config) -> Result<Arc<dyn RaceStore>> {
    let store: Arc<dyn RaceStore> = match config.storage.backend {
        StorageBackend::Sqlite => {
            let pool = create_pool(&config.storage.database_path)?;
            run_migrations(&pool)?;
            Arc::new(SqliteRaceStore::new(pool))
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::Remote => {
            let url = config.remote_url().ok_or(ConfigError::MissingField {
                field: "storage.remote_url",
            })?;
            Arc::new(RemoteStore::new(
                url,
                Duration::from_secs(config.storage.timeout_secs),
            )?)
        }
    };
    info!(
        backend = config.storage.backend.as_str(),
        database = %config.storage.database_path,
        "Race store ready"
    );
    Ok(store)
}

/// Build the race service over the configured store.
///
/// # Errors
/// Returns an error if the store cannot be built.
pub fn build_tracker(config: &Config) -> Result<Arc<dyn RaceTracker>> {
    let store = build_store(config)?;
    Ok(Arc::new(RaceService::new(store, race_settings(config)?)))
}

/// Rules for race start times typed into the bot.
///
/// # Errors
/// Returns an error if `race.display_offset` does not parse.
#[allow(clippy::result_large_err)]
pub fn time_input_rules(config: &Config) -> Result<TimeInputRules> {
    Ok(TimeInputRules {
        offset: config.race.display_offset()?,
        race_duration: TimeDelta::hours(i64::from(config.race.duration_hours)),
        max_past: TimeDelta::days(i64::from(config.race.max_past_days)),
        max_future: TimeDelta::days(i64::from(config.race.max_future_days)),
    })
}

/// Bot command handling over `tracker`.
///
/// # Errors
/// Returns an error if the time input rules cannot be built.
#[allow(clippy::result_large_err)]
pub fn build_bot_control(config: &Config, tracker: Arc<dyn RaceTracker>) -> Result<BotControl> {
    let admins = AdminList::new(config.telegram.admin_ids.iter().copied());
    let control = BotControl::new(tracker, admins, time_input_rules(config)?);
    Ok(match config.web_app_url() {
        Some(url) => control.with_web_app_url(url),
        None => control,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_backend_builds_working_tracker() {
        let config = Config::parse_toml("[storage]\nbackend = \"memory\"\n").unwrap();
        let tracker = build_tracker(&config).unwrap();
        assert_eq!(tracker.store_name(), "memory");
        assert_eq!(tracker.record().await.unwrap().total_km(), 0.0);
    }

    #[test]
    fn settings_follow_config() {
        let config = Config::parse_toml(
            "[race]\nduration_hours = 12\n[storage]\ntimeout_secs = 2\n",
        )
        .unwrap();
        let settings = race_settings(&config).unwrap();
        assert_eq!(settings.race_duration, TimeDelta::hours(12));
        assert_eq!(settings.store_timeout, Duration::from_secs(2));
    }

    #[test]
    fn time_rules_follow_race_config() {
        let config = Config::parse_toml(
            "[race]\ndisplay_offset = \"+05:00\"\nmax_past_days = 2\n",
        )
        .unwrap();
        let rules = time_input_rules(&config).unwrap();
        assert_eq!(rules.offset.local_minus_utc(), 5 * 3600);
        assert_eq!(rules.max_past, TimeDelta::days(2));
        assert_eq!(rules.max_future, TimeDelta::days(365));
    }

    #[test]
    fn bot_control_reads_admin_list() {
        let config = Config::parse_toml(
            "[storage]\nbackend = \"memory\"\n[telegram]\nadmin_ids = [7, 8]\n",
        )
        .unwrap();
        let tracker = build_tracker(&config).unwrap();
        let control = build_bot_control(&config, tracker).unwrap();
        assert!(control.admins().is_admin(7));
        assert!(!control.admins().is_admin(9));
    }
}
