//! SQLite race store implementation.
//!
//! Both documents live in single-row tables keyed by `id = 1` and are
//! overwritten with `REPLACE INTO`.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::{
    RaceRecordRow, RaceWindowRow, SINGLETON_ID,
};
use crate::adapter::outbound::sqlite::database::schema::{race_record, race_window};
use crate::domain::race::{RaceRecord, RaceWindow};
use crate::domain::timestamp::Timestamp;
use crate::error::{Error, Result};
use crate::port::outbound::store::RaceStore;

/// SQLite-backed race store.
pub struct SqliteRaceStore {
    pool: DbPool,
}

impl SqliteRaceStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run a blocking query on a pooled connection off the async runtime.
    async fn with_conn<T, F>(&self, query: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
            query(&mut conn)
        })
        .await
        .map_err(|e| Error::StoreUnavailable(e.to_string()))?
    }

    fn record_to_row(record: &RaceRecord) -> RaceRecordRow {
        RaceRecordRow {
            id: SINGLETON_ID,
            total_km: record.total_km(),
            updated_at: format_instant(record.updated_at()),
        }
    }

    fn record_from_row(row: RaceRecordRow) -> Result<RaceRecord> {
        Ok(RaceRecord::new(row.total_km, parse_instant(&row.updated_at)?)?)
    }

    fn window_to_row(window: &RaceWindow) -> RaceWindowRow {
        RaceWindowRow {
            id: SINGLETON_ID,
            race_start: window.race_start().as_str().to_string(),
            race_end: window.race_end().as_str().to_string(),
            updated_at: format_instant(window.updated_at()),
        }
    }

    fn window_from_row(row: RaceWindowRow) -> Result<RaceWindow> {
        let race_start = Timestamp::parse(&row.race_start).map_err(|e| Error::Parse(e.to_string()))?;
        let race_end = Timestamp::parse(&row.race_end).map_err(|e| Error::Parse(e.to_string()))?;
        Ok(RaceWindow::new(
            race_start,
            race_end,
            parse_instant(&row.updated_at)?,
        )?)
    }
}

fn format_instant(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| Error::Parse(e.to_string()))?
        .with_timezone(&Utc))
}

#[async_trait]
impl RaceStore for SqliteRaceStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn load_record(&self) -> Result<Option<RaceRecord>> {
        let row = self
            .with_conn(|conn| {
                race_record::table
                    .find(SINGLETON_ID)
                    .select(RaceRecordRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(|e| Error::Database(e.to_string()))
            })
            .await?;
        row.map(Self::record_from_row).transpose()
    }

    async fn save_record(&self, record: &RaceRecord) -> Result<()> {
        let row = Self::record_to_row(record);
        self.with_conn(move |conn| {
            diesel::replace_into(race_record::table)
                .values(&row)
                .execute(conn)
                .map_err(|e| Error::Database(e.to_string()))?;
            Ok(())
        })
        .await
    }

    async fn load_window(&self) -> Result<Option<RaceWindow>> {
        let row = self
            .with_conn(|conn| {
                race_window::table
                    .find(SINGLETON_ID)
                    .select(RaceWindowRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(|e| Error::Database(e.to_string()))
            })
            .await?;
        row.map(Self::window_from_row).transpose()
    }

    async fn save_window(&self, window: &RaceWindow) -> Result<()> {
        let row = Self::window_to_row(window);
        self.with_conn(move |conn| {
            diesel::replace_into(race_window::table)
                .values(&row)
                .execute(conn)
                .map_err(|e| Error::Database(e.to_string()))?;
            Ok(())
        })
        .await
    }
}
