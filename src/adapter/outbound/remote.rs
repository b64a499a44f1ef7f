//! Remote race store backed by another tracker's HTTP API.
//!
//! Lets a bot-only process share state with the process serving the API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::domain::race::{RaceRecord, RaceWindow};
use crate::domain::timestamp::Timestamp;
use crate::error::{Error, Result};
use crate::port::outbound::store::RaceStore;

/// Race store that reads and writes through `GET /stats`, `PUT /distance`
/// and `GET`/`POST /race-window`.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    base: Url,
}

#[derive(Deserialize)]
struct StatsBody {
    total_km: f64,
    updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct DistanceBody {
    total_km: f64,
}

#[derive(Serialize)]
struct WindowBody<'a> {
    race_start: &'a Timestamp,
    race_end: &'a Timestamp,
}

impl RemoteStore {
    /// Create a client for the API at `base_url`.
    ///
    /// # Errors
    /// Returns an error if the URL does not parse or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    fn unavailable(e: reqwest::Error) -> Error {
        Error::StoreUnavailable(e.to_string())
    }
}

#[async_trait]
impl RaceStore for RemoteStore {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn load_record(&self) -> Result<Option<RaceRecord>> {
        let url = self.endpoint("stats")?;
        debug!(%url, "Fetching remote stats");
        let body = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(Self::unavailable)?
            .json::<StatsBody>()
            .await?;
        Ok(Some(RaceRecord::new(body.total_km, body.updated_at)?))
    }

    async fn save_record(&self, record: &RaceRecord) -> Result<()> {
        let url = self.endpoint("distance")?;
        self.client
            .put(url)
            .json(&DistanceBody {
                total_km: record.total_km(),
            })
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(Self::unavailable)?;
        Ok(())
    }

    async fn load_window(&self) -> Result<Option<RaceWindow>> {
        let url = self.endpoint("race-window")?;
        let window = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(Self::unavailable)?
            .json::<RaceWindow>()
            .await?;
        Ok(Some(window))
    }

    async fn save_window(&self, window: &RaceWindow) -> Result<()> {
        let url = self.endpoint("race-window")?;
        self.client
            .post(url)
            .json(&WindowBody {
                race_start: window.race_start(),
                race_end: window.race_end(),
            })
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(Self::unavailable)?;
        Ok(())
    }
}
