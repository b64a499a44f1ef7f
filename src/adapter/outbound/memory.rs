//! In-memory race store for tests and throwaway runs.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::race::{RaceRecord, RaceWindow};
use crate::error::Result;
use crate::port::outbound::store::RaceStore;

/// Race store that lives only as long as the process.
#[derive(Default)]
pub struct MemoryStore {
    record: RwLock<Option<RaceRecord>>,
    window: RwLock<Option<RaceWindow>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RaceStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn load_record(&self) -> Result<Option<RaceRecord>> {
        Ok(self.record.read().clone())
    }

    async fn save_record(&self, record: &RaceRecord) -> Result<()> {
        *self.record.write() = Some(record.clone());
        Ok(())
    }

    async fn load_window(&self) -> Result<Option<RaceWindow>> {
        Ok(self.window.read().clone())
    }

    async fn save_window(&self, window: &RaceWindow) -> Result<()> {
        *self.window.write() = Some(window.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn starts_empty_and_keeps_last_write() {
        let store = MemoryStore::new();
        assert!(store.load_record().await.unwrap().is_none());

        let now = Utc::now();
        store
            .save_record(&RaceRecord::new(5.0, now).unwrap())
            .await
            .unwrap();
        store
            .save_record(&RaceRecord::new(7.5, now).unwrap())
            .await
            .unwrap();
        let record = store.load_record().await.unwrap().unwrap();
        assert_eq!(record.total_km(), 7.5);
    }
}
