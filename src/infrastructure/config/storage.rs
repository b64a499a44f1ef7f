//! Race store backend selection.

use serde::Deserialize;

/// Which [`RaceStore`](crate::port::outbound::store::RaceStore) to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local SQLite file.
    #[default]
    Sqlite,
    /// Process memory; lost on exit.
    Memory,
    /// Another tracker's HTTP API.
    Remote,
}

impl StorageBackend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Memory => "memory",
            Self::Remote => "remote",
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// SQLite file path (default: ultratrack.db). `DATABASE_PATH` overrides it.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Base URL for the remote backend. Falls back to `server.public_url`.
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Upper bound on each store call in seconds (default: 5).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_database_path() -> String {
    "ultratrack.db".to_string()
}

const fn default_timeout_secs() -> u64 {
    5
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            remote_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}
