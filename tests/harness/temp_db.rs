use std::path::PathBuf;

use tempfile::TempDir;
use ultratrack::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};

/// Migrated SQLite file in a scratch directory, removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("{name}.db"));
        let pool = create_pool(&path.to_string_lossy()).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");
        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}
