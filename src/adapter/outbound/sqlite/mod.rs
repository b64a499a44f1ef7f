//! SQLite persistence adapter.
//!
//! Stores the distance record and race window as single-row tables using
//! Diesel ORM.

pub mod database;
pub mod store;

pub use store::SqliteRaceStore;
