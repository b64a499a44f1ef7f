//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{race_record, race_window};

/// Primary key of the only row in each table.
pub const SINGLETON_ID: i32 = 1;

/// Database row for the distance record.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = race_record)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RaceRecordRow {
    pub id: i32,
    pub total_km: f64,
    pub updated_at: String,
}

/// Database row for the race window.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = race_window)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RaceWindowRow {
    pub id: i32,
    pub race_start: String,
    pub race_end: String,
    pub updated_at: String,
}
