//! SQLite connection and schema for the host tables backing the
//! generic object store and plugin settings.
use std::path::Path;

use anyhow::Result;
use rusqlite::Connection as SyncConnection;
use tokio_rusqlite::Connection;

const DB_FILE_NAME: &str = "calendar.sqlite";

/// Open an async connection to the database stored in the `db_path`
/// directory.
pub async fn async_db(db_path: &str) -> Result<Connection> {
    let path = Path::new(db_path).join(DB_FILE_NAME);
    let db = Connection::open(path).await?;
    Ok(db)
}

/// Create all host tables if they don't already exist. Safe to run
/// more than once.
pub fn initialize_db(conn: &SyncConnection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r"
        BEGIN;

        CREATE TABLE IF NOT EXISTS custom_object_type (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            fields TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_custom_object_type_name
        ON custom_object_type (name);

        CREATE TABLE IF NOT EXISTS object (
            id TEXT PRIMARY KEY,
            collection TEXT NOT NULL,
            type_id TEXT,
            data TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE INDEX IF NOT EXISTS idx_object_collection_type
        ON object (collection, type_id);

        CREATE TABLE IF NOT EXISTS plugin_setting (
            plugin TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            PRIMARY KEY (plugin, key)
        );

        COMMIT;
        ",
    )
}
