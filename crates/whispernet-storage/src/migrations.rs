//! Database migrations
//!
//! The schema version only moves forward. A database written by a newer
//! build is opened as-is and its version is left untouched.

use rusqlite::{Connection, OptionalExtension};
use whispernet_model::Collection;

use crate::Result;

pub const SCHEMA_VERSION: i32 = 1;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    if current_version > SCHEMA_VERSION {
        tracing::warn!(
            current_version,
            supported = SCHEMA_VERSION,
            "Database schema is newer than this build; skipping upgrade"
        );
        return Ok(());
    }

    if current_version < 1 {
        migrate_v1(conn)?;
    }

    if current_version < SCHEMA_VERSION {
        set_schema_version(conn, SCHEMA_VERSION)?;
    }
    Ok(())
}

pub(crate) fn get_schema_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        conn.execute(
            "CREATE TABLE schema_version (version INTEGER NOT NULL)",
            [],
        )?;
        conn.execute("INSERT INTO schema_version (version) VALUES (0)", [])?;
        return Ok(0);
    }

    let version = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(version.unwrap_or(0))
}

pub(crate) fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

fn migrate_v1(conn: &Connection) -> Result<()> {
    tracing::info!("Running migration v1: collections and records");

    // One row per collection; next_key feeds auto-assigned integer keys
    // and is NULL once it has run past i64::MAX
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS collections (
            name TEXT PRIMARY KEY,
            next_key INTEGER DEFAULT 1
        );
    "#,
    )?;

    // record_key has no declared type so integer and text keys stay distinct
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            collection TEXT NOT NULL,
            record_key NOT NULL,
            payload TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (collection, record_key),
            FOREIGN KEY (collection) REFERENCES collections(name) ON DELETE CASCADE
        );
    "#,
    )?;

    for collection in Collection::ALL {
        conn.execute(
            "INSERT OR IGNORE INTO collections (name, next_key) VALUES (?1, 1)",
            [collection.as_str()],
        )?;
    }

    Ok(())
}
