//! Database connection

use parking_lot::Mutex;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::error::StorageError;
use crate::migrations::run_migrations;
use crate::Result;

/// How long a writer waits for another connection to release the file
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database file. Any failure here means the
    /// medium is unusable and is reported as `StoreUnavailable`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| unavailable(path.display(), e))?;

        // Other handles on the same file may hold the write lock
        conn.busy_timeout(BUSY_TIMEOUT)
            .map_err(|e| unavailable(path.display(), e))?;

        // Enable foreign keys
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| unavailable(path.display(), e))?;

        // WAL mode for better concurrent performance
        let _: String = conn
            .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
            .map_err(|e| unavailable(path.display(), e))?;

        migrate(&conn).map_err(|e| unavailable(path.display(), e))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| unavailable(":memory:", e))?;
        conn.pragma_update(None, "foreign_keys", "ON")
            .map_err(|e| unavailable(":memory:", e))?;
        migrate(&conn).map_err(|e| unavailable(":memory:", e))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Close the connection if this is the last handle to it.
    /// Returns `false` when other handles keep it open.
    pub fn close(self) -> Result<bool> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                mutex
                    .into_inner()
                    .close()
                    .map_err(|(_, e)| StorageError::Database(e))?;
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

fn migrate(conn: &Connection) -> Result<()> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    run_migrations(&tx)?;
    tx.commit()?;
    Ok(())
}

fn unavailable(location: impl std::fmt::Display, err: impl std::fmt::Display) -> StorageError {
    StorageError::StoreUnavailable(format!("{}: {}", location, err))
}
