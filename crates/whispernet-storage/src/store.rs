//! Local collection store
//!
//! An explicitly opened, caller-held handle. Clones share one connection.
//! Every operation runs on tokio's blocking pool and holds the connection
//! for its whole duration, so no two operations interleave their steps.

use std::path::{Path, PathBuf};

use rusqlite::{Transaction, TransactionBehavior};

use whispernet_model::{Collection, Record, RecordKey};

use crate::database::Database;
use crate::error::{StorageError, WriteFailure};
use crate::records;
use crate::Result;

#[derive(Clone)]
pub struct LocalStore {
    db: Database,
}

impl LocalStore {
    /// Open the store file, creating it and provisioning every collection
    /// on first use.
    pub async fn initialize<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let location = path.display().to_string();
        let db = blocking(move || Database::open(&path)).await?;

        tracing::info!(path = %location, "Local store opened");

        Ok(Self { db })
    }

    pub async fn initialize_in_memory() -> Result<Self> {
        let db = blocking(Database::open_in_memory).await?;
        Ok(Self { db })
    }

    /// All records in key order
    pub async fn get_all(&self, collection: Collection) -> Result<Vec<Record>> {
        let db = self.db.clone();
        let records =
            blocking(move || db.with_connection(|conn| records::read_all(conn, collection)))
                .await?;

        tracing::debug!(%collection, count = records.len(), "Read collection");
        Ok(records)
    }

    pub async fn get(&self, collection: Collection, key: RecordKey) -> Result<Option<Record>> {
        let db = self.db.clone();
        blocking(move || db.with_connection(|conn| records::read_one(conn, collection, &key))).await
    }

    /// Upsert one record. Returns its key, assigned here if it had none.
    pub async fn put(&self, collection: Collection, record: Record) -> Result<RecordKey> {
        let db = self.db.clone();
        let key =
            blocking(move || db.transaction(|tx| records::write_record(tx, collection, record)))
                .await?;

        tracing::debug!(%collection, key = %key, "Stored record");
        Ok(key)
    }

    /// Upsert a batch. Each record commits on its own; a failed record does
    /// not roll back the others. If anything failed the call reports
    /// `PartialWriteFailure` listing every failed write.
    pub async fn put_many(
        &self,
        collection: Collection,
        batch: Vec<Record>,
    ) -> Result<Vec<RecordKey>> {
        let db = self.db.clone();
        let total = batch.len();

        let outcomes = blocking(move || {
            db.with_connection(|conn| {
                Ok(batch
                    .into_iter()
                    .map(|record| {
                        let key = record.key().cloned();
                        let outcome = begin_immediate(conn).and_then(|tx| {
                            let written = records::write_record(&tx, collection, record)?;
                            tx.commit()?;
                            Ok(written)
                        });
                        (key, outcome)
                    })
                    .collect::<Vec<_>>())
            })
        })
        .await?;

        let mut written = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (index, (key, outcome)) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(key) => written.push(key),
                Err(e) => failures.push(WriteFailure {
                    index,
                    key,
                    reason: e.to_string(),
                }),
            }
        }

        if failures.is_empty() {
            tracing::debug!(%collection, count = total, "Stored batch");
            return Ok(written);
        }

        tracing::warn!(
            %collection,
            written = written.len(),
            failed = failures.len(),
            "Batch write partially failed"
        );
        Err(StorageError::PartialWriteFailure { written, failures })
    }

    /// Remove a record. Removing an absent key succeeds.
    pub async fn delete(&self, collection: Collection, key: RecordKey) -> Result<()> {
        let db = self.db.clone();
        let log_key = key.clone();
        let removed =
            blocking(move || db.transaction(|tx| records::delete_record(tx, collection, &key)))
                .await?;

        tracing::debug!(%collection, key = %log_key, removed, "Deleted record");
        Ok(())
    }

    pub async fn clear(&self, collection: Collection) -> Result<()> {
        let db = self.db.clone();
        let removed =
            blocking(move || db.transaction(|tx| records::clear_collection(tx, collection)))
                .await?;

        tracing::info!(%collection, removed, "Cleared collection");
        Ok(())
    }

    pub async fn count(&self, collection: Collection) -> Result<u64> {
        let db = self.db.clone();
        blocking(move || db.with_connection(|conn| records::count_records(conn, collection))).await
    }

    /// End the session. The connection closes once no clone holds it.
    pub async fn close(self) -> Result<()> {
        let db = self.db;
        let closed = blocking(move || db.close()).await?;
        tracing::info!(closed, "Local store released");
        Ok(())
    }
}

/// Take the write lock up front so a concurrent writer on another
/// connection waits on the busy timeout instead of failing the upgrade.
fn begin_immediate(conn: &rusqlite::Connection) -> Result<Transaction<'_>> {
    Ok(Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?)
}

async fn blocking<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
}
