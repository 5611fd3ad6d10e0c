//! Record rows
//!
//! Synchronous SQL helpers; `LocalStore` runs them on the blocking pool.

use chrono::Utc;
use rusqlite::types::{FromSqlError, Value};
use rusqlite::{Connection, OptionalExtension};
use whispernet_model::{Collection, Record, RecordKey};

use crate::error::StorageError;
use crate::Result;

fn key_to_sql(key: &RecordKey) -> Value {
    match key {
        RecordKey::Int(v) => Value::Integer(*v),
        RecordKey::Text(s) => Value::Text(s.clone()),
    }
}

fn key_from_sql(value: Value) -> rusqlite::Result<RecordKey> {
    match value {
        Value::Integer(v) => Ok(RecordKey::Int(v)),
        Value::Text(s) => Ok(RecordKey::Text(s)),
        other => Err(rusqlite::Error::FromSqlConversionFailure(
            0,
            other.data_type(),
            Box::new(FromSqlError::InvalidType),
        )),
    }
}

/// Next auto-assigned key. `None` once the generator has moved past
/// `i64::MAX` and can no longer produce a fresh key.
fn next_key(conn: &Connection, collection: Collection) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT next_key FROM collections WHERE name = ?1",
        [collection.as_str()],
        |row| row.get(0),
    )
    .optional()?
    .ok_or_else(|| StorageError::CollectionNotFound(collection.as_str().to_string()))
}

pub(crate) fn ensure_collection(conn: &Connection, collection: Collection) -> Result<()> {
    next_key(conn, collection).map(|_| ())
}

/// Validate and upsert one record. Callers wrap this in a transaction
/// so the key generator and the row move together.
pub(crate) fn write_record(
    conn: &Connection,
    collection: Collection,
    mut record: Record,
) -> Result<RecordKey> {
    record.validate_for(collection)?;

    let next = next_key(conn, collection)?;
    let key = match record.key() {
        Some(key) => key.clone(),
        None => {
            let next = next.ok_or_else(|| {
                StorageError::KeyGeneratorExhausted(collection.as_str().to_string())
            })?;
            let key = RecordKey::Int(next);
            record.set_key(key.clone());
            key
        }
    };

    // NULL marks the generator as exhausted
    if let (Some(v), Some(next)) = (key.as_int(), next) {
        if v >= next {
            conn.execute(
                "UPDATE collections SET next_key = ?1 WHERE name = ?2",
                rusqlite::params![v.checked_add(1), collection.as_str()],
            )?;
        }
    }

    let payload = record.to_payload()?;
    conn.execute(
        "INSERT OR REPLACE INTO records (collection, record_key, payload, updated_at)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            collection.as_str(),
            key_to_sql(&key),
            payload,
            Utc::now().to_rfc3339(),
        ],
    )?;

    Ok(key)
}

pub(crate) fn read_all(conn: &Connection, collection: Collection) -> Result<Vec<Record>> {
    ensure_collection(conn, collection)?;

    let mut stmt = conn.prepare(
        "SELECT record_key, payload FROM records
         WHERE collection = ?1
         ORDER BY record_key",
    )?;

    let rows = stmt
        .query_map([collection.as_str()], |row| {
            let key = key_from_sql(row.get(0)?)?;
            let payload: String = row.get(1)?;
            Ok((key, payload))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|(key, payload)| decode(collection, key, &payload))
        .collect()
}

pub(crate) fn read_one(
    conn: &Connection,
    collection: Collection,
    key: &RecordKey,
) -> Result<Option<Record>> {
    ensure_collection(conn, collection)?;

    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM records WHERE collection = ?1 AND record_key = ?2",
            rusqlite::params![collection.as_str(), key_to_sql(key)],
            |row| row.get(0),
        )
        .optional()?;

    payload
        .map(|payload| decode(collection, key.clone(), &payload))
        .transpose()
}

pub(crate) fn delete_record(
    conn: &Connection,
    collection: Collection,
    key: &RecordKey,
) -> Result<bool> {
    ensure_collection(conn, collection)?;
    let removed = conn.execute(
        "DELETE FROM records WHERE collection = ?1 AND record_key = ?2",
        rusqlite::params![collection.as_str(), key_to_sql(key)],
    )?;
    Ok(removed > 0)
}

/// Removes every record. The key generator keeps counting.
pub(crate) fn clear_collection(conn: &Connection, collection: Collection) -> Result<usize> {
    ensure_collection(conn, collection)?;
    Ok(conn.execute(
        "DELETE FROM records WHERE collection = ?1",
        [collection.as_str()],
    )?)
}

pub(crate) fn count_records(conn: &Connection, collection: Collection) -> Result<u64> {
    ensure_collection(conn, collection)?;
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM records WHERE collection = ?1",
        [collection.as_str()],
        |row| row.get(0),
    )?;
    Ok(count.max(0) as u64)
}

fn decode(collection: Collection, key: RecordKey, payload: &str) -> Result<Record> {
    let mut record = Record::from_payload(collection.record_kind(), payload)?;
    record.set_key(key);
    Ok(record)
}
