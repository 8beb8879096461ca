//! SQLite-backed key-value storage.
//!
//! Every collection shares one `records` table keyed by
//! `(collection, key)`; the record body is stored as JSON text.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, OptionalExtension, params};

use super::traits::{Filter, Record, Storage};
use crate::error::{RegressivoError, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS records (
    collection TEXT NOT NULL,
    key        TEXT NOT NULL,
    body       TEXT NOT NULL,
    PRIMARY KEY (collection, key)
);
";

/// Key-value store on a single SQLite connection.
///
/// `rusqlite::Connection` is not `Sync`, so it sits behind a `Mutex`;
/// statements are short and need exclusive access anyway.
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage").finish_non_exhaustive()
    }
}

impl SqliteStorage {
    /// Open or create a database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Private in-memory database, used by tests and dry runs.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| RegressivoError::Storage(e.to_string()))
    }
}

impl Storage for SqliteStorage {
    fn put<T: Record>(&self, record: &T) -> Result<()> {
        let body = serde_json::to_string(record)?;
        self.lock()?.execute(
            "INSERT INTO records (collection, key, body) VALUES (?1, ?2, ?3)
             ON CONFLICT (collection, key) DO UPDATE SET body = excluded.body",
            params![T::COLLECTION, record.key(), body],
        )?;
        Ok(())
    }

    fn get<T: Record>(&self, key: &str) -> Result<Option<T>> {
        let body: Option<String> = self
            .lock()?
            .query_row(
                "SELECT body FROM records WHERE collection = ?1 AND key = ?2",
                params![T::COLLECTION, key],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    fn delete<T: Record>(&self, key: &str) -> Result<bool> {
        let removed = self.lock()?.execute(
            "DELETE FROM records WHERE collection = ?1 AND key = ?2",
            params![T::COLLECTION, key],
        )?;
        Ok(removed > 0)
    }

    fn query<T: Record>(&self, filters: &[Filter]) -> Result<Vec<T>> {
        let bodies: Vec<String> = {
            let conn = self.lock()?;
            let mut stmt = conn.prepare("SELECT body FROM records WHERE collection = ?1 ORDER BY rowid")?;
            let rows = stmt.query_map(params![T::COLLECTION], |row| row.get::<_, String>(0))?;
            let mut bodies = Vec::new();
            for row in rows {
                bodies.push(row?);
            }
            bodies
        };

        let mut results = Vec::new();
        for body in bodies {
            let value: serde_json::Value = serde_json::from_str(&body)?;
            if filters.iter().all(|f| f.matches(&value)) {
                results.push(serde_json::from_value(value)?);
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestRecord {
        id: String,
        owner: String,
    }

    impl Record for TestRecord {
        const COLLECTION: &'static str = "test_records";

        fn key(&self) -> &str {
            &self.id
        }
    }

    fn record(id: &str, owner: &str) -> TestRecord {
        TestRecord {
            id: id.to_string(),
            owner: owner.to_string(),
        }
    }

    #[test]
    fn test_put_and_get() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.put(&record("1", "a")).unwrap();
        let got: Option<TestRecord> = storage.get("1").unwrap();
        assert_eq!(got, Some(record("1", "a")));
    }

    #[test]
    fn test_get_missing() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let got: Option<TestRecord> = storage.get("nope").unwrap();
        assert!(got.is_none());
    }

    #[test]
    fn test_put_is_upsert() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.put(&record("1", "a")).unwrap();
        storage.put(&record("1", "b")).unwrap();
        let all: Vec<TestRecord> = storage.scan().unwrap();
        assert_eq!(all, vec![record("1", "b")]);
    }

    #[test]
    fn test_delete_reports_existence() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.put(&record("1", "a")).unwrap();
        assert!(storage.delete::<TestRecord>("1").unwrap());
        assert!(!storage.delete::<TestRecord>("1").unwrap());
    }

    #[test]
    fn test_query_with_filter() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        storage.put(&record("1", "a")).unwrap();
        storage.put(&record("2", "b")).unwrap();
        storage.put(&record("3", "a")).unwrap();
        let owned: Vec<TestRecord> = storage.query(&[Filter::eq("owner", "a")]).unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|r| r.owner == "a"));
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data").join("regressivos.db");
        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.put(&record("1", "a")).unwrap();
        }
        let storage = SqliteStorage::open(&path).unwrap();
        let got: Option<TestRecord> = storage.get("1").unwrap();
        assert!(got.is_some());
    }
}
