//! JSONL-based storage implementation with in-memory caching.
//!
//! Each collection is one `<collection>.jsonl` file holding
//! `{"key": ..., "value": ...}` lines. Creates append; updates and deletes
//! rewrite the file from the cache.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use super::traits::{Filter, Record, Storage};
use crate::error::{RegressivoError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Line {
    key: String,
    value: serde_json::Value,
}

/// JSONL-based storage with in-memory caching.
pub struct JsonlStorage {
    base_path: PathBuf,
    cache: RwLock<HashMap<String, Vec<Line>>>,
}

impl std::fmt::Debug for JsonlStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonlStorage").field("base_path", &self.base_path).finish_non_exhaustive()
    }
}

impl JsonlStorage {
    /// Create a new JsonlStorage at the given directory.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self {
            base_path,
            cache: RwLock::new(HashMap::new()),
        })
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.base_path.join(format!("{}.jsonl", collection))
    }

    fn lock_err<E: std::fmt::Display>(e: E) -> RegressivoError {
        RegressivoError::Storage(e.to_string())
    }

    /// Load a collection into cache if not already loaded.
    fn ensure_loaded(&self, collection: &str) -> Result<()> {
        {
            let cache = self.cache.read().map_err(Self::lock_err)?;
            if cache.contains_key(collection) {
                return Ok(());
            }
        }

        let mut cache = self.cache.write().map_err(Self::lock_err)?;
        if cache.contains_key(collection) {
            return Ok(());
        }

        let path = self.collection_path(collection);
        let mut lines = Vec::new();
        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            for line in reader.lines() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let parsed: Line = serde_json::from_str(&line)?;
                // Later lines for the same key win
                lines.retain(|l: &Line| l.key != parsed.key);
                lines.push(parsed);
            }
        }

        cache.insert(collection.to_string(), lines);
        Ok(())
    }

    fn append_to_file(&self, collection: &str, line: &Line) -> Result<()> {
        let path = self.collection_path(collection);
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
        writeln!(file, "{}", serde_json::to_string(line)?)?;
        Ok(())
    }

    fn rewrite_file(&self, collection: &str, lines: &[Line]) -> Result<()> {
        let path = self.collection_path(collection);
        let mut file = File::create(&path)?;
        for line in lines {
            writeln!(file, "{}", serde_json::to_string(line)?)?;
        }
        Ok(())
    }
}

impl Storage for JsonlStorage {
    fn put<T: Record>(&self, record: &T) -> Result<()> {
        self.ensure_loaded(T::COLLECTION)?;

        let line = Line {
            key: record.key().to_string(),
            value: serde_json::to_value(record)?,
        };

        let mut cache = self.cache.write().map_err(Self::lock_err)?;
        let lines = cache
            .get_mut(T::COLLECTION)
            .ok_or_else(|| RegressivoError::Storage(format!("Collection not loaded: {}", T::COLLECTION)))?;

        // The cache only changes once the file write has succeeded
        match lines.iter().position(|l| l.key == line.key) {
            Some(index) => {
                let mut updated = lines.clone();
                updated[index] = line;
                self.rewrite_file(T::COLLECTION, &updated)?;
                *lines = updated;
            }
            None => {
                self.append_to_file(T::COLLECTION, &line)?;
                lines.push(line);
            }
        }
        Ok(())
    }

    fn get<T: Record>(&self, key: &str) -> Result<Option<T>> {
        self.ensure_loaded(T::COLLECTION)?;

        let cache = self.cache.read().map_err(Self::lock_err)?;
        let found = cache
            .get(T::COLLECTION)
            .and_then(|lines| lines.iter().find(|l| l.key == key));
        match found {
            Some(line) => Ok(Some(serde_json::from_value(line.value.clone())?)),
            None => Ok(None),
        }
    }

    fn delete<T: Record>(&self, key: &str) -> Result<bool> {
        self.ensure_loaded(T::COLLECTION)?;

        let mut cache = self.cache.write().map_err(Self::lock_err)?;
        let lines = cache
            .get_mut(T::COLLECTION)
            .ok_or_else(|| RegressivoError::Storage(format!("Collection not loaded: {}", T::COLLECTION)))?;

        if !lines.iter().any(|l| l.key == key) {
            return Ok(false);
        }
        let remaining: Vec<Line> = lines.iter().filter(|l| l.key != key).cloned().collect();
        self.rewrite_file(T::COLLECTION, &remaining)?;
        *lines = remaining;
        Ok(true)
    }

    fn query<T: Record>(&self, filters: &[Filter]) -> Result<Vec<T>> {
        self.ensure_loaded(T::COLLECTION)?;

        let cache = self.cache.read().map_err(Self::lock_err)?;
        let mut results = Vec::new();
        if let Some(lines) = cache.get(T::COLLECTION) {
            for line in lines {
                if filters.iter().all(|f| f.matches(&line.value)) {
                    results.push(serde_json::from_value(line.value.clone())?);
                }
            }
        }
        Ok(results)
    }
}
