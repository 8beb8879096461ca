//! Storage layer for regressivos - key-value persistence of cycles, ledger
//! entries, and the squad configuration.
//!
//! Two interchangeable backends implement [`Storage`]: SQLite (default) and
//! JSONL files. [`StorageBackend`] picks one at runtime from configuration.

mod cycles;
mod jsonl;
mod ledger;
mod settings;
mod sqlite;
mod traits;

pub use cycles::CycleRepository;
pub use jsonl::JsonlStorage;
pub use ledger::LedgerRepository;
pub use settings::SquadsConfigRepository;
pub use sqlite::SqliteStorage;
pub use traits::{Filter, Record, Storage};

use crate::config::{BackendKind, StorageConfig};
use crate::error::Result;

/// Runtime-selected storage backend.
#[derive(Debug)]
pub enum StorageBackend {
    Sqlite(SqliteStorage),
    Jsonl(JsonlStorage),
}

impl StorageBackend {
    /// Open the backend described by `config`.
    pub fn open(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            BackendKind::Sqlite => {
                let path = config.data_dir.join("regressivos.db");
                log::info!("Opening SQLite storage at {}", path.display());
                Ok(Self::Sqlite(SqliteStorage::open(path)?))
            }
            BackendKind::Jsonl => {
                log::info!("Opening JSONL storage at {}", config.data_dir.display());
                Ok(Self::Jsonl(JsonlStorage::new(&config.data_dir)?))
            }
        }
    }

    /// In-memory SQLite backend.
    pub fn in_memory() -> Result<Self> {
        Ok(Self::Sqlite(SqliteStorage::open_in_memory()?))
    }
}

impl Storage for StorageBackend {
    fn put<T: Record>(&self, record: &T) -> Result<()> {
        match self {
            Self::Sqlite(s) => s.put(record),
            Self::Jsonl(s) => s.put(record),
        }
    }

    fn get<T: Record>(&self, key: &str) -> Result<Option<T>> {
        match self {
            Self::Sqlite(s) => s.get(key),
            Self::Jsonl(s) => s.get(key),
        }
    }

    fn delete<T: Record>(&self, key: &str) -> Result<bool> {
        match self {
            Self::Sqlite(s) => s.delete::<T>(key),
            Self::Jsonl(s) => s.delete::<T>(key),
        }
    }

    fn query<T: Record>(&self, filters: &[Filter]) -> Result<Vec<T>> {
        match self {
            Self::Sqlite(s) => s.query(filters),
            Self::Jsonl(s) => s.query(filters),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::squads::SquadsConfig;
    use tempfile::TempDir;

    #[test]
    fn test_open_each_backend() {
        let temp = TempDir::new().unwrap();
        for backend in [BackendKind::Sqlite, BackendKind::Jsonl] {
            let config = StorageConfig {
                backend,
                data_dir: temp.path().join(format!("{:?}", backend)),
            };
            let storage = StorageBackend::open(&config).unwrap();
            storage.put(&SquadsConfig::default()).unwrap();
            let back: Option<SquadsConfig> = storage.get(crate::domain::squads::SQUADS_CONFIG_KEY).unwrap();
            assert_eq!(back, Some(SquadsConfig::default()));
        }
    }
}
