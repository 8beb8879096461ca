//! Cycle-specific storage helpers.

use super::traits::{Filter, Record, Storage};
use crate::domain::cycle::{Cycle, CycleStatus};
use crate::error::{RegressivoError, Result};

impl Record for Cycle {
    const COLLECTION: &'static str = "regressivos";

    fn key(&self) -> &str {
        &self.regressivo_id
    }
}

/// Repository for regression cycles.
pub struct CycleRepository<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> CycleRepository<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn save(&self, cycle: &Cycle) -> Result<()> {
        self.storage.put(cycle)
    }

    pub fn get(&self, id: &str) -> Result<Option<Cycle>> {
        self.storage.get(id)
    }

    /// Get a cycle or fail with `NotFound`.
    pub fn require(&self, id: &str) -> Result<Cycle> {
        self.get(id)?
            .ok_or_else(|| RegressivoError::NotFound("Regressivo".to_string()))
    }

    pub fn list_all(&self) -> Result<Vec<Cycle>> {
        self.storage.scan()
    }

    pub fn find_by_status(&self, status: CycleStatus) -> Result<Vec<Cycle>> {
        self.storage.query(&[Filter::eq("statusGeral", status)])
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.storage.delete::<Cycle>(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::NewCycle;
    use crate::domain::sla;
    use crate::storage::SqliteStorage;
    use chrono::Utc;

    fn cycle(release: &str) -> Cycle {
        Cycle::new(
            &NewCycle {
                release: release.to_string(),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_save_and_require() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let repo = CycleRepository::new(&storage);
        let c = cycle("R1");
        repo.save(&c).unwrap();
        assert_eq!(repo.require(&c.regressivo_id).unwrap(), c);
    }

    #[test]
    fn test_require_missing_is_not_found() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let repo = CycleRepository::new(&storage);
        assert!(matches!(repo.require("missing"), Err(RegressivoError::NotFound(_))));
    }

    #[test]
    fn test_find_by_status() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let repo = CycleRepository::new(&storage);
        let active = cycle("R1");
        let mut finished = cycle("R2");
        sla::stop(&mut finished);
        repo.save(&active).unwrap();
        repo.save(&finished).unwrap();

        let found = repo.find_by_status(CycleStatus::Active).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].release, "R1");
        assert_eq!(repo.list_all().unwrap().len(), 2);
    }
}
