//! Ledger-entry storage helpers.

use super::traits::{Filter, Record, Storage};
use crate::domain::ledger::LedgerEntry;
use crate::error::{RegressivoError, Result};

impl Record for LedgerEntry {
    const COLLECTION: &'static str = "squads_modulos";

    fn key(&self) -> &str {
        &self.squad_modulo_id
    }
}

/// Repository for ledger entries, queryable by owning cycle.
pub struct LedgerRepository<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> LedgerRepository<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn save(&self, entry: &LedgerEntry) -> Result<()> {
        self.storage.put(entry)
    }

    /// Write a batch one entry at a time; there is no cross-key atomicity.
    pub fn save_all(&self, entries: &[LedgerEntry]) -> Result<()> {
        for entry in entries {
            self.save(entry)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Option<LedgerEntry>> {
        self.storage.get(id)
    }

    /// Get an entry or fail with `NotFound`.
    pub fn require(&self, id: &str) -> Result<LedgerEntry> {
        self.get(id)?
            .ok_or_else(|| RegressivoError::NotFound("Squad/Módulo".to_string()))
    }

    pub fn list_by_cycle(&self, cycle_id: &str) -> Result<Vec<LedgerEntry>> {
        self.storage.query(&[Filter::eq("regressivoId", cycle_id)])
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.storage.delete::<LedgerEntry>(id)
    }

    /// Remove every entry owned by a cycle; returns how many went.
    pub fn delete_by_cycle(&self, cycle_id: &str) -> Result<usize> {
        let entries = self.list_by_cycle(cycle_id)?;
        let mut removed = 0;
        for entry in &entries {
            if self.delete(&entry.squad_modulo_id)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
