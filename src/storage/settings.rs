//! Squad/module configuration storage.

use super::traits::{Record, Storage};
use crate::domain::squads::{SQUADS_CONFIG_KEY, SquadsConfig};
use crate::error::{RegressivoError, Result};

impl Record for SquadsConfig {
    const COLLECTION: &'static str = "configuracoes";

    fn key(&self) -> &str {
        SQUADS_CONFIG_KEY
    }
}

/// Reads and replaces the configuration singleton.
pub struct SquadsConfigRepository<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> SquadsConfigRepository<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn get(&self) -> Result<Option<SquadsConfig>> {
        self.storage.get(SQUADS_CONFIG_KEY)
    }

    pub fn require(&self) -> Result<SquadsConfig> {
        self.get()?
            .ok_or_else(|| RegressivoError::NotFound("Configuração".to_string()))
    }

    pub fn replace(&self, config: &SquadsConfig) -> Result<()> {
        self.storage.put(config)
    }
}
