//! Regressivo Manager implementation
//!
//! RegressivoManager orchestrates the cycle lifecycle - creation, SLA
//! transitions, ledger edits, and read-side roll-ups. It owns the core
//! dependencies; both HTTP adapters call into it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{
    Clock, Cycle, CyclePatch, CycleStatus, EntryPatch, LedgerEntry, NewCycle, SlaState, SquadsConfig, Summary,
    create_batch, guard, sla, summarize,
};
use crate::error::{RegressivoError, Result};
use crate::llm::ReleaseNotesGenerator;
use crate::qr::QrEncoder;
use crate::storage::{CycleRepository, LedgerRepository, SquadsConfigRepository, Storage};

/// SLA window after a successful start
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlaWindow {
    pub sla_inicio: DateTime<Utc>,
    pub sla_fim: DateTime<Utc>,
}

/// Generated release notes and when they were produced
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseNotes {
    pub release_notes: String,
    pub generated_at: DateTime<Utc>,
}

/// A cycle with its ledger and live SLA view
#[derive(Debug, Clone, Serialize)]
pub struct CycleDetails {
    pub regressivo: Cycle,
    pub squads_modulos: Vec<LedgerEntry>,
    pub sla_vencido: bool,
    pub tempo_restante: Option<String>,
}

/// A ledger entry with its owning cycle's expiry flag
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub squad_modulo: LedgerEntry,
    pub sla_vencido: bool,
}

/// Live SLA check for one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlaStatus {
    pub sla_vencido: bool,
    pub tempo_restante: Option<String>,
    pub sla_inicio: Option<DateTime<Utc>>,
    pub sla_fim: Option<DateTime<Utc>>,
    pub estado: SlaState,
}

/// Manages regressivo lifecycle over a storage backend
pub struct RegressivoManager<S: Storage> {
    storage: Arc<S>,
    clock: Arc<dyn Clock>,
    qr: Arc<dyn QrEncoder>,
    notes: ReleaseNotesGenerator,
}

impl<S: Storage> RegressivoManager<S> {
    /// Create a new RegressivoManager with the given dependencies
    pub fn new(storage: Arc<S>, clock: Arc<dyn Clock>, qr: Arc<dyn QrEncoder>, notes: ReleaseNotesGenerator) -> Self {
        Self {
            storage,
            clock,
            qr,
            notes,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    fn cycles(&self) -> CycleRepository<'_, S> {
        CycleRepository::new(self.storage.as_ref())
    }

    fn ledger(&self) -> LedgerRepository<'_, S> {
        LedgerRepository::new(self.storage.as_ref())
    }

    fn squads(&self) -> SquadsConfigRepository<'_, S> {
        SquadsConfigRepository::new(self.storage.as_ref())
    }

    //=== Admin: cycles ===

    pub fn list_cycles(&self) -> Result<Vec<Cycle>> {
        self.cycles().list_all()
    }

    /// Create a cycle, its QR codes, and the ledger for any selected squads
    pub fn create_cycle(&self, request: NewCycle) -> Result<Cycle> {
        request.validate()?;

        let now = self.now();
        let mut cycle = Cycle::new(&request, now);
        cycle.qr_code_homolog = self.version_qr("Homolog", &cycle.versao_homolog)?;
        cycle.qr_code_alpha = self.version_qr("Alpha", &cycle.versao_alpha)?;
        self.cycles().save(&cycle)?;
        log::info!("Created regressivo {} for release {}", cycle.regressivo_id, cycle.release);

        if let Some(selected) = request.squads_selecionadas.as_deref().filter(|s| !s.is_empty()) {
            let config = self.squads().get()?.unwrap_or_default();
            let entries = create_batch(&cycle.regressivo_id, selected, &config, now);
            self.ledger().save_all(&entries)?;
            log::info!("Created {} squad/module entries for {}", entries.len(), cycle.regressivo_id);
        }

        Ok(cycle)
    }

    /// QR payload is `"<label>: <version>"`; no version, no code
    fn version_qr(&self, label: &str, version: &str) -> Result<String> {
        if version.is_empty() {
            return Ok(String::new());
        }
        self.qr.encode(&format!("{}: {}", label, version))
    }

    pub fn get_cycle(&self, id: &str) -> Result<Cycle> {
        self.cycles().require(id)
    }

    pub fn update_cycle(&self, id: &str, patch: CyclePatch) -> Result<Cycle> {
        let mut cycle = self.cycles().require(id)?;
        cycle.apply(patch)?;
        self.cycles().save(&cycle)?;
        log::info!("Updated regressivo {}", id);
        Ok(cycle)
    }

    /// Delete a cycle and every ledger entry it owns
    pub fn delete_cycle(&self, id: &str) -> Result<()> {
        self.cycles().require(id)?;
        let removed = self.ledger().delete_by_cycle(id)?;
        self.cycles().delete(id)?;
        log::info!("Deleted regressivo {} and {} entries", id, removed);
        Ok(())
    }

    //=== Admin: SLA ===

    pub fn start_sla(&self, id: &str) -> Result<SlaWindow> {
        let mut cycle = self.cycles().require(id)?;
        sla::start(&mut cycle, self.now())?;
        self.cycles().save(&cycle)?;

        let (Some(sla_inicio), Some(sla_fim)) = (cycle.sla_inicio, cycle.sla_fim) else {
            return Err(RegressivoError::NotStarted(cycle.regressivo_id));
        };
        log::info!("SLA started for {} until {}", id, sla_fim);
        Ok(SlaWindow { sla_inicio, sla_fim })
    }

    pub fn stop_sla(&self, id: &str) -> Result<Cycle> {
        let mut cycle = self.cycles().require(id)?;
        sla::stop(&mut cycle);
        self.cycles().save(&cycle)?;
        log::info!("SLA stopped for {}", id);
        Ok(cycle)
    }

    pub fn extend_sla(&self, id: &str, hours: u32) -> Result<Cycle> {
        let mut cycle = self.cycles().require(id)?;
        let new_end = sla::extend(&mut cycle, hours)?;
        self.cycles().save(&cycle)?;
        log::info!("SLA for {} extended by {}h to {}", id, hours, new_end);
        Ok(cycle)
    }

    //=== Admin: release notes ===

    pub async fn release_notes(&self, id: &str) -> Result<ReleaseNotes> {
        let cycle = self.cycles().require(id)?;
        let entries = self.ledger().list_by_cycle(id)?;
        let release_notes = self.notes.generate(&cycle, &entries).await?;
        Ok(ReleaseNotes {
            release_notes,
            generated_at: self.now(),
        })
    }

    //=== Admin: squad configuration ===

    pub fn squads_config(&self) -> Result<SquadsConfig> {
        self.squads().require()
    }

    pub fn replace_squads_config(&self, config: SquadsConfig) -> Result<SquadsConfig> {
        self.squads().replace(&config)?;
        log::info!("Squad configuration replaced ({} squads)", config.squads.len());
        Ok(config)
    }

    /// Delete one ledger entry, refused once the owning cycle's SLA has expired
    pub fn delete_entry(&self, id: &str) -> Result<()> {
        let entry = self.ledger().require(id)?;
        self.ensure_entry_editable(&entry)?;
        if !self.ledger().delete(id)? {
            return Err(RegressivoError::NotFound("Squad/Módulo".to_string()));
        }
        log::info!("Deleted squad/module entry {}", id);
        Ok(())
    }

    //=== Quality ===

    pub fn list_active_cycles(&self) -> Result<Vec<Cycle>> {
        self.cycles().find_by_status(CycleStatus::Active)
    }

    pub fn cycle_details(&self, id: &str) -> Result<CycleDetails> {
        let cycle = self.cycles().require(id)?;
        let entries = self.ledger().list_by_cycle(id)?;
        let now = self.now();
        Ok(CycleDetails {
            sla_vencido: sla::is_expired(&cycle, now),
            tempo_restante: sla::remaining(&cycle, now).map(|r| r.to_string()),
            regressivo: cycle,
            squads_modulos: entries,
        })
    }

    /// Entries whose cycle is gone have no SLA: they read as not expired and
    /// stay editable.
    pub fn get_entry(&self, id: &str) -> Result<EntryView> {
        let entry = self.ledger().require(id)?;
        let sla_vencido = match self.cycles().get(&entry.regressivo_id)? {
            Some(cycle) => sla::is_expired(&cycle, self.now()),
            None => false,
        };
        Ok(EntryView {
            squad_modulo: entry,
            sla_vencido,
        })
    }

    /// Patch a ledger entry, refused once the owning cycle's SLA has expired
    pub fn update_entry(&self, id: &str, patch: EntryPatch) -> Result<LedgerEntry> {
        let mut entry = self.ledger().require(id)?;
        self.ensure_entry_editable(&entry)?;

        entry.apply(patch)?;
        self.ledger().save(&entry)?;
        log::info!("Updated squad/module {} to status {}", id, entry.status);
        Ok(entry)
    }

    fn ensure_entry_editable(&self, entry: &LedgerEntry) -> Result<()> {
        match self.cycles().get(&entry.regressivo_id)? {
            Some(cycle) => guard::ensure_editable(&cycle, self.now()),
            None => {
                log::warn!("Squad/module {} has no regressivo {}", entry.squad_modulo_id, entry.regressivo_id);
                Ok(())
            }
        }
    }

    pub fn status_summary(&self, id: &str) -> Result<Summary> {
        self.cycles().require(id)?;
        let entries = self.ledger().list_by_cycle(id)?;
        Ok(summarize(&entries))
    }

    pub fn sla_status(&self, id: &str) -> Result<SlaStatus> {
        let cycle = self.cycles().require(id)?;
        let now = self.now();
        Ok(SlaStatus {
            sla_vencido: sla::is_expired(&cycle, now),
            tempo_restante: sla::remaining(&cycle, now).map(|r| r.to_string()),
            sla_inicio: cycle.sla_inicio,
            sla_fim: cycle.sla_fim,
            estado: sla::state(&cycle, now),
        })
    }
}
