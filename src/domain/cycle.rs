//! Regression cycle record and related types
//!
//! A cycle ("regressivo") tracks one release's regression run: release
//! metadata passed through from the admin, an overall status, and the
//! optional SLA window. Field names on the wire match the stored records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{RegressivoError, Result};
use crate::id::generate_cycle_id;

/// Default release type when the admin does not pick one
pub const DEFAULT_RELEASE_TYPE: &str = "Normal";

/// A single release regression cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    //=== Identity ===
    pub regressivo_id: String,

    //=== Release ===
    pub release: String,
    #[serde(default)]
    pub ambiente: String,
    #[serde(default)]
    pub plataforma: String,

    //=== Lifecycle ===
    pub status_geral: CycleStatus,
    pub liberado_em: DateTime<Utc>,
    #[serde(default)]
    pub sla_inicio: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sla_fim: Option<DateTime<Utc>>,

    //=== Pass-through metadata ===
    #[serde(default)]
    pub versao_homolog: String,
    #[serde(default)]
    pub versao_firebase: String,
    #[serde(default)]
    pub versao_alpha: String,
    #[serde(default)]
    pub link_plano_testes: String,
    #[serde(default = "default_release_type")]
    pub tipo_release: String,
    #[serde(default)]
    pub qr_code_homolog: String,
    #[serde(default)]
    pub qr_code_alpha: String,
}

fn default_release_type() -> String {
    DEFAULT_RELEASE_TYPE.to_string()
}

/// Overall status of a cycle, independent of SLA expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleStatus {
    #[serde(rename = "ativo")]
    Active,
    #[serde(rename = "finalizado")]
    Finished,
}

impl CycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CycleStatus::Active => "ativo",
            CycleStatus::Finished => "finalizado",
        }
    }
}

/// Admin request to create a cycle
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewCycle {
    pub release: String,
    pub ambiente: String,
    pub plataforma: String,
    pub versao_homolog: String,
    pub versao_firebase: String,
    pub versao_alpha: String,
    pub link_plano_testes: String,
    pub tipo_release: Option<String>,
    /// Squads whose configured modules become ledger entries
    #[serde(rename = "squads_selecionadas")]
    pub squads_selecionadas: Option<Vec<String>>,
}

impl NewCycle {
    /// Check required fields before anything is written
    pub fn validate(&self) -> Result<()> {
        if self.release.trim().is_empty() {
            return Err(RegressivoError::Validation("release é obrigatório".to_string()));
        }
        Ok(())
    }
}

/// Partial update of a cycle's descriptive fields
///
/// SLA timestamps only move through the SLA operations. Unknown keys are
/// rejected when the patch is parsed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CyclePatch {
    pub release: Option<String>,
    pub ambiente: Option<String>,
    pub plataforma: Option<String>,
    pub status_geral: Option<CycleStatus>,
    pub versao_homolog: Option<String>,
    pub versao_firebase: Option<String>,
    pub versao_alpha: Option<String>,
    pub link_plano_testes: Option<String>,
    pub tipo_release: Option<String>,
}

impl Cycle {
    /// Build a fresh active cycle with no SLA window
    pub fn new(request: &NewCycle, now: DateTime<Utc>) -> Self {
        Self {
            regressivo_id: generate_cycle_id(),
            release: request.release.trim().to_string(),
            ambiente: request.ambiente.clone(),
            plataforma: request.plataforma.clone(),
            status_geral: CycleStatus::Active,
            liberado_em: now,
            sla_inicio: None,
            sla_fim: None,
            versao_homolog: request.versao_homolog.clone(),
            versao_firebase: request.versao_firebase.clone(),
            versao_alpha: request.versao_alpha.clone(),
            link_plano_testes: request.link_plano_testes.clone(),
            tipo_release: request
                .tipo_release
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(default_release_type),
            qr_code_homolog: String::new(),
            qr_code_alpha: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status_geral == CycleStatus::Active
    }

    /// Apply only the fields present in `patch`
    pub fn apply(&mut self, patch: CyclePatch) -> Result<()> {
        if let Some(release) = patch.release {
            if release.trim().is_empty() {
                return Err(RegressivoError::Validation("release não pode ser vazio".to_string()));
            }
            self.release = release;
        }
        if let Some(v) = patch.ambiente {
            self.ambiente = v;
        }
        if let Some(v) = patch.plataforma {
            self.plataforma = v;
        }
        if let Some(v) = patch.status_geral {
            self.status_geral = v;
        }
        if let Some(v) = patch.versao_homolog {
            self.versao_homolog = v;
        }
        if let Some(v) = patch.versao_firebase {
            self.versao_firebase = v;
        }
        if let Some(v) = patch.versao_alpha {
            self.versao_alpha = v;
        }
        if let Some(v) = patch.link_plano_testes {
            self.link_plano_testes = v;
        }
        if let Some(v) = patch.tipo_release {
            self.tipo_release = v;
        }
        Ok(())
    }
}
