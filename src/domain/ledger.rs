//! Task ledger entries
//!
//! One entry per squad+module assignment inside a cycle. Entries reference
//! their cycle by id; the cycle never holds them directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::squads::SquadsConfig;
use crate::error::{RegressivoError, Result};
use crate::id::generate_entry_id;

/// Status of a ledger entry
///
/// Stored values outside the known vocabulary are kept as `Other` so they
/// survive a read/write cycle and still show up in summaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    #[default]
    InProgress,
    Done,
    Blocked,
    DoneWithBugs,
    Other(String),
}

impl TaskStatus {
    /// The four statuses an entry may be written with
    pub const RECOGNIZED: [TaskStatus; 4] = [
        TaskStatus::Done,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::DoneWithBugs,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::InProgress => "em andamento",
            TaskStatus::Done => "concluído",
            TaskStatus::Blocked => "bloqueado",
            TaskStatus::DoneWithBugs => "concluido com bugs",
            TaskStatus::Other(s) => s,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TaskStatus::Other(_))
    }

    /// Counts toward completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::DoneWithBugs)
    }
}

impl From<String> for TaskStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "em andamento" => TaskStatus::InProgress,
            "concluído" => TaskStatus::Done,
            "bloqueado" => TaskStatus::Blocked,
            "concluido com bugs" => TaskStatus::DoneWithBugs,
            _ => TaskStatus::Other(value),
        }
    }
}

impl From<TaskStatus> for String {
    fn from(value: TaskStatus) -> Self {
        match value {
            TaskStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One squad/module task assignment within a cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub squad_modulo_id: String,
    pub regressivo_id: String,
    pub squad: String,
    pub modulo: String,
    #[serde(default)]
    pub detalhe_entrega: String,
    #[serde(default)]
    pub responsavel: String,
    #[serde(default)]
    pub status: TaskStatus,
    /// Empty string means no bug was reported
    #[serde(default)]
    pub reportar_bug: String,
    pub criado_em: DateTime<Utc>,
}

impl LedgerEntry {
    /// Fresh entry: in progress, no detail, assignee, or bug
    pub fn new(cycle_id: &str, squad: &str, modulo: &str, now: DateTime<Utc>) -> Self {
        Self {
            squad_modulo_id: generate_entry_id(),
            regressivo_id: cycle_id.to_string(),
            squad: squad.to_string(),
            modulo: modulo.to_string(),
            detalhe_entrega: String::new(),
            responsavel: String::new(),
            status: TaskStatus::default(),
            reportar_bug: String::new(),
            criado_em: now,
        }
    }

    pub fn has_bug(&self) -> bool {
        !self.reportar_bug.is_empty()
    }

    /// Apply only the fields present in `patch`
    pub fn apply(&mut self, patch: EntryPatch) -> Result<()> {
        patch.validate()?;
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(v) = patch.detalhe_entrega {
            self.detalhe_entrega = v;
        }
        if let Some(v) = patch.responsavel {
            self.responsavel = v;
        }
        if let Some(v) = patch.reportar_bug {
            self.reportar_bug = v;
        }
        Ok(())
    }
}

/// Partial update of a ledger entry, as sent by the quality role
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntryPatch {
    pub status: Option<TaskStatus>,
    pub detalhe_entrega: Option<String>,
    pub responsavel: Option<String>,
    pub reportar_bug: Option<String>,
}

impl EntryPatch {
    pub fn validate(&self) -> Result<()> {
        match &self.status {
            Some(TaskStatus::Other(s)) => Err(RegressivoError::Validation(format!("status desconhecido: {}", s))),
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.detalhe_entrega.is_none()
            && self.responsavel.is_none()
            && self.reportar_bug.is_none()
    }
}

/// Materialize a cycle's ledger from the squad configuration
///
/// Follows configuration order (squads, then modules). Squads that are not
/// selected or not configured produce nothing; blank module labels are
/// skipped; repeated modules produce repeated entries.
pub fn create_batch(cycle_id: &str, selections: &[String], config: &SquadsConfig, now: DateTime<Utc>) -> Vec<LedgerEntry> {
    config
        .squads
        .iter()
        .filter(|s| selections.iter().any(|sel| *sel == s.squad))
        .flat_map(|s| {
            s.modules
                .iter()
                .filter(|m| !m.trim().is_empty())
                .map(move |m| LedgerEntry::new(cycle_id, &s.squad, m, now))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::squads::SquadModules;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn config() -> SquadsConfig {
        SquadsConfig {
            squads: vec![
                SquadModules {
                    squad: "SquadA".to_string(),
                    modules: vec!["m1".to_string(), "m2".to_string()],
                },
                SquadModules {
                    squad: "SquadB".to_string(),
                    modules: vec!["m3".to_string()],
                },
            ],
        }
    }

    #[test]
    fn test_status_wire_values() {
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"concluído\"");
        assert_eq!(serde_json::to_string(&TaskStatus::DoneWithBugs).unwrap(), "\"concluido com bugs\"");
        let parsed: TaskStatus = serde_json::from_str("\"bloqueado\"").unwrap();
        assert_eq!(parsed, TaskStatus::Blocked);
    }

    #[test]
    fn test_unrecognized_status_is_preserved() {
        let parsed: TaskStatus = serde_json::from_str("\"pausado\"").unwrap();
        assert_eq!(parsed, TaskStatus::Other("pausado".to_string()));
        assert!(!parsed.is_recognized());
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"pausado\"");
    }

    #[test]
    fn test_create_batch_selected_squad_only() {
        let entries = create_batch("cycle-1", &["SquadA".to_string()], &config(), now());
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.status == TaskStatus::InProgress));
        assert!(entries.iter().all(|e| e.regressivo_id == "cycle-1"));
        assert!(entries.iter().all(|e| e.squad == "SquadA"));
        assert_eq!(entries[0].modulo, "m1");
        assert_eq!(entries[1].modulo, "m2");
        assert!(entries.iter().all(|e| e.detalhe_entrega.is_empty() && e.responsavel.is_empty() && !e.has_bug()));
    }

    #[test]
    fn test_create_batch_follows_config_order() {
        let selection = vec!["SquadB".to_string(), "SquadA".to_string()];
        let modules: Vec<String> = create_batch("c", &selection, &config(), now())
            .into_iter()
            .map(|e| e.modulo)
            .collect();
        assert_eq!(modules, vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn test_create_batch_skips_blank_and_keeps_duplicates() {
        let config = SquadsConfig {
            squads: vec![SquadModules {
                squad: "S".to_string(),
                modules: vec!["x".to_string(), "".to_string(), "x".to_string()],
            }],
        };
        let entries = create_batch("c", &["S".to_string(), "Unknown".to_string()], &config, now());
        assert_eq!(entries.len(), 2);
        assert_ne!(entries[0].squad_modulo_id, entries[1].squad_modulo_id);
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut entry = LedgerEntry::new("c", "S", "m", now());
        let patch: EntryPatch = serde_json::from_value(serde_json::json!({
            "status": "concluido com bugs",
            "reportarBug": "crash ao abrir extrato"
        }))
        .unwrap();
        entry.apply(patch).unwrap();
        assert_eq!(entry.status, TaskStatus::DoneWithBugs);
        assert!(entry.has_bug());
        assert!(entry.responsavel.is_empty());
    }

    #[test]
    fn test_patch_rejects_unknown_status_and_fields() {
        let mut entry = LedgerEntry::new("c", "S", "m", now());
        let patch: EntryPatch = serde_json::from_value(serde_json::json!({"status": "pausado"})).unwrap();
        assert!(matches!(entry.apply(patch), Err(RegressivoError::Validation(_))));
        assert_eq!(entry.status, TaskStatus::InProgress);

        let unknown = serde_json::from_value::<EntryPatch>(serde_json::json!({"regressivoId": "other"}));
        assert!(unknown.is_err());
    }
}
