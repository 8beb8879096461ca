//! Regressivo Manager module
//!
//! Orchestrates the cycle lifecycle - creation, SLA transitions, ledger edits.

mod regressivo_manager;

pub use regressivo_manager::{CycleDetails, EntryView, RegressivoManager, ReleaseNotes, SlaStatus, SlaWindow};
