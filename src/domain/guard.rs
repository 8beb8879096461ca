//! Edit guard
//!
//! The single decision point for whether a cycle's ledger may still be
//! edited. Every ledger mutation path calls [`ensure_editable`] with the
//! entry's owning cycle.

use chrono::{DateTime, Utc};

use crate::domain::cycle::Cycle;
use crate::domain::sla;
use crate::error::{RegressivoError, Result};

pub fn can_edit(cycle: &Cycle, now: DateTime<Utc>) -> bool {
    !sla::is_expired(cycle, now)
}

pub fn ensure_editable(cycle: &Cycle, now: DateTime<Utc>) -> Result<()> {
    if can_edit(cycle, now) {
        Ok(())
    } else {
        Err(RegressivoError::SlaExpired)
    }
}
