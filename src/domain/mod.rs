//! Domain types for regressivos
//!
//! - clock: deadline arithmetic and the `Clock` seam
//! - cycle: the regression cycle record and its admin patch
//! - sla: SLA lifecycle (start, stop, extend, live expiry)
//! - ledger: per squad/module task entries and batch creation
//! - guard: edit gate tied to the owning cycle's SLA
//! - summary: progress roll-up over a ledger
//! - squads: squad/module configuration

pub mod clock;
pub mod cycle;
pub mod guard;
pub mod ledger;
pub mod sla;
pub mod squads;
pub mod summary;

pub use clock::{Clock, FixedClock, Remaining, SystemClock};
pub use cycle::{Cycle, CyclePatch, CycleStatus, NewCycle};
pub use ledger::{EntryPatch, LedgerEntry, TaskStatus, create_batch};
pub use sla::{SLA_DURATION_HOURS, SlaState};
pub use squads::{SquadModules, SquadsConfig};
pub use summary::{Summary, summarize};
