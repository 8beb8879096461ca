//! SLA state machine
//!
//! A cycle's SLA moves NotStarted -> Running -> Expired, or is Stopped by an
//! admin. Expiry is never stored: it is recomputed from `slaFim` on every
//! read, so extending an expired window brings it back to Running.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::clock::{self, Remaining};
use crate::domain::cycle::{Cycle, CycleStatus};
use crate::error::{RegressivoError, Result};

/// Length of a freshly started SLA window
pub const SLA_DURATION_HOURS: i64 = 24;

/// SLA lifecycle state as observed at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaState {
    NotStarted,
    Running,
    Expired,
    Stopped,
}

/// Compute the state of `cycle` at `now`
pub fn state(cycle: &Cycle, now: DateTime<Utc>) -> SlaState {
    if cycle.status_geral == CycleStatus::Finished {
        return SlaState::Stopped;
    }
    match cycle.sla_fim {
        None => SlaState::NotStarted,
        Some(end) if clock::is_expired(end, now) => SlaState::Expired,
        Some(_) => SlaState::Running,
    }
}

/// Open the SLA window at `now`. A window can only be opened once.
pub fn start(cycle: &mut Cycle, now: DateTime<Utc>) -> Result<()> {
    if cycle.sla_inicio.is_some() || cycle.sla_fim.is_some() {
        return Err(RegressivoError::AlreadyStarted(cycle.regressivo_id.clone()));
    }
    cycle.sla_inicio = Some(now);
    cycle.sla_fim = Some(clock::expiry(now, SLA_DURATION_HOURS));
    Ok(())
}

/// Mark the cycle finished. Timestamps are kept.
pub fn stop(cycle: &mut Cycle) {
    cycle.status_geral = CycleStatus::Finished;
}

/// Push the deadline forward by `hours`. A deadline past chrono's range is
/// a validation error and leaves the cycle untouched.
pub fn extend(cycle: &mut Cycle, hours: u32) -> Result<DateTime<Utc>> {
    let end = cycle
        .sla_fim
        .ok_or_else(|| RegressivoError::NotStarted(cycle.regressivo_id.clone()))?;
    let new_end = Duration::try_hours(i64::from(hours))
        .and_then(|delta| end.checked_add_signed(delta))
        .ok_or_else(|| RegressivoError::Validation(format!("horas fora do intervalo permitido: {}", hours)))?;
    cycle.sla_fim = Some(new_end);
    Ok(new_end)
}

/// Whether the cycle's deadline has passed; false when never started
pub fn is_expired(cycle: &Cycle, now: DateTime<Utc>) -> bool {
    cycle.sla_fim.is_some_and(|end| clock::is_expired(end, now))
}

/// Time left on the cycle's deadline, `None` if unset or expired
pub fn remaining(cycle: &Cycle, now: DateTime<Utc>) -> Option<Remaining> {
    cycle.sla_fim.and_then(|end| clock::remaining(end, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cycle::NewCycle;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn cycle() -> Cycle {
        let req = NewCycle {
            release: "R42".to_string(),
            ..Default::default()
        };
        Cycle::new(&req, t0())
    }

    #[test]
    fn test_new_cycle_not_started() {
        let c = cycle();
        assert_eq!(state(&c, t0()), SlaState::NotStarted);
        assert!(!is_expired(&c, t0() + Duration::days(30)));
        assert!(remaining(&c, t0()).is_none());
    }

    #[test]
    fn test_start_opens_24h_window() {
        let mut c = cycle();
        start(&mut c, t0()).unwrap();
        assert_eq!(c.sla_inicio, Some(t0()));
        assert_eq!(c.sla_fim, Some(t0() + Duration::hours(24)));
        assert_eq!(c.status_geral, CycleStatus::Active);
        assert_eq!(state(&c, t0()), SlaState::Running);
    }

    #[test]
    fn test_start_twice_rejected() {
        let mut c = cycle();
        start(&mut c, t0()).unwrap();
        let err = start(&mut c, t0() + Duration::hours(1)).unwrap_err();
        assert!(matches!(err, RegressivoError::AlreadyStarted(_)));
        assert_eq!(c.sla_inicio, Some(t0()));
    }

    #[test]
    fn test_expiry_boundary() {
        let mut c = cycle();
        start(&mut c, t0()).unwrap();
        let end = t0() + Duration::hours(24);
        assert_eq!(state(&c, end), SlaState::Running);
        assert_eq!(state(&c, end + Duration::seconds(1)), SlaState::Expired);
    }

    #[test]
    fn test_remaining_after_23_hours() {
        let mut c = cycle();
        start(&mut c, t0()).unwrap();
        let left = remaining(&c, t0() + Duration::hours(23)).unwrap();
        assert_eq!(left.to_string(), "01:00:00");
        assert!(remaining(&c, t0() + Duration::hours(25)).is_none());
        assert!(is_expired(&c, t0() + Duration::hours(25)));
    }

    #[test]
    fn test_extend_requires_started() {
        let mut c = cycle();
        assert!(matches!(extend(&mut c, 2), Err(RegressivoError::NotStarted(_))));
    }

    #[test]
    fn test_extend_never_decreases_end() {
        let mut c = cycle();
        start(&mut c, t0()).unwrap();
        for hours in [0u32, 1, 5, 48] {
            let before = c.sla_fim.unwrap();
            let after = extend(&mut c, hours).unwrap();
            assert!(after >= before);
            assert_eq!(after - before, Duration::hours(i64::from(hours)));
        }
    }

    #[test]
    fn test_extend_out_of_range_is_validation_error() {
        let mut c = cycle();
        start(&mut c, t0()).unwrap();
        let before = c.sla_fim;
        let err = extend(&mut c, u32::MAX).unwrap_err();
        assert!(matches!(err, RegressivoError::Validation(_)));
        assert_eq!(err.status_code(), 400);
        assert_eq!(c.sla_fim, before);
    }

    #[test]
    fn test_extend_revives_expired_cycle() {
        let mut c = cycle();
        start(&mut c, t0()).unwrap();
        let later = t0() + Duration::hours(30);
        assert_eq!(state(&c, later), SlaState::Expired);
        extend(&mut c, 12).unwrap();
        assert_eq!(state(&c, later), SlaState::Running);
    }

    #[test]
    fn test_stop_is_idempotent_and_keeps_window() {
        let mut c = cycle();
        start(&mut c, t0()).unwrap();
        stop(&mut c);
        stop(&mut c);
        assert_eq!(c.status_geral, CycleStatus::Finished);
        assert!(c.sla_fim.is_some());
        assert_eq!(state(&c, t0()), SlaState::Stopped);
    }

    #[test]
    fn test_stopped_and_expired_both_hold() {
        let mut c = cycle();
        start(&mut c, t0()).unwrap();
        stop(&mut c);
        let later = t0() + Duration::hours(48);
        assert_eq!(state(&c, later), SlaState::Stopped);
        assert!(is_expired(&c, later));
    }
}
