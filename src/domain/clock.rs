//! Deadline clock
//!
//! Pure functions over timestamps: when a deadline falls, whether it has
//! passed, and how much time is left. "Now" is always an argument; the
//! [`Clock`] trait is the seam services use to obtain it.

use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Source of the current wall-clock time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock for tests and replays
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Move the clock to an absolute instant
    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

/// Deadline reached `duration_hours` after `start`
pub fn expiry(start: DateTime<Utc>, duration_hours: i64) -> DateTime<Utc> {
    start + Duration::hours(duration_hours)
}

/// A deadline has expired only once `now` is strictly past it
pub fn is_expired(end: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > end
}

/// Time left until `end`, or `None` once expired
pub fn remaining(end: DateTime<Utc>, now: DateTime<Utc>) -> Option<Remaining> {
    if is_expired(end, now) {
        return None;
    }
    Some(Remaining {
        seconds: (end - now).num_seconds().max(0),
    })
}

/// Non-negative time left on a deadline, truncated to whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Remaining {
    seconds: i64,
}

impl Remaining {
    pub fn total_seconds(&self) -> i64 {
        self.seconds
    }
}

/// Renders as `HH:MM:SS`; hours are not wrapped at 24
impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_expiry_adds_exact_hours() {
        assert_eq!(expiry(t0(), 24), Utc.with_ymd_and_hms(2025, 3, 11, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_is_expired_is_strict() {
        let end = t0();
        assert!(!is_expired(end, end));
        assert!(!is_expired(end, end - Duration::seconds(1)));
        assert!(is_expired(end, end + Duration::milliseconds(1)));
    }

    #[test]
    fn test_remaining_none_when_expired() {
        assert_eq!(remaining(t0(), t0() + Duration::seconds(1)), None);
    }

    #[test]
    fn test_remaining_zero_at_boundary() {
        let left = remaining(t0(), t0()).unwrap();
        assert_eq!(left.total_seconds(), 0);
        assert_eq!(left.to_string(), "00:00:00");
    }

    #[test]
    fn test_remaining_format_pads_minutes_and_seconds() {
        let end = t0() + Duration::seconds(3600 + 5 * 60 + 7);
        assert_eq!(remaining(end, t0()).unwrap().to_string(), "01:05:07");
    }

    #[test]
    fn test_remaining_hours_not_wrapped() {
        let end = expiry(t0(), 50);
        assert_eq!(remaining(end, t0()).unwrap().to_string(), "50:00:00");
    }

    #[test]
    fn test_remaining_truncates_fractional_seconds() {
        let end = t0() + Duration::milliseconds(59_999);
        assert_eq!(remaining(end, t0()).unwrap().to_string(), "00:00:59");
    }

    #[test]
    fn test_fixed_clock_advance() {
        let clock = FixedClock::new(t0());
        clock.advance(Duration::hours(23));
        assert_eq!(clock.now(), t0() + Duration::hours(23));
        clock.set(t0());
        assert_eq!(clock.now(), t0());
    }
}
