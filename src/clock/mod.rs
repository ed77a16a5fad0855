//! Time source abstraction for the cooldown gate
//!
//! The cooldown compares against a wall-clock-like source that must be
//! monotonic and trusted; no clock-skew correction is attempted. Production
//! code uses [`SystemClock`]; tests drive [`ManualClock`] to advance time
//! deterministically.

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::fmt;
use std::sync::Mutex;

/// A source of the current time
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A manually advanced clock for deterministic tests
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock starting at the Unix epoch
    pub fn new() -> Self {
        Self::starting_at(Utc.timestamp_opt(0, 0).single().unwrap_or_default())
    }

    /// Create a clock starting at a given instant
    pub fn starting_at(at: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(at),
        }
    }

    /// Advance the clock by whole seconds
    pub fn advance_secs(&self, secs: u64) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += Duration::seconds(secs as i64);
    }

    /// Set the clock to an absolute instant
    pub fn set(&self, at: DateTime<Utc>) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = at;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        let start = clock.now();

        clock.advance_secs(60);
        assert_eq!(clock.now() - start, Duration::seconds(60));

        clock.advance_secs(1);
        assert_eq!(clock.now() - start, Duration::seconds(61));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::new();
        let target = Utc.timestamp_opt(1_700_000_000, 0).single().unwrap();
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn test_system_clock_is_not_behind_itself() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
