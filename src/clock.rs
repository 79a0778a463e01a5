//! Source of "now" for lazy defaulting
//!
//! Resolving an unset date to today is the only operation that reads the
//! clock. Passing a [`Clock`] keeps that read explicit and lets tests freeze
//! time.

use chrono::{DateTime, Utc};

/// Provides the current instant.
pub trait Clock {
    /// Current instant in UTC; callers convert it to a [`Location`](crate::Location).
    fn now(&self) -> DateTime<Utc>;
}

/// The host system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at a fixed instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock() {
        let instant = Utc.with_ymd_and_hms(2023, 7, 4, 12, 30, 0).unwrap();
        let clock = FixedClock(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock: &dyn Clock = &SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
