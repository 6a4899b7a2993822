//! Clock abstraction so expiry logic never reads wall-clock time directly.
//!
//! Every expiry comparison in this crate goes through an injected [`Clock`],
//! which makes token and counter lifetimes deterministically testable with a
//! [`ManualClock`].

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Source of the current time for all expiry checks
pub trait Clock: Send + Sync {
    /// Returns the current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests
///
/// Starts at a fixed instant and only moves when told to, so expiry windows
/// can be crossed without sleeping.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a manual clock pinned to the given instant
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Creates a manual clock pinned to the current system time
    pub fn start_now() -> Self {
        Self::new(Utc::now())
    }

    /// Moves the clock forward by the given duration
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    /// Pins the clock to a new instant
    pub fn set(&self, to: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::start_now();
        let before = clock.now();

        clock.advance(Duration::hours(2));

        assert_eq!(clock.now(), before + Duration::hours(2));
    }

    #[test]
    fn test_manual_clock_set() {
        let clock = ManualClock::start_now();
        let target = Utc::now() + Duration::days(30);

        clock.set(target);

        assert_eq!(clock.now(), target);
    }
}
