//! Time source for the ledger
//!
//! The daily caps depend on the calendar day, so the ledger asks a `Clock`
//! for the current time instead of reading the system clock directly. The
//! console uses the system clock; script replay and tests use a manual one.

use chrono::{Local, NaiveDate, NaiveDateTime, TimeDelta};
use std::cell::Cell;

/// Source of the current local date and time
pub trait Clock {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// Current calendar day
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Clock backed by the machine's local time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<NaiveDateTime>,
}

impl ManualClock {
    pub fn new(start: NaiveDateTime) -> Self {
        ManualClock {
            now: Cell::new(start),
        }
    }

    /// Start at the current local time
    pub fn starting_now() -> Self {
        Self::new(SystemClock.now())
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, delta: TimeDelta) {
        self.now.set(self.now.get() + delta);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_manual_clock_set_and_advance() {
        let clock = ManualClock::new(at(2024, 1, 15, 23));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        clock.advance(TimeDelta::hours(2));
        assert_eq!(clock.now(), at(2024, 1, 16, 1));

        clock.set(at(2024, 3, 1, 9));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }
}
