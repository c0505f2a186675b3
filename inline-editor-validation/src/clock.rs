//! Source of "now" for time-relative constraints.

use chrono::{DateTime, Local, NaiveDateTime, Utc};

pub trait Clock {
    /// Local wall-clock time, compared against naive date-times.
    fn now_local(&self) -> NaiveDateTime;

    /// The current instant, compared against date-times with an offset.
    fn now_utc(&self) -> DateTime<Utc>;
}

/// The system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_local(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    local: NaiveDateTime,
    utc: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(local: NaiveDateTime, utc: DateTime<Utc>) -> Self {
        Self { local, utc }
    }

    /// Stopped at `utc`, with local time equal to UTC.
    pub fn at_utc(utc: DateTime<Utc>) -> Self {
        Self {
            local: utc.naive_utc(),
            utc,
        }
    }
}

impl Clock for FixedClock {
    fn now_local(&self) -> NaiveDateTime {
        self.local
    }

    fn now_utc(&self) -> DateTime<Utc> {
        self.utc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_at_utc() {
        let moment = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = FixedClock::at_utc(moment);
        assert_eq!(clock.now_utc(), moment);
        assert_eq!(clock.now_local(), moment.naive_utc());
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now_utc();
        assert!(clock.now_utc() >= first);
    }
}
