use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{SignedDuration, Timestamp};
use parking_lot::Mutex;

pub trait Clock: Send + Sync {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;

    /// Returns the current UTC calendar date.
    fn today(&self) -> Date {
        self.now().to_zoned(TimeZone::UTC).date()
    }
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
///
/// Used to drive time-window logic (click deduplication, upload dates)
/// deterministically.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Moves the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: SignedDuration) {
        let mut now = self.now.lock();
        *now = *now + by;
    }

    pub fn set(&self, to: Timestamp) {
        *self.now.lock() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let base = Timestamp::from_second(0).unwrap();
        let clock = ManualClock::new(base);
        assert_eq!(clock.now(), base);

        clock.advance(SignedDuration::from_secs(1000));
        assert_eq!(clock.now(), Timestamp::from_second(1000).unwrap());
    }

    #[test]
    fn today_is_utc_date() {
        // 2024-03-01T23:30:00Z
        let clock = ManualClock::new(Timestamp::from_second(1_709_335_800).unwrap());
        assert_eq!(clock.today().to_string(), "2024-03-01");
    }
}
