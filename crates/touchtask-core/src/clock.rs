//! Wall-clock access and the logical day.

use jiff::{civil::Date, tz::TimeZone, Zoned};

use crate::models::TimeOfDay;

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Zoned;
}

/// Reads the system clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Zoned {
        Zoned::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone)]
pub struct FixedClock(Zoned);

impl FixedClock {
    pub fn new(now: Zoned) -> Self {
        Self(now)
    }

    /// A clock pinned to `date` at `time` in UTC.
    ///
    /// Falls back to midnight UTC on that date if the combination cannot be
    /// represented.
    pub fn at(date: Date, time: TimeOfDay) -> Self {
        let civil = date.at(time.hour() as i8, time.minute() as i8, 0, 0);
        let zoned = civil
            .to_zoned(TimeZone::UTC)
            .or_else(|_| date.to_zoned(TimeZone::UTC))
            .unwrap_or_else(|_| Zoned::now().with_time_zone(TimeZone::UTC));
        Self(zoned)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Zoned {
        self.0.clone()
    }
}

/// The calendar date a wall-clock instant belongs to when days begin at
/// `day_starts_at`. Instants before the start time count towards the
/// previous date.
pub fn logical_date(now: &Zoned, day_starts_at: TimeOfDay) -> Date {
    let date = now.date();
    if TimeOfDay::from(now.time()) < day_starts_at {
        date.yesterday().unwrap_or(date)
    } else {
        date
    }
}
