//! Date, time and duration display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

use crate::models::TimeOfDay;

/// A wrapper around `Timestamp` that formats it in the system time zone as
/// `YYYY-MM-DD HH:MM TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M %Z")
        )
    }
}

/// A minute count rendered compactly: `0m`, `45m`, `2h`, `1h30m`.
#[derive(Debug, Clone, Copy)]
pub struct Minutes(pub u32);

impl fmt::Display for Minutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes) = (self.0 / 60, self.0 % 60);
        match (hours, minutes) {
            (0, m) => write!(f, "{m}m"),
            (h, 0) => write!(f, "{h}h"),
            (h, m) => write!(f, "{h}h{m}m"),
        }
    }
}

/// A second count rendered as a `MM:SS` countdown. Minutes are not wrapped
/// into hours, so 90 minutes shows as `90:00`.
#[derive(Debug, Clone, Copy)]
pub struct Countdown(pub u32);

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// A time of day in the user's preferred clock format: `18:05` or
/// `6:05 PM`.
#[derive(Debug, Clone, Copy)]
pub struct ClockTime {
    pub time: TimeOfDay,
    pub use_24_hour_format: bool,
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.use_24_hour_format {
            return write!(f, "{}", self.time);
        }
        let hour = self.time.hour();
        let suffix = if hour < 12 { "AM" } else { "PM" };
        let hour = match hour % 12 {
            0 => 12,
            h => h,
        };
        write!(f, "{hour}:{:02} {suffix}", self.time.minute())
    }
}
