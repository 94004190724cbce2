//! Weekday recurrence sets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Single-letter labels indexed by weekday, Sunday first.
pub const DAY_LABELS: [char; 7] = ['S', 'M', 'T', 'W', 'T', 'F', 'S'];

/// Day of week as an index in `0..=6` where 0 is Sunday.
pub type WeekdayIndex = u8;

/// Returns the Sunday-based index of a calendar date's weekday.
pub fn weekday_index(date: jiff::civil::Date) -> WeekdayIndex {
    date.weekday().to_sunday_zero_offset() as WeekdayIndex
}

/// The set of weekdays a block recurs on.
///
/// Stored as a bitmask; serialized as the ascending list of day indices
/// (`[1, 2, 3, 4, 5]` for weekdays) so iteration order never depends on the
/// order days were toggled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Recurrence(u8);

impl Recurrence {
    /// No recurring days.
    pub const NONE: Recurrence = Recurrence(0);

    /// Monday through Friday.
    pub fn weekdays() -> Self {
        Self(0b0011_1110)
    }

    /// Builds a set from day indices, rejecting indices outside `0..=6`.
    pub fn from_days<I: IntoIterator<Item = WeekdayIndex>>(days: I) -> Result<Self, String> {
        days.into_iter().try_fold(Self::NONE, |set, day| {
            if day > 6 {
                Err(format!("Invalid weekday index {day}, expected 0-6"))
            } else {
                Ok(Self(set.0 | (1 << day)))
            }
        })
    }

    pub fn contains(self, day: WeekdayIndex) -> bool {
        day <= 6 && self.0 & (1 << day) != 0
    }

    /// Adds the day when absent, removes it when present. Indices outside
    /// `0..=6` leave the set unchanged.
    #[must_use]
    pub fn toggled(self, day: WeekdayIndex) -> Self {
        if day > 6 {
            return self;
        }
        Self(self.0 ^ (1 << day))
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the contained day indices in ascending order.
    pub fn days(self) -> impl Iterator<Item = WeekdayIndex> {
        (0..7).filter(move |day| self.contains(*day))
    }
}

impl TryFrom<Vec<u8>> for Recurrence {
    type Error = String;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_days(value)
    }
}

impl From<Recurrence> for Vec<u8> {
    fn from(value: Recurrence) -> Self {
        value.days().collect()
    }
}

impl fmt::Display for Recurrence {
    /// Renders the week as seven labels, lowercase for days not in the set
    /// (`sMTWTFs` for weekdays).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (day, label) in DAY_LABELS.iter().enumerate() {
            if self.contains(day as WeekdayIndex) {
                write!(f, "{label}")?;
            } else {
                write!(f, "{}", label.to_ascii_lowercase())?;
            }
        }
        Ok(())
    }
}
