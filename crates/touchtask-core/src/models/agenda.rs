//! Free-standing reminders and today's meetings.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::TimeOfDay;

/// A short note kept until the user deletes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reminder {
    pub id: String,
    pub text: String,
}

/// A fixed-time entry on today's agenda.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meeting {
    pub id: String,
    pub time: TimeOfDay,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// The meetings of one logical day, ordered by time.
///
/// Meetings do not recur: a list stored for any other day is discarded on
/// load, the same way the daily snapshot rolls over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeetingDay {
    pub date: Date,
    #[serde(default)]
    pub items: Vec<Meeting>,
}

impl MeetingDay {
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            items: Vec::new(),
        }
    }

    /// Builds the list for `date`, sorting `items` by time.
    pub fn with_items(date: Date, items: Vec<Meeting>) -> Self {
        let mut day = Self { date, items };
        day.sort();
        day
    }

    /// The stored list if it belongs to `today`, otherwise an empty one.
    pub fn current(stored: Option<MeetingDay>, today: Date) -> Self {
        match stored {
            Some(day) if day.date == today => day,
            _ => Self::empty(today),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Meeting> {
        self.items.iter().find(|meeting| meeting.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Meeting> {
        self.items.iter_mut().find(|meeting| meeting.id == id)
    }

    /// Adds a meeting, keeping the list in time order. Meetings at the same
    /// time stay in insertion order.
    pub fn insert(&mut self, meeting: Meeting) {
        self.items.push(meeting);
        self.sort();
    }

    /// Removes and returns the meeting with `id`.
    pub fn remove(&mut self, id: &str) -> Option<Meeting> {
        let position = self.items.iter().position(|meeting| meeting.id == id)?;
        Some(self.items.remove(position))
    }

    pub(crate) fn sort(&mut self) {
        self.items.sort_by_key(|meeting| meeting.time);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
