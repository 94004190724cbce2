//! Recurring block templates.

use serde::{Deserialize, Deserializer, Serialize};

use super::{Recurrence, TimeOfDay};

/// Reads a minute count from any version of the backup format. Older
/// backups store windows that cross midnight as negative durations and
/// unparsable inputs as `null`; both read as zero.
fn lenient_minutes<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let minutes = Option::<f64>::deserialize(deserializer)?;
    // `as` saturates, mapping negatives to 0 and clamping at u32::MAX.
    Ok(minutes.map_or(0, |minutes| minutes as u32))
}

/// One ordered sub-step of a recurring block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Subtask {
    /// Unique identifier, stable across template edits
    pub id: String,

    pub title: String,

    /// Estimated duration in minutes
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration_minutes: u32,

    /// Whether the sub-step may be left out without consequence
    #[serde(default)]
    pub optional: bool,
}

/// A user-authored recurring time block.
///
/// Field names on the wire match the backup format, so `recurrence` is
/// serialized as `repeat_days`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurringBlock {
    /// Unique identifier; today's [`DailyBlock`](super::DailyBlock) shares it
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub description: String,

    pub start_time: TimeOfDay,

    pub end_time: TimeOfDay,

    /// Length of the window; derived from start and end
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub duration_minutes: u32,

    #[serde(default)]
    pub category: String,

    /// Free-form labels in insertion order
    #[serde(default)]
    pub tags: Vec<String>,

    /// Weekdays this block recurs on
    #[serde(rename = "repeat_days", default)]
    pub recurrence: Recurrence,

    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl RecurringBlock {
    /// Length of the time window in minutes, wrapping past midnight.
    pub fn window_minutes(&self) -> u32 {
        self.start_time.minutes_until(self.end_time)
    }

    /// Recomputes `duration_minutes` from the time window.
    pub fn with_derived_duration(mut self) -> Self {
        self.duration_minutes = self.window_minutes();
        self
    }

    pub fn subtask(&self, subtask_id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|st| st.id == subtask_id)
    }
}

/// The full collection of recurring blocks held by the template store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateSet {
    pub blocks: Vec<RecurringBlock>,
}

impl TemplateSet {
    pub fn new(blocks: Vec<RecurringBlock>) -> Self {
        Self { blocks }
    }

    pub fn get(&self, id: &str) -> Option<&RecurringBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut RecurringBlock> {
        self.blocks.iter_mut().find(|block| block.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
