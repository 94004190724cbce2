//! Day-scoped instances of recurring blocks.

use std::collections::HashMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Recurrence, RecurringBlock, Subtask, SubtaskState, TimeOfDay};

/// A sub-step copied into today's block, carrying today's tri-state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailySubtask {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub state: SubtaskState,
}

impl DailySubtask {
    fn from_template(subtask: &Subtask, state: SubtaskState) -> Self {
        Self {
            id: subtask.id.clone(),
            title: subtask.title.clone(),
            duration_minutes: subtask.duration_minutes,
            optional: subtask.optional,
            state,
        }
    }
}

/// Today's mutable instantiation of a [`RecurringBlock`].
///
/// The structural fields mirror the template; `completed`, `skipped`,
/// `minimized` and each sub-step's `state` belong to the day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyBlock {
    /// Same identifier as the originating template
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "repeat_days", default)]
    pub recurrence: Recurrence,
    #[serde(default)]
    pub subtasks: Vec<DailySubtask>,

    #[serde(default)]
    pub completed: bool,
    /// Only meaningful while `completed` is set
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub minimized: bool,
}

impl DailyBlock {
    /// Fresh copy of a template with all day-scoped fields cleared.
    pub fn from_template(template: &RecurringBlock) -> Self {
        Self {
            id: template.id.clone(),
            title: template.title.clone(),
            description: template.description.clone(),
            start_time: template.start_time,
            end_time: template.end_time,
            duration_minutes: template.duration_minutes,
            category: template.category.clone(),
            tags: template.tags.clone(),
            recurrence: template.recurrence,
            subtasks: template
                .subtasks
                .iter()
                .map(|st| DailySubtask::from_template(st, SubtaskState::Default))
                .collect(),
            completed: false,
            skipped: false,
            minimized: false,
        }
    }

    /// Replaces the structural fields with the template's current values.
    ///
    /// Sub-steps whose id survives the edit keep today's state; new ids start
    /// at [`SubtaskState::Default`]. Completion and minimization are kept.
    #[must_use]
    pub fn merged_with(self, template: &RecurringBlock) -> Self {
        let states: HashMap<&str, SubtaskState> = self
            .subtasks
            .iter()
            .map(|st| (st.id.as_str(), st.state))
            .collect();

        let subtasks = template
            .subtasks
            .iter()
            .map(|st| {
                let state = states.get(st.id.as_str()).copied().unwrap_or_default();
                DailySubtask::from_template(st, state)
            })
            .collect();

        Self {
            subtasks,
            completed: self.completed,
            skipped: self.skipped,
            minimized: self.minimized,
            ..Self::from_template(template)
        }
    }

    pub fn subtask(&self, subtask_id: &str) -> Option<&DailySubtask> {
        self.subtasks.iter().find(|st| st.id == subtask_id)
    }

    /// Number of sub-steps currently marked done.
    pub fn done_count(&self) -> usize {
        self.subtasks
            .iter()
            .filter(|st| st.state == SubtaskState::Done)
            .count()
    }
}

/// The aggregate "today" working set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailySnapshot {
    /// The logical day this snapshot represents
    pub date: Date,

    /// When set, only blocks recurring on today's weekday are visible
    #[serde(default = "default_focus_mode")]
    pub focus_mode: bool,

    #[serde(default)]
    pub blocks: Vec<DailyBlock>,

    /// Ids completed today, in completion order
    #[serde(default)]
    pub completed_block_ids: Vec<String>,
}

fn default_focus_mode() -> bool {
    true
}

impl DailySnapshot {
    /// Focus mode used when no earlier snapshot exists.
    pub const DEFAULT_FOCUS_MODE: bool = true;

    pub fn block(&self, id: &str) -> Option<&DailyBlock> {
        self.blocks.iter().find(|block| block.id == id)
    }

    pub(crate) fn block_mut(&mut self, id: &str) -> Option<&mut DailyBlock> {
        self.blocks.iter_mut().find(|block| block.id == id)
    }
}
