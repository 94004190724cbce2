//! Parameter structures for TouchTask operations.
//!
//! Every [`Planner`](crate::Planner) operation takes one of these structs.
//! They carry no framework derives beyond serde, so the CLI defines its own
//! clap argument types and converts them with `From` impls:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │    Planner      │
//! │  (clap derives) │───▶│ (serde derives) │───▶│   operations    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Operations that discard data carry a `confirmed` flag. The planner
//! rejects them with `PlannerError::InvalidInput` unless it is set.

use serde::{Deserialize, Serialize};

use crate::models::{Column, ExportBundle, Priority, TimeOfDay, WeekdayIndex};

/// Generic parameters for operations requiring just an ID.
///
/// Used for block operations (minimize, restore) as well as template, task,
/// reminder and meeting deletion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the block, template or task to operate on
    pub id: String,
}

/// Parameters for operations that discard data and need confirmation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Confirm {
    /// Must be true for the operation to run
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for marking one of today's blocks as finished.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteBlock {
    pub id: String,
    /// Record the block as skipped rather than done
    #[serde(default)]
    pub skipped: bool,
}

/// Parameters for advancing a sub-step's tri-state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CycleSubtask {
    pub block_id: String,
    pub subtask_id: String,
}

/// Parameters for toggling one weekday in a block's recurrence set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToggleRepeatDay {
    pub block_id: String,
    /// Weekday index, 0 = Sunday
    pub day: WeekdayIndex,
}

/// A sub-step as supplied by the user when creating or editing a template.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubtaskInput {
    /// Existing id to keep today's progress across the edit; a new id is
    /// generated when absent
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub duration_minutes: u32,
    #[serde(default)]
    pub optional: bool,
}

/// Parameters for creating a recurring block template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTemplate {
    pub title: String,
    pub description: Option<String>,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Weekday indices the block recurs on
    #[serde(default)]
    pub repeat_days: Vec<WeekdayIndex>,
    #[serde(default)]
    pub subtasks: Vec<SubtaskInput>,
}

/// Parameters for editing a template. Fields left as `None` keep their
/// current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditTemplate {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub repeat_days: Option<Vec<WeekdayIndex>>,
    /// Full replacement list of sub-steps
    pub subtasks: Option<Vec<SubtaskInput>>,
}

/// Parameters for adding a task to the ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub column: Column,
    /// Minutes already spent, for tasks tracked elsewhere
    #[serde(default)]
    pub time_logged_minutes: u32,
}

/// Parameters for editing a ledger task. This is the only way logged time
/// can decrease.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub id: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub time_logged_minutes: Option<u32>,
}

/// Parameters for moving a task to another board column.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveTask {
    pub id: String,
    pub column: Column,
}

/// Parameters for adding a reminder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateReminder {
    pub text: String,
}

/// Parameters for adding a meeting to today's agenda.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateMeeting {
    pub time: TimeOfDay,
    pub title: String,
    pub description: Option<String>,
}

/// Parameters for editing one of today's meetings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditMeeting {
    pub id: String,
    pub time: Option<TimeOfDay>,
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Parameters for restoring a backup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportData {
    pub bundle: ExportBundle,
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for activating a timer preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectPreset {
    /// Zero-based position in the preset list
    pub index: usize,
}

/// Parameters for changing a timer preset's durations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditPreset {
    pub index: usize,
    pub work_minutes: u32,
    pub break_minutes: u32,
}

/// Parameters for changing user settings. Fields left as `None` keep their
/// current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSettings {
    pub day_starts_at: Option<TimeOfDay>,
    pub use_24_hour_format: Option<bool>,
    pub bell_enabled: Option<bool>,
}
