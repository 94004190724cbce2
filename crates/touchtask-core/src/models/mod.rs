//! Data models for templates, today's blocks, the task ledger and timer
//! presets.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation out of the data
//! definitions.
//!
//! # Templates and Daily Blocks
//!
//! A [`RecurringBlock`] is the durable definition the user edits. Each day a
//! [`DailyBlock`] is copied from it, sharing its id, and accumulates the
//! day's progress (completion, minimization, and a [`SubtaskState`] per
//! sub-step). The [`DailySnapshot`] groups today's blocks with the date they
//! belong to and the focus-mode flag.
//!
//! # Ledger
//!
//! [`LedgerTask`] entries form the kanban board. Their
//! `time_logged_minutes` counter is fed by the focus timer.
//!
//! # Agenda
//!
//! [`Reminder`]s persist until deleted. [`Meeting`]s belong to a
//! [`MeetingDay`] and are dropped when the logical day changes.
//!
//! # Examples
//!
//! ```rust
//! use touchtask_core::models::{DailyBlock, Recurrence, RecurringBlock, SubtaskState, TimeOfDay};
//!
//! let template = RecurringBlock {
//!     id: "b1".to_string(),
//!     title: "Morning Primer".to_string(),
//!     description: String::new(),
//!     start_time: "06:00".parse::<TimeOfDay>().unwrap(),
//!     end_time: "06:20".parse::<TimeOfDay>().unwrap(),
//!     duration_minutes: 20,
//!     category: "habit".to_string(),
//!     tags: vec![],
//!     recurrence: Recurrence::weekdays(),
//!     subtasks: vec![],
//! };
//!
//! let today = DailyBlock::from_template(&template);
//! assert!(!today.completed);
//! assert_eq!(today.id, template.id);
//! assert_eq!(SubtaskState::Default.next(), SubtaskState::Done);
//! ```

pub mod agenda;
pub mod bundle;
pub mod daily;
pub mod preset;
pub mod recurrence;
pub mod settings;
pub mod status;
pub mod task;
pub mod template;
pub mod time;

#[cfg(test)]
mod tests;

pub use agenda::{Meeting, MeetingDay, Reminder};
pub use bundle::ExportBundle;
pub use daily::{DailyBlock, DailySnapshot, DailySubtask};
pub use preset::{Preset, PresetList};
pub use recurrence::{weekday_index, Recurrence, WeekdayIndex, DAY_LABELS};
pub use settings::Settings;
pub use status::{Column, Priority, SubtaskState};
pub use task::{board_order, LedgerTask};
pub use template::{RecurringBlock, Subtask, TemplateSet};
pub use time::TimeOfDay;
