//! Core library for the TouchTask daily planner.
//!
//! TouchTask keeps a set of recurring time blocks (routines with sub-steps),
//! derives a mutable "today" plan from them, tracks ad-hoc work on a kanban
//! ledger and runs work/break focus timers that credit time to ledger tasks.
//! Free-standing reminders and a meeting list for the current day sit
//! alongside the plan.
//!
//! - [`reconcile`] derives today's snapshot from the templates and mirrors
//!   template edits into it without losing progress.
//! - [`progress`] holds the per-day transitions (sub-step cycling, block
//!   completion) and the visible/completed views.
//! - [`timer`] is the focus timer state machine and its tokio driver.
//! - [`db`] persists everything in one SQLite file; [`planner`] wraps it in
//!   an async API.
//! - [`display`] renders models as markdown for the terminal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use touchtask_core::{params::CreateTask, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("touchtask.db"))
//!     .build()
//!     .await?;
//!
//! // Today's plan, generated from the templates on first use
//! println!("{}", planner.day_overview().await?);
//!
//! let task = planner
//!     .create_task(&CreateTask {
//!         title: "Write the quarterly report".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{task}");
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod db;
pub mod defaults;
pub mod display;
pub mod error;
pub mod ids;
pub mod models;
pub mod params;
pub mod planner;
pub mod progress;
pub mod reconcile;
pub mod timer;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export commonly used types
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::Database;
pub use display::{
    CreateResult, DayOverview, DeleteResult, OperationStatus, Reminders, TaskBoard, Templates,
    UpdateResult,
};
pub use error::{PlannerError, Result};
pub use models::{
    Column, DailyBlock, DailySnapshot, ExportBundle, LedgerTask, Meeting, MeetingDay, Preset,
    Priority, RecurringBlock, Reminder, Settings, SubtaskState, TemplateSet, TimeOfDay,
};
pub use planner::{Planner, PlannerBuilder};
pub use timer::{Phase, PhaseNotifier, TaskLedger, Timer, TimerDriver, TimerState, TimerStatus};
