//! Markdown presentation of planner data.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds wrappers for contexts that need more than one model or
//! extra framing:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (blocks, tasks) │───▶│ Result Types    │───▶│    Output       │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: [`DayOverview`], [`TaskBoard`], [`Templates`], [`Reminders`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: timestamps, durations, countdowns and clock times
//!
//! # Examples
//!
//! ```rust
//! use touchtask_core::display::{Countdown, Minutes, OperationStatus};
//!
//! assert_eq!(Minutes(90).to_string(), "1h30m");
//! assert_eq!(Countdown(1410).to_string(), "23:30");
//!
//! let status = OperationStatus::success("Day reset");
//! assert_eq!(status.to_string(), "Success: Day reset\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{DayOverview, Reminders, TaskBoard, Templates};
pub use datetime::{ClockTime, Countdown, LocalDateTime, Minutes};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
