//! High-level planner API for the day plan, templates, the task ledger and
//! the focus timer.
//!
//! The [`Planner`] is the central coordinator between the application
//! layers and the database. Each operation opens the database on a blocking
//! thread, runs one transaction and returns owned models:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Params      │    │   Operations    │    │    Database     │
//! │  (params.rs)    │───▶│ (day_ops, ...)  │───▶│   (via db/)     │
//! │                 │    │  pure transforms│    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!     User Interface      Business Logic         Data Persistence
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`day_ops`]: Today's snapshot, block and sub-step progress
//! - [`template_ops`]: Recurring block templates
//! - [`task_ops`]: The kanban task ledger
//! - [`agenda_ops`]: Reminders and today's meetings
//! - [`data_ops`]: Export, import, demo data and wiping the store
//! - [`settings_ops`]: User settings and timer presets
//! - [`timer_ops`]: Timers wired to the ledger
//!
//! # Examples
//!
//! ```rust,no_run
//! use touchtask_core::{params::CompleteBlock, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path(Some("/tmp/touchtask.db"))
//!     .build()
//!     .await?;
//!
//! let today = planner.today().await?;
//! if let Some(block) = today.blocks.first() {
//!     planner
//!         .complete_block(&CompleteBlock {
//!             id: block.id.clone(),
//!             skipped: false,
//!         })
//!         .await?;
//! }
//! println!("{}", planner.day_overview().await?);
//! # Ok(())
//! # }
//! ```

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use jiff::Zoned;
use tokio::task;

use crate::{
    clock::Clock,
    db::Database,
    error::{PlannerError, Result},
};

pub mod agenda_ops;
pub mod builder;
pub mod data_ops;
pub mod day_ops;
pub mod settings_ops;
pub mod task_ops;
pub mod template_ops;
pub mod timer_ops;


pub use builder::PlannerBuilder;

/// Main planner interface.
pub struct Planner {
    pub(crate) db_path: PathBuf,
    pub(crate) clock: Arc<dyn Clock>,
}

impl Planner {
    pub(crate) fn new(db_path: PathBuf, clock: Arc<dyn Clock>) -> Self {
        Self { db_path, clock }
    }

    /// Location of the SQLite file backing this planner.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// The current wall-clock time according to the configured clock.
    pub fn now(&self) -> Zoned {
        self.clock.now()
    }

    /// Opens the database on a blocking thread and runs `f` with it and the
    /// current time.
    pub(crate) async fn with_database<R, F>(&self, f: F) -> Result<R>
    where
        R: Send + 'static,
        F: FnOnce(&mut Database, &Zoned) -> Result<R> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let now = self.clock.now();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db, &now)
        })
        .await
        .map_err(PlannerError::join)?
    }
}

/// Fails with `InvalidInput` unless a destructive operation was confirmed.
pub(crate) fn require_confirmation(confirmed: bool, action: &str) -> Result<()> {
    if confirmed {
        Ok(())
    } else {
        Err(PlannerError::unconfirmed(action))
    }
}

/// Trims `value` and rejects it when nothing is left.
pub(crate) fn non_empty(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(PlannerError::invalid_input(field).with_reason("must not be empty"));
    }
    Ok(trimmed.to_string())
}
