//! Whole-store operations: backup export and restore, demo data and wiping
//! everything.
//!
//! Restores never merge. The template store, the ledger, the reminders and
//! today's meetings are replaced, settings go back to their defaults and
//! today is regenerated from the new templates.

use std::collections::HashSet;

use super::{require_confirmation, Planner};
use crate::{
    defaults::{default_tasks, default_templates, demo_meetings, demo_reminders},
    error::{PlannerError, Result},
    models::{DailySnapshot, ExportBundle, RecurringBlock},
    params::{Confirm, ImportData},
};

/// Rejects bundles with empty or repeated ids, which would leave entries
/// unaddressable.
fn validate_bundle(bundle: &ExportBundle) -> Result<()> {
    fn check<'a>(field: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
        let mut seen = HashSet::new();
        for id in ids {
            if id.trim().is_empty() {
                return Err(PlannerError::invalid_input(field).with_reason("contains an empty id"));
            }
            if !seen.insert(id) {
                return Err(PlannerError::invalid_input(field)
                    .with_reason(format!("contains id {id} more than once")));
            }
        }
        Ok(())
    }

    check(
        "masterBlocks",
        bundle.master_blocks.iter().map(|block| block.id.as_str()),
    )?;
    check(
        "kanbanTasks",
        bundle.kanban_tasks.iter().map(|task| task.id.as_str()),
    )?;
    check(
        "reminders",
        bundle.reminders.iter().map(|reminder| reminder.id.as_str()),
    )?;
    check(
        "meetings",
        bundle.meetings.iter().map(|meeting| meeting.id.as_str()),
    )
}

impl Planner {
    /// Templates, ledger tasks, reminders and today's meetings in the backup
    /// format.
    pub async fn export_data(&self) -> Result<ExportBundle> {
        self.with_database(|db, now| db.export_bundle(now)).await
    }

    /// Replaces all stored data with the bundle's contents. Block durations
    /// are recomputed from their time windows, and the meetings are placed on
    /// the current day.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` when not confirmed or when the
    /// bundle repeats an id.
    pub async fn import_data(&self, params: &ImportData) -> Result<DailySnapshot> {
        require_confirmation(params.confirmed, "Importing data")?;
        validate_bundle(&params.bundle)?;
        let mut bundle = params.bundle.clone();
        bundle.master_blocks = bundle
            .master_blocks
            .into_iter()
            .map(RecurringBlock::with_derived_duration)
            .collect();

        self.with_database(move |db, now| db.replace_all(now, bundle))
            .await
    }

    /// Replaces everything with the starter routine, sample tasks, reminders
    /// and a meeting today.
    pub async fn load_demo(&self, params: &Confirm) -> Result<DailySnapshot> {
        require_confirmation(params.confirmed, "Loading demo data")?;
        self.with_database(|db, now| {
            let demo = ExportBundle {
                master_blocks: default_templates().blocks,
                kanban_tasks: default_tasks(now.timestamp()),
                reminders: demo_reminders(),
                meetings: demo_meetings(),
            };
            db.replace_all(now, demo)
        })
        .await
    }

    /// Deletes every template, task, reminder and meeting, leaving an empty
    /// day.
    pub async fn clear_all_data(&self, params: &Confirm) -> Result<DailySnapshot> {
        require_confirmation(params.confirmed, "Clearing all data")?;
        self.with_database(|db, now| db.replace_all(now, ExportBundle::default()))
            .await
    }
}
