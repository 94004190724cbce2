//! Whole-store export and replacement.

use jiff::Zoned;
use log::info;

use super::{documents, task_queries};
use crate::{
    clock::logical_date,
    error::Result,
    models::{DailySnapshot, ExportBundle, MeetingDay, Settings, TemplateSet},
    reconcile::force_regenerate,
};

impl super::Database {
    /// Templates, ledger tasks, reminders and today's meetings in the
    /// backup format.
    pub fn export_bundle(&mut self, now: &Zoned) -> Result<ExportBundle> {
        self.in_transaction(|tx| {
            let settings = documents::settings(tx)?;
            let today = logical_date(now, settings.day_starts_at);
            Ok(ExportBundle {
                master_blocks: documents::templates(tx)?.blocks,
                kanban_tasks: task_queries::select_all_tasks(tx)?,
                reminders: documents::reminders(tx)?,
                meetings: documents::meetings(tx, today)?.items,
            })
        })
    }

    /// Replaces the template store, the ledger, the reminders and today's
    /// meetings with `contents`, restores default settings and regenerates
    /// today from the new templates. Nothing is merged with the previous
    /// contents.
    pub fn replace_all(&mut self, now: &Zoned, contents: ExportBundle) -> Result<DailySnapshot> {
        self.in_transaction(|tx| {
            let settings = Settings::default();
            let today = logical_date(now, settings.day_starts_at);
            let templates = TemplateSet::new(contents.master_blocks);
            let meetings = MeetingDay::with_items(today, contents.meetings);

            documents::save_templates(tx, &templates)?;
            documents::save_settings(tx, &settings)?;
            documents::save_reminders(tx, &contents.reminders)?;
            documents::save_meetings(tx, &meetings)?;
            task_queries::replace_all_tasks(tx, &contents.kanban_tasks)?;

            let snapshot = force_regenerate(&templates, today);
            documents::save_snapshot(tx, &snapshot)?;
            info!(
                "Replaced store with {} templates, {} tasks, {} reminders and {} meetings",
                templates.len(),
                contents.kanban_tasks.len(),
                contents.reminders.len(),
                meetings.len()
            );
            Ok(snapshot)
        })
    }
}
