//! Today's snapshot and the progress operations on it.
//!
//! Every call reconciles first, so the first operation after the logical
//! day rolls over sees a freshly generated snapshot.

use log::debug;

use super::{require_confirmation, Planner};
use crate::{
    display::DayOverview,
    error::{PlannerError, Result},
    models::{DailyBlock, DailySnapshot, RecurringBlock, TimeOfDay},
    params::{CompleteBlock, Confirm, CycleSubtask, Id, ToggleRepeatDay},
    progress,
};

fn block_not_found(id: &str) -> PlannerError {
    PlannerError::BlockNotFound { id: id.to_string() }
}

impl Planner {
    /// Today's snapshot, regenerated from the templates when the stored one
    /// belongs to another day.
    pub async fn today(&self) -> Result<DailySnapshot> {
        self.with_database(|db, now| db.today(now)).await
    }

    /// Today's snapshot split into visible and completed blocks, with
    /// timing relative to now.
    pub async fn day_overview(&self) -> Result<DayOverview> {
        self.with_database(|db, now| {
            let snapshot = db.today(now)?;
            let settings = db.settings()?;
            Ok(DayOverview::new(
                &snapshot,
                TimeOfDay::from(now.time()),
                settings.use_24_hour_format,
            ))
        })
        .await
    }

    /// Applies `op` to the block `id` of today's snapshot and returns the
    /// block afterwards.
    async fn update_block<F>(&self, id: String, op: F) -> Result<DailyBlock>
    where
        F: FnOnce(DailySnapshot, &str) -> DailySnapshot + Send + 'static,
    {
        self.with_database(move |db, now| {
            let snapshot = db.update_day(now, |snapshot| {
                if snapshot.block(&id).is_none() {
                    return Err(block_not_found(&id));
                }
                Ok(op(snapshot, &id))
            })?;
            snapshot.block(&id).cloned().ok_or_else(|| block_not_found(&id))
        })
        .await
    }

    /// Collapses or expands a block's sub-step list.
    pub async fn toggle_minimized(&self, params: &Id) -> Result<DailyBlock> {
        self.update_block(params.id.clone(), progress::toggle_minimized)
            .await
    }

    /// Advances a sub-step along `default → done → skipped → default`.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::BlockNotFound` for an unknown block and
    /// `PlannerError::InvalidInput` when the block has no such sub-step.
    pub async fn cycle_subtask(&self, params: &CycleSubtask) -> Result<DailyBlock> {
        let block_id = params.block_id.clone();
        let subtask_id = params.subtask_id.clone();

        self.with_database(move |db, now| {
            let snapshot = db.update_day(now, |snapshot| {
                let block = snapshot
                    .block(&block_id)
                    .ok_or_else(|| block_not_found(&block_id))?;
                if block.subtask(&subtask_id).is_none() {
                    return Err(PlannerError::invalid_input("subtask_id").with_reason(format!(
                        "Block {block_id} has no sub-step {subtask_id}"
                    )));
                }
                Ok(progress::cycle_subtask_state(snapshot, &block_id, &subtask_id))
            })?;
            snapshot
                .block(&block_id)
                .cloned()
                .ok_or_else(|| block_not_found(&block_id))
        })
        .await
    }

    /// Marks a block done, or skipped, for today.
    pub async fn complete_block(&self, params: &CompleteBlock) -> Result<DailyBlock> {
        let skipped = params.skipped;
        self.update_block(params.id.clone(), move |snapshot, id| {
            progress::complete_block(snapshot, id, skipped)
        })
        .await
    }

    /// Returns a completed block to the visible list, keeping its sub-step
    /// states.
    pub async fn restore_block(&self, params: &Id) -> Result<DailyBlock> {
        self.update_block(params.id.clone(), progress::restore_block)
            .await
    }

    /// Toggles one weekday in a template's recurrence set and mirrors the
    /// change into today's block.
    ///
    /// Returns `None` when no template has the given id.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` when `day` is outside `0..=6`.
    pub async fn toggle_repeat_day(&self, params: &ToggleRepeatDay) -> Result<Option<RecurringBlock>> {
        if params.day > 6 {
            return Err(PlannerError::invalid_input("day")
                .with_reason(format!("{} is not a weekday index, expected 0-6", params.day)));
        }
        let block_id = params.block_id.clone();
        let day = params.day;

        self.with_database(move |db, now| {
            let (templates, _) = db.update_templates_and_day(now, |templates, snapshot| {
                Ok(progress::toggle_recurrence_day(
                    templates, snapshot, &block_id, day,
                ))
            })?;
            Ok(templates.get(&block_id).cloned())
        })
        .await
    }

    /// Switches between showing every block and only those recurring today.
    pub async fn toggle_focus_mode(&self) -> Result<DailySnapshot> {
        self.with_database(|db, now| {
            let snapshot = db.update_day(now, |snapshot| Ok(progress::toggle_focus_mode(snapshot)))?;
            debug!("Focus mode now {}", snapshot.focus_mode);
            Ok(snapshot)
        })
        .await
    }

    /// Throws away today's progress and rebuilds the day from the templates.
    pub async fn reset_day(&self, params: &Confirm) -> Result<DailySnapshot> {
        require_confirmation(params.confirmed, "Resetting the day")?;
        self.with_database(|db, now| db.regenerate_day(now)).await
    }
}
