//! Template store operations. Each change is mirrored into today's snapshot
//! in the same transaction.

use log::info;

use super::{non_empty, Planner};
use crate::{
    display::{Templates, UpdateResult},
    error::{PlannerError, Result},
    ids::generate_id,
    models::{Recurrence, RecurringBlock, Subtask, WeekdayIndex},
    params::{CreateTemplate, EditTemplate, Id, SubtaskInput},
    reconcile,
};

fn recurrence_from(days: &[WeekdayIndex]) -> Result<Recurrence> {
    Recurrence::from_days(days.iter().copied())
        .map_err(|reason| PlannerError::invalid_input("repeat_days").with_reason(reason))
}

fn subtasks_from(inputs: &[SubtaskInput]) -> Result<Vec<Subtask>> {
    inputs
        .iter()
        .map(|input| {
            Ok(Subtask {
                id: input
                    .id
                    .clone()
                    .filter(|id| !id.trim().is_empty())
                    .unwrap_or_else(generate_id),
                title: non_empty("subtasks.title", &input.title)?,
                duration_minutes: input.duration_minutes,
                optional: input.optional,
            })
        })
        .collect()
}

fn template_not_found(id: &str) -> PlannerError {
    PlannerError::TemplateNotFound { id: id.to_string() }
}

/// Applies the set fields of `params` to `template`, returning a description
/// of each change.
fn apply_edit(template: &mut RecurringBlock, params: &EditTemplate) -> Result<Vec<String>> {
    let mut changes = Vec::new();

    if let Some(title) = &params.title {
        template.title = non_empty("title", title)?;
        changes.push("Updated title".to_string());
    }
    if let Some(description) = &params.description {
        template.description = description.clone();
        changes.push("Updated description".to_string());
    }
    if let Some(start_time) = params.start_time {
        template.start_time = start_time;
        changes.push(format!("Start time set to {start_time}"));
    }
    if let Some(end_time) = params.end_time {
        template.end_time = end_time;
        changes.push(format!("End time set to {end_time}"));
    }
    if let Some(category) = &params.category {
        template.category = category.clone();
        changes.push("Updated category".to_string());
    }
    if let Some(tags) = &params.tags {
        template.tags = tags.clone();
        changes.push("Updated tags".to_string());
    }
    if let Some(days) = &params.repeat_days {
        template.recurrence = recurrence_from(days)?;
        changes.push(format!("Repeats on {}", template.recurrence));
    }
    if let Some(subtasks) = &params.subtasks {
        template.subtasks = subtasks_from(subtasks)?;
        changes.push(format!("Replaced sub-steps ({})", template.subtasks.len()));
    }

    template.duration_minutes = template.window_minutes();
    Ok(changes)
}

impl Planner {
    /// Every template, earliest start first.
    pub async fn list_templates(&self) -> Result<Templates> {
        self.with_database(|db, _| {
            let mut blocks = db.templates()?.blocks;
            blocks.sort_by_key(|block| block.start_time);
            Ok(Templates(blocks))
        })
        .await
    }

    pub async fn get_template(&self, params: &Id) -> Result<Option<RecurringBlock>> {
        let id = params.id.clone();
        self.with_database(move |db, _| Ok(db.templates()?.get(&id).cloned()))
            .await
    }

    /// Adds a template and a matching fresh block to today's plan.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for an empty title or sub-step
    /// title, or a weekday index outside `0..=6`.
    pub async fn create_template(&self, params: &CreateTemplate) -> Result<RecurringBlock> {
        let template = RecurringBlock {
            id: generate_id(),
            title: non_empty("title", &params.title)?,
            description: params.description.clone().unwrap_or_default(),
            start_time: params.start_time,
            end_time: params.end_time,
            duration_minutes: params.start_time.minutes_until(params.end_time),
            category: params.category.clone().unwrap_or_default(),
            tags: params.tags.clone(),
            recurrence: recurrence_from(&params.repeat_days)?,
            subtasks: subtasks_from(&params.subtasks)?,
        };

        self.with_database(move |db, now| {
            db.update_templates_and_day(now, |mut templates, snapshot| {
                templates.blocks.push(template.clone());
                let snapshot = reconcile::apply_template_create(snapshot, &template);
                Ok((templates, snapshot))
            })?;
            info!("Created block {} ({})", template.title, template.id);
            Ok(template)
        })
        .await
    }

    /// Edits a template and merges the result into today's block, keeping
    /// the state of every sub-step whose id survives.
    pub async fn edit_template(&self, params: &EditTemplate) -> Result<UpdateResult<RecurringBlock>> {
        let params = params.clone();

        self.with_database(move |db, now| {
            let mut result = None;
            db.update_templates_and_day(now, |mut templates, snapshot| {
                let template = templates
                    .get_mut(&params.id)
                    .ok_or_else(|| template_not_found(&params.id))?;
                let changes = apply_edit(template, &params)?;
                let template = template.clone();
                let snapshot = reconcile::apply_template_edit(snapshot, &template);
                result = Some(UpdateResult::with_changes(template, changes));
                Ok((templates, snapshot))
            })?;
            result.ok_or_else(|| template_not_found(&params.id))
        })
        .await
    }

    /// Removes a template and its block from today's plan.
    pub async fn delete_template(&self, params: &Id) -> Result<RecurringBlock> {
        let id = params.id.clone();

        self.with_database(move |db, now| {
            let mut removed = None;
            db.update_templates_and_day(now, |mut templates, snapshot| {
                let index = templates
                    .blocks
                    .iter()
                    .position(|block| block.id == id)
                    .ok_or_else(|| template_not_found(&id))?;
                removed = Some(templates.blocks.remove(index));
                Ok((templates, reconcile::apply_template_delete(snapshot, &id)))
            })?;
            let removed = removed.ok_or_else(|| template_not_found(&id))?;
            info!("Deleted block {} ({})", removed.title, removed.id);
            Ok(removed)
        })
        .await
    }
}
