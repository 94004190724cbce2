//! Daily reconciliation: deriving today's snapshot from the template store.
//!
//! All functions here are pure. They take the previous value by ownership
//! and return the next one, so the caller decides when the result is
//! committed.
//!
//! ```text
//! ┌──────────────┐   reconcile    ┌────────────────┐
//! │ TemplateSet  │───────────────▶│ DailySnapshot  │
//! │ (durable)    │  apply_edit/…  │ (today only)   │
//! └──────────────┘───────────────▶└────────────────┘
//! ```
//!
//! A snapshot dated today is reused untouched; any other snapshot is
//! replaced by a fresh copy of the templates, keeping only `focus_mode`.

use jiff::civil::Date;
use log::debug;

use crate::models::{DailyBlock, DailySnapshot, RecurringBlock, TemplateSet};

/// Whether `previous` must be rebuilt to represent `today`.
pub fn needs_regeneration(previous: Option<&DailySnapshot>, today: Date) -> bool {
    previous.map_or(true, |snapshot| snapshot.date != today)
}

/// Produces the canonical snapshot for `today`.
///
/// A previous snapshot for the same date is returned unchanged so progress
/// survives restarts. Otherwise a fresh snapshot is built from every
/// template; only the previous `focus_mode` is carried over.
pub fn reconcile(
    templates: &TemplateSet,
    previous: Option<DailySnapshot>,
    today: Date,
) -> DailySnapshot {
    match previous {
        Some(snapshot) if snapshot.date == today => snapshot,
        Some(snapshot) => {
            debug!(
                "Day rolled over from {} to {today}, regenerating {} blocks",
                snapshot.date,
                templates.len()
            );
            fresh_snapshot(templates, snapshot.focus_mode, today)
        }
        None => {
            debug!("No stored day, generating {} blocks for {today}", templates.len());
            fresh_snapshot(templates, DailySnapshot::DEFAULT_FOCUS_MODE, today)
        }
    }
}

/// Discards all of today's progress and rebuilds from the templates, as if
/// no snapshot had ever been stored.
pub fn force_regenerate(templates: &TemplateSet, today: Date) -> DailySnapshot {
    fresh_snapshot(templates, DailySnapshot::DEFAULT_FOCUS_MODE, today)
}

fn fresh_snapshot(templates: &TemplateSet, focus_mode: bool, today: Date) -> DailySnapshot {
    DailySnapshot {
        date: today,
        focus_mode,
        blocks: templates.blocks.iter().map(DailyBlock::from_template).collect(),
        completed_block_ids: Vec::new(),
    }
}

/// Mirrors an edited template into today's block with the same id,
/// preserving the state of every sub-step whose id survived the edit.
pub fn apply_template_edit(mut snapshot: DailySnapshot, template: &RecurringBlock) -> DailySnapshot {
    snapshot.blocks = snapshot
        .blocks
        .into_iter()
        .map(|block| {
            if block.id == template.id {
                block.merged_with(template)
            } else {
                block
            }
        })
        .collect();
    snapshot
}

/// Mirrors a newly created template by appending a fresh daily block.
///
/// If a block with that id is already present it is merged instead, so ids
/// stay unique within the snapshot.
pub fn apply_template_create(mut snapshot: DailySnapshot, template: &RecurringBlock) -> DailySnapshot {
    if snapshot.block(&template.id).is_some() {
        return apply_template_edit(snapshot, template);
    }
    snapshot.blocks.push(DailyBlock::from_template(template));
    snapshot
}

/// Mirrors a template deletion: the daily block goes away and its id is
/// purged from the completed list.
pub fn apply_template_delete(mut snapshot: DailySnapshot, template_id: &str) -> DailySnapshot {
    snapshot.blocks.retain(|block| block.id != template_id);
    snapshot.completed_block_ids.retain(|id| id != template_id);
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixtures::{template, templates, thursday, wednesday},
        models::SubtaskState,
        progress,
    };

    fn sample_templates() -> TemplateSet {
        templates(vec![
            template("b1", "08:00", &[1, 2, 3, 4, 5], &["s1", "s2"]),
            template("b2", "06:00", &[0], &["s3"]),
        ])
    }

    #[test]
    fn test_reconcile_without_previous_copies_every_template() {
        let snapshot = reconcile(&sample_templates(), None, wednesday());
        assert_eq!(snapshot.date, wednesday());
        assert!(snapshot.focus_mode);
        assert_eq!(snapshot.blocks.len(), 2);
        assert!(snapshot.completed_block_ids.is_empty());
        assert!(snapshot.blocks.iter().all(|b| !b.completed && !b.minimized));
    }

    #[test]
    fn test_reconcile_same_day_is_idempotent() {
        let templates = sample_templates();
        let first = reconcile(&templates, None, wednesday());
        let second = reconcile(&templates, Some(first.clone()), wednesday());
        let third = reconcile(&templates, Some(second.clone()), wednesday());
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_reconcile_same_day_keeps_progress_even_if_templates_changed() {
        let snapshot = reconcile(&sample_templates(), None, wednesday());
        let snapshot = progress::cycle_subtask_state(snapshot, "b1", "s1");
        let snapshot = progress::complete_block(snapshot, "b2", false);

        let reloaded = reconcile(&TemplateSet::default(), Some(snapshot.clone()), wednesday());
        assert_eq!(reloaded, snapshot);
    }

    #[test]
    fn test_reconcile_rollover_resets_progress_but_keeps_focus_mode() {
        let templates = sample_templates();
        let mut snapshot = reconcile(&templates, None, wednesday());
        snapshot.focus_mode = false;
        let snapshot = progress::cycle_subtask_state(snapshot, "b1", "s1");
        let snapshot = progress::toggle_minimized(snapshot, "b1");
        let snapshot = progress::complete_block(snapshot, "b1", true);

        let next = reconcile(&templates, Some(snapshot), thursday());
        assert_eq!(next.date, thursday());
        assert!(!next.focus_mode);
        assert!(next.completed_block_ids.is_empty());
        for block in &next.blocks {
            assert!(!block.completed && !block.skipped && !block.minimized);
            assert!(block.subtasks.iter().all(|st| st.state == SubtaskState::Default));
        }
    }

    #[test]
    fn test_force_regenerate_ignores_date_and_resets_focus() {
        let templates = sample_templates();
        let mut snapshot = reconcile(&templates, None, wednesday());
        snapshot.focus_mode = false;
        let snapshot = progress::complete_block(snapshot, "b1", false);

        let reset = force_regenerate(&templates, snapshot.date);
        assert_eq!(reset.date, wednesday());
        assert!(reset.focus_mode);
        assert!(reset.completed_block_ids.is_empty());
        assert!(reset.blocks.iter().all(|b| !b.completed));
    }

    #[test]
    fn test_template_edit_preserves_subtask_progress() {
        let templates = sample_templates();
        let snapshot = reconcile(&templates, None, wednesday());
        let snapshot = progress::cycle_subtask_state(snapshot, "b1", "s1");

        let mut edited = templates.get("b1").cloned().expect("b1 exists");
        edited.title = "Deep Work".to_string();
        edited.description = "New description".to_string();

        let snapshot = apply_template_edit(snapshot, &edited);
        let block = snapshot.block("b1").expect("b1 in snapshot");
        assert_eq!(block.title, "Deep Work");
        assert_eq!(block.subtask("s1").map(|st| st.state), Some(SubtaskState::Done));
    }

    #[test]
    fn test_template_edit_adds_and_drops_subtasks() {
        let templates = sample_templates();
        let snapshot = reconcile(&templates, None, wednesday());
        let snapshot = progress::cycle_subtask_state(snapshot, "b1", "s2");

        let edited = template("b1", "08:00", &[1, 2, 3, 4, 5], &["s2", "s9"]);
        let snapshot = apply_template_edit(snapshot, &edited);
        let block = snapshot.block("b1").expect("b1 in snapshot");
        let ids: Vec<_> = block.subtasks.iter().map(|st| st.id.as_str()).collect();
        assert_eq!(ids, vec!["s2", "s9"]);
        assert_eq!(block.subtasks[0].state, SubtaskState::Done);
        assert_eq!(block.subtasks[1].state, SubtaskState::Default);
    }

    #[test]
    fn test_template_edit_leaves_other_blocks_alone() {
        let templates = sample_templates();
        let snapshot = reconcile(&templates, None, wednesday());
        let snapshot = progress::cycle_subtask_state(snapshot, "b2", "s3");
        let before = snapshot.block("b2").cloned();

        let edited = template("b1", "10:00", &[1], &[]);
        let snapshot = apply_template_edit(snapshot, &edited);
        assert_eq!(snapshot.block("b2").cloned(), before);
    }

    #[test]
    fn test_template_create_appends_fresh_block() {
        let snapshot = reconcile(&sample_templates(), None, wednesday());
        let snapshot = apply_template_create(snapshot, &template("b3", "12:00", &[3], &["s4"]));
        assert_eq!(snapshot.blocks.len(), 3);
        let block = snapshot.block("b3").expect("b3 appended");
        assert!(!block.completed);
        assert_eq!(block.subtasks[0].state, SubtaskState::Default);

        let snapshot = apply_template_create(snapshot, &template("b3", "13:00", &[3], &["s4"]));
        assert_eq!(snapshot.blocks.len(), 3);
    }

    #[test]
    fn test_template_delete_purges_block_and_completion() {
        let snapshot = reconcile(&sample_templates(), None, wednesday());
        let snapshot = progress::complete_block(snapshot, "b1", false);
        let snapshot = apply_template_delete(snapshot, "b1");
        assert!(snapshot.block("b1").is_none());
        assert!(snapshot.completed_block_ids.is_empty());

        let unchanged = apply_template_delete(snapshot.clone(), "missing");
        assert_eq!(unchanged, snapshot);
    }

    #[test]
    fn test_needs_regeneration() {
        let snapshot = reconcile(&sample_templates(), None, wednesday());
        assert!(needs_regeneration(None, wednesday()));
        assert!(!needs_regeneration(Some(&snapshot), wednesday()));
        assert!(needs_regeneration(Some(&snapshot), thursday()));
    }
}
