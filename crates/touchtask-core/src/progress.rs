//! Per-day progress transitions and derived views over a [`DailySnapshot`].
//!
//! Every mutation takes the snapshot by value and returns the next one.
//! Addressing a block or sub-step that does not exist returns the snapshot
//! unchanged.

use log::debug;

use crate::models::{
    DailyBlock, DailySnapshot, Recurrence, TemplateSet, TimeOfDay, WeekdayIndex,
};

/// Flips the collapsed state of one block.
pub fn toggle_minimized(mut snapshot: DailySnapshot, block_id: &str) -> DailySnapshot {
    if let Some(block) = snapshot.block_mut(block_id) {
        block.minimized = !block.minimized;
    }
    snapshot
}

/// Advances one sub-step along `default → done → skipped → default`.
pub fn cycle_subtask_state(
    mut snapshot: DailySnapshot,
    block_id: &str,
    subtask_id: &str,
) -> DailySnapshot {
    let subtask = snapshot
        .block_mut(block_id)
        .and_then(|block| block.subtasks.iter_mut().find(|st| st.id == subtask_id));
    if let Some(subtask) = subtask {
        subtask.state = subtask.state.next();
    }
    snapshot
}

/// Marks a block completed (or skipped) and records it in the completed
/// list.
///
/// Completing an already completed block appends a duplicate id; the block
/// is hidden from the visible list either way.
pub fn complete_block(mut snapshot: DailySnapshot, block_id: &str, skipped: bool) -> DailySnapshot {
    let Some(block) = snapshot.block_mut(block_id) else {
        debug!("Ignoring completion of unknown block {block_id}");
        return snapshot;
    };
    block.completed = true;
    block.skipped = skipped;
    snapshot.completed_block_ids.push(block_id.to_string());
    snapshot
}

/// Undoes [`complete_block`]. Sub-step states are left as they were.
pub fn restore_block(mut snapshot: DailySnapshot, block_id: &str) -> DailySnapshot {
    if let Some(block) = snapshot.block_mut(block_id) {
        block.completed = false;
        block.skipped = false;
    }
    snapshot.completed_block_ids.retain(|id| id != block_id);
    snapshot
}

/// Toggles one recurrence day on a template and mirrors the template's new
/// set into today's block.
///
/// Both values are returned so the caller can commit them together. An
/// unknown template id or a day outside `0..=6` changes nothing.
pub fn toggle_recurrence_day(
    mut templates: TemplateSet,
    mut snapshot: DailySnapshot,
    block_id: &str,
    day: WeekdayIndex,
) -> (TemplateSet, DailySnapshot) {
    let Some(template) = templates.get_mut(block_id) else {
        debug!("Ignoring recurrence toggle on unknown template {block_id}");
        return (templates, snapshot);
    };
    template.recurrence = template.recurrence.toggled(day);
    let recurrence = template.recurrence;

    if let Some(block) = snapshot.block_mut(block_id) {
        block.recurrence = recurrence;
    }
    (templates, snapshot)
}

pub fn toggle_focus_mode(mut snapshot: DailySnapshot) -> DailySnapshot {
    snapshot.focus_mode = !snapshot.focus_mode;
    snapshot
}

fn passes_focus_filter(focus_mode: bool, recurrence: Recurrence, weekday: WeekdayIndex) -> bool {
    !focus_mode || recurrence.contains(weekday)
}

/// Blocks still to do today, earliest start first.
///
/// With focus mode on, only blocks recurring on `weekday` are included.
pub fn visible_blocks(snapshot: &DailySnapshot, weekday: WeekdayIndex) -> Vec<&DailyBlock> {
    let mut blocks: Vec<_> = snapshot
        .blocks
        .iter()
        .filter(|block| !block.completed)
        .filter(|block| passes_focus_filter(snapshot.focus_mode, block.recurrence, weekday))
        .collect();
    blocks.sort_by_key(|block| block.start_time);
    blocks
}

/// Blocks completed or skipped today, earliest start first, regardless of
/// focus mode.
pub fn completed_blocks(snapshot: &DailySnapshot) -> Vec<&DailyBlock> {
    let mut blocks: Vec<_> = snapshot
        .blocks
        .iter()
        .filter(|block| block.completed)
        .collect();
    blocks.sort_by_key(|block| block.start_time);
    blocks
}

/// Number of blocks scheduled for today under the focus filter, completed
/// or not.
pub fn total_today(snapshot: &DailySnapshot, weekday: WeekdayIndex) -> usize {
    snapshot
        .blocks
        .iter()
        .filter(|block| passes_focus_filter(snapshot.focus_mode, block.recurrence, weekday))
        .count()
}

/// Share of a block's sub-steps marked done, rounded to a whole percent.
/// Blocks without sub-steps report 0.
pub fn progress_percent(block: &DailyBlock) -> u8 {
    let total = block.subtasks.len();
    if total == 0 {
        return 0;
    }
    let done = block.done_count();
    ((done as f64 / total as f64) * 100.0).round() as u8
}

/// Display band for a progress percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    /// 0 to 20
    Red,
    /// 21 to 40
    Orange,
    /// 41 to 60
    Yellow,
    /// Above 60
    Green,
}

impl ProgressBand {
    pub fn from_percent(percent: u8) -> Self {
        match percent {
            0..=20 => ProgressBand::Red,
            21..=40 => ProgressBand::Orange,
            41..=60 => ProgressBand::Yellow,
            _ => ProgressBand::Green,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressBand::Red => "red",
            ProgressBand::Orange => "orange",
            ProgressBand::Yellow => "yellow",
            ProgressBand::Green => "green",
        }
    }
}

/// Where the current time falls relative to a block's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTiming {
    Upcoming,
    Active,
    Behind,
}

impl BlockTiming {
    /// Classifies `now` against the block's window. Windows that wrap past
    /// midnight are active from the start time until the end time the next
    /// morning.
    pub fn of(block: &DailyBlock, now: TimeOfDay) -> Self {
        let (start, end) = (block.start_time, block.end_time);
        if start <= end {
            if now < start {
                BlockTiming::Upcoming
            } else if now <= end {
                BlockTiming::Active
            } else {
                BlockTiming::Behind
            }
        } else if now >= start || now <= end {
            BlockTiming::Active
        } else {
            BlockTiming::Upcoming
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BlockTiming::Upcoming => "on time",
            BlockTiming::Active => "active",
            BlockTiming::Behind => "behind",
        }
    }
}
