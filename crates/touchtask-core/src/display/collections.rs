//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format today's plan, the task
//! board and the template list with consistent structure and empty
//! collection handling.

use std::{fmt, ops::Index};

use jiff::civil::Date;

use super::datetime::{ClockTime, Minutes};
use crate::{
    models::{
        board_order, weekday_index, Column, DailyBlock, DailySnapshot, LedgerTask, RecurringBlock,
        Reminder, TimeOfDay, WeekdayIndex,
    },
    progress::{
        completed_blocks, progress_percent, total_today, visible_blocks, BlockTiming, ProgressBand,
    },
};

const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Today's plan as the user sees it: the visible blocks still to do, the
/// completed list and the day's counters.
///
/// # Examples
///
/// ```rust
/// use touchtask_core::{display::DayOverview, models::{DailySnapshot, TimeOfDay}};
///
/// let snapshot = DailySnapshot {
///     date: jiff::civil::date(2026, 10, 14),
///     focus_mode: true,
///     blocks: vec![],
///     completed_block_ids: vec![],
/// };
/// let overview = DayOverview::new(&snapshot, TimeOfDay::MIDNIGHT, true);
/// assert_eq!(overview.total_today, 0);
/// assert!(overview.to_string().contains("Wednesday, 2026-10-14"));
/// ```
#[derive(Debug, Clone)]
pub struct DayOverview {
    pub date: Date,
    pub weekday: WeekdayIndex,
    pub focus_mode: bool,
    /// Wall-clock time the overview was taken at
    pub now: TimeOfDay,
    pub use_24_hour_format: bool,
    /// Blocks still to do, earliest first
    pub visible: Vec<DailyBlock>,
    /// Blocks completed or skipped, earliest first
    pub completed: Vec<DailyBlock>,
    /// Blocks passing the focus filter, completed or not
    pub total_today: usize,
    /// Completed blocks counted in `total_today`
    pub completed_count: usize,
}

impl DayOverview {
    pub fn new(snapshot: &DailySnapshot, now: TimeOfDay, use_24_hour_format: bool) -> Self {
        let weekday = weekday_index(snapshot.date);
        let visible: Vec<DailyBlock> = visible_blocks(snapshot, weekday)
            .into_iter()
            .cloned()
            .collect();
        let total_today = total_today(snapshot, weekday);

        Self {
            date: snapshot.date,
            weekday,
            focus_mode: snapshot.focus_mode,
            now,
            use_24_hour_format,
            completed: completed_blocks(snapshot).into_iter().cloned().collect(),
            completed_count: total_today.saturating_sub(visible.len()),
            visible,
            total_today,
        }
    }

    fn clock(&self, time: TimeOfDay) -> ClockTime {
        ClockTime {
            time,
            use_24_hour_format: self.use_24_hour_format,
        }
    }

    fn fmt_block(&self, f: &mut fmt::Formatter<'_>, block: &DailyBlock) -> fmt::Result {
        writeln!(
            f,
            "### {}-{} {} ({})",
            self.clock(block.start_time),
            self.clock(block.end_time),
            block.title,
            BlockTiming::of(block, self.now).label()
        )?;
        writeln!(f)?;
        write!(f, "`{}` {}", block.id, Minutes(block.duration_minutes))?;
        if !block.subtasks.is_empty() {
            let percent = progress_percent(block);
            write!(
                f,
                ", {}/{} sub-steps ({percent}%, {})",
                block.done_count(),
                block.subtasks.len(),
                ProgressBand::from_percent(percent).as_str()
            )?;
        }
        writeln!(f)?;

        if block.minimized || block.subtasks.is_empty() {
            return writeln!(f);
        }
        writeln!(f)?;
        for subtask in &block.subtasks {
            write!(f, "{subtask}")?;
        }
        writeln!(f)
    }
}

impl fmt::Display for DayOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let weekday = WEEKDAY_NAMES
            .get(usize::from(self.weekday))
            .copied()
            .unwrap_or_default();
        writeln!(f, "# {weekday}, {}", self.date)?;
        writeln!(f)?;
        writeln!(
            f,
            "**{} of {} complete** | Now: {} | Focus mode: {}",
            self.completed_count,
            self.total_today,
            self.clock(self.now),
            if self.focus_mode { "on" } else { "off" }
        )?;
        writeln!(f)?;

        if self.visible.is_empty() {
            writeln!(f, "Nothing left for today.")?;
            writeln!(f)?;
        } else {
            for block in &self.visible {
                self.fmt_block(f, block)?;
            }
        }

        if !self.completed.is_empty() {
            writeln!(f, "## Completed")?;
            writeln!(f)?;
            for block in &self.completed {
                writeln!(
                    f,
                    "- ~~{}~~ {} `{}`",
                    block.title,
                    if block.skipped { "(skipped)" } else { "(done)" },
                    block.id
                )?;
            }
        }
        Ok(())
    }
}

/// Ledger tasks grouped into board columns, each column in board order.
#[derive(Debug, Clone)]
pub struct TaskBoard {
    columns: Vec<(Column, Vec<LedgerTask>)>,
}

impl TaskBoard {
    pub fn new(tasks: Vec<LedgerTask>) -> Self {
        let mut columns: Vec<(Column, Vec<LedgerTask>)> =
            Column::ALL.iter().map(|column| (*column, Vec::new())).collect();
        for task in tasks {
            if let Some((_, entries)) = columns.iter_mut().find(|(column, _)| *column == task.column)
            {
                entries.push(task);
            }
        }
        for (column, entries) in &mut columns {
            entries.sort_by(|a, b| board_order(*column, a, b));
        }
        Self { columns }
    }

    /// Entries of one column in board order.
    pub fn column(&self, column: Column) -> &[LedgerTask] {
        self.columns
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.columns.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for TaskBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "No tasks found.");
        }
        for (column, entries) in &self.columns {
            writeln!(f, "## {} ({})", column.label(), entries.len())?;
            writeln!(f)?;
            for task in entries {
                write!(f, "- **{}** `{}` ({}", task.title, task.id, task.priority)?;
                if !task.category.is_empty() {
                    write!(f, ", {}", task.category)?;
                }
                writeln!(f, ", {} logged)", Minutes(task.time_logged_minutes))?;
            }
            if !entries.is_empty() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying the template list.
pub struct Templates(pub Vec<RecurringBlock>);

impl Templates {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecurringBlock> {
        self.0.iter()
    }
}

impl Index<usize> for Templates {
    type Output = RecurringBlock;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Templates {
    type Item = RecurringBlock;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Templates {
    type Item = &'a RecurringBlock;
    type IntoIter = std::slice::Iter<'a, RecurringBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Templates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No blocks found.")
        } else {
            for template in &self.0 {
                write!(f, "{template}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying the reminder list.
pub struct Reminders(pub Vec<Reminder>);

impl Reminders {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Reminders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Reminders")?;
        writeln!(f)?;
        if self.0.is_empty() {
            return writeln!(f, "No reminders.");
        }
        for reminder in &self.0 {
            write!(f, "{reminder}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        fixtures::{ledger_task, template, templates, time, wednesday},
        models::Priority,
        reconcile::reconcile,
    };

    fn overview_at(now: &str) -> DayOverview {
        let set = templates(vec![
            template("late", "18:00", &[1, 2, 3, 4, 5], &["s1"]),
            template("early", "06:00", &[3], &[]),
            template("weekend", "09:00", &[0, 6], &[]),
        ]);
        let mut snapshot = reconcile(&set, None, wednesday());
        snapshot.blocks[1].completed = true;
        DayOverview::new(&snapshot, time(now), false)
    }

    #[test]
    fn test_day_overview_counts_and_order() {
        let overview = overview_at("07:00");
        assert_eq!(overview.weekday, 3);
        assert_eq!(overview.total_today, 2);
        assert_eq!(overview.completed_count, 1);
        assert_eq!(overview.visible.len(), 1);
        assert_eq!(overview.visible[0].id, "late");
        assert_eq!(overview.completed[0].id, "early");

        let output = overview.to_string();
        assert!(output.starts_with("# Wednesday, 2026-10-14"));
        assert!(output.contains("**1 of 2 complete** | Now: 7:00 AM | Focus mode: on"));
        assert!(output.contains("### 6:00 PM-6:00 PM Block late (on time)"));
        assert!(output.contains("- ~~Block early~~ (done) `early`"));
        assert!(!output.contains("Block weekend"));
    }

    #[test]
    fn test_day_overview_marks_behind_blocks() {
        let output = overview_at("19:30").to_string();
        assert!(output.contains("Block late (behind)"));
    }

    #[test]
    fn test_task_board_groups_and_orders() {
        let mut low = ledger_task("low");
        low.priority = Priority::Low;
        let mut high = ledger_task("high");
        high.priority = Priority::High;
        let mut done_old = ledger_task("done-old");
        done_old.column = Column::Done;
        done_old.completed_at = Some(Timestamp::from_second(1_760_000_100).unwrap());
        let mut done_new = ledger_task("done-new");
        done_new.column = Column::Done;
        done_new.completed_at = Some(Timestamp::from_second(1_760_000_200).unwrap());

        let board = TaskBoard::new(vec![low, done_old, high, done_new]);
        assert_eq!(board.len(), 4);

        let backlog: Vec<_> = board.column(Column::Backlog).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(backlog, ["high", "low"]);
        let done: Vec<_> = board.column(Column::Done).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(done, ["done-new", "done-old"]);

        let output = board.to_string();
        assert!(output.contains("## Backlog (2)"));
        assert!(output.contains("## In Progress (0)"));
        assert!(output.contains("- **Task high** `high` (high, Development, 0m logged)"));
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(TaskBoard::new(vec![]).to_string(), "No tasks found.\n");
        assert_eq!(Templates(vec![]).to_string(), "No blocks found.\n");
    }

    #[test]
    fn test_reminders_display() {
        assert!(Reminders(Vec::new()).to_string().ends_with("No reminders.\n"));

        let reminders = Reminders(vec![Reminder {
            id: "r1".to_string(),
            text: "Buy Milk".to_string(),
        }]);
        assert_eq!(reminders.to_string(), "# Reminders\n\n- Buy Milk `r1`\n");
    }
}
