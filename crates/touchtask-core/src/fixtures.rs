//! Shared builders for unit tests.

use jiff::{civil::Date, Timestamp};

use crate::models::{
    Column, LedgerTask, Priority, Recurrence, RecurringBlock, Subtask, TemplateSet, TimeOfDay,
};

pub(crate) fn time(value: &str) -> TimeOfDay {
    value.parse().expect("valid time of day")
}

pub(crate) fn subtask(id: &str) -> Subtask {
    Subtask {
        id: id.to_string(),
        title: format!("Subtask {id}"),
        duration_minutes: 5,
        optional: false,
    }
}

pub(crate) fn template(id: &str, start: &str, days: &[u8], subtask_ids: &[&str]) -> RecurringBlock {
    RecurringBlock {
        id: id.to_string(),
        title: format!("Block {id}"),
        description: "A test block".to_string(),
        start_time: time(start),
        end_time: time(start),
        duration_minutes: 30,
        category: "focus".to_string(),
        tags: vec!["test".to_string()],
        recurrence: Recurrence::from_days(days.iter().copied()).expect("valid weekdays"),
        subtasks: subtask_ids.iter().map(|id| subtask(id)).collect(),
    }
}

pub(crate) fn templates(blocks: Vec<RecurringBlock>) -> TemplateSet {
    TemplateSet::new(blocks)
}

/// Wednesday, weekday index 3.
pub(crate) fn wednesday() -> Date {
    jiff::civil::date(2026, 10, 14)
}

/// Thursday, weekday index 4.
pub(crate) fn thursday() -> Date {
    jiff::civil::date(2026, 10, 15)
}

pub(crate) fn ledger_task(id: &str) -> LedgerTask {
    LedgerTask {
        id: id.to_string(),
        title: format!("Task {id}"),
        category: "Development".to_string(),
        priority: Priority::Normal,
        column: Column::Backlog,
        time_logged_minutes: 0,
        created_at: Timestamp::from_second(1_760_000_000).expect("valid timestamp"),
        completed_at: None,
    }
}
