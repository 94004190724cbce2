//! Ledger task model and board ordering.

use std::cmp::Ordering;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Column, Priority};

/// A kanban item with a cumulative logged-time counter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerTask {
    /// Unique identifier for the task
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub priority: Priority,

    /// Lifecycle stage on the board
    #[serde(default)]
    pub column: Column,

    /// Minutes credited so far, mostly by the focus timer
    #[serde(default)]
    pub time_logged_minutes: u32,

    /// Timestamp when the task was created (UTC)
    pub created_at: Timestamp,

    /// Set exactly while the task sits in [`Column::Done`]
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
}

impl LedgerTask {
    /// Returns the task moved to `column`, stamping or clearing the
    /// completion time to match.
    #[must_use]
    pub fn moved_to(self, column: Column, now: Timestamp) -> Self {
        Self {
            column,
            completed_at: (column == Column::Done).then_some(now),
            ..self
        }
    }
}

/// Board ordering within a single column.
///
/// The done column lists the most recently completed first. Every other
/// column lists high priority first, then newest first.
pub fn board_order(column: Column, a: &LedgerTask, b: &LedgerTask) -> Ordering {
    if column == Column::Done {
        return b.completed_at.cmp(&a.completed_at);
    }
    a.priority
        .rank()
        .cmp(&b.priority.rank())
        .then_with(|| b.created_at.cmp(&a.created_at))
}
