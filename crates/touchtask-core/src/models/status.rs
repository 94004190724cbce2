//! Status enumerations for sub-steps and ledger tasks.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tri-state progress of a sub-step within today's block.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubtaskState {
    /// Not yet touched today
    #[default]
    Default,

    /// Finished
    Done,

    /// Deliberately passed over
    Skipped,
}

impl SubtaskState {
    /// Next state in the `default → done → skipped → default` cycle.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            SubtaskState::Default => SubtaskState::Done,
            SubtaskState::Done => SubtaskState::Skipped,
            SubtaskState::Skipped => SubtaskState::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubtaskState::Default => "default",
            SubtaskState::Done => "done",
            SubtaskState::Skipped => "skipped",
        }
    }

    /// Checkbox-style marker used when rendering sub-steps.
    pub fn marker(&self) -> &'static str {
        match self {
            SubtaskState::Default => "[ ]",
            SubtaskState::Done => "[x]",
            SubtaskState::Skipped => "[-]",
        }
    }
}

impl FromStr for SubtaskState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" => Ok(SubtaskState::Default),
            "done" => Ok(SubtaskState::Done),
            "skipped" => Ok(SubtaskState::Skipped),
            _ => Err(format!("Invalid subtask state: {s}")),
        }
    }
}

/// Priority of a ledger task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }

    /// Position on the board; high priority sorts first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Normal => 1,
            Priority::Low => 2,
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            _ => Err(format!("Invalid priority: {s}")),
        }
    }
}

/// Lifecycle column of a ledger task on the kanban board.
///
/// The aliases accept the column names used by older backup files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    #[default]
    Backlog,

    #[serde(alias = "week")]
    Scheduled,

    #[serde(alias = "progress")]
    InProgress,

    Done,
}

impl Column {
    /// All columns in board order.
    pub const ALL: [Column; 4] = [
        Column::Backlog,
        Column::Scheduled,
        Column::InProgress,
        Column::Done,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Backlog => "backlog",
            Column::Scheduled => "scheduled",
            Column::InProgress => "in_progress",
            Column::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Column::Backlog => "Backlog",
            Column::Scheduled => "Scheduled",
            Column::InProgress => "In Progress",
            Column::Done => "Done",
        }
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "backlog" => Ok(Column::Backlog),
            "scheduled" | "week" => Ok(Column::Scheduled),
            "in_progress" | "inprogress" | "in-progress" | "progress" => Ok(Column::InProgress),
            "done" => Ok(Column::Done),
            _ => Err(format!("Invalid column: {s}")),
        }
    }
}
