//! Backup bundle exchanged by export and import.

use serde::{Deserialize, Serialize};

use super::{LedgerTask, Meeting, RecurringBlock, Reminder};

/// Portable copy of the templates, the ledger, the reminders and today's
/// meetings.
///
/// Day progress and settings are not included: importing a bundle
/// always starts a fresh day with default settings, and imported meetings
/// land on that day. Backups written before reminders and meetings existed
/// read with both lists empty. Unknown top-level keys are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExportBundle {
    #[serde(rename = "masterBlocks")]
    pub master_blocks: Vec<RecurringBlock>,

    #[serde(rename = "kanbanTasks")]
    pub kanban_tasks: Vec<LedgerTask>,

    #[serde(default)]
    pub reminders: Vec<Reminder>,

    #[serde(default)]
    pub meetings: Vec<Meeting>,
}
