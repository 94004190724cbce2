//! Display implementations for domain models.
//!
//! All output is markdown so the CLI can render it with termimad or print
//! it as plain text.

use std::fmt;

use super::datetime::{LocalDateTime, Minutes};
use crate::{
    models::{
        Column, DailyBlock, DailySubtask, LedgerTask, Meeting, MeetingDay, Preset, Priority,
        RecurringBlock, Reminder, Settings, Subtask, SubtaskState,
    },
    progress::{progress_percent, ProgressBand},
};

impl fmt::Display for SubtaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.work_minutes, self.break_minutes)
    }
}

fn fmt_details(f: &mut fmt::Formatter<'_>, minutes: u32, optional: bool) -> fmt::Result {
    if optional {
        write!(f, "{}, optional", Minutes(minutes))
    } else {
        write!(f, "{}", Minutes(minutes))
    }
}

impl fmt::Display for DailySubtask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} {} (", self.state.marker(), self.title)?;
        fmt_details(f, self.duration_minutes, self.optional)?;
        writeln!(f, ") `{}`", self.id)
    }
}

impl fmt::Display for Subtask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- {} (", self.title)?;
        fmt_details(f, self.duration_minutes, self.optional)?;
        writeln!(f, ") `{}`", self.id)
    }
}

impl DailyBlock {
    fn status_label(&self) -> &'static str {
        match (self.completed, self.skipped) {
            (true, true) => "skipped",
            (true, false) => "done",
            (false, _) => "open",
        }
    }
}

impl fmt::Display for DailyBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}-{} {}",
            self.start_time, self.end_time, self.title
        )?;
        writeln!(f)?;
        writeln!(f, "- ID: `{}`", self.id)?;
        writeln!(f, "- Status: {}", self.status_label())?;
        if !self.subtasks.is_empty() {
            let percent = progress_percent(self);
            writeln!(
                f,
                "- Progress: {}/{} ({percent}%, {})",
                self.done_count(),
                self.subtasks.len(),
                ProgressBand::from_percent(percent).as_str()
            )?;
        }
        writeln!(f, "- Repeats: {}", self.recurrence)?;
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if self.minimized {
            if !self.subtasks.is_empty() {
                writeln!(f)?;
                writeln!(f, "_{} sub-steps hidden_", self.subtasks.len())?;
            }
        } else if !self.subtasks.is_empty() {
            writeln!(f)?;
            for subtask in &self.subtasks {
                write!(f, "{subtask}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for RecurringBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.title, self.id)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Time: {}-{} ({})",
            self.start_time,
            self.end_time,
            Minutes(self.duration_minutes)
        )?;
        writeln!(f, "- Repeats: {}", self.recurrence)?;
        if !self.category.is_empty() {
            writeln!(f, "- Category: {}", self.category)?;
        }
        if !self.tags.is_empty() {
            writeln!(f, "- Tags: {}", self.tags.join(", "))?;
        }

        if !self.description.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.description)?;
        }

        if !self.subtasks.is_empty() {
            writeln!(f)?;
            writeln!(f, "#### Sub-steps")?;
            writeln!(f)?;
            for subtask in &self.subtasks {
                write!(f, "{subtask}")?;
            }
        }
        writeln!(f)
    }
}

impl fmt::Display for LedgerTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.title, self.id)?;
        writeln!(f)?;
        writeln!(f, "- Column: {}", self.column)?;
        writeln!(f, "- Priority: {}", self.priority)?;
        if !self.category.is_empty() {
            writeln!(f, "- Category: {}", self.category)?;
        }
        writeln!(f, "- Logged: {}", Minutes(self.time_logged_minutes))?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        if let Some(completed_at) = &self.completed_at {
            writeln!(f, "- Completed: {}", LocalDateTime(completed_at))?;
        }
        Ok(())
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- {} `{}`", self.text, self.id)
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "- **{}** {} `{}`", self.time, self.title, self.id)?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        Ok(())
    }
}

impl fmt::Display for MeetingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Meetings for {}", self.date)?;
        writeln!(f)?;
        if self.items.is_empty() {
            return writeln!(f, "No meetings today.");
        }
        for meeting in &self.items {
            write!(f, "{meeting}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Settings")?;
        writeln!(f)?;
        writeln!(f, "- Day starts at: {}", self.day_starts_at)?;
        writeln!(
            f,
            "- Clock: {}",
            if self.use_24_hour_format { "24-hour" } else { "12-hour" }
        )?;
        writeln!(f, "- Bell: {}", if self.bell_enabled { "on" } else { "off" })?;
        writeln!(f)?;
        writeln!(f, "## Timer presets (work/break minutes)")?;
        writeln!(f)?;
        let presets = self.preset_list();
        for (index, preset) in presets.iter().enumerate() {
            let marker = if index == presets.active_index() { " (active)" } else { "" };
            writeln!(f, "{}. {preset}{marker}", index + 1)?;
        }
        Ok(())
    }
}
