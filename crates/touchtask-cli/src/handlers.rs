//! Command handlers that call the planner and render the results.

use std::{fs, path::Path};

use anyhow::{anyhow, Context, Result};
use log::debug;
use touchtask_core::{
    display::{CreateResult, DeleteResult, OperationStatus},
    models::{ExportBundle, Settings, Subtask},
    params::{EditTemplate, Id, ImportData, SubtaskInput, UpdateSettings},
    Planner,
};

use crate::{
    cli::{
        BlockCommands, DataCommands, DayCommands, ImportArgs, MeetingCommands, ReminderCommands,
        SettingsCommands, SubtaskCommands, TaskCommands, TimerCommands,
    },
    renderer::TerminalRenderer,
    session,
};

/// Gives sub-steps whose title matches an existing one that sub-step's id,
/// so today's progress on them survives the edit. Each existing id is
/// reused at most once.
fn reuse_subtask_ids(existing: &[Subtask], inputs: Vec<SubtaskInput>) -> Vec<SubtaskInput> {
    let mut available: Vec<&Subtask> = existing.iter().collect();
    inputs
        .into_iter()
        .map(|input| {
            match available
                .iter()
                .position(|subtask| subtask.title == input.title)
            {
                Some(position) => {
                    let subtask = available.remove(position);
                    SubtaskInput {
                        id: Some(subtask.id.clone()),
                        ..input
                    }
                }
                None => input,
            }
        })
        .collect()
}

fn presets_markdown(settings: &Settings) -> String {
    let presets = settings.preset_list();
    let mut output = String::from("# Timer Presets\n\n");
    for (index, preset) in presets.iter().enumerate() {
        output.push_str(&format!("{}. {preset}", index + 1));
        if index == presets.active_index() {
            output.push_str(" (active)");
        }
        output.push('\n');
    }
    output.push_str(&format!(
        "\nBell: {}\n",
        if settings.bell_enabled { "on" } else { "off" }
    ));
    output
}

fn read_bundle(path: &Path) -> Result<ExportBundle> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read backup file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse backup file {}", path.display()))
}

fn write_bundle(path: &Path, bundle: &ExportBundle) -> Result<()> {
    let json = serde_json::to_string_pretty(bundle).context("Failed to serialize backup")?;
    if path == Path::new("-") {
        println!("{json}");
        return Ok(());
    }
    fs::write(path, json + "\n")
        .with_context(|| format!("Failed to write backup file {}", path.display()))
}

/// Runs CLI commands against a planner and prints the results as markdown.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    fn status(&self, status: OperationStatus) -> Result<()> {
        self.renderer.render(&status.to_string())
    }

    pub async fn show_day(&self) -> Result<()> {
        let overview = self
            .planner
            .day_overview()
            .await
            .context("Failed to load today's schedule")?;
        self.renderer.render(&overview.to_string())
    }

    pub async fn handle_day_command(&self, command: DayCommands) -> Result<()> {
        match command {
            DayCommands::Show => self.show_day().await,
            DayCommands::Focus => {
                let snapshot = self
                    .planner
                    .toggle_focus_mode()
                    .await
                    .context("Failed to toggle focus mode")?;
                self.status(OperationStatus::success(format!(
                    "Focus mode is now {}",
                    if snapshot.focus_mode { "on" } else { "off" }
                )))
            }
            DayCommands::Reset(args) => {
                self.planner
                    .reset_day(&args.into())
                    .await
                    .context("Failed to reset today")?;
                self.status(OperationStatus::success(
                    "Rebuilt today's schedule from the templates",
                ))
            }
        }
    }

    pub async fn handle_block_command(&self, command: BlockCommands) -> Result<()> {
        match command {
            BlockCommands::List => {
                let templates = self
                    .planner
                    .list_templates()
                    .await
                    .context("Failed to list blocks")?;
                if templates.is_empty() {
                    return self.renderer.render(&format!("{templates}"));
                }
                self.renderer
                    .render(&format!("# Recurring Blocks\n\n{templates}"))
            }
            BlockCommands::Show(args) => {
                let id = Id::from(args);
                let block = self
                    .planner
                    .get_template(&id)
                    .await
                    .context("Failed to load block")?
                    .ok_or_else(|| anyhow!("Block with ID {} not found", id.id))?;
                self.renderer.render(&block.to_string())
            }
            BlockCommands::Add(args) => {
                let block = self
                    .planner
                    .create_template(&args.into())
                    .await
                    .context("Failed to add block")?;
                self.renderer.render(&CreateResult::new(block).to_string())
            }
            BlockCommands::Edit(args) => {
                let mut params = EditTemplate::from(args);
                if let Some(inputs) = params.subtasks.take() {
                    let existing = self
                        .planner
                        .get_template(&Id {
                            id: params.id.clone(),
                        })
                        .await
                        .context("Failed to load block")?
                        .map(|block| block.subtasks)
                        .unwrap_or_default();
                    params.subtasks = Some(reuse_subtask_ids(&existing, inputs));
                }
                let result = self
                    .planner
                    .edit_template(&params)
                    .await
                    .context("Failed to edit block")?;
                self.renderer.render(&result.to_string())
            }
            BlockCommands::Delete(args) => {
                let block = self
                    .planner
                    .delete_template(&args.into())
                    .await
                    .context("Failed to delete block")?;
                self.renderer.render(&DeleteResult::new(block).to_string())
            }
            BlockCommands::Minimize(args) => {
                let block = self
                    .planner
                    .toggle_minimized(&args.into())
                    .await
                    .context("Failed to minimize block")?;
                let verb = if block.minimized { "Collapsed" } else { "Expanded" };
                self.status(OperationStatus::success(format!(
                    "{verb} block '{}'",
                    block.title
                )))
            }
            BlockCommands::Complete(args) => {
                let block = self
                    .planner
                    .complete_block(&args.into())
                    .await
                    .context("Failed to complete block")?;
                let outcome = if block.skipped { "skipped" } else { "done" };
                self.status(OperationStatus::success(format!(
                    "Marked block '{}' as {outcome}",
                    block.title
                )))
            }
            BlockCommands::Restore(args) => {
                let block = self
                    .planner
                    .restore_block(&args.into())
                    .await
                    .context("Failed to restore block")?;
                self.status(OperationStatus::success(format!(
                    "Restored block '{}' to today's schedule",
                    block.title
                )))
            }
            BlockCommands::Repeat(args) => {
                let block_id = args.id.clone();
                match self
                    .planner
                    .toggle_repeat_day(&args.into())
                    .await
                    .context("Failed to change repeat days")?
                {
                    Some(block) => self.status(OperationStatus::success(format!(
                        "Block '{}' now repeats on {}",
                        block.title, block.recurrence
                    ))),
                    None => self.status(OperationStatus::failure(format!(
                        "Block with ID {block_id} not found"
                    ))),
                }
            }
        }
    }

    pub async fn handle_subtask_command(&self, command: SubtaskCommands) -> Result<()> {
        match command {
            SubtaskCommands::Cycle(args) => {
                let subtask_id = args.subtask_id.clone();
                let block = self
                    .planner
                    .cycle_subtask(&args.into())
                    .await
                    .context("Failed to update sub-step")?;
                let state = block
                    .subtask(&subtask_id)
                    .map(|subtask| subtask.state.to_string())
                    .unwrap_or_default();
                self.status(OperationStatus::success(format!(
                    "Sub-step is now {state} ({}/{} done in '{}')",
                    block.done_count(),
                    block.subtasks.len(),
                    block.title
                )))
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        match command {
            TaskCommands::List => {
                let board = self
                    .planner
                    .task_board()
                    .await
                    .context("Failed to load the task board")?;
                if board.is_empty() {
                    return self.renderer.render(&board.to_string());
                }
                self.renderer.render(&format!("# Task Board\n\n{board}"))
            }
            TaskCommands::Show(args) => {
                let id = Id::from(args);
                let task = self
                    .planner
                    .get_task(&id)
                    .await
                    .context("Failed to load task")?
                    .ok_or_else(|| anyhow!("Task with ID {} not found", id.id))?;
                self.renderer.render(&task.to_string())
            }
            TaskCommands::Add(args) => {
                let task = self
                    .planner
                    .create_task(&args.into())
                    .await
                    .context("Failed to add task")?;
                self.renderer.render(&CreateResult::new(task).to_string())
            }
            TaskCommands::Edit(args) => {
                let result = self
                    .planner
                    .update_task(&args.into())
                    .await
                    .context("Failed to edit task")?;
                self.renderer.render(&result.to_string())
            }
            TaskCommands::Move(args) => {
                let task = self
                    .planner
                    .move_task(&args.into())
                    .await
                    .context("Failed to move task")?;
                self.status(OperationStatus::success(format!(
                    "Moved task '{}' to {}",
                    task.title, task.column
                )))
            }
            TaskCommands::Delete(args) => {
                let task = self
                    .planner
                    .delete_task(&args.into())
                    .await
                    .context("Failed to delete task")?;
                self.renderer.render(&DeleteResult::new(task).to_string())
            }
            TaskCommands::ClearDone => {
                let removed = self
                    .planner
                    .clear_done_tasks()
                    .await
                    .context("Failed to clear done tasks")?;
                self.status(OperationStatus::success(format!(
                    "Removed {removed} done task(s)"
                )))
            }
        }
    }

    pub async fn handle_reminder_command(&self, command: ReminderCommands) -> Result<()> {
        match command {
            ReminderCommands::List => {
                let reminders = self
                    .planner
                    .list_reminders()
                    .await
                    .context("Failed to load reminders")?;
                self.renderer.render(&reminders.to_string())
            }
            ReminderCommands::Add(args) => {
                let reminder = self
                    .planner
                    .add_reminder(&args.into())
                    .await
                    .context("Failed to add reminder")?;
                self.renderer.render(&CreateResult::new(reminder).to_string())
            }
            ReminderCommands::Delete(args) => {
                let reminder = self
                    .planner
                    .delete_reminder(&args.into())
                    .await
                    .context("Failed to delete reminder")?;
                self.renderer.render(&DeleteResult::new(reminder).to_string())
            }
        }
    }

    pub async fn handle_meeting_command(&self, command: MeetingCommands) -> Result<()> {
        match command {
            MeetingCommands::List => {
                let meetings = self
                    .planner
                    .meetings()
                    .await
                    .context("Failed to load today's meetings")?;
                self.renderer.render(&meetings.to_string())
            }
            MeetingCommands::Add(args) => {
                let meeting = self
                    .planner
                    .add_meeting(&args.into())
                    .await
                    .context("Failed to add meeting")?;
                self.renderer.render(&CreateResult::new(meeting).to_string())
            }
            MeetingCommands::Edit(args) => {
                let result = self
                    .planner
                    .update_meeting(&args.into())
                    .await
                    .context("Failed to edit meeting")?;
                self.renderer.render(&result.to_string())
            }
            MeetingCommands::Delete(args) => {
                let meeting = self
                    .planner
                    .delete_meeting(&args.into())
                    .await
                    .context("Failed to delete meeting")?;
                self.renderer.render(&DeleteResult::new(meeting).to_string())
            }
        }
    }

    pub async fn handle_timer_command(&self, command: TimerCommands) -> Result<()> {
        match command {
            TimerCommands::Run(args) => session::run(&self.planner, &self.renderer, args).await,
            TimerCommands::Presets => {
                let settings = self
                    .planner
                    .settings()
                    .await
                    .context("Failed to load settings")?;
                self.renderer.render(&presets_markdown(&settings))
            }
            TimerCommands::Select(args) => {
                let settings = self
                    .planner
                    .select_preset(&args.into())
                    .await
                    .context("Failed to select preset")?;
                self.status(OperationStatus::success(format!(
                    "Active preset is now {}",
                    settings.preset_list().active()
                )))
            }
            TimerCommands::Edit(args) => {
                let number = args.number;
                let settings = self
                    .planner
                    .edit_preset(&args.into())
                    .await
                    .context("Failed to edit preset")?;
                let preset = settings
                    .preset_list()
                    .get(usize::from(number - 1))
                    .ok_or_else(|| anyhow!("Preset {number} not found"))?;
                self.status(OperationStatus::success(format!(
                    "Preset {number} is now {preset}"
                )))
            }
            TimerCommands::Bell { state } => {
                self.planner
                    .update_settings(&UpdateSettings {
                        bell_enabled: Some(state.is_on()),
                        ..UpdateSettings::default()
                    })
                    .await
                    .context("Failed to update settings")?;
                self.status(OperationStatus::success(format!(
                    "Bell turned {}",
                    if state.is_on() { "on" } else { "off" }
                )))
            }
        }
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        match command {
            SettingsCommands::Show => {
                let settings = self
                    .planner
                    .settings()
                    .await
                    .context("Failed to load settings")?;
                self.renderer.render(&settings.to_string())
            }
            SettingsCommands::Set(args) => {
                let settings = self
                    .planner
                    .update_settings(&args.into())
                    .await
                    .context("Failed to update settings")?;
                self.renderer.render(&settings.to_string())
            }
        }
    }

    pub async fn handle_data_command(&self, command: DataCommands) -> Result<()> {
        match command {
            DataCommands::Export { file } => {
                let bundle = self
                    .planner
                    .export_data()
                    .await
                    .context("Failed to export data")?;
                write_bundle(&file, &bundle)?;
                debug!("Exported backup to {}", file.display());
                if file != Path::new("-") {
                    self.status(OperationStatus::success(format!(
                        "Exported {} blocks and {} tasks to {}",
                        bundle.master_blocks.len(),
                        bundle.kanban_tasks.len(),
                        file.display()
                    )))?;
                }
                Ok(())
            }
            DataCommands::Import(ImportArgs { file, confirm }) => {
                let bundle = read_bundle(&file)?;
                let (blocks, tasks) = (bundle.master_blocks.len(), bundle.kanban_tasks.len());
                self.planner
                    .import_data(&ImportData {
                        bundle,
                        confirmed: confirm.yes,
                    })
                    .await
                    .context("Failed to import data")?;
                self.status(OperationStatus::success(format!(
                    "Imported {blocks} blocks and {tasks} tasks from {}",
                    file.display()
                )))
            }
            DataCommands::Demo(args) => {
                self.planner
                    .load_demo(&args.into())
                    .await
                    .context("Failed to load demo data")?;
                self.status(OperationStatus::success(
                    "Loaded the demo routine, tasks, reminders and meeting",
                ))
            }
            DataCommands::Clear(args) => {
                self.planner
                    .clear_all_data(&args.into())
                    .await
                    .context("Failed to clear data")?;
                self.status(OperationStatus::success(
                    "Deleted all blocks, tasks, reminders and meetings and restored default settings",
                ))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn subtask(id: &str, title: &str) -> Subtask {
        Subtask {
            id: id.to_string(),
            title: title.to_string(),
            duration_minutes: 1,
            optional: false,
        }
    }

    fn input(title: &str) -> SubtaskInput {
        SubtaskInput {
            id: None,
            title: title.to_string(),
            duration_minutes: 2,
            optional: false,
        }
    }

    #[test]
    fn test_matching_titles_keep_their_ids() {
        let existing = vec![subtask("s1", "Water"), subtask("s2", "Stretch")];
        let inputs = vec![input("Stretch"), input("Journal"), input("Water")];

        let merged = reuse_subtask_ids(&existing, inputs);
        let ids: Vec<_> = merged.iter().map(|s| s.id.as_deref()).collect();
        assert_eq!(ids, vec![Some("s2"), None, Some("s1")]);
        assert_eq!(merged[0].duration_minutes, 2);
    }

    #[test]
    fn test_duplicate_titles_reuse_each_id_once() {
        let existing = vec![subtask("s1", "Water")];
        let merged = reuse_subtask_ids(&existing, vec![input("Water"), input("Water")]);
        assert_eq!(merged[0].id.as_deref(), Some("s1"));
        assert_eq!(merged[1].id, None);
    }

    #[test]
    fn test_presets_markdown_marks_active_preset() {
        let settings = Settings::default();
        let output = presets_markdown(&settings);
        assert!(output.starts_with("# Timer Presets"));
        assert!(output.contains("(active)"));
        assert!(output.contains("Bell: on"));
    }
}
