use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{
    BlockCommands, DataCommands, DayCommands, MeetingCommands, ReminderCommands,
    SettingsCommands, SubtaskCommands, TaskCommands, TimerCommands,
};

/// Daily routine planner with a task board and focus timer
///
/// TouchTask rebuilds today's schedule from your recurring blocks, tracks
/// sub-step progress through the day, keeps a kanban board of tasks and
/// runs a work/break focus timer that logs time against them.
#[derive(Parser)]
#[command(version, about, name = "tt")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/touchtask/touchtask.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the TouchTask CLI
///
/// Running `tt` without a command shows today's overview.
#[derive(Subcommand)]
pub enum Commands {
    /// Today's schedule
    #[command(alias = "d")]
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Manage recurring blocks and today's copies of them
    #[command(alias = "b")]
    Block {
        #[command(subcommand)]
        command: BlockCommands,
    },
    /// Track sub-steps within today's blocks
    #[command(alias = "s")]
    Subtask {
        #[command(subcommand)]
        command: SubtaskCommands,
    },
    /// Manage the task board
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Keep free-standing reminders
    #[command(alias = "r")]
    Reminder {
        #[command(subcommand)]
        command: ReminderCommands,
    },
    /// Today's meetings
    #[command(alias = "m")]
    Meeting {
        #[command(subcommand)]
        command: MeetingCommands,
    },
    /// Run the focus timer and manage its presets
    Timer {
        #[command(subcommand)]
        command: TimerCommands,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Back up, restore and reset data
    Data {
        #[command(subcommand)]
        command: DataCommands,
    },
}
