//! Command-line argument definitions using clap
//!
//! Every subcommand that calls into the planner has a clap `Args` struct
//! here and a `From` impl converting it to the matching core parameter
//! type:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```
//!
//! The core parameter types carry no clap derives, so help text, aliases
//! and argument parsing stay in this crate.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use touchtask_core::{
    models::{Column, Priority, TimeOfDay, WeekdayIndex},
    params::*,
};

const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Parses a weekday given as an index (0 = Sunday) or an English name.
/// Any unambiguous prefix of at least three letters is accepted.
pub fn parse_weekday(value: &str) -> Result<WeekdayIndex, String> {
    let value = value.trim().to_lowercase();
    if let Ok(index) = value.parse::<WeekdayIndex>() {
        return if index < 7 {
            Ok(index)
        } else {
            Err(format!("Weekday index {index} is out of range 0-6"))
        };
    }
    if value.len() >= 3 {
        if let Some(index) = WEEKDAY_NAMES.iter().position(|name| name.starts_with(&value)) {
            return Ok(index as WeekdayIndex);
        }
    }
    Err(format!("Invalid weekday '{value}', expected 0-6 or a day name"))
}

/// Parses a sub-step written as `TITLE` or `TITLE:MINUTES`.
pub fn parse_step(value: &str) -> Result<SubtaskInput, String> {
    let (title, duration_minutes) = match value.rsplit_once(':') {
        Some((title, minutes)) => match minutes.trim().parse::<u32>() {
            Ok(minutes) => (title, minutes),
            Err(_) => (value, 0),
        },
        None => (value, 0),
    };
    let title = title.trim();
    if title.is_empty() {
        return Err("Sub-step title cannot be empty".to_string());
    }
    Ok(SubtaskInput {
        id: None,
        title: title.to_string(),
        duration_minutes,
        optional: false,
    })
}

fn parse_time(value: &str) -> Result<TimeOfDay, String> {
    value.parse()
}

fn sub_steps(steps: Vec<SubtaskInput>, optional_steps: Vec<SubtaskInput>) -> Vec<SubtaskInput> {
    steps
        .into_iter()
        .chain(optional_steps.into_iter().map(|step| SubtaskInput {
            optional: true,
            ..step
        }))
        .collect()
}

// ============================================================================
// Day
// ============================================================================

/// Confirmation flag for commands that discard data
#[derive(Args)]
pub struct ConfirmArgs {
    #[arg(long, help = "Confirm that data may be discarded")]
    pub yes: bool,
}

impl From<ConfirmArgs> for Confirm {
    fn from(val: ConfirmArgs) -> Self {
        Confirm { confirmed: val.yes }
    }
}

#[derive(Subcommand)]
pub enum DayCommands {
    /// Show today's blocks, progress and timing
    #[command(alias = "s")]
    Show,
    /// Toggle focus mode, which shows only blocks that repeat today
    #[command(alias = "f")]
    Focus,
    /// Discard today's progress and rebuild the day from the templates
    Reset(ConfirmArgs),
}

// ============================================================================
// Blocks
// ============================================================================

/// Identifies a block by its ID
#[derive(Args)]
pub struct BlockIdArgs {
    #[arg(help = "Unique identifier of the block")]
    pub id: String,
}

impl From<BlockIdArgs> for Id {
    fn from(val: BlockIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Add a recurring block
///
/// The block is added to the template store and, when it recurs on the
/// current weekday, to today's schedule as well. Its duration is the window
/// between start and end; an end before the start wraps past midnight.
#[derive(Args)]
pub struct AddBlockArgs {
    #[arg(help = "Title of the block")]
    pub title: String,
    #[arg(short, long, value_parser = parse_time, help = "Start time (HH:MM)")]
    pub start: TimeOfDay,
    #[arg(short, long, value_parser = parse_time, help = "End time (HH:MM)")]
    pub end: TimeOfDay,
    #[arg(short, long, help = "What the block is for")]
    pub description: Option<String>,
    #[arg(short, long, help = "Category label")]
    pub category: Option<String>,
    #[arg(short, long, value_delimiter = ',', help = "Tags as a comma-separated list")]
    pub tags: Vec<String>,
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_weekday,
        help = "Weekdays the block repeats on (e.g. mon,tue or 1,2). Defaults to no days"
    )]
    pub days: Vec<WeekdayIndex>,
    #[arg(
        long = "step",
        value_parser = parse_step,
        help = "Sub-step as TITLE or TITLE:MINUTES, repeatable"
    )]
    pub steps: Vec<SubtaskInput>,
    #[arg(
        long = "optional-step",
        value_parser = parse_step,
        help = "Optional sub-step as TITLE or TITLE:MINUTES, repeatable"
    )]
    pub optional_steps: Vec<SubtaskInput>,
}

impl From<AddBlockArgs> for CreateTemplate {
    fn from(val: AddBlockArgs) -> Self {
        CreateTemplate {
            title: val.title,
            description: val.description,
            start_time: val.start,
            end_time: val.end,
            category: val.category,
            tags: val.tags,
            repeat_days: val.days,
            subtasks: sub_steps(val.steps, val.optional_steps),
        }
    }
}

/// Edit a recurring block
///
/// Only the given fields change. Supplying any `--step` or
/// `--optional-step` replaces the whole sub-step list; steps whose title
/// matches an existing sub-step keep today's progress.
#[derive(Args)]
pub struct EditBlockArgs {
    #[arg(help = "Unique identifier of the block to edit")]
    pub id: String,
    #[arg(long, help = "New title")]
    pub title: Option<String>,
    #[arg(short, long, value_parser = parse_time, help = "New start time (HH:MM)")]
    pub start: Option<TimeOfDay>,
    #[arg(short, long, value_parser = parse_time, help = "New end time (HH:MM)")]
    pub end: Option<TimeOfDay>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
    #[arg(short, long, help = "New category label")]
    pub category: Option<String>,
    #[arg(short, long, value_delimiter = ',', help = "Replacement tags as a comma-separated list")]
    pub tags: Option<Vec<String>>,
    #[arg(
        long,
        value_delimiter = ',',
        value_parser = parse_weekday,
        help = "Replacement set of weekdays the block repeats on"
    )]
    pub days: Option<Vec<WeekdayIndex>>,
    #[arg(
        long = "step",
        value_parser = parse_step,
        help = "Sub-step as TITLE or TITLE:MINUTES, repeatable"
    )]
    pub steps: Vec<SubtaskInput>,
    #[arg(
        long = "optional-step",
        value_parser = parse_step,
        help = "Optional sub-step as TITLE or TITLE:MINUTES, repeatable"
    )]
    pub optional_steps: Vec<SubtaskInput>,
}

impl From<EditBlockArgs> for EditTemplate {
    fn from(val: EditBlockArgs) -> Self {
        let subtasks = if val.steps.is_empty() && val.optional_steps.is_empty() {
            None
        } else {
            Some(sub_steps(val.steps, val.optional_steps))
        };
        EditTemplate {
            id: val.id,
            title: val.title,
            description: val.description,
            start_time: val.start,
            end_time: val.end,
            category: val.category,
            tags: val.tags,
            repeat_days: val.days,
            subtasks,
        }
    }
}

/// Finish one of today's blocks
#[derive(Args)]
pub struct CompleteBlockArgs {
    #[arg(help = "Unique identifier of the block")]
    pub id: String,
    #[arg(long, help = "Record the block as skipped instead of done")]
    pub skip: bool,
}

impl From<CompleteBlockArgs> for CompleteBlock {
    fn from(val: CompleteBlockArgs) -> Self {
        CompleteBlock {
            id: val.id,
            skipped: val.skip,
        }
    }
}

/// Toggle one weekday in a block's repeat set
#[derive(Args)]
pub struct RepeatDayArgs {
    #[arg(help = "Unique identifier of the block")]
    pub id: String,
    #[arg(value_parser = parse_weekday, help = "Weekday to toggle (0-6 or a day name)")]
    pub day: WeekdayIndex,
}

impl From<RepeatDayArgs> for ToggleRepeatDay {
    fn from(val: RepeatDayArgs) -> Self {
        ToggleRepeatDay {
            block_id: val.id,
            day: val.day,
        }
    }
}

#[derive(Subcommand)]
pub enum BlockCommands {
    /// List every recurring block template
    #[command(alias = "l")]
    List,
    /// Show a recurring block template
    #[command(alias = "s")]
    Show(BlockIdArgs),
    /// Add a recurring block
    #[command(alias = "a")]
    Add(AddBlockArgs),
    /// Edit a recurring block
    #[command(alias = "e")]
    Edit(EditBlockArgs),
    /// Delete a recurring block and remove it from today
    #[command(alias = "d")]
    Delete(BlockIdArgs),
    /// Collapse or expand a block's sub-steps in today's view
    #[command(alias = "m")]
    Minimize(BlockIdArgs),
    /// Mark one of today's blocks done, or skipped with --skip
    #[command(alias = "c")]
    Complete(CompleteBlockArgs),
    /// Return a finished block to today's schedule
    #[command(alias = "r")]
    Restore(BlockIdArgs),
    /// Toggle one weekday in a block's repeat set
    Repeat(RepeatDayArgs),
}

// ============================================================================
// Sub-steps
// ============================================================================

/// Advance a sub-step: pending → done → skipped → pending
#[derive(Args)]
pub struct CycleSubtaskArgs {
    #[arg(help = "Unique identifier of the block")]
    pub block_id: String,
    #[arg(help = "Unique identifier of the sub-step")]
    pub subtask_id: String,
}

impl From<CycleSubtaskArgs> for CycleSubtask {
    fn from(val: CycleSubtaskArgs) -> Self {
        CycleSubtask {
            block_id: val.block_id,
            subtask_id: val.subtask_id,
        }
    }
}

#[derive(Subcommand)]
pub enum SubtaskCommands {
    /// Advance a sub-step: pending → done → skipped → pending
    #[command(alias = "c")]
    Cycle(CycleSubtaskArgs),
}

// ============================================================================
// Tasks
// ============================================================================

/// Command-line representation of task priorities
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    Low,
    Normal,
    High,
}

impl From<PriorityArg> for Priority {
    fn from(val: PriorityArg) -> Self {
        match val {
            PriorityArg::Low => Priority::Low,
            PriorityArg::Normal => Priority::Normal,
            PriorityArg::High => Priority::High,
        }
    }
}

/// Command-line representation of board columns
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColumnArg {
    Backlog,
    #[value(alias = "week")]
    Scheduled,
    #[value(alias = "progress")]
    InProgress,
    Done,
}

impl From<ColumnArg> for Column {
    fn from(val: ColumnArg) -> Self {
        match val {
            ColumnArg::Backlog => Column::Backlog,
            ColumnArg::Scheduled => Column::Scheduled,
            ColumnArg::InProgress => Column::InProgress,
            ColumnArg::Done => Column::Done,
        }
    }
}

/// Identifies a task by its ID
#[derive(Args)]
pub struct TaskIdArgs {
    #[arg(help = "Unique identifier of the task")]
    pub id: String,
}

impl From<TaskIdArgs> for Id {
    fn from(val: TaskIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Add a task to the ledger
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "Title of the task")]
    pub title: String,
    #[arg(short, long, help = "Category label")]
    pub category: Option<String>,
    #[arg(short, long, value_enum, default_value = "normal", help = "Priority")]
    pub priority: PriorityArg,
    #[arg(long, value_enum, default_value = "backlog", help = "Board column")]
    pub column: ColumnArg,
    #[arg(long, default_value_t = 0, help = "Minutes already spent on the task")]
    pub logged: u32,
}

impl From<AddTaskArgs> for CreateTask {
    fn from(val: AddTaskArgs) -> Self {
        CreateTask {
            title: val.title,
            category: val.category,
            priority: val.priority.into(),
            column: val.column.into(),
            time_logged_minutes: val.logged,
        }
    }
}

/// Edit a task's details
///
/// This is the only way to lower a task's logged time.
#[derive(Args)]
pub struct EditTaskArgs {
    #[arg(help = "Unique identifier of the task to edit")]
    pub id: String,
    #[arg(short, long, help = "New title")]
    pub title: Option<String>,
    #[arg(short, long, help = "New category label")]
    pub category: Option<String>,
    #[arg(short, long, value_enum, help = "New priority")]
    pub priority: Option<PriorityArg>,
    #[arg(long, help = "Replacement logged time in minutes")]
    pub logged: Option<u32>,
}

impl From<EditTaskArgs> for UpdateTask {
    fn from(val: EditTaskArgs) -> Self {
        UpdateTask {
            id: val.id,
            title: val.title,
            category: val.category,
            priority: val.priority.map(Into::into),
            time_logged_minutes: val.logged,
        }
    }
}

/// Move a task to another board column
#[derive(Args)]
pub struct MoveTaskArgs {
    #[arg(help = "Unique identifier of the task")]
    pub id: String,
    #[arg(value_enum, help = "Destination column")]
    pub column: ColumnArg,
}

impl From<MoveTaskArgs> for MoveTask {
    fn from(val: MoveTaskArgs) -> Self {
        MoveTask {
            id: val.id,
            column: val.column.into(),
        }
    }
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show the task board grouped by column
    #[command(alias = "l")]
    List,
    /// Show a single task
    #[command(alias = "s")]
    Show(TaskIdArgs),
    /// Add a task to the ledger
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Edit a task's details
    #[command(alias = "e")]
    Edit(EditTaskArgs),
    /// Move a task to another board column
    #[command(alias = "m")]
    Move(MoveTaskArgs),
    /// Delete a task
    #[command(alias = "d")]
    Delete(TaskIdArgs),
    /// Delete every task in the done column
    ClearDone,
}

// ============================================================================
// Reminders and meetings
// ============================================================================

/// Identifies a reminder or meeting by its ID
#[derive(Args)]
pub struct AgendaIdArgs {
    #[arg(help = "Unique identifier of the reminder or meeting")]
    pub id: String,
}

impl From<AgendaIdArgs> for Id {
    fn from(val: AgendaIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Add a reminder
#[derive(Args)]
pub struct AddReminderArgs {
    #[arg(help = "Text of the reminder")]
    pub text: String,
}

impl From<AddReminderArgs> for CreateReminder {
    fn from(val: AddReminderArgs) -> Self {
        CreateReminder { text: val.text }
    }
}

#[derive(Subcommand)]
pub enum ReminderCommands {
    /// Show all reminders
    #[command(alias = "l")]
    List,
    /// Add a reminder
    #[command(alias = "a")]
    Add(AddReminderArgs),
    /// Delete a reminder
    #[command(alias = "d")]
    Delete(AgendaIdArgs),
}

/// Add a meeting to today's agenda
///
/// Meetings belong to the current day only and are cleared when the day
/// rolls over.
#[derive(Args)]
pub struct AddMeetingArgs {
    #[arg(value_parser = parse_time, help = "Time of the meeting (HH:MM)")]
    pub time: TimeOfDay,
    #[arg(help = "Title of the meeting")]
    pub title: String,
    #[arg(short, long, help = "Notes shown under the meeting")]
    pub description: Option<String>,
}

impl From<AddMeetingArgs> for CreateMeeting {
    fn from(val: AddMeetingArgs) -> Self {
        CreateMeeting {
            time: val.time,
            title: val.title,
            description: val.description,
        }
    }
}

/// Edit one of today's meetings
#[derive(Args)]
pub struct EditMeetingArgs {
    #[arg(help = "Unique identifier of the meeting to edit")]
    pub id: String,
    #[arg(long, value_parser = parse_time, help = "New time (HH:MM)")]
    pub time: Option<TimeOfDay>,
    #[arg(long, help = "New title")]
    pub title: Option<String>,
    #[arg(short, long, help = "New notes")]
    pub description: Option<String>,
}

impl From<EditMeetingArgs> for EditMeeting {
    fn from(val: EditMeetingArgs) -> Self {
        EditMeeting {
            id: val.id,
            time: val.time,
            title: val.title,
            description: val.description,
        }
    }
}

#[derive(Subcommand)]
pub enum MeetingCommands {
    /// Show today's meetings by time
    #[command(alias = "l")]
    List,
    /// Add a meeting to today's agenda
    #[command(alias = "a")]
    Add(AddMeetingArgs),
    /// Edit one of today's meetings
    #[command(alias = "e")]
    Edit(EditMeetingArgs),
    /// Delete one of today's meetings
    #[command(alias = "d")]
    Delete(AgendaIdArgs),
}

// ============================================================================
// Timer
// ============================================================================

/// Run a focus session in the foreground
///
/// Counts down the active preset's work phase, crediting a minute to the
/// task for every minute of focus, then runs the break. Ctrl-C pauses the
/// countdown and exits.
#[derive(Args)]
pub struct RunTimerArgs {
    #[arg(help = "Unique identifier of the task to work on")]
    pub task_id: String,
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u16).range(1..),
        help = "Preset number to select before starting (see 'tt timer presets')"
    )]
    pub preset: Option<u16>,
    #[arg(long, help = "Do not ring the terminal bell for this session")]
    pub mute: bool,
    #[arg(long, help = "End the session when the work phase ends, without a break")]
    pub skip_break: bool,
}

/// Select a preset by its number in the list
#[derive(Args)]
pub struct SelectPresetArgs {
    #[arg(value_parser = clap::value_parser!(u16).range(1..), help = "Preset number")]
    pub number: u16,
}

impl From<SelectPresetArgs> for SelectPreset {
    fn from(val: SelectPresetArgs) -> Self {
        SelectPreset {
            index: usize::from(val.number - 1),
        }
    }
}

/// Change a preset's durations
///
/// Durations are clamped to 1-999 minutes.
#[derive(Args)]
pub struct EditPresetArgs {
    #[arg(value_parser = clap::value_parser!(u16).range(1..), help = "Preset number")]
    pub number: u16,
    #[arg(short, long, help = "Work phase length in minutes")]
    pub work: u32,
    #[arg(short, long = "break", help = "Break length in minutes")]
    pub break_minutes: u32,
}

impl From<EditPresetArgs> for EditPreset {
    fn from(val: EditPresetArgs) -> Self {
        EditPreset {
            index: usize::from(val.number - 1),
            work_minutes: val.work,
            break_minutes: val.break_minutes,
        }
    }
}

/// On/off switch
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

#[derive(Subcommand)]
pub enum TimerCommands {
    /// Run a focus session in the foreground
    #[command(alias = "r")]
    Run(RunTimerArgs),
    /// List the timer presets
    #[command(alias = "p")]
    Presets,
    /// Make a preset the active one
    Select(SelectPresetArgs),
    /// Change a preset's durations
    Edit(EditPresetArgs),
    /// Turn the phase-complete bell on or off
    Bell {
        #[arg(value_enum)]
        state: Switch,
    },
}

// ============================================================================
// Settings
// ============================================================================

/// Clock format for displayed times
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ClockFormat {
    #[value(name = "12")]
    TwelveHour,
    #[value(name = "24")]
    TwentyFourHour,
}

/// Change user settings
#[derive(Args)]
pub struct UpdateSettingsArgs {
    #[arg(
        long,
        value_parser = parse_time,
        help = "Time the logical day rolls over (HH:MM)"
    )]
    pub day_starts_at: Option<TimeOfDay>,
    #[arg(long, value_enum, help = "Show times in 12 or 24 hour format")]
    pub clock: Option<ClockFormat>,
}

impl From<UpdateSettingsArgs> for UpdateSettings {
    fn from(val: UpdateSettingsArgs) -> Self {
        UpdateSettings {
            day_starts_at: val.day_starts_at,
            use_24_hour_format: val.clock.map(|clock| clock == ClockFormat::TwentyFourHour),
            bell_enabled: None,
        }
    }
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the current settings
    #[command(alias = "s")]
    Show,
    /// Change settings
    Set(UpdateSettingsArgs),
}

// ============================================================================
// Data
// ============================================================================

/// Restore a backup file, replacing all templates, tasks, reminders and
/// today's meetings
#[derive(Args)]
pub struct ImportArgs {
    #[arg(help = "Path of the backup file to read")]
    pub file: PathBuf,
    #[command(flatten)]
    pub confirm: ConfirmArgs,
}

#[derive(Subcommand)]
pub enum DataCommands {
    /// Write templates, tasks, reminders and today's meetings to a backup
    /// file ('-' for stdout)
    Export {
        #[arg(help = "Path of the backup file to write")]
        file: PathBuf,
    },
    /// Restore a backup file, replacing all stored data
    Import(ImportArgs),
    /// Replace everything with the demo routine, tasks and reminders
    Demo(ConfirmArgs),
    /// Delete all stored data and restore default settings
    Clear(ConfirmArgs),
}
