//! Focus timer state machine.
//!
//! [`Timer`] is a synchronous state machine: every transition is a method
//! call that returns immediately, and [`Timer::tick`] advances the clock by
//! one second, reporting the side effects (ledger credit, phase signal) for
//! the caller to apply. [`TimerDriver`] wraps it with a tokio ticker and the
//! collaborators that receive those effects.
//!
//! ```text
//!            assign_task              start
//!   Idle ───────────────▶ WorkReady ─────────▶ WorkRunning
//!    ▲                     ▲  ▲   ◀───────────     │
//!    │ clear_task          │  │      stop          │ remaining hits 0
//!    └─────────────────────┘  │                    ▼
//!                             └────────────── BreakRunning
//!                           break ends / skip_break
//! ```

mod driver;


use thiserror::Error;

pub use driver::{TimerDriver, TimerStatus};

use crate::{
    error::Result,
    models::{LedgerTask, Preset, PresetList},
};

/// Observable state, derived from the session's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    /// No task assigned
    Idle,
    /// Task assigned, countdown paused or not yet started
    WorkReady,
    WorkRunning,
    BreakRunning,
}

impl TimerState {
    pub fn label(&self) -> &'static str {
        match self {
            TimerState::Idle => "Idle",
            TimerState::WorkReady => "Ready",
            TimerState::WorkRunning => "Focus",
            TimerState::BreakRunning => "Break",
        }
    }
}

/// Which countdown just ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Work,
    Break,
}

impl Phase {
    /// Label matching [`TimerState::label`] for the running phase.
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => TimerState::WorkRunning.label(),
            Phase::Break => TimerState::BreakRunning.label(),
        }
    }
}

/// Reason a transition was refused. The timer is unchanged when one of
/// these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerRejection {
    #[error("No task selected. Assign a task before starting the timer.")]
    NoTaskSelected,
    #[error("Preset {index} does not exist; {len} presets are configured")]
    PresetOutOfRange { index: usize, len: usize },
}

/// The ephemeral countdown session. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerSession {
    pub running: bool,
    pub on_break: bool,
    /// Seconds left in the current phase, never above `total_time`
    pub time_remaining: u32,
    /// Length of the current phase in seconds
    pub total_time: u32,
    pub active_task_id: Option<String>,
    /// Work seconds counted since the last reset, used to batch ledger credit
    pub elapsed_while_running: u32,
}

/// Side effects produced by a single [`Timer::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickEffects {
    /// Task to credit one minute of logged time to
    pub credit_task: Option<String>,
    /// Countdown that reached zero on this tick
    pub completed_phase: Option<Phase>,
    /// Whether the completion cue should be played
    pub signal: bool,
}

/// Receives minute credits from the timer.
pub trait TaskLedger: Send {
    /// Adds `minutes` to the task's logged time. An unknown id is ignored.
    fn increment_logged_minutes(&mut self, task_id: &str, minutes: u32) -> Result<()>;

    fn get(&self, task_id: &str) -> Result<Option<LedgerTask>>;
}

/// Plays the phase-complete cue. Failures are logged and dropped by the
/// driver.
pub trait PhaseNotifier: Send {
    fn signal_phase_complete(&self, phase: Phase) -> std::io::Result<()>;
}

/// Work/break countdown with task attribution.
#[derive(Debug, Clone)]
pub struct Timer {
    presets: PresetList,
    session: TimerSession,
    bell_enabled: bool,
}

impl Timer {
    /// Creates an idle timer targeting the active preset's work duration.
    pub fn new(presets: PresetList, bell_enabled: bool) -> Self {
        let work = presets.active().work_seconds();
        Self {
            presets,
            session: TimerSession {
                running: false,
                on_break: false,
                time_remaining: work,
                total_time: work,
                active_task_id: None,
                elapsed_while_running: 0,
            },
            bell_enabled,
        }
    }

    pub fn state(&self) -> TimerState {
        let session = &self.session;
        match (session.running, session.on_break, &session.active_task_id) {
            (true, true, _) => TimerState::BreakRunning,
            (true, false, _) => TimerState::WorkRunning,
            (false, _, Some(_)) => TimerState::WorkReady,
            (false, _, None) => TimerState::Idle,
        }
    }

    pub fn session(&self) -> &TimerSession {
        &self.session
    }

    pub fn presets(&self) -> &PresetList {
        &self.presets
    }

    pub fn active_preset(&self) -> Preset {
        self.presets.active()
    }

    pub fn bell_enabled(&self) -> bool {
        self.bell_enabled
    }

    pub fn is_running(&self) -> bool {
        self.session.running
    }

    pub fn active_task_id(&self) -> Option<&str> {
        self.session.active_task_id.as_deref()
    }

    fn retarget(&mut self, seconds: u32) {
        self.session.time_remaining = seconds;
        self.session.total_time = seconds;
    }

    /// Stops the countdown and rewinds to a fresh work phase. Work seconds
    /// short of the next whole minute are dropped.
    fn rewind(&mut self) {
        self.session.running = false;
        self.session.on_break = false;
        self.session.elapsed_while_running = 0;
        self.retarget(self.presets.active().work_seconds());
    }

    /// Assigns a task, abandoning whatever session was in progress.
    pub fn assign_task(&mut self, task_id: impl Into<String>) {
        self.rewind();
        self.session.active_task_id = Some(task_id.into());
    }

    pub fn clear_task(&mut self) {
        self.rewind();
        self.session.active_task_id = None;
    }

    /// Starts or resumes the work countdown. Starting while already running
    /// succeeds without changing anything.
    pub fn start(&mut self) -> std::result::Result<(), TimerRejection> {
        if self.session.running {
            return Ok(());
        }
        if self.session.active_task_id.is_none() {
            return Err(TimerRejection::NoTaskSelected);
        }
        self.session.running = true;
        Ok(())
    }

    /// Pauses the work countdown, keeping the remaining time. Breaks cannot
    /// be paused, so this does nothing outside `WorkRunning`.
    pub fn stop(&mut self) {
        if self.state() == TimerState::WorkRunning {
            self.session.running = false;
        }
    }

    /// Ends a running break early without signalling. Does nothing outside
    /// `BreakRunning`.
    pub fn skip_break(&mut self) {
        if self.state() == TimerState::BreakRunning {
            self.session.running = false;
            self.session.on_break = false;
            self.retarget(self.presets.active().work_seconds());
        }
    }

    /// The single start/pause control: skips a break, pauses running work,
    /// and otherwise starts.
    pub fn toggle(&mut self) -> std::result::Result<(), TimerRejection> {
        match self.state() {
            TimerState::BreakRunning => {
                self.skip_break();
                Ok(())
            }
            TimerState::WorkRunning => {
                self.stop();
                Ok(())
            }
            TimerState::Idle | TimerState::WorkReady => self.start(),
        }
    }

    /// Rewinds to a fresh work phase, keeping the assigned task.
    pub fn reset(&mut self) {
        self.rewind();
    }

    /// Activates another preset. The running countdown, if any, is
    /// abandoned and the timer retargets the new work duration.
    pub fn select_preset(&mut self, index: usize) -> std::result::Result<Preset, TimerRejection> {
        let len = self.presets.len();
        let preset = self
            .presets
            .select(index)
            .ok_or(TimerRejection::PresetOutOfRange { index, len })?;
        self.session.running = false;
        self.session.on_break = false;
        self.retarget(preset.work_seconds());
        Ok(preset)
    }

    /// Replaces a preset's durations, clamped to 1..=999 minutes. When the
    /// edited preset is active and nothing is running, the current phase is
    /// retargeted immediately.
    pub fn edit_preset(
        &mut self,
        index: usize,
        work_minutes: u32,
        break_minutes: u32,
    ) -> std::result::Result<Preset, TimerRejection> {
        let len = self.presets.len();
        let preset = self
            .presets
            .edit(index, work_minutes, break_minutes)
            .ok_or(TimerRejection::PresetOutOfRange { index, len })?;
        if index == self.presets.active_index() && !self.session.running {
            self.retarget(preset.work_seconds());
        }
        Ok(preset)
    }

    pub fn set_bell_enabled(&mut self, enabled: bool) {
        self.bell_enabled = enabled;
    }

    /// Advances the running countdown by one second.
    ///
    /// Every 60 work seconds one minute is credited to the assigned task.
    /// When work runs out the break starts on its own; when the break runs
    /// out the timer waits in `WorkReady` for the next start.
    pub fn tick(&mut self) -> TickEffects {
        let mut effects = TickEffects::default();
        if !self.session.running {
            return effects;
        }

        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        if self.session.on_break {
            if self.session.time_remaining == 0 {
                self.session.running = false;
                self.session.on_break = false;
                self.retarget(self.presets.active().work_seconds());
                effects.completed_phase = Some(Phase::Break);
            }
        } else {
            self.session.elapsed_while_running += 1;
            if self.session.elapsed_while_running % 60 == 0 {
                effects.credit_task = self.session.active_task_id.clone();
            }

            if self.session.time_remaining == 0 {
                self.session.on_break = true;
                self.session.elapsed_while_running = 0;
                self.retarget(self.presets.active().break_seconds());
                effects.completed_phase = Some(Phase::Work);
            }
        }

        effects.signal = effects.completed_phase.is_some() && self.bell_enabled;
        effects
    }
}
