//! Foreground focus session for `tt timer run`.

use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use tokio::signal;
use touchtask_core::{
    display::{Countdown, Minutes, OperationStatus},
    params::{Id, SelectPreset},
    Phase, PhaseNotifier, Planner, TimerState, TimerStatus,
};

use crate::{cli::RunTimerArgs, renderer::TerminalRenderer};

/// Rings the terminal bell when a phase ends.
pub struct TerminalBell;

impl PhaseNotifier for TerminalBell {
    fn signal_phase_complete(&self, phase: Phase) -> io::Result<()> {
        debug!("Ringing bell for end of {phase:?}");
        let mut stdout = io::stdout().lock();
        stdout.write_all(b"\x07")?;
        stdout.flush()
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// Work and break both ran out
    Finished,
    /// Work ran out and the break was skipped
    BreakSkipped,
    /// Stopped with Ctrl-C
    Interrupted,
}

/// Decides whether a status update ends the session. Updates are only
/// read after the countdown has started, so a timer back at rest means the
/// break has run out.
fn outcome_of(status: &TimerStatus, skip_break: bool) -> Option<Outcome> {
    match status.state {
        TimerState::BreakRunning if skip_break => Some(Outcome::BreakSkipped),
        TimerState::WorkReady | TimerState::Idle => Some(Outcome::Finished),
        TimerState::WorkRunning | TimerState::BreakRunning => None,
    }
}

/// The in-place countdown. The update that ends a phase shows that phase
/// at `00:00`; the next tick shows the phase that follows.
fn countdown_line(status: &TimerStatus, task_title: &str) -> String {
    let (label, remaining) = match status.completed_phase {
        Some(phase) => (phase.label(), 0),
        None => (status.state.label(), status.session.time_remaining),
    };
    format!("\r{label} {} | {task_title} ", Countdown(remaining))
}

/// Runs one work phase and its break against `args.task_id`, printing a
/// live countdown. Ctrl-C stops the countdown before exiting; minutes
/// already credited stay on the task.
pub async fn run(planner: &Planner, renderer: &TerminalRenderer, args: RunTimerArgs) -> Result<()> {
    let task_id = Id {
        id: args.task_id.clone(),
    };
    let task = planner
        .get_task(&task_id)
        .await
        .context("Failed to load task")?
        .ok_or_else(|| anyhow!("Task with ID {} not found", args.task_id))?;

    if let Some(number) = args.preset {
        planner
            .select_preset(&SelectPreset {
                index: usize::from(number - 1),
            })
            .await
            .context("Failed to select preset")?;
    }

    let driver = planner
        .timer_driver(Box::new(TerminalBell))
        .await
        .context("Failed to start the timer")?;
    if args.mute {
        driver.set_bell_enabled(false).await;
    }
    driver.assign_task(task.id.clone()).await;
    let mut updates = driver.subscribe();
    driver.start().await?;
    // Skip the start's own update so the first one seen is a tick.
    updates.mark_unchanged();

    let preset = driver.status().await.preset;
    info!("Focus session started on task {} with preset {preset}", task.id);
    renderer.render(&format!(
        "# Focus: {}\n\nPreset {preset}. Press Ctrl-C to stop.\n",
        task.title
    ))?;

    let ctrl_c = signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let outcome = loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Received Ctrl-C, stopping the timer");
                driver.stop().await;
                break Outcome::Interrupted;
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break Outcome::Interrupted;
                }
                let status = updates.borrow_and_update().clone();
                print!("{}", countdown_line(&status, &task.title));
                io::stdout().flush().context("Failed to write countdown")?;

                if let Some(outcome) = outcome_of(&status, args.skip_break) {
                    if outcome == Outcome::BreakSkipped {
                        driver.skip_break().await;
                    }
                    break outcome;
                }
            }
        }
    };
    println!();
    driver.shutdown().await;

    let logged = planner
        .get_task(&task_id)
        .await
        .context("Failed to load task")?
        .map(|task| task.time_logged_minutes)
        .unwrap_or(task.time_logged_minutes);
    let message = match outcome {
        Outcome::Finished => "Session complete",
        Outcome::BreakSkipped => "Work phase complete, break skipped",
        Outcome::Interrupted => "Session stopped",
    };
    renderer.render(
        &OperationStatus::success(format!(
            "{message}. '{}' has {} logged.",
            task.title,
            Minutes(logged)
        ))
        .to_string(),
    )
}
