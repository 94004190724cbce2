//! Async driver running the [`Timer`] on a one-second tokio ticker.

use std::{
    sync::{Arc, Mutex as SyncMutex},
    time::Duration,
};

use log::{debug, warn};
use tokio::{
    sync::{watch, Mutex},
    task::{AbortHandle, JoinHandle},
    time::{interval_at, Instant},
};

use super::{
    Phase, PhaseNotifier, TaskLedger, TickEffects, Timer, TimerRejection, TimerSession, TimerState,
};
use crate::{
    error::Result,
    models::{LedgerTask, Preset},
};

const TICK: Duration = Duration::from_secs(1);

/// Point-in-time copy of the timer published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerStatus {
    pub state: TimerState,
    pub session: TimerSession,
    pub preset: Preset,
    pub bell_enabled: bool,
    /// Set on the update that follows a phase ending
    pub completed_phase: Option<Phase>,
}

impl TimerStatus {
    fn of(timer: &Timer, completed_phase: Option<Phase>) -> Self {
        Self {
            state: timer.state(),
            session: timer.session().clone(),
            preset: timer.active_preset(),
            bell_enabled: timer.bell_enabled(),
            completed_phase,
        }
    }
}

struct DriverState {
    timer: Timer,
    ledger: Box<dyn TaskLedger>,
    notifier: Box<dyn PhaseNotifier>,
    /// Bumped whenever a ticker is cancelled or replaced
    generation: u64,
    ticker: Option<JoinHandle<()>>,
    updates: watch::Sender<TimerStatus>,
}

impl DriverState {
    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
            self.generation += 1;
            debug!("Cancelled timer ticker, generation now {}", self.generation);
        }
    }

    fn publish(&self, completed_phase: Option<Phase>) {
        self.updates
            .send_replace(TimerStatus::of(&self.timer, completed_phase));
    }

    fn apply(&mut self, effects: &TickEffects) {
        if let Some(task_id) = &effects.credit_task {
            if let Err(e) = self.ledger.increment_logged_minutes(task_id, 1) {
                warn!("Failed to credit a minute to task {task_id}: {e}");
            }
        }
        if let Some(phase) = effects.completed_phase {
            debug!("{phase:?} phase complete");
            if effects.signal {
                if let Err(e) = self.notifier.signal_phase_complete(phase) {
                    warn!("Phase completion signal failed: {e}");
                }
            }
        }
    }
}

/// Owns the [`Timer`] and the single ticker task that advances it.
///
/// All transitions go through an async mutex shared with the ticker, so a
/// tick never observes a half-applied transition. Any transition that stops
/// the countdown aborts the ticker before returning, and the ticker checks
/// its generation under the lock, so a superseded ticker cannot fire.
pub struct TimerDriver {
    inner: Arc<Mutex<DriverState>>,
    updates: watch::Receiver<TimerStatus>,
    /// Abort handle of the latest ticker, reachable without the state lock
    ticker_abort: SyncMutex<Option<AbortHandle>>,
}

impl TimerDriver {
    pub fn new(
        timer: Timer,
        ledger: Box<dyn TaskLedger>,
        notifier: Box<dyn PhaseNotifier>,
    ) -> Self {
        let (sender, receiver) = watch::channel(TimerStatus::of(&timer, None));
        let state = DriverState {
            timer,
            ledger,
            notifier,
            generation: 0,
            ticker: None,
            updates: sender,
        };
        Self {
            inner: Arc::new(Mutex::new(state)),
            updates: receiver,
            ticker_abort: SyncMutex::new(None),
        }
    }

    /// Receives a new [`TimerStatus`] after every transition and tick.
    pub fn subscribe(&self) -> watch::Receiver<TimerStatus> {
        self.updates.clone()
    }

    pub async fn status(&self) -> TimerStatus {
        let state = self.inner.lock().await;
        TimerStatus::of(&state.timer, None)
    }

    /// The ledger entry currently assigned, if it still exists.
    pub async fn active_task(&self) -> Result<Option<LedgerTask>> {
        let state = self.inner.lock().await;
        match state.timer.active_task_id() {
            Some(task_id) => state.ledger.get(task_id),
            None => Ok(None),
        }
    }

    async fn transition<R>(&self, apply: impl FnOnce(&mut Timer) -> R) -> R {
        let mut state = self.inner.lock().await;
        let result = apply(&mut state.timer);
        self.sync_ticker(&mut state);
        state.publish(None);
        result
    }

    fn sync_ticker(&self, state: &mut DriverState) {
        if !state.timer.is_running() {
            state.cancel_ticker();
            return;
        }
        if state.ticker.is_none() {
            state.generation += 1;
            let generation = state.generation;
            debug!("Starting timer ticker, generation {generation}");
            let handle = tokio::spawn(run_ticker(Arc::clone(&self.inner), generation));
            if let Ok(mut abort) = self.ticker_abort.lock() {
                *abort = Some(handle.abort_handle());
            }
            state.ticker = Some(handle);
        }
    }

    pub async fn assign_task(&self, task_id: impl Into<String>) {
        let task_id = task_id.into();
        self.transition(|timer| timer.assign_task(task_id)).await;
    }

    pub async fn clear_task(&self) {
        self.transition(Timer::clear_task).await;
    }

    pub async fn start(&self) -> std::result::Result<(), TimerRejection> {
        self.transition(Timer::start).await
    }

    pub async fn stop(&self) {
        self.transition(Timer::stop).await;
    }

    pub async fn skip_break(&self) {
        self.transition(Timer::skip_break).await;
    }

    pub async fn toggle(&self) -> std::result::Result<(), TimerRejection> {
        self.transition(Timer::toggle).await
    }

    pub async fn reset(&self) {
        self.transition(Timer::reset).await;
    }

    pub async fn select_preset(&self, index: usize) -> std::result::Result<Preset, TimerRejection> {
        self.transition(|timer| timer.select_preset(index)).await
    }

    pub async fn edit_preset(
        &self,
        index: usize,
        work_minutes: u32,
        break_minutes: u32,
    ) -> std::result::Result<Preset, TimerRejection> {
        self.transition(|timer| timer.edit_preset(index, work_minutes, break_minutes))
            .await
    }

    pub async fn set_bell_enabled(&self, enabled: bool) {
        self.transition(|timer| timer.set_bell_enabled(enabled)).await;
    }

    /// Stops the ticker without changing the session.
    pub async fn shutdown(&self) {
        let mut state = self.inner.lock().await;
        state.cancel_ticker();
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        // The ticker may hold the state lock right now, so abort it through
        // its own handle.
        let abort = match self.ticker_abort.get_mut() {
            Ok(abort) => abort.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = abort {
            handle.abort();
        }
    }
}

async fn run_ticker(inner: Arc<Mutex<DriverState>>, generation: u64) {
    let mut interval = interval_at(Instant::now() + TICK, TICK);
    loop {
        interval.tick().await;
        let mut state = inner.lock().await;
        if state.generation != generation {
            return;
        }

        let effects = state.timer.tick();
        state.apply(&effects);
        state.publish(effects.completed_phase);

        if !state.timer.is_running() {
            state.ticker = None;
            return;
        }
    }
}
