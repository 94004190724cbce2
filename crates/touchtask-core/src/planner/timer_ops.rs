//! Focus timers wired to the task ledger.

use tokio::task;

use super::Planner;
use crate::{
    db::Database,
    error::{PlannerError, Result},
    timer::{PhaseNotifier, Timer, TimerDriver},
};

impl Planner {
    /// An idle timer using the stored presets and bell preference.
    pub async fn timer(&self) -> Result<Timer> {
        let settings = self.settings().await?;
        Ok(Timer::new(settings.preset_list(), settings.bell_enabled))
    }

    /// A [`TimerDriver`] that credits minutes to this planner's ledger and
    /// plays phase cues through `notifier`.
    ///
    /// The driver keeps its own database connection for the lifetime of the
    /// session.
    pub async fn timer_driver(&self, notifier: Box<dyn PhaseNotifier>) -> Result<TimerDriver> {
        let db_path = self.db_path.clone();
        let (db, settings) = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            let settings = db.settings()?;
            Ok::<_, PlannerError>((db, settings))
        })
        .await
        .map_err(PlannerError::join)??;

        let timer = Timer::new(settings.preset_list(), settings.bell_enabled);
        Ok(TimerDriver::new(timer, Box::new(db), notifier))
    }
}
