//! Planner construction: database location and clock.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;
use tokio::task;

use super::Planner;
use crate::{
    clock::{Clock, SystemClock},
    db::Database,
    error::{PlannerError, Result},
};

/// Configures where a [`Planner`] keeps its data and how it reads the time.
#[derive(Clone)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
    clock: Option<Arc<dyn Clock>>,
}

impl PlannerBuilder {
    /// A builder using the XDG data directory and the system clock.
    pub fn new() -> Self {
        Self {
            database_path: None,
            clock: None,
        }
    }

    /// Overrides the database file. `None` keeps the default,
    /// `$XDG_DATA_HOME/touchtask/touchtask.db` or
    /// `~/.local/share/touchtask/touchtask.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Replaces the system clock, mainly so tests can pin "now".
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Creates the database directory if needed, opens the database once to
    /// apply the schema, and returns the planner.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the database directory cannot be
    /// created.
    /// Returns `PlannerError::Database` if the schema cannot be applied.
    pub async fn build(self) -> Result<Planner> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let init_path = db_path.clone();
        task::spawn_blocking(move || Database::new(&init_path).map(drop))
        .await
        .map_err(PlannerError::join)??;

        info!("Using database at {}", db_path.display());
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Ok(Planner::new(db_path, clock))
    }

    /// `touchtask/touchtask.db` under the XDG data home, created on demand.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("touchtask")
            .place_data_file("touchtask.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}

impl Default for PlannerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
