//! The error type shared by the store, the planner and the timer driver.

use std::path::PathBuf;

use thiserror::Error;

/// Everything a [`Planner`](crate::Planner) call can fail with.
///
/// Only failures the caller can act on show up here. Corrupt persisted data
/// is recovered inside the document loaders and dangling references are
/// ignored, so neither has a variant.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// SQLite rejected a statement or could not be opened
    #[error("Storage failure: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Template with ID {id} not found")]
    TemplateNotFound { id: String },
    /// No block with the given ID in today's snapshot
    #[error("Block with ID {id} not found in today's plan")]
    BlockNotFound { id: String },
    #[error("Task with ID {id} not found")]
    TaskNotFound { id: String },
    #[error("Reminder with ID {id} not found")]
    ReminderNotFound { id: String },
    /// No meeting with the given ID on today's agenda
    #[error("Meeting with ID {id} not found for today")]
    MeetingNotFound { id: String },
    /// The database directory could not be created
    #[error("Cannot prepare '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// No data directory could be resolved for the default database path
    #[error("Cannot locate the data directory: {0}")]
    XdgDirectory(String),
    #[error("Invalid value for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// A document could not be encoded for storage
    #[error("Cannot encode document: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// The database was written by an incompatible version, or a blocking
    /// worker failed
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Pending [`PlannerError::Database`] waiting for its rusqlite cause.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn with_source(self, source: rusqlite::Error) -> PlannerError {
        PlannerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Pending [`PlannerError::InvalidInput`] for a named field.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    pub fn with_reason(self, reason: impl Into<String>) -> PlannerError {
        PlannerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl PlannerError {
    /// `PlannerError::database("Failed to load task").with_source(e)`
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// `PlannerError::invalid_input("title").with_reason("cannot be empty")`
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Error returned when a destructive operation was not confirmed.
    pub(crate) fn unconfirmed(action: &str) -> Self {
        Self::invalid_input("confirmed").with_reason(format!(
            "{action} discards data and requires explicit confirmation. Set 'confirmed' to true to proceed."
        ))
    }

    /// Wraps a join error from a blocking database task.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Attaches a message to rusqlite failures.
pub trait DatabaseResultExt<T> {
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PlannerError::database(message).with_source(e))
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
