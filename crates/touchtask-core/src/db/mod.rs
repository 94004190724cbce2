//! SQLite persistence for templates, today's snapshot, settings, the agenda
//! and the task ledger.
//!
//! Templates, the daily snapshot, settings, reminders and meetings are
//! stored as JSON documents in a key-value table; ledger tasks have their own table so the timer can
//! credit minutes with a single `UPDATE`. Every mutating method runs in one
//! transaction, so a template edit and its mirror into today's snapshot
//! commit together.

use std::path::Path;

use rusqlite::{Connection, Transaction};

use crate::error::{DatabaseResultExt, Result};

pub mod agenda_queries;
pub mod bulk;
pub mod day_queries;
pub mod documents;
pub mod migrations;
pub mod task_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database file and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Runs `f` inside a transaction, committing only when it succeeds.
    fn in_transaction<R>(&mut self, f: impl FnOnce(&Transaction<'_>) -> Result<R>) -> Result<R> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        let result = f(&tx)?;
        tx.commit().db_context("Failed to commit transaction")?;
        Ok(result)
    }
}
