//! Task ledger CRUD operations and queries.

use jiff::Timestamp;
use log::debug;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Column, LedgerTask, Priority},
    timer::TaskLedger,
};

const TASK_COLUMNS: &str =
    "id, title, category, priority, column_name, time_logged_minutes, created_at, completed_at";
const INSERT_TASK_SQL: &str = "INSERT INTO tasks (id, title, category, priority, column_name, time_logged_minutes, created_at, completed_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const UPDATE_TASK_SQL: &str = "UPDATE tasks SET title = ?1, category = ?2, priority = ?3, column_name = ?4, time_logged_minutes = ?5, completed_at = ?6 WHERE id = ?7";
const INCREMENT_MINUTES_SQL: &str =
    "UPDATE tasks SET time_logged_minutes = time_logged_minutes + ?1 WHERE id = ?2";
const DELETE_TASK_SQL: &str = "DELETE FROM tasks WHERE id = ?1";
const DELETE_DONE_TASKS_SQL: &str = "DELETE FROM tasks WHERE column_name = 'done'";
const DELETE_ALL_TASKS_SQL: &str = "DELETE FROM tasks";

fn parse_text<T: std::str::FromStr<Err = String>>(
    row: &rusqlite::Row,
    index: usize,
) -> rusqlite::Result<T> {
    let value: String = row.get(index)?;
    value
        .parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, e.into()))
}

fn parse_timestamp(value: String, index: usize) -> rusqlite::Result<Timestamp> {
    value
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Helper function to construct a LedgerTask from a database row
fn build_task_from_row(row: &rusqlite::Row) -> rusqlite::Result<LedgerTask> {
    let priority: Priority = parse_text(row, 3)?;
    let column: Column = parse_text(row, 4)?;
    let completed_at = row
        .get::<_, Option<String>>(7)?
        .map(|value| parse_timestamp(value, 7))
        .transpose()?;

    Ok(LedgerTask {
        id: row.get(0)?,
        title: row.get(1)?,
        category: row.get(2)?,
        priority,
        column,
        time_logged_minutes: row.get::<_, i64>(5)?.max(0) as u32,
        created_at: parse_timestamp(row.get(6)?, 6)?,
        completed_at,
    })
}

pub(crate) fn insert_task(conn: &Connection, task: &LedgerTask) -> Result<()> {
    conn.execute(
        INSERT_TASK_SQL,
        params![
            task.id,
            task.title,
            task.category,
            task.priority.as_str(),
            task.column.as_str(),
            i64::from(task.time_logged_minutes),
            task.created_at.to_string(),
            task.completed_at.map(|at| at.to_string()),
        ],
    )
    .db_context("Failed to insert task")?;
    Ok(())
}

fn select_task(conn: &Connection, id: &str) -> Result<Option<LedgerTask>> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1");
    conn.query_row(&sql, params![id], build_task_from_row)
        .optional()
        .db_context("Failed to load task")
}

pub(crate) fn select_all_tasks(conn: &Connection) -> Result<Vec<LedgerTask>> {
    let sql = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY created_at DESC");
    let mut stmt = conn.prepare(&sql).db_context("Failed to prepare query")?;
    let tasks = stmt
        .query_map([], build_task_from_row)
        .db_context("Failed to query tasks")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read task row")?;
    Ok(tasks)
}

pub(crate) fn replace_all_tasks(conn: &Connection, tasks: &[LedgerTask]) -> Result<()> {
    conn.execute(DELETE_ALL_TASKS_SQL, [])
        .db_context("Failed to clear tasks")?;
    tasks.iter().try_for_each(|task| insert_task(conn, task))
}

impl super::Database {
    pub fn create_task(&mut self, task: &LedgerTask) -> Result<()> {
        self.in_transaction(|tx| insert_task(tx, task))
    }

    pub fn get_task(&self, id: &str) -> Result<Option<LedgerTask>> {
        select_task(&self.connection, id)
    }

    /// Every task, newest first.
    pub fn list_tasks(&self) -> Result<Vec<LedgerTask>> {
        select_all_tasks(&self.connection)
    }

    /// Loads a task, applies `transform` and stores the result.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::TaskNotFound` if no task has the given id.
    pub fn modify_task(
        &mut self,
        id: &str,
        transform: impl FnOnce(LedgerTask) -> LedgerTask,
    ) -> Result<LedgerTask> {
        self.in_transaction(|tx| {
            let task = select_task(tx, id)?
                .ok_or_else(|| PlannerError::TaskNotFound { id: id.to_string() })?;
            let task = transform(task);
            tx.execute(
                UPDATE_TASK_SQL,
                params![
                    task.title,
                    task.category,
                    task.priority.as_str(),
                    task.column.as_str(),
                    i64::from(task.time_logged_minutes),
                    task.completed_at.map(|at| at.to_string()),
                    task.id,
                ],
            )
            .db_context("Failed to update task")?;
            Ok(task)
        })
    }

    /// Deletes a task, returning whether it existed.
    pub fn delete_task(&mut self, id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_TASK_SQL, params![id])
            .db_context("Failed to delete task")?;
        Ok(deleted > 0)
    }

    /// Deletes every task in the done column, returning how many were removed.
    pub fn delete_done_tasks(&mut self) -> Result<usize> {
        self.connection
            .execute(DELETE_DONE_TASKS_SQL, [])
            .db_context("Failed to delete done tasks")
    }

    /// Adds minutes to a task's logged time, returning whether the task
    /// exists.
    pub fn add_logged_minutes(&mut self, id: &str, minutes: u32) -> Result<bool> {
        let updated = self
            .connection
            .execute(INCREMENT_MINUTES_SQL, params![i64::from(minutes), id])
            .db_context("Failed to credit logged time")?;
        Ok(updated > 0)
    }
}

impl TaskLedger for super::Database {
    fn increment_logged_minutes(&mut self, task_id: &str, minutes: u32) -> Result<()> {
        if !self.add_logged_minutes(task_id, minutes)? {
            debug!("Dropping {minutes} min credit for missing task {task_id}");
        }
        Ok(())
    }

    fn get(&self, task_id: &str) -> Result<Option<LedgerTask>> {
        self.get_task(task_id)
    }
}
