//! JSON documents stored in the `documents` key-value table.
//!
//! Readers never fail on malformed content: a document that does not parse
//! is logged and treated as missing, and each typed loader substitutes its
//! default.

use jiff::{civil::Date, Timestamp};
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    defaults::default_templates,
    error::{DatabaseResultExt, Result},
    models::{DailySnapshot, MeetingDay, RecurringBlock, Reminder, Settings, TemplateSet},
};

pub const TEMPLATES_KEY: &str = "templates";
pub const DAILY_STATE_KEY: &str = "daily_state";
pub const SETTINGS_KEY: &str = "settings";
pub const REMINDERS_KEY: &str = "reminders";
pub const MEETINGS_KEY: &str = "meetings";

const SELECT_DOCUMENT_SQL: &str = "SELECT value FROM documents WHERE key = ?1";
const UPSERT_DOCUMENT_SQL: &str = "INSERT INTO documents (key, value, updated_at) VALUES (?1, ?2, ?3) \
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";

/// Reads and parses a document. Missing and malformed documents are both
/// `None`; only database failures are errors.
pub(crate) fn read<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Option<T>> {
    let raw: Option<String> = conn
        .query_row(SELECT_DOCUMENT_SQL, params![key], |row| row.get(0))
        .optional()
        .db_context("Failed to read document")?;

    let Some(raw) = raw else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("Ignoring malformed '{key}' document: {e}");
            Ok(None)
        }
    }
}

pub(crate) fn write<T: Serialize + ?Sized>(conn: &Connection, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    conn.execute(
        UPSERT_DOCUMENT_SQL,
        params![key, json, Timestamp::now().to_string()],
    )
    .db_context("Failed to write document")?;
    Ok(())
}

/// Loads the template store, seeding it with the starter routine when the
/// stored set is missing or unreadable. The seed is written back so its
/// generated ids stay stable.
pub(crate) fn templates(conn: &Connection) -> Result<TemplateSet> {
    if let Some(blocks) = read::<Vec<RecurringBlock>>(conn, TEMPLATES_KEY)? {
        return Ok(TemplateSet::new(blocks));
    }
    info!("Seeding the template store with the default routine");
    let seeded = default_templates();
    save_templates(conn, &seeded)?;
    Ok(seeded)
}

pub(crate) fn save_templates(conn: &Connection, templates: &TemplateSet) -> Result<()> {
    write(conn, TEMPLATES_KEY, &templates.blocks)
}

pub(crate) fn snapshot(conn: &Connection) -> Result<Option<DailySnapshot>> {
    read(conn, DAILY_STATE_KEY)
}

pub(crate) fn save_snapshot(conn: &Connection, snapshot: &DailySnapshot) -> Result<()> {
    write(conn, DAILY_STATE_KEY, snapshot)
}

pub(crate) fn settings(conn: &Connection) -> Result<Settings> {
    Ok(read(conn, SETTINGS_KEY)?.unwrap_or_default())
}

pub(crate) fn save_settings(conn: &Connection, settings: &Settings) -> Result<()> {
    write(conn, SETTINGS_KEY, settings)
}

pub(crate) fn reminders(conn: &Connection) -> Result<Vec<Reminder>> {
    Ok(read(conn, REMINDERS_KEY)?.unwrap_or_default())
}

pub(crate) fn save_reminders(conn: &Connection, reminders: &[Reminder]) -> Result<()> {
    write(conn, REMINDERS_KEY, reminders)
}

/// Today's meetings. A list stored for another day reads as empty.
pub(crate) fn meetings(conn: &Connection, today: Date) -> Result<MeetingDay> {
    Ok(MeetingDay::current(read(conn, MEETINGS_KEY)?, today))
}

pub(crate) fn save_meetings(conn: &Connection, meetings: &MeetingDay) -> Result<()> {
    write(conn, MEETINGS_KEY, meetings)
}
