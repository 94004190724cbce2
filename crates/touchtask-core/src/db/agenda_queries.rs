//! Reminder and meeting documents.

use jiff::Zoned;
use log::debug;

use super::documents;
use crate::{
    clock::logical_date,
    error::Result,
    models::{MeetingDay, Reminder},
};

impl super::Database {
    pub fn reminders(&self) -> Result<Vec<Reminder>> {
        documents::reminders(&self.connection)
    }

    /// Applies `transform` to the reminder list and saves the result.
    pub fn update_reminders<R>(
        &mut self,
        transform: impl FnOnce(&mut Vec<Reminder>) -> Result<R>,
    ) -> Result<R> {
        self.in_transaction(|tx| {
            let mut reminders = documents::reminders(tx)?;
            let result = transform(&mut reminders)?;
            documents::save_reminders(tx, &reminders)?;
            Ok(result)
        })
    }

    /// Meetings of the logical day containing `now`.
    pub fn meetings(&self, now: &Zoned) -> Result<MeetingDay> {
        let settings = documents::settings(&self.connection)?;
        documents::meetings(&self.connection, logical_date(now, settings.day_starts_at))
    }

    /// Applies `transform` to today's meetings and saves the result. A list
    /// left over from an earlier day is replaced by today's.
    pub fn update_meetings<R>(
        &mut self,
        now: &Zoned,
        transform: impl FnOnce(&mut MeetingDay) -> Result<R>,
    ) -> Result<R> {
        self.in_transaction(|tx| {
            let settings = documents::settings(tx)?;
            let today = logical_date(now, settings.day_starts_at);
            let mut meetings = documents::meetings(tx, today)?;
            let result = transform(&mut meetings)?;
            documents::save_meetings(tx, &meetings)?;
            debug!("Saved {} meetings for {today}", meetings.len());
            Ok(result)
        })
    }
}
