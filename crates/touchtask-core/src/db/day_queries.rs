//! Day-level transactions: reconciling today's snapshot and committing
//! transforms of it, optionally together with the template store.

use jiff::Zoned;
use log::debug;
use rusqlite::Connection;

use super::documents;
use crate::{
    clock::logical_date,
    error::Result,
    models::{DailySnapshot, Settings, TemplateSet},
    reconcile::{force_regenerate, needs_regeneration, reconcile},
};

/// Loads templates and the stored snapshot and reconciles them for the
/// logical day containing `now`. A regenerated snapshot is saved before
/// returning.
fn current_day(conn: &Connection, now: &Zoned) -> Result<(TemplateSet, DailySnapshot)> {
    let settings = documents::settings(conn)?;
    let today = logical_date(now, settings.day_starts_at);
    let templates = documents::templates(conn)?;
    let previous = documents::snapshot(conn)?;

    let regenerate = needs_regeneration(previous.as_ref(), today);
    let snapshot = reconcile(&templates, previous, today);
    if regenerate {
        debug!("Saving regenerated snapshot for {today}");
        documents::save_snapshot(conn, &snapshot)?;
    }
    Ok((templates, snapshot))
}

impl super::Database {
    /// Today's snapshot, regenerated from the templates if the stored one
    /// belongs to another day.
    pub fn today(&mut self, now: &Zoned) -> Result<DailySnapshot> {
        self.in_transaction(|tx| current_day(tx, now).map(|(_, snapshot)| snapshot))
    }

    /// Applies `transform` to today's snapshot and saves the result.
    pub fn update_day(
        &mut self,
        now: &Zoned,
        transform: impl FnOnce(DailySnapshot) -> Result<DailySnapshot>,
    ) -> Result<DailySnapshot> {
        self.in_transaction(|tx| {
            let (_, snapshot) = current_day(tx, now)?;
            let snapshot = transform(snapshot)?;
            documents::save_snapshot(tx, &snapshot)?;
            Ok(snapshot)
        })
    }

    /// Applies `transform` to the template store and today's snapshot
    /// together and saves both in the same transaction.
    pub fn update_templates_and_day(
        &mut self,
        now: &Zoned,
        transform: impl FnOnce(TemplateSet, DailySnapshot) -> Result<(TemplateSet, DailySnapshot)>,
    ) -> Result<(TemplateSet, DailySnapshot)> {
        self.in_transaction(|tx| {
            let (templates, snapshot) = current_day(tx, now)?;
            let (templates, snapshot) = transform(templates, snapshot)?;
            documents::save_templates(tx, &templates)?;
            documents::save_snapshot(tx, &snapshot)?;
            Ok((templates, snapshot))
        })
    }

    /// Discards today's progress and rebuilds the snapshot from the
    /// templates.
    pub fn regenerate_day(&mut self, now: &Zoned) -> Result<DailySnapshot> {
        self.in_transaction(|tx| {
            let settings = documents::settings(tx)?;
            let templates = documents::templates(tx)?;
            let snapshot = force_regenerate(&templates, logical_date(now, settings.day_starts_at));
            documents::save_snapshot(tx, &snapshot)?;
            Ok(snapshot)
        })
    }

    /// The template store, seeded on first use.
    pub fn templates(&mut self) -> Result<TemplateSet> {
        self.in_transaction(|tx| documents::templates(tx))
    }

    pub fn settings(&self) -> Result<Settings> {
        documents::settings(&self.connection)
    }

    /// Applies `transform` to the stored settings and saves the result.
    pub fn update_settings(
        &mut self,
        transform: impl FnOnce(Settings) -> Result<Settings>,
    ) -> Result<Settings> {
        self.in_transaction(|tx| {
            let settings = transform(documents::settings(tx)?)?;
            documents::save_settings(tx, &settings)?;
            Ok(settings)
        })
    }
}
