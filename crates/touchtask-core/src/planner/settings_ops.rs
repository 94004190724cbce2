//! User settings and timer preset operations.

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    models::Settings,
    params::{EditPreset, SelectPreset, UpdateSettings},
};

fn preset_out_of_range(index: usize, len: usize) -> PlannerError {
    PlannerError::invalid_input("index").with_reason(format!(
        "no preset at position {index}, expected 0-{}",
        len.saturating_sub(1)
    ))
}

impl Planner {
    pub async fn settings(&self) -> Result<Settings> {
        self.with_database(|db, _| db.settings()).await
    }

    /// Changes the given settings and leaves the rest as they were.
    ///
    /// Moving `day_starts_at` can change which logical day "now" falls in;
    /// the next day operation reconciles against the new boundary.
    pub async fn update_settings(&self, params: &UpdateSettings) -> Result<Settings> {
        let params = params.clone();
        self.with_database(move |db, _| {
            db.update_settings(|mut settings| {
                if let Some(day_starts_at) = params.day_starts_at {
                    settings.day_starts_at = day_starts_at;
                }
                if let Some(use_24_hour_format) = params.use_24_hour_format {
                    settings.use_24_hour_format = use_24_hour_format;
                }
                if let Some(bell_enabled) = params.bell_enabled {
                    settings.bell_enabled = bell_enabled;
                }
                Ok(settings)
            })
        })
        .await
    }

    /// Makes the preset at `index` the one new timer sessions start with.
    pub async fn select_preset(&self, params: &SelectPreset) -> Result<Settings> {
        let index = params.index;
        self.with_database(move |db, _| {
            db.update_settings(|mut settings| {
                let mut presets = settings.preset_list();
                presets
                    .select(index)
                    .ok_or_else(|| preset_out_of_range(index, presets.len()))?;
                settings.set_presets(&presets);
                Ok(settings)
            })
        })
        .await
    }

    /// Changes a preset's durations, clamped to 1..=999 minutes.
    pub async fn edit_preset(&self, params: &EditPreset) -> Result<Settings> {
        let EditPreset {
            index,
            work_minutes,
            break_minutes,
        } = *params;
        self.with_database(move |db, _| {
            db.update_settings(|mut settings| {
                let mut presets = settings.preset_list();
                presets
                    .edit(index, work_minutes, break_minutes)
                    .ok_or_else(|| preset_out_of_range(index, presets.len()))?;
                settings.set_presets(&presets);
                Ok(settings)
            })
        })
        .await
    }
}
