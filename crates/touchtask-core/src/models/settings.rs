//! Persisted user settings.

use serde::{Deserialize, Serialize};

use super::{
    preset::{default_presets, DEFAULT_ACTIVE_PRESET},
    Preset, PresetList, TimeOfDay,
};

/// User preferences stored alongside the day's data.
///
/// Every field has a default so older or partial documents still load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Wall-clock time at which a new logical day begins
    pub day_starts_at: TimeOfDay,

    pub use_24_hour_format: bool,

    /// Whether phase completion plays the audible cue
    pub bell_enabled: bool,

    pub presets: Vec<Preset>,

    pub active_preset: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            day_starts_at: TimeOfDay::MIDNIGHT,
            use_24_hour_format: true,
            bell_enabled: true,
            presets: default_presets(),
            active_preset: DEFAULT_ACTIVE_PRESET,
        }
    }
}

impl Settings {
    pub fn preset_list(&self) -> PresetList {
        PresetList::new(self.presets.clone(), self.active_preset)
    }

    /// Stores the presets and active index of `list`.
    pub fn set_presets(&mut self, list: &PresetList) {
        self.presets = list.as_slice().to_vec();
        self.active_preset = list.active_index();
    }
}
