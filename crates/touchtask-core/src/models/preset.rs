//! Work/break presets for the focus timer.

use serde::{Deserialize, Serialize};

/// A work/break pair in whole minutes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preset {
    #[serde(rename = "work")]
    pub work_minutes: u32,
    #[serde(rename = "break")]
    pub break_minutes: u32,
}

/// Longest work or break phase, in minutes.
pub const MAX_PRESET_MINUTES: u32 = 999;

fn clamp_minutes(minutes: u32) -> u32 {
    minutes.clamp(1, MAX_PRESET_MINUTES)
}

impl Preset {
    /// Creates a preset, clamping both durations to 1..=999 minutes.
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        Self {
            work_minutes: clamp_minutes(work_minutes),
            break_minutes: clamp_minutes(break_minutes),
        }
    }

    /// Work phase length. Stored values outside 1..=999 are clamped.
    pub fn work_seconds(&self) -> u32 {
        clamp_minutes(self.work_minutes).saturating_mul(60)
    }

    pub fn break_seconds(&self) -> u32 {
        clamp_minutes(self.break_minutes).saturating_mul(60)
    }
}

/// Built-in presets, with the second one active.
pub fn default_presets() -> Vec<Preset> {
    vec![
        Preset::new(10, 20),
        Preset::new(25, 5),
        Preset::new(50, 10),
        Preset::new(90, 15),
    ]
}

pub const DEFAULT_ACTIVE_PRESET: usize = 1;

/// Ordered presets with exactly one active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetList {
    presets: Vec<Preset>,
    active: usize,
}

impl PresetList {
    /// Builds a list, falling back to the built-in presets when `presets` is
    /// empty and clamping `active` into range.
    pub fn new(presets: Vec<Preset>, active: usize) -> Self {
        let presets = if presets.is_empty() {
            default_presets()
        } else {
            presets
        };
        let active = active.min(presets.len() - 1);
        Self { presets, active }
    }

    pub fn active(&self) -> Preset {
        self.presets[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn get(&self, index: usize) -> Option<Preset> {
        self.presets.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Preset> {
        self.presets.iter()
    }

    pub fn as_slice(&self) -> &[Preset] {
        &self.presets
    }

    /// Marks `index` active. Returns `None` when out of range.
    pub fn select(&mut self, index: usize) -> Option<Preset> {
        let preset = self.get(index)?;
        self.active = index;
        Some(preset)
    }

    /// Replaces the preset at `index`, clamping both values to 1..=999.
    /// Returns the stored preset, or `None` when out of range.
    pub fn edit(&mut self, index: usize, work_minutes: u32, break_minutes: u32) -> Option<Preset> {
        let slot = self.presets.get_mut(index)?;
        *slot = Preset::new(work_minutes, break_minutes);
        Some(*slot)
    }
}

impl Default for PresetList {
    fn default() -> Self {
        Self::new(default_presets(), DEFAULT_ACTIVE_PRESET)
    }
}
