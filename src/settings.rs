//! Scene settings
//!
//! Scene size and gameplay timings. Every field has a serde default so a
//! settings file only needs the values it changes.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scene ===
    /// Visible scene width
    pub width: f32,
    /// Visible scene height
    pub height: f32,

    // === Spikes ===
    /// Spike body width
    pub spike_width: f32,
    /// Spike body height
    pub spike_height: f32,
    /// Seconds between spawn attempts
    pub spike_spawn_interval: f32,
    /// Seconds a spike takes to fall from the top to its target
    pub spike_fall_duration: f32,

    // === Timers ===
    /// Seconds between score increments
    pub score_interval: f32,
    /// Seconds before the "Start!" label fades
    pub label_hide_delay: f32,

    /// RNG seed for spike placement
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 768.0,
            height: 1024.0,

            spike_width: 10.0,
            spike_height: 125.0,
            spike_spawn_interval: 0.3,
            spike_fall_duration: 1.0,

            score_interval: 1.0,
            label_hide_delay: 3.0,

            seed: 0x5EED,
        }
    }
}

impl Settings {
    /// Scene size as a vector
    pub fn scene_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Spike size as a vector
    pub fn spike_size(&self) -> Vec2 {
        Vec2::new(self.spike_width, self.spike_height)
    }

    /// Parse settings from JSON, then replace invalid values with defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace non-positive or non-finite sizes and durations with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let fields: [(&str, &mut f32, f32); 8] = [
            ("width", &mut self.width, defaults.width),
            ("height", &mut self.height, defaults.height),
            ("spike_width", &mut self.spike_width, defaults.spike_width),
            ("spike_height", &mut self.spike_height, defaults.spike_height),
            (
                "spike_spawn_interval",
                &mut self.spike_spawn_interval,
                defaults.spike_spawn_interval,
            ),
            (
                "spike_fall_duration",
                &mut self.spike_fall_duration,
                defaults.spike_fall_duration,
            ),
            ("score_interval", &mut self.score_interval, defaults.score_interval),
            ("label_hide_delay", &mut self.label_hide_delay, defaults.label_hide_delay),
        ];

        for (name, value, default) in fields {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Setting {} = {} is invalid, using {}", name, value, default);
                *value = default;
            }
        }

        self
    }
}
