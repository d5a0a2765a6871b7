//! Game settings and preferences
//!
//! Loaded from a JSON file at `$INVADERS_SETTINGS`, falling back to
//! `invaders.json` in the working directory. Missing fields take defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::TimerIntervals;

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "INVADERS_SETTINGS";
/// Settings file used when the variable is unset
pub const DEFAULT_SETTINGS_FILE: &str = "invaders.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Master tick rate
    pub fps: u32,
    /// Formation horizontal step interval
    pub move_x_interval_ms: u64,
    /// Formation vertical step interval
    pub move_y_interval_ms: u64,
    /// Invader shooting interval
    pub shoot_interval_ms: u64,
    /// Pause on the final frame before the end screen
    pub game_over_delay_ms: u64,

    // === Rules ===
    pub starting_lives: u8,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    /// Fixed RNG seed for reproducible sessions (time-based when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            move_x_interval_ms: INVADER_TIME_X_MS,
            move_y_interval_ms: INVADER_TIME_Y_MS,
            shoot_interval_ms: INVADER_TIME_SHOOT_MS,
            game_over_delay_ms: GAME_OVER_DELAY_MS,

            starting_lives: STARTING_LIVES,

            master_volume: 1.0,
            sfx_volume: 0.1,
            muted: false,

            seed: None,
        }
    }
}

impl Settings {
    /// Formation timer intervals
    pub fn timer_intervals(&self) -> TimerIntervals {
        TimerIntervals {
            move_x_ms: self.move_x_interval_ms,
            move_y_ms: self.move_y_interval_ms,
            shoot_ms: self.shoot_interval_ms,
        }
    }

    /// Pull out-of-range values back into range
    pub fn sanitized(mut self) -> Self {
        self.fps = self.fps.max(1);
        self.move_x_interval_ms = self.move_x_interval_ms.max(1);
        self.move_y_interval_ms = self.move_y_interval_ms.max(1);
        self.shoot_interval_ms = self.shoot_interval_ms.max(1);
        self.starting_lives = self.starting_lives.max(1);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Settings>(json).map(Settings::sanitized)
    }

    /// Path of the settings file
    pub fn path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Load settings from the default location
    pub fn load() -> Self {
        Self::load_from(&Self::path())
    }

    /// Load settings from `path`; defaults when missing or unreadable
    pub fn load_from(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Failed to read {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
