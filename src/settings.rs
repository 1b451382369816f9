//! Game settings and tuning
//!
//! Loaded from an optional JSON file; everything has a sensible default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(&'static str),
}

/// Gaze threshold presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThresholdPreset {
    /// Tight thresholds for responsive play
    #[default]
    Standard,
    /// Looser thresholds for noisy cameras or demos
    Relaxed,
}

impl ThresholdPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdPreset::Standard => "Standard",
            ThresholdPreset::Relaxed => "Relaxed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "std" => Some(ThresholdPreset::Standard),
            "relaxed" | "demo" => Some(ThresholdPreset::Relaxed),
            _ => None,
        }
    }

    /// Horizontal / vertical thresholds in pixels
    pub fn thresholds(&self) -> (f32, f32) {
        match self {
            ThresholdPreset::Standard => (12.0, 10.0),
            ThresholdPreset::Relaxed => (25.0, 20.0),
        }
    }
}

/// How repeated grow() calls between two moves are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GrowthPolicy {
    /// Single pending flag: any number of calls adds one segment
    #[default]
    Latched,
    /// Counter: each call adds one segment, one per move
    Accumulate,
}

/// Game settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gaze ===
    /// Threshold preset the per-axis values were derived from
    pub preset: ThresholdPreset,
    /// Horizontal displacement (px) needed for LEFT/RIGHT
    pub threshold_x: f32,
    /// Vertical displacement (px) needed for UP/DOWN
    pub threshold_y: f32,
    /// Face frames used to build the neutral baseline
    pub calibration_frames: u32,
    /// EMA weight of each calibration sample
    pub calibration_smoothing: f32,
    /// Camera image is mirrored before detection
    pub mirror_camera: bool,
    /// Delay after each tracking iteration
    pub tracker_interval_ms: u64,

    // === Game ===
    /// Milliseconds between snake moves
    pub move_interval_ms: u64,
    /// Bonus food lifetime
    pub bonus_duration_ms: u64,
    /// Frame loop rate
    pub frame_rate: u32,
    /// Growth counting rule
    pub growth: GrowthPolicy,
    /// Fixed RNG seed (random when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        let (threshold_x, threshold_y) = ThresholdPreset::Standard.thresholds();
        Self {
            preset: ThresholdPreset::Standard,
            threshold_x,
            threshold_y,
            calibration_frames: CALIBRATION_FRAMES,
            calibration_smoothing: CALIBRATION_SMOOTHING,
            mirror_camera: true,
            tracker_interval_ms: TRACKER_INTERVAL_MS,

            move_interval_ms: MOVE_INTERVAL_MS,
            bonus_duration_ms: BONUS_DURATION_MS,
            frame_rate: FRAME_RATE,
            growth: GrowthPolicy::Latched,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a threshold preset
    pub fn from_preset(preset: ThresholdPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a threshold preset (overwrites both axis thresholds)
    pub fn apply_preset(&mut self, preset: ThresholdPreset) {
        self.preset = preset;
        let (x, y) = preset.thresholds();
        self.threshold_x = x;
        self.threshold_y = y;
    }

    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.threshold_x > 0.0 && self.threshold_y > 0.0) {
            return Err(SettingsError::Invalid("thresholds must be positive"));
        }
        if self.calibration_frames == 0 {
            return Err(SettingsError::Invalid("calibration_frames must be at least 1"));
        }
        if !(self.calibration_smoothing > 0.0 && self.calibration_smoothing <= 1.0) {
            return Err(SettingsError::Invalid(
                "calibration_smoothing must be in (0, 1]",
            ));
        }
        if self.frame_rate == 0 {
            return Err(SettingsError::Invalid("frame_rate must be at least 1"));
        }
        Ok(())
    }

    /// Frame period of the game loop
    pub fn frame_interval_ms(&self) -> u64 {
        (1000 / self.frame_rate.max(1)) as u64
    }
}
