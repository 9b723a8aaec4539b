//! Editor settings.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Error type for loading [`EditorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("couldn't read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },
}

/// Editor settings. Missing fields take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Grid cell size used while Shift is held.
    pub snap_step: f32,
    /// Width of the editable area in world units.
    pub level_width: f32,
    /// Height of the editable area in world units.
    pub level_height: f32,
    /// Canvas width in logical pixels.
    pub canvas_width: f32,
    /// Canvas height in logical pixels.
    pub canvas_height: f32,
    /// World units the view grows per wheel unit.
    pub zoom_velocity: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_step: 20.0,
            level_width: 2200.0,
            level_height: 1200.0,
            canvas_width: 800.0,
            canvas_height: 600.0,
            zoom_velocity: 0.23,
        }
    }
}

impl EditorConfig {
    /// Parses and validates a JSON config.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("level_width", self.level_width),
            ("level_height", self.level_height),
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }

    pub fn level_size(&self) -> Vec2 {
        Vec2::new(self.level_width, self.level_height)
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.canvas_width, self.canvas_height)
    }
}
