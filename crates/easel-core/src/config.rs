//! Engine configuration.

use crate::color::PaintColor;
use serde::{Deserialize, Serialize};

/// Default number of undo steps kept in memory.
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Tunables for the drawing engine.
///
/// Every field has a default, so a config file only needs to name the
/// values it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of snapshots on the undo stack.
    pub max_history: usize,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Factor applied by zoom in/out commands and per wheel notch.
    pub zoom_step: f64,
    /// Colour the main surface is cleared to.
    pub background: PaintColor,
    /// Initial brush colour.
    pub color: PaintColor,
    pub brush_size: f64,
    pub font_family: String,
    pub font_size: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_history: DEFAULT_MAX_HISTORY,
            min_zoom: 0.1,
            max_zoom: 10.0,
            zoom_step: 1.2,
            background: PaintColor::WHITE,
            color: PaintColor::BLACK,
            brush_size: 5.0,
            font_family: "sans-serif".to_string(),
            font_size: 24.0,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON, filling unspecified fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
