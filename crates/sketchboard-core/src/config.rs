//! Sketch board configuration.

use crate::geometry::HitTolerance;
use crate::shapes::{SerializableColor, ShapeStyle};
use crate::snap::ANGLE_SNAP_INCREMENT;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable behavior of the controller, renderer and autosave.
///
/// Every field has a default, so a partial JSON document is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SketchConfig {
    pub hit_tolerance: HitTolerance,
    /// Line and arrow endpoints snap to multiples of this many degrees.
    /// Zero disables snapping.
    pub angle_snap_increment: f64,
    /// Style applied to new shapes.
    pub default_style: ShapeStyle,
    /// Quiet period before an autosave fires, in milliseconds.
    pub autosave_delay_ms: u64,
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Rectangle corner radius used when painting.
    pub corner_radius: f64,
    /// Canvas background color.
    pub background: SerializableColor,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: HitTolerance::default(),
            angle_snap_increment: ANGLE_SNAP_INCREMENT,
            default_style: ShapeStyle::default(),
            autosave_delay_ms: 500,
            canvas_width: 800.0,
            canvas_height: 600.0,
            corner_radius: 0.0,
            background: SerializableColor::rgb(255, 255, 255),
        }
    }
}

impl SketchConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Self::from_json(&json)
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("hitTolerance.stroke", self.hit_tolerance.stroke),
            ("hitTolerance.text", self.hit_tolerance.text),
            ("hitTolerance.arrowTip", self.hit_tolerance.arrow_tip),
            ("angleSnapIncrement", self.angle_snap_increment),
            ("defaultStyle.strokeWidth", self.default_style.stroke_width),
            ("cornerRadius", self.corner_radius),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a non-negative number, got {value}"),
                });
            }
        }
        for (field, value) in [
            ("canvasWidth", self.canvas_width),
            ("canvasHeight", self.canvas_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a positive number, got {value}"),
                });
            }
        }
        Ok(())
    }
}
