use std::{fs::File, io::BufReader, path::Path};

use crate::{
    color::walk::ColorWalkConfig,
    foundation::core::{Canvas, FrameIndex},
    foundation::error::{WeaveError, WeaveResult},
};

/// Reference canvas height the default segment length was tuned for.
const REFERENCE_HEIGHT: f64 = 600.0;
const REFERENCE_LENGTH: f64 = 12.0;
const REFERENCE_ASPECT: f64 = 800.0 / 600.0;
const REFERENCE_ANGLE: f64 = 0.25;

/// Frame-invariant sketch parameters.
///
/// Loaded from JSON; every field is optional and falls back to [`SketchConfig::default`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    pub canvas: Canvas,
    /// Gray level painted once before the first frame.
    pub background: u8,
    pub stroke_weight: f64,
    /// Stroke alpha in `[0, 255]`.
    pub alpha: f64,
    /// Segment length in pixels.
    pub length: f64,
    /// Turn in radians for even values; odd values turn by `-angle * 1.5`.
    pub angle: f64,
    pub start_frame: FrameIndex,
    /// Last frame issued (inclusive).
    pub max_frames: u64,
    pub color: ColorWalkConfig,
    /// RNG seed for the color walks. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 800,
                height: 600,
            },
            background: 51,
            stroke_weight: 5.0,
            alpha: 10.0,
            length: REFERENCE_LENGTH,
            angle: REFERENCE_ANGLE,
            start_frame: FrameIndex::FIRST,
            max_frames: 10_000,
            color: ColorWalkConfig::default(),
            seed: None,
        }
    }
}

impl SketchConfig {
    /// Defaults with `length` proportional to the canvas height and `angle` to its aspect ratio.
    pub fn scaled_to_canvas(canvas: Canvas) -> Self {
        Self {
            canvas,
            length: REFERENCE_LENGTH * f64::from(canvas.height) / REFERENCE_HEIGHT,
            angle: REFERENCE_ANGLE * canvas.aspect() / REFERENCE_ASPECT,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> WeaveResult<()> {
        Canvas::new(self.canvas.width, self.canvas.height)?;
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(WeaveError::validation("segment length must be finite and > 0"));
        }
        if !self.angle.is_finite() {
            return Err(WeaveError::validation("turn angle must be finite"));
        }
        if !self.stroke_weight.is_finite() || self.stroke_weight <= 0.0 {
            return Err(WeaveError::validation("stroke weight must be finite and > 0"));
        }
        if !(0.0..=255.0).contains(&self.alpha) {
            return Err(WeaveError::validation("stroke alpha must be in [0, 255]"));
        }
        if self.max_frames == 0 {
            return Err(WeaveError::validation("max_frames must be > 0"));
        }
        let start = self.start_frame.floored();
        if start.0 > self.max_frames {
            return Err(WeaveError::validation(format!(
                "start_frame {} is past max_frames {}",
                start.0, self.max_frames
            )));
        }
        self.color.validate()?;
        Ok(())
    }

    pub fn from_json_str(s: &str) -> WeaveResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> WeaveResult<Self> {
        let f = File::open(path).map_err(|e| {
            WeaveError::validation(format!("open sketch config '{}': {e}", path.display()))
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(f))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/sketch.rs"]
mod tests;
