use crate::foundation::error::{WeaveError, WeaveResult};

pub use kurbo::{Affine, BezPath, Point, Vec2};

/// Animation frame counter. Frames that seed a sequence are always `>= 1`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Lowest frame that is a valid sequence seed.
    pub const FIRST: Self = Self(1);

    /// Floor the index at [`FrameIndex::FIRST`].
    pub fn floored(self) -> Self {
        Self(self.0.max(Self::FIRST.0))
    }

    /// The following frame, saturating at `u64::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Canvas size in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> WeaveResult<Self> {
        if width == 0 || height == 0 {
            return Err(WeaveError::validation("canvas width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn aspect(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    /// Origin of every frame's walk: horizontally centered, on the bottom edge.
    pub fn bottom_center(self) -> Point {
        Point::new(f64::from(self.width) / 2.0, f64::from(self.height))
    }
}

/// Straight (non-premultiplied) stroke color. Channels are nominally in `[0, 255]` but may
/// overshoot by one color-walk step; backends quantize and clamp when they rasterize.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StrokeRgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl StrokeRgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        fn quantize(c: f64) -> u8 {
            c.round().clamp(0.0, 255.0) as u8
        }
        [
            quantize(self.r),
            quantize(self.g),
            quantize(self.b),
            quantize(self.a),
        ]
    }
}
