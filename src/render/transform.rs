//! Accumulated turtle-style transform.

use crate::foundation::core::{Affine, Point, Vec2};

/// Cumulative rotation + translation applied to every segment of a frame.
///
/// Rotations and translations are applied in the local frame (post-multiplied), matching the way
/// canvas APIs compose `rotate`/`translate` calls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    affine: Affine,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            affine: Affine::IDENTITY,
        }
    }
}

impl TransformState {
    pub fn affine(&self) -> Affine {
        self.affine
    }

    pub fn reset(&mut self) {
        self.affine = Affine::IDENTITY;
    }

    pub fn translate(&mut self, d: Vec2) {
        self.affine = self.affine * Affine::translate(d);
    }

    pub fn rotate(&mut self, radians: f64) {
        self.affine = self.affine * Affine::rotate(radians);
    }

    /// Map a point from local to canvas space.
    pub fn apply(&self, p: Point) -> Point {
        self.affine * p
    }

    /// Current local origin in canvas space.
    pub fn origin(&self) -> Point {
        self.apply(Point::ORIGIN)
    }
}
