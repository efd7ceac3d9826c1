use rand::Rng;

use crate::{
    color::walk::ColorWalk,
    config::sketch::SketchConfig,
    foundation::core::{Affine, FrameIndex, Point, Vec2},
    foundation::error::WeaveResult,
    render::transform::TransformState,
    sequence::collatz::CollatzSequence,
};

/// Odd values turn the other way, half again as far as even values.
pub const ODD_TURN_FACTOR: f64 = 1.5;

/// One backend call of a frame, in issue order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    ResetTransform,
    Translate { by: Vec2 },
    Rotate { radians: f64 },
    SetStroke { r: f64, g: f64, b: f64, alpha: f64 },
    SetStrokeWeight { px: f64 },
    DrawLine { from: Point, to: Point },
}

/// Backend-agnostic draw commands for a single frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FramePlan {
    pub frame: FrameIndex,
    /// Sequence in generation order (seed first, 1 last). The walk visits it back to front.
    pub sequence: Vec<u64>,
    pub commands: Vec<DrawCommand>,
    /// Accumulated transform after the last segment.
    pub end_transform: Affine,
}

impl FramePlan {
    /// Number of segments drawn by this plan.
    pub fn segment_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawLine { .. }))
            .count()
    }

    /// Canvas-space position where the polyline ends.
    pub fn tip(&self) -> Point {
        self.end_transform * Point::ORIGIN
    }
}

/// Turn applied before drawing the segment for `value`.
pub fn turn_for(value: u64, angle: f64) -> f64 {
    if value.is_multiple_of(2) {
        angle
    } else {
        -angle * ODD_TURN_FACTOR
    }
}

/// Build the draw commands for `frame`.
///
/// The sequence seeded by `frame` is walked from 1 back up to the seed. Each element rotates the
/// accumulated transform by [`turn_for`], strokes one segment of `config.length` along local
/// "up", and moves the origin to the segment's far end. One color is drawn from a fresh
/// [`ColorWalk`] per segment, the first being the walk's seed color.
#[tracing::instrument(skip(config, rng))]
pub fn plan_frame<R: Rng + ?Sized>(
    config: &SketchConfig,
    frame: FrameIndex,
    rng: &mut R,
) -> WeaveResult<FramePlan> {
    let sequence = CollatzSequence::new(frame.0)?.collect_checked(None)?;
    let mut colors = ColorWalk::new(&config.color, rng);

    let origin = config.canvas.bottom_center().to_vec2();
    let step = Vec2::new(0.0, -config.length);

    let mut transform = TransformState::default();
    let mut commands = Vec::with_capacity(2 + sequence.len() * 5);
    commands.push(DrawCommand::ResetTransform);
    transform.reset();
    commands.push(DrawCommand::Translate { by: origin });
    transform.translate(origin);

    for &value in sequence.iter().rev() {
        let radians = turn_for(value, config.angle);
        commands.push(DrawCommand::Rotate { radians });
        transform.rotate(radians);

        let [r, g, b] = colors.sample();
        commands.push(DrawCommand::SetStroke {
            r,
            g,
            b,
            alpha: config.alpha,
        });
        commands.push(DrawCommand::SetStrokeWeight {
            px: config.stroke_weight,
        });
        commands.push(DrawCommand::DrawLine {
            from: Point::ORIGIN,
            to: step.to_point(),
        });

        commands.push(DrawCommand::Translate { by: step });
        transform.translate(step);
    }

    tracing::debug!(
        segments = sequence.len(),
        tip = ?transform.origin(),
        "planned frame"
    );

    Ok(FramePlan {
        frame,
        sequence,
        commands,
        end_transform: transform.affine(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
