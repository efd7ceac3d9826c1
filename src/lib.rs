//! collatz-weave draws an animated generative pattern from Collatz sequences.
//!
//! Each frame `f` seeds the shortcut Collatz recurrence, walks the resulting sequence from `1`
//! back up to `f`, and turns a turtle-style transform left or right on each value's parity,
//! stroking one translucent segment per step. Segment colors come from a drifting, self-bounded
//! color walk.
//!
//! # Pipeline overview
//!
//! 1. **Generate**: [`CollatzSequence`] and [`ColorWalk`] produce values lazily.
//! 2. **Plan**: [`plan_frame`] turns a frame index into a [`FramePlan`] of [`DrawCommand`]s.
//! 3. **Issue**: [`execute_plan`] sends the plan to a [`GraphicsBackend`].
//! 4. **Schedule**: [`FrameRenderer::render_frame`] runs 1-3 per frame against an
//!    [`AnimationState`] owned by the driver, and reports when the animation should stop.
//!
//! Backends are collaborators: [`RecordingBackend`] remembers every call and [`CpuBackend`]
//! rasterizes with `vello_cpu`.
#![forbid(unsafe_code)]

mod color;
mod config;
mod foundation;
mod render;
mod sequence;

pub use color::walk::{
    CHANNEL_MAX, ChannelState, ColorWalk, ColorWalkConfig, DirectionInit, StepMode,
};
pub use config::sketch::SketchConfig;
pub use foundation::core::{Affine, BezPath, Canvas, FrameIndex, Point, StrokeRgba, Vec2};
pub use foundation::error::{WeaveError, WeaveResult};
pub use render::backend::{FrameRGBA, GraphicsBackend};
pub use render::cpu::CpuBackend;
pub use render::frame::{AnimationState, FrameRenderer, FrameStatus};
pub use render::passes::execute_plan;
pub use render::pipeline::{RunStats, drive, rng_for_seed};
pub use render::plan::{DrawCommand, FramePlan, ODD_TURN_FACTOR, plan_frame, turn_for};
pub use render::recording::{BackendCall, PlacedLine, RecordingBackend};
pub use render::transform::TransformState;
pub use sequence::collatz::{CollatzSequence, step as collatz_step};
