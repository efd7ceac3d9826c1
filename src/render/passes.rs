use crate::{
    foundation::error::WeaveResult,
    render::{
        backend::GraphicsBackend,
        plan::{DrawCommand, FramePlan},
    },
};

/// Issue every command of `plan` against `backend`, in order.
pub fn execute_plan<B: GraphicsBackend + ?Sized>(
    backend: &mut B,
    plan: &FramePlan,
) -> WeaveResult<()> {
    for cmd in &plan.commands {
        match *cmd {
            DrawCommand::ResetTransform => backend.reset_transform(),
            DrawCommand::Translate { by } => backend.translate(by.x, by.y),
            DrawCommand::Rotate { radians } => backend.rotate(radians),
            DrawCommand::SetStroke { r, g, b, alpha } => backend.set_stroke(r, g, b, alpha),
            DrawCommand::SetStrokeWeight { px } => backend.set_stroke_weight(px),
            DrawCommand::DrawLine { from, to } => backend.draw_line(from, to)?,
        }
    }
    Ok(())
}
