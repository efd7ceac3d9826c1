use crate::{
    foundation::core::{Canvas, Point, Vec2},
    foundation::error::{WeaveError, WeaveResult},
    render::{backend::GraphicsBackend, plan::DrawCommand, transform::TransformState},
};

/// A call received by [`RecordingBackend`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum BackendCall {
    InitCanvas { canvas: Canvas },
    SetBackground { gray: u8 },
    Draw { command: DrawCommand },
    EndFrame,
    RequestStop,
}

/// A line mapped to canvas space, with the stroke state active when it was drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedLine {
    pub from: Point,
    pub to: Point,
    pub rgba: [f64; 4],
    pub weight: f64,
}

/// Backend that draws nothing and remembers everything.
#[derive(Clone, Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    lines: Vec<PlacedLine>,
    canvas: Option<Canvas>,
    transform: TransformState,
    stroke: [f64; 4],
    weight: f64,
    stopped: bool,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    pub fn lines(&self) -> &[PlacedLine] {
        &self.lines
    }

    /// Recorded draw commands, without canvas setup and stop calls.
    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.calls.iter().filter_map(|c| match c {
            BackendCall::Draw { command } => Some(command),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.lines.clear();
    }

    fn push(&mut self, command: DrawCommand) {
        self.calls.push(BackendCall::Draw { command });
    }
}

impl GraphicsBackend for RecordingBackend {
    fn init_canvas(&mut self, canvas: Canvas) -> WeaveResult<()> {
        self.canvas = Some(Canvas::new(canvas.width, canvas.height)?);
        self.calls.push(BackendCall::InitCanvas { canvas });
        Ok(())
    }

    fn set_background(&mut self, gray: u8) -> WeaveResult<()> {
        if self.canvas.is_none() {
            return Err(WeaveError::render("set_background before init_canvas"));
        }
        self.calls.push(BackendCall::SetBackground { gray });
        Ok(())
    }

    fn reset_transform(&mut self) {
        self.transform.reset();
        self.push(DrawCommand::ResetTransform);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        let by = Vec2::new(dx, dy);
        self.transform.translate(by);
        self.push(DrawCommand::Translate { by });
    }

    fn rotate(&mut self, radians: f64) {
        self.transform.rotate(radians);
        self.push(DrawCommand::Rotate { radians });
    }

    fn set_stroke(&mut self, r: f64, g: f64, b: f64, alpha: f64) {
        self.stroke = [r, g, b, alpha];
        self.push(DrawCommand::SetStroke { r, g, b, alpha });
    }

    fn set_stroke_weight(&mut self, px: f64) {
        self.weight = px;
        self.push(DrawCommand::SetStrokeWeight { px });
    }

    fn draw_line(&mut self, from: Point, to: Point) -> WeaveResult<()> {
        self.lines.push(PlacedLine {
            from: self.transform.apply(from),
            to: self.transform.apply(to),
            rgba: self.stroke,
            weight: self.weight,
        });
        self.push(DrawCommand::DrawLine { from, to });
        Ok(())
    }

    fn end_frame(&mut self) -> WeaveResult<()> {
        self.calls.push(BackendCall::EndFrame);
        Ok(())
    }

    fn request_stop(&mut self) {
        self.stopped = true;
        self.calls.push(BackendCall::RequestStop);
    }

    fn stop_requested(&self) -> bool {
        self.stopped
    }
}
