use std::sync::Arc;

use kurbo::{Cap, Join, Stroke, StrokeOpts};

use crate::{
    foundation::core::{Affine, BezPath, Canvas, Point, StrokeRgba},
    foundation::error::{WeaveError, WeaveResult},
    render::{
        backend::{FrameRGBA, GraphicsBackend},
        transform::TransformState,
    },
};

const STROKE_TOLERANCE: f64 = 0.1;

/// Raster backend powered by `vello_cpu`.
///
/// Nothing is ever cleared after the background is painted: every frame draws on top of the
/// previous ones, so translucent strokes build up over the run. Each [`GraphicsBackend::end_frame`]
/// rasterizes the frame's strokes over the accumulated surface, so the render context never holds
/// more than one frame of paths.
pub struct CpuBackend {
    canvas: Option<CpuCanvas>,
    transform: TransformState,
    stroke: StrokeRgba,
    weight: f64,
    stopped: bool,
    lines_drawn: u64,
}

struct CpuCanvas {
    width: u16,
    height: u16,
    /// Everything rasterized so far, premultiplied.
    surface: Arc<vello_cpu::Pixmap>,
    ctx: vello_cpu::RenderContext,
    /// Fills recorded in `ctx` since the last present.
    pending: usize,
}

impl CpuCanvas {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            surface: Arc::new(vello_cpu::Pixmap::new(width, height)),
            ctx: vello_cpu::RenderContext::new(width, height),
            pending: 0,
        }
    }

    fn full_rect(&self) -> vello_cpu::kurbo::Rect {
        vello_cpu::kurbo::Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    /// Rasterize pending fills onto the surface and restart the context from it.
    fn present(&mut self) {
        if self.pending == 0 {
            return;
        }
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        self.surface = Arc::new(pixmap);

        self.ctx.reset();
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::clone(&self.surface)),
            sampler: vello_cpu::peniko::ImageSampler {
                quality: vello_cpu::peniko::ImageQuality::Low,
                ..Default::default()
            },
        });
        let rect = self.full_rect();
        self.ctx.fill_rect(&rect);
        self.pending = 0;
    }
}

impl Default for CpuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuBackend {
    pub fn new() -> Self {
        Self {
            canvas: None,
            transform: TransformState::default(),
            stroke: StrokeRgba::new(0.0, 0.0, 0.0, 255.0),
            weight: 1.0,
            stopped: false,
            lines_drawn: 0,
        }
    }

    pub fn lines_drawn(&self) -> u64 {
        self.lines_drawn
    }

    /// Fills waiting for the next present. Zero right after every frame.
    pub fn pending_fills(&self) -> usize {
        self.canvas.as_ref().map_or(0, |c| c.pending)
    }

    fn canvas_mut(&mut self) -> WeaveResult<&mut CpuCanvas> {
        self.canvas
            .as_mut()
            .ok_or_else(|| WeaveError::render("canvas was not initialized"))
    }

    /// Rasterize everything drawn so far into premultiplied RGBA8.
    pub fn snapshot(&mut self) -> WeaveResult<FrameRGBA> {
        let canvas = self.canvas_mut()?;
        canvas.present();
        Ok(FrameRGBA {
            width: u32::from(canvas.width),
            height: u32::from(canvas.height),
            data: canvas.surface.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl GraphicsBackend for CpuBackend {
    fn init_canvas(&mut self, canvas: Canvas) -> WeaveResult<()> {
        let canvas = Canvas::new(canvas.width, canvas.height)?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| WeaveError::render("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| WeaveError::render("canvas height exceeds u16"))?;
        self.canvas = Some(CpuCanvas::new(width, height));
        self.transform.reset();
        self.stopped = false;
        self.lines_drawn = 0;
        Ok(())
    }

    fn set_background(&mut self, gray: u8) -> WeaveResult<()> {
        let canvas = self.canvas_mut()?;
        // Discard earlier strokes; they would be fully covered anyway.
        canvas.ctx.reset();
        canvas.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        canvas
            .ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(gray, gray, gray, 255));
        let rect = canvas.full_rect();
        canvas.ctx.fill_rect(&rect);
        canvas.pending += 1;
        Ok(())
    }

    fn reset_transform(&mut self) {
        self.transform.reset();
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform.translate(kurbo::Vec2::new(dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.transform.rotate(radians);
    }

    fn set_stroke(&mut self, r: f64, g: f64, b: f64, alpha: f64) {
        self.stroke = StrokeRgba::new(r, g, b, alpha);
    }

    fn set_stroke_weight(&mut self, px: f64) {
        self.weight = px;
    }

    fn draw_line(&mut self, from: Point, to: Point) -> WeaveResult<()> {
        let outline = line_outline(from, to, self.weight);
        let affine = self.transform.affine();
        let [r, g, b, a] = self.stroke.to_rgba8();

        let canvas = self.canvas_mut()?;
        canvas.ctx.set_transform(affine_to_cpu(affine));
        canvas
            .ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        canvas.ctx.fill_path(&bezpath_to_cpu(&outline));
        canvas.pending += 1;
        self.lines_drawn += 1;
        Ok(())
    }

    fn end_frame(&mut self) -> WeaveResult<()> {
        self.canvas_mut()?.present();
        Ok(())
    }

    fn request_stop(&mut self) {
        self.stopped = true;
    }

    fn stop_requested(&self) -> bool {
        self.stopped
    }
}

/// Fillable outline of a round-capped line of width `weight`.
fn line_outline(from: Point, to: Point, weight: f64) -> BezPath {
    let mut centerline = BezPath::new();
    centerline.move_to(from);
    centerline.line_to(to);
    let style = Stroke::new(weight).with_caps(Cap::Round).with_join(Join::Round);
    kurbo::stroke(centerline.iter(), &style, &StrokeOpts::default(), STROKE_TOLERANCE)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
