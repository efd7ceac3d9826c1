use crate::foundation::{
    core::{Canvas, Point},
    error::WeaveResult,
};

/// A rendered canvas as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Convert premultiplied pixels to straight alpha, as image encoders expect.
    pub fn into_straight(mut self) -> Self {
        if self.premultiplied {
            for px in self.data.chunks_exact_mut(4) {
                let a = u16::from(px[3]);
                if a == 0 {
                    px[..3].fill(0);
                    continue;
                }
                for c in &mut px[..3] {
                    let v = (u16::from(*c) * 255 + a / 2) / a;
                    *c = v.min(255) as u8;
                }
            }
            self.premultiplied = false;
        }
        self
    }
}

/// Drawing surface the frame renderer talks to.
///
/// Transform calls compose in the order issued, in the local frame (the same model as a canvas
/// `rotate`/`translate` stack). Lines are given in local coordinates.
pub trait GraphicsBackend {
    /// Called once by the driver before any frame.
    fn init_canvas(&mut self, canvas: Canvas) -> WeaveResult<()>;

    fn set_background(&mut self, gray: u8) -> WeaveResult<()>;

    fn reset_transform(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    fn rotate(&mut self, radians: f64);

    /// Straight RGBA stroke color; channels may overshoot `[0, 255]` slightly.
    fn set_stroke(&mut self, r: f64, g: f64, b: f64, alpha: f64);

    fn set_stroke_weight(&mut self, px: f64);

    fn draw_line(&mut self, from: Point, to: Point) -> WeaveResult<()>;

    /// Called once after every frame's commands have been issued.
    fn end_frame(&mut self) -> WeaveResult<()> {
        Ok(())
    }

    /// Ask the driver to stop after the current frame.
    fn request_stop(&mut self);

    fn stop_requested(&self) -> bool;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
