use rand::Rng;

use crate::{
    config::sketch::SketchConfig,
    foundation::core::FrameIndex,
    foundation::error::WeaveResult,
    render::{backend::GraphicsBackend, passes::execute_plan, plan::plan_frame},
};

/// Driver-owned animation progress. The only state that survives from one frame to the next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationState {
    frame: FrameIndex,
    max_frames: u64,
    started: bool,
    stopped: bool,
}

impl AnimationState {
    /// `start` is floored at 1, the smallest valid sequence seed.
    pub fn new(start: FrameIndex, max_frames: u64) -> Self {
        Self {
            frame: start.floored(),
            max_frames,
            started: false,
            stopped: false,
        }
    }

    pub fn from_config(config: &SketchConfig) -> Self {
        Self::new(config.start_frame, config.max_frames)
    }

    /// Frame that the next call to [`FrameRenderer::render_frame`] will draw.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    pub fn max_frames(&self) -> u64 {
        self.max_frames
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    fn exhausted(&self) -> bool {
        self.frame.0 > self.max_frames
    }
}

/// What the driver should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stop,
}

/// Per-frame scheduler: plans the frame's polyline and issues it to a [`GraphicsBackend`].
#[derive(Clone, Debug)]
pub struct FrameRenderer {
    config: SketchConfig,
}

impl FrameRenderer {
    pub fn new(config: SketchConfig) -> WeaveResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }

    /// Draw the frame at `state.frame()` and advance the counter.
    ///
    /// The first call of a run repaints the background once. When the counter passes
    /// `max_frames` (or already starts past it) the backend is asked to stop, once, and
    /// [`FrameStatus::Stop`] is returned; calls after that draw nothing.
    #[tracing::instrument(skip_all, fields(frame = state.frame.0))]
    pub fn render_frame<R: Rng + ?Sized>(
        &self,
        state: &mut AnimationState,
        backend: &mut dyn GraphicsBackend,
        rng: &mut R,
    ) -> WeaveResult<FrameStatus> {
        if state.stopped {
            tracing::debug!("render_frame called after stop");
            return Ok(FrameStatus::Stop);
        }
        if state.exhausted() {
            state.stopped = true;
            backend.request_stop();
            tracing::info!(max_frames = state.max_frames, "no frames left to draw");
            return Ok(FrameStatus::Stop);
        }

        if !state.started {
            backend.set_background(self.config.background)?;
            state.started = true;
        }

        let frame = state.frame;
        let plan = plan_frame(&self.config, frame, rng)?;
        execute_plan(backend, &plan)?;
        backend.end_frame()?;
        tracing::debug!(segments = plan.segment_count(), "rendered frame");

        state.frame = frame.next();
        if state.exhausted() || frame.0 == u64::MAX {
            state.stopped = true;
            backend.request_stop();
            tracing::info!(last_frame = frame.0, "animation finished");
            return Ok(FrameStatus::Stop);
        }
        Ok(FrameStatus::Continue)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
