use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    foundation::error::WeaveResult,
    render::{
        backend::GraphicsBackend,
        frame::{AnimationState, FrameRenderer, FrameStatus},
    },
};

/// Counters reported by [`drive`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames_rendered: u64,
    pub stopped: bool,
}

/// RNG for a run: seeded when `seed` is set, otherwise from OS entropy.
pub fn rng_for_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Minimal animation loop: call the renderer until it reports stop or `frame_budget` calls
/// have been made.
///
/// Interactive drivers own their own loop and call [`FrameRenderer::render_frame`] once per
/// refresh; this one exists for offline rendering.
pub fn drive<R: Rng + ?Sized>(
    renderer: &FrameRenderer,
    state: &mut AnimationState,
    backend: &mut dyn GraphicsBackend,
    rng: &mut R,
    frame_budget: Option<u64>,
) -> WeaveResult<RunStats> {
    let mut stats = RunStats::default();
    while !state.is_stopped() && !backend.stop_requested() {
        if frame_budget.is_some_and(|max| stats.frames_rendered >= max) {
            break;
        }
        let first = state.frame();
        let status = renderer.render_frame(state, backend, rng)?;
        if state.frame() != first {
            stats.frames_rendered += 1;
        }
        if status == FrameStatus::Stop {
            break;
        }
    }
    stats.stopped = state.is_stopped();
    tracing::info!(
        frames = stats.frames_rendered,
        stopped = stats.stopped,
        "animation loop exited"
    );
    Ok(stats)
}
