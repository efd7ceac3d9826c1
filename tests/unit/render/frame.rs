use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::{
    foundation::core::Canvas,
    render::{
        plan::DrawCommand,
        recording::{BackendCall, RecordingBackend},
    },
};

fn setup(start: u64, max_frames: u64) -> (FrameRenderer, AnimationState, RecordingBackend) {
    let config = SketchConfig {
        start_frame: FrameIndex(start),
        max_frames,
        ..SketchConfig::default()
    };
    let state = AnimationState::from_config(&config);
    let mut backend = RecordingBackend::new();
    backend.init_canvas(config.canvas).unwrap();
    (FrameRenderer::new(config).unwrap(), state, backend)
}

fn drawn_seeds(backend: &RecordingBackend) -> usize {
    backend
        .commands()
        .filter(|c| matches!(c, DrawCommand::ResetTransform))
        .count()
}

#[test]
fn renders_frames_until_counter_exceeds_max() {
    let (renderer, mut state, mut backend) = setup(1, 3);
    let mut rng = StdRng::seed_from_u64(0);

    assert_eq!(
        renderer.render_frame(&mut state, &mut backend, &mut rng).unwrap(),
        FrameStatus::Continue
    );
    assert_eq!(
        renderer.render_frame(&mut state, &mut backend, &mut rng).unwrap(),
        FrameStatus::Continue
    );
    assert!(!backend.stop_requested());
    assert_eq!(
        renderer.render_frame(&mut state, &mut backend, &mut rng).unwrap(),
        FrameStatus::Stop
    );
    assert!(backend.stop_requested());
    assert_eq!(state.frame(), FrameIndex(4));
    assert_eq!(drawn_seeds(&backend), 3);

    // Further calls are no-ops.
    let calls = backend.calls().len();
    assert_eq!(
        renderer.render_frame(&mut state, &mut backend, &mut rng).unwrap(),
        FrameStatus::Stop
    );
    assert_eq!(backend.calls().len(), calls);
}

#[test]
fn frame_zero_start_is_floored_to_one() {
    let (renderer, mut state, mut backend) = setup(0, 2);
    assert_eq!(state.frame(), FrameIndex(1));
    let mut rng = StdRng::seed_from_u64(0);
    renderer
        .render_frame(&mut state, &mut backend, &mut rng)
        .unwrap();
    // Seed 1 draws a single segment.
    assert_eq!(backend.lines().len(), 1);
}

#[test]
fn background_is_repainted_once_per_run() {
    let (renderer, mut state, mut backend) = setup(1, 5);
    let mut rng = StdRng::seed_from_u64(0);
    assert!(!state.started());
    while renderer
        .render_frame(&mut state, &mut backend, &mut rng)
        .unwrap()
        == FrameStatus::Continue
    {}
    assert!(state.started());
    assert!(state.is_stopped());
    let backgrounds = backend
        .calls()
        .iter()
        .filter(|c| matches!(c, BackendCall::SetBackground { gray: 51 }))
        .count();
    assert_eq!(backgrounds, 1);
    assert_eq!(drawn_seeds(&backend), 5);
}

#[test]
fn frame_six_draws_seven_chained_segments() {
    let (renderer, mut state, mut backend) = setup(6, 10);
    let mut rng = StdRng::seed_from_u64(11);
    renderer
        .render_frame(&mut state, &mut backend, &mut rng)
        .unwrap();

    let lines = backend.lines();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0].from, Canvas { width: 800, height: 600 }.bottom_center());
    for pair in lines.windows(2) {
        assert!((pair[0].to - pair[1].from).hypot() < 1e-9);
    }
    for line in lines {
        assert!(((line.to - line.from).hypot() - 12.0).abs() < 1e-9);
        assert_eq!(line.rgba[3], 10.0);
        assert_eq!(line.weight, 5.0);
    }
}

#[test]
fn every_frame_restarts_at_bottom_center() {
    let (renderer, mut state, mut backend) = setup(5, 9);
    let mut rng = StdRng::seed_from_u64(2);
    let mut starts = Vec::new();
    for _ in 0..4 {
        backend.clear();
        renderer
            .render_frame(&mut state, &mut backend, &mut rng)
            .unwrap();
        starts.push(backend.lines()[0].from);
    }
    for s in starts {
        assert!((s - crate::foundation::core::Point::new(400.0, 600.0)).hypot() < 1e-9);
    }
}

#[test]
fn invalid_configuration_is_rejected_at_construction() {
    let config = SketchConfig {
        max_frames: 0,
        ..SketchConfig::default()
    };
    assert!(FrameRenderer::new(config).is_err());
}

#[test]
fn counter_already_past_max_requests_stop_once() {
    let (renderer, _, mut backend) = setup(1, 5);
    let mut state = AnimationState::new(FrameIndex(10), 5);
    let mut rng = StdRng::seed_from_u64(0);

    for _ in 0..3 {
        assert_eq!(
            renderer.render_frame(&mut state, &mut backend, &mut rng).unwrap(),
            FrameStatus::Stop
        );
    }
    assert!(state.is_stopped());
    assert!(backend.stop_requested());
    assert_eq!(backend.commands().count(), 0);
    let stops = backend
        .calls()
        .iter()
        .filter(|c| matches!(c, BackendCall::RequestStop))
        .count();
    assert_eq!(stops, 1);
}

#[test]
fn each_rendered_frame_ends_with_end_frame() {
    let (renderer, mut state, mut backend) = setup(1, 4);
    let mut rng = StdRng::seed_from_u64(5);
    while renderer
        .render_frame(&mut state, &mut backend, &mut rng)
        .unwrap()
        == FrameStatus::Continue
    {}
    let calls = backend.calls();
    let ends = calls
        .iter()
        .filter(|c| matches!(c, BackendCall::EndFrame))
        .count();
    assert_eq!(ends, 4);
    // The last frame is closed before the stop request.
    assert_eq!(
        &calls[calls.len() - 2..],
        &[BackendCall::EndFrame, BackendCall::RequestStop]
    );
}
