use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn within_overshoot(walk: &ColorWalk) -> bool {
    walk.channels()
        .iter()
        .all(|c| c.value >= -c.step && c.value <= CHANNEL_MAX + c.step)
}

#[test]
fn first_sample_is_the_seed() {
    let mut walk = ColorWalk::from_channels([
        ChannelState::new(10.0, 10.0, true),
        ChannelState::new(100.0, 10.0, false),
        ChannelState::new(250.0, 10.0, true),
    ]);
    assert_eq!(walk.next(), Some([10.0, 100.0, 250.0]));
    assert_eq!(walk.next(), Some([20.0, 90.0, 260.0]));
}

#[test]
fn flips_one_step_before_the_upper_boundary() {
    let mut ch = ChannelState::new(230.0, 10.0, true);
    ch.advance();
    assert_eq!(ch.value, 240.0);
    assert!(ch.advancing);
    ch.advance();
    assert_eq!(ch.value, 250.0);
    // 250 is not below 255 - 10.
    assert!(!ch.advancing);
    ch.advance();
    assert_eq!(ch.value, 240.0);
    assert!(!ch.advancing);
}

#[test]
fn flips_one_step_before_the_lower_boundary() {
    let mut ch = ChannelState::new(25.0, 10.0, false);
    ch.advance();
    assert_eq!(ch.value, 15.0);
    assert!(!ch.advancing);
    ch.advance();
    assert_eq!(ch.value, 5.0);
    assert!(ch.advancing);
    ch.advance();
    assert_eq!(ch.value, 15.0);
}

#[test]
fn channels_do_not_share_direction_flags() {
    // Blue turns around while red keeps climbing.
    let mut walk = ColorWalk::from_channels([
        ChannelState::new(0.0, 10.0, true),
        ChannelState::new(0.0, 10.0, true),
        ChannelState::new(240.0, 10.0, true),
    ]);
    walk.next();
    walk.next();
    let [r, g, b] = *walk.channels();
    assert!(r.advancing);
    assert!(g.advancing);
    assert!(!b.advancing);
    assert_eq!(walk.next(), Some([20.0, 20.0, 240.0]));
}

#[test]
fn stays_within_one_step_of_the_range() {
    for seed in 0..32u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let config = ColorWalkConfig {
            step: StepMode::Uniform { max: 60.0 },
            direction: DirectionInit::Random,
        };
        let mut walk = ColorWalk::new(&config, &mut rng);
        for _ in 0..2_000 {
            walk.next();
            assert!(within_overshoot(&walk), "seed {seed}: {:?}", walk.channels());
        }
    }
}

#[test]
fn extreme_seeds_overshoot_by_at_most_one_step() {
    let mut walk = ColorWalk::from_channels([
        ChannelState::new(255.0, 255.0, true),
        ChannelState::new(0.0, 255.0, false),
        ChannelState::new(0.0, 1.0, false),
    ]);
    for _ in 0..1_000 {
        walk.next();
        assert!(within_overshoot(&walk), "{:?}", walk.channels());
    }
}

#[test]
fn direction_only_changes_between_samples() {
    let mut walk = ColorWalk::from_channels([
        ChannelState::new(200.0, 17.0, true),
        ChannelState::new(30.0, 9.0, false),
        ChannelState::new(128.0, 40.0, true),
    ]);
    walk.next();
    for _ in 0..500 {
        let before = *walk.channels();
        let sample = walk.next().unwrap();
        let after = *walk.channels();
        for i in 0..3 {
            // Each sample moves by exactly one step in the direction held before it.
            let expected = if before[i].advancing {
                before[i].value + before[i].step
            } else {
                before[i].value - before[i].step
            };
            assert_eq!(sample[i], expected);
            assert_eq!(after[i].value, sample[i]);
        }
    }
}

#[test]
fn seeded_rng_reproduces_walk() {
    let config = ColorWalkConfig::default();
    let a: Vec<[f64; 3]> = ColorWalk::new(&config, &mut StdRng::seed_from_u64(9))
        .take(64)
        .collect();
    let b: Vec<[f64; 3]> = ColorWalk::new(&config, &mut StdRng::seed_from_u64(9))
        .take(64)
        .collect();
    assert_eq!(a, b);
    for v in a[0] {
        assert!((0.0..=CHANNEL_MAX).contains(&v));
    }
}

#[test]
fn uniform_steps_are_positive_and_bounded() {
    let config = ColorWalkConfig {
        step: StepMode::Uniform { max: 10.0 },
        direction: DirectionInit::Receding,
    };
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let walk = ColorWalk::new(&config, &mut rng);
        for c in walk.channels() {
            assert!(c.step > 0.0 && c.step <= 10.0);
            assert!(!c.advancing);
        }
    }
}

#[test]
fn validate_rejects_out_of_range_steps() {
    assert!(ColorWalkConfig::default().validate().is_ok());
    for step in [0.0, -1.0, 256.0, f64::NAN] {
        let c = ColorWalkConfig {
            step: StepMode::Fixed { step },
            ..ColorWalkConfig::default()
        };
        assert!(c.validate().is_err(), "step {step}");
    }
}
