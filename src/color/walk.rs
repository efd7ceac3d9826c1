use rand::Rng;

use crate::foundation::error::{WeaveError, WeaveResult};

/// Upper end of the nominal channel range.
pub const CHANNEL_MAX: f64 = 255.0;

/// How each channel's step magnitude is chosen when a walk is created.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepMode {
    /// Every channel uses the same step.
    Fixed { step: f64 },
    /// Each channel draws its own step once, uniformly from `(0, max]`.
    Uniform { max: f64 },
}

impl StepMode {
    fn upper(self) -> f64 {
        match self {
            Self::Fixed { step } => step,
            Self::Uniform { max } => max,
        }
    }
}

/// Initial direction of each channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionInit {
    #[default]
    Advancing,
    Receding,
    /// Each channel flips a fair coin.
    Random,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorWalkConfig {
    pub step: StepMode,
    pub direction: DirectionInit,
}

impl Default for ColorWalkConfig {
    fn default() -> Self {
        Self {
            step: StepMode::Fixed { step: 10.0 },
            direction: DirectionInit::Advancing,
        }
    }
}

impl ColorWalkConfig {
    /// The one-step overshoot bound only holds for steps in `(0, CHANNEL_MAX]`.
    pub fn validate(&self) -> WeaveResult<()> {
        let s = self.step.upper();
        if !s.is_finite() || s <= 0.0 || s > CHANNEL_MAX {
            return Err(WeaveError::validation(format!(
                "color step magnitude must be in (0, {CHANNEL_MAX}], got {s}"
            )));
        }
        Ok(())
    }
}

/// One color channel of the walk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelState {
    pub value: f64,
    pub step: f64,
    pub advancing: bool,
}

impl ChannelState {
    pub fn new(value: f64, step: f64, advancing: bool) -> Self {
        Self {
            value,
            step,
            advancing,
        }
    }

    /// Move one step, then pick the direction for the next step from the new value.
    ///
    /// The flip happens one step before the boundary would be crossed, with the threshold
    /// depending on this channel's own step.
    pub fn advance(&mut self) {
        if self.advancing {
            self.value += self.step;
            self.advancing = self.value < CHANNEL_MAX - self.step;
        } else {
            self.value -= self.step;
            self.advancing = self.value < self.step;
        }
    }

    fn random<R: Rng + ?Sized>(config: &ColorWalkConfig, rng: &mut R) -> Self {
        let value = rng.gen_range(0.0..=CHANNEL_MAX);
        let step = match config.step {
            StepMode::Fixed { step } => step,
            // gen::<f64>() is in [0, 1), so this lands in (0, max].
            StepMode::Uniform { max } => max * (1.0 - rng.r#gen::<f64>()),
        };
        let advancing = match config.direction {
            DirectionInit::Advancing => true,
            DirectionInit::Receding => false,
            DirectionInit::Random => rng.r#gen::<bool>(),
        };
        Self::new(value, step, advancing)
    }
}

/// Infinite generator of slowly drifting RGB triples.
///
/// The first triple is the seed drawn at construction; every later triple applies one
/// [`ChannelState::advance`] to each channel independently. Values are never clamped: starting
/// from `[0, 255]` with `step <= 255`, a channel stays within `[-step, 255 + step]`.
#[derive(Clone, Debug)]
pub struct ColorWalk {
    channels: [ChannelState; 3],
    seeded: bool,
}

impl ColorWalk {
    pub fn new<R: Rng + ?Sized>(config: &ColorWalkConfig, rng: &mut R) -> Self {
        let r = ChannelState::random(config, rng);
        let g = ChannelState::random(config, rng);
        let b = ChannelState::random(config, rng);
        Self::from_channels([r, g, b])
    }

    pub fn from_channels(channels: [ChannelState; 3]) -> Self {
        Self {
            channels,
            seeded: false,
        }
    }

    /// Current red, green and blue channel states.
    pub fn channels(&self) -> &[ChannelState; 3] {
        &self.channels
    }

    /// Next `[r, g, b]` triple. The walk never ends.
    pub fn sample(&mut self) -> [f64; 3] {
        if self.seeded {
            for ch in &mut self.channels {
                ch.advance();
            }
        } else {
            self.seeded = true;
        }
        let [r, g, b] = self.channels;
        [r.value, g.value, b.value]
    }
}

impl Iterator for ColorWalk {
    type Item = [f64; 3];

    fn next(&mut self) -> Option<[f64; 3]> {
        Some(self.sample())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/color/walk.rs"]
mod tests;
