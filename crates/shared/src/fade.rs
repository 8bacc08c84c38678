//! Linear intensity fades driven by a frame clock.

use bevy::prelude::Reflect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum FadeError {
    #[error("fade duration must be a finite number of seconds greater than zero, got {0}")]
    InvalidDuration(f32),
}

/// Length of a fade in seconds. Always finite and strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Reflect, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct FadeDuration(f32);

impl FadeDuration {
    pub fn new(secs: f32) -> Result<Self, FadeError> {
        if secs.is_finite() && secs > 0.0 {
            Ok(Self(secs))
        } else {
            Err(FadeError::InvalidDuration(secs))
        }
    }

    pub fn secs(self) -> f32 {
        self.0
    }
}

impl Default for FadeDuration {
    fn default() -> Self {
        Self(crate::DEFAULT_FADE_DURATION_SECS)
    }
}

impl TryFrom<f32> for FadeDuration {
    type Error = FadeError;

    fn try_from(secs: f32) -> Result<Self, Self::Error> {
        Self::new(secs)
    }
}

impl From<FadeDuration> for f32 {
    fn from(duration: FadeDuration) -> Self {
        duration.0
    }
}

/// Intensity of a fade from `start` to `target` after `elapsed` seconds.
///
/// Returns `target` exactly once `elapsed >= duration` and never leaves the
/// `[start, target]` interval.
pub fn fade_value(start: f32, target: f32, elapsed: f32, duration: FadeDuration) -> f32 {
    if elapsed >= duration.secs() {
        return target;
    }

    let t = (elapsed / duration.secs()).clamp(0.0, 1.0);
    let value = start + (target - start) * t;
    // min/max rather than clamp: a NaN bound must not panic
    value.max(start.min(target)).min(start.max(target))
}

/// Result of advancing a [`FadeTask`] by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeStep {
    pub value: f32,
    pub finished: bool,
}

/// One light's fade toward a target intensity.
///
/// The start intensity is read on the first [`FadeTask::step`], so a fade
/// created while another one is still moving the light picks up from wherever
/// the light actually is when it begins.
#[derive(Clone, Debug, PartialEq, Reflect)]
pub struct FadeTask {
    start: Option<f32>,
    target: f32,
    duration: FadeDuration,
    elapsed: f32,
}

impl FadeTask {
    pub fn new(target: f32, duration: FadeDuration) -> Self {
        Self {
            start: None,
            target,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn start(&self) -> Option<f32> {
        self.start
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> FadeDuration {
        self.duration
    }

    /// Fraction of the fade completed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration.secs()).clamp(0.0, 1.0)
    }

    pub fn step(&mut self, current: f32, dt: f32) -> FadeStep {
        let start = *self.start.get_or_insert(current);
        self.elapsed += dt.max(0.0);

        FadeStep {
            value: fade_value(start, self.target, self.elapsed, self.duration),
            finished: self.elapsed >= self.duration.secs(),
        }
    }
}
