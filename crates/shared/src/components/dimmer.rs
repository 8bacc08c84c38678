use bevy::prelude::*;

use crate::controller::{DimState, LightDimController};
use crate::fade::{FadeDuration, FadeError};
use crate::lights::{LightKey, LightOverride};

/// Dims every light in the scene and brings them back, one fade per light.
///
/// Lives on its own host entity. Despawning that entity drops the running
/// fades with it.
#[derive(Component, Clone, Debug, Default)]
pub struct LightDimmer {
    controller: LightDimController<LightKey>,
    /// Dim targets that replace zero for specific lights.
    pub overrides: Vec<LightOverride>,
}

impl LightDimmer {
    pub fn new(fade_duration_secs: f32) -> Result<Self, FadeError> {
        Ok(Self::with_duration(FadeDuration::new(fade_duration_secs)?))
    }

    pub fn with_duration(fade_duration: FadeDuration) -> Self {
        Self {
            controller: LightDimController::new(fade_duration),
            overrides: Vec::new(),
        }
    }

    pub fn with_override(mut self, light_override: LightOverride) -> Self {
        self.overrides.push(light_override);
        self
    }

    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = LightOverride>) -> Self {
        self.overrides.extend(overrides);
        self
    }

    pub fn state(&self) -> DimState {
        self.controller.state()
    }

    pub fn is_dimmed(&self) -> bool {
        self.controller.state().is_dimmed()
    }

    pub fn controller(&self) -> &LightDimController<LightKey> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut LightDimController<LightKey> {
        &mut self.controller
    }
}
