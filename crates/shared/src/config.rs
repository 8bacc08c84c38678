//! JSON configuration for a [`LightDimmer`].
//!
//! ```json
//! {
//!   "fade_duration_secs": 1.0,
//!   "overrides": [
//!     { "light": "Lamp", "target_intensity": 0.25 }
//!   ]
//! }
//! ```

use std::path::Path;

use bevy::prelude::Reflect;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::dimmer::LightDimmer;
use crate::fade::{FadeDuration, FadeError};
use crate::lights::LightOverride;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read dimmer config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse dimmer config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidDuration(#[from] FadeError),
    #[error("override #{index} for light {light:?} has a non-finite target intensity")]
    InvalidOverride { index: usize, light: String },
}

#[derive(Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct DimmerConfig {
    pub fade_duration_secs: f32,
    pub overrides: Vec<NamedOverride>,
}

impl Default for DimmerConfig {
    fn default() -> Self {
        Self {
            fade_duration_secs: crate::DEFAULT_FADE_DURATION_SECS,
            overrides: Vec::new(),
        }
    }
}

/// Override matched against the light's `Name`.
#[derive(Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
pub struct NamedOverride {
    pub light: String,
    #[serde(default = "default_override_intensity")]
    pub target_intensity: f32,
}

fn default_override_intensity() -> f32 {
    crate::DEFAULT_OVERRIDE_INTENSITY
}

impl DimmerConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        FadeDuration::new(self.fade_duration_secs)?;

        for (index, entry) in self.overrides.iter().enumerate() {
            if !entry.target_intensity.is_finite() {
                return Err(ConfigError::InvalidOverride {
                    index,
                    light: entry.light.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn build_dimmer(&self) -> Result<LightDimmer, ConfigError> {
        self.validate()?;

        let dimmer = LightDimmer::new(self.fade_duration_secs)?.with_overrides(
            self.overrides
                .iter()
                .map(|entry| LightOverride::named(entry.light.clone(), entry.target_intensity)),
        );
        Ok(dimmer)
    }
}
