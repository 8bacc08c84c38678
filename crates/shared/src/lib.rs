pub mod components;
pub mod config;
pub mod controller;
pub mod dimming;
pub mod fade;
pub mod input;
pub mod lights;

#[cfg(test)]
mod tests;

use bevy::prelude::{App, Plugin};

/// Seconds a dim or restore fade takes unless configured otherwise.
pub const DEFAULT_FADE_DURATION_SECS: f32 = 1.0;
/// Dim target of a [`lights::LightOverride`] created without an explicit one.
pub const DEFAULT_OVERRIDE_INTENSITY: f32 = 0.25;

pub struct DimmerPlugin;

impl Plugin for DimmerPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<input::DimAction>()
            .register_type::<controller::DimState>()
            .register_type::<config::DimmerConfig>();
        app.add_plugins(dimming::DimmingPlugin);
    }
}
