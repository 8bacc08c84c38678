use bevy::prelude::*;
use bevy_inspector_egui::{bevy_egui::EguiPlugin, quick::WorldInspectorPlugin};
use dimmer_shared::components::dimmer::LightDimmer;
use dimmer_shared::controller::DimState;

pub struct ClientDebugPlugin {
    /// Also open the egui world inspector.
    pub inspector: bool,
}

impl Plugin for ClientDebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, debug_fading_lights);
        if self.inspector {
            app.add_plugins((EguiPlugin::default(), WorldInspectorPlugin::default()));
        }
    }
}

/// Debug system to visualize lights that are mid-fade
fn debug_fading_lights(
    dimmers: Query<&LightDimmer>,
    transforms: Query<&GlobalTransform>,
    mut gizmos: Gizmos,
) {
    for dimmer in dimmers.iter() {
        let color = match dimmer.state() {
            DimState::Dimmed => Color::srgb(0.2, 0.4, 1.0), // Blue
            DimState::Bright => Color::srgb(1.0, 0.85, 0.2), // Yellow
        };

        for (light, fade) in dimmer.controller().fades() {
            let Ok(transform) = transforms.get(light.entity) else {
                continue;
            };

            // Sphere shrinks as the fade completes
            let radius = 0.15 + 0.35 * (1.0 - fade.progress());
            gizmos.sphere(transform.translation(), radius, color);
        }
    }
}
