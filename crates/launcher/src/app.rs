use bevy::log::LogPlugin;
use bevy::prelude::{
    App, DefaultPlugins, KeyCode, MinimalPlugins, PluginGroup, Startup, Window, WindowPlugin,
    default,
};
use bevy::window::PresentMode;
use dimmer_client::debug::ClientDebugPlugin;
use dimmer_client::ClientDimmerPlugin;
use dimmer_client::inputs::input::ToggleKey;
use dimmer_shared::DimmerPlugin;

use crate::scene::{DemoScene, spawn_demo_lights, spawn_demo_props};

#[derive(Clone, Debug)]
pub struct LaunchSettings {
    pub scene: DemoScene,
    pub toggle_key: KeyCode,
    pub headless: bool,
    pub inspector: bool,
    pub log_filter: String,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            scene: DemoScene::default(),
            toggle_key: KeyCode::Space,
            headless: false,
            inspector: false,
            log_filter: "info,wgpu=error,naga=warn".to_string(),
        }
    }
}

pub fn create_dimmer_app(settings: LaunchSettings) -> App {
    let mut app = App::new();

    app.insert_resource(settings.scene);

    if settings.headless {
        // No LogPlugin here; tests build several apps and the global logger can only be set once
        app.add_plugins(MinimalPlugins);
    } else {
        app.add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Light Toggle".to_string(),
                        resolution: (1280, 720).into(),
                        present_mode: PresentMode::AutoVsync,
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: settings.log_filter,
                    ..default()
                }),
        );
        app.insert_resource(ToggleKey(settings.toggle_key));
        app.add_plugins(ClientDimmerPlugin);
        app.add_plugins(ClientDebugPlugin {
            inspector: settings.inspector,
        });
        app.add_systems(Startup, spawn_demo_props);
    }

    app.add_plugins(DimmerPlugin);
    app.add_systems(Startup, spawn_demo_lights);

    app
}
