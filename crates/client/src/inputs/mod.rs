pub mod input;
pub mod window;

use bevy::prelude::{
    Added, App, Commands, Entity, IntoScheduleConfigs, Plugin, Query, Res, Update, Without, info,
};
use leafwing_input_manager::plugin::InputManagerPlugin;
use leafwing_input_manager::prelude::{ActionState, InputMap};

use dimmer_shared::components::dimmer::LightDimmer;
use dimmer_shared::dimming::DimmerSystems;
use dimmer_shared::input::DimAction;

use crate::inputs::input::{ToggleKey, get_dim_input_map};
use crate::inputs::window::handle_focus_change;

pub struct ClientInputPlugin;

impl Plugin for ClientInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(InputManagerPlugin::<DimAction>::default());
        app.init_resource::<ToggleKey>();
        app.add_systems(
            Update,
            (bind_toggle_key, handle_focus_change).before(DimmerSystems),
        );
    }
}

/// Gives every new dimmer without an input map the configured toggle key.
pub fn bind_toggle_key(
    mut commands: Commands,
    toggle_key: Res<ToggleKey>,
    dimmers: Query<Entity, (Added<LightDimmer>, Without<InputMap<DimAction>>)>,
) {
    for entity in dimmers.iter() {
        commands.entity(entity).insert((
            get_dim_input_map(toggle_key.0),
            ActionState::<DimAction>::default(),
        ));
        info!("⌨️ Bound {:?} to dimmer {:?}", toggle_key.0, entity);
    }
}
