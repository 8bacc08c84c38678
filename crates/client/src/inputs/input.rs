use bevy::prelude::{KeyCode, Resource};

use leafwing_input_manager::prelude::InputMap;

use dimmer_shared::input::DimAction;

/// Key that flips the dimmers spawned without their own input map.
#[derive(Resource, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleKey(pub KeyCode);

impl Default for ToggleKey {
    fn default() -> Self {
        Self(KeyCode::Space)
    }
}

pub fn get_dim_input_map(key: KeyCode) -> InputMap<DimAction> {
    InputMap::<DimAction>::default().with(DimAction::ToggleLights, key)
}
