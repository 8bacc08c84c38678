pub mod debug;
pub mod inputs;


use bevy::prelude::{App, Plugin};

use crate::inputs::ClientInputPlugin;

/// Keyboard side of the dimmer: binds the toggle key and feeds leafwing.
pub struct ClientDimmerPlugin;

impl Plugin for ClientDimmerPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ClientInputPlugin);
    }
}
