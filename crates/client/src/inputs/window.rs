use bevy::prelude::{MessageReader, Query};

use bevy::window::WindowFocused;
use leafwing_input_manager::prelude::ActionState;

use dimmer_shared::input::DimAction;

/// Keeps a key held while alt-tabbing from flipping the lights on refocus.
pub fn handle_focus_change(
    mut focus_events: MessageReader<WindowFocused>,
    mut action_query: Query<&mut ActionState<DimAction>>,
) {
    for event in focus_events.read() {
        for mut action_state in action_query.iter_mut() {
            action_state.release(&DimAction::ToggleLights);

            if event.focused {
                if action_state.disabled() {
                    action_state.enable();
                }
            } else {
                action_state.disable();
            }
        }
    }
}
