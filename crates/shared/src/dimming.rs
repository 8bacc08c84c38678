use bevy::prelude::*;
use leafwing_input_manager::prelude::ActionState;

use crate::components::dimmer::LightDimmer;
use crate::controller::DimState;
use crate::input::DimAction;
use crate::lights::{LightKey, SceneLightQuery};

pub struct DimmingPlugin;

impl Plugin for DimmingPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ToggleLights>()
            .add_message::<DimStateChanged>()
            .add_systems(
                Update,
                (
                    snapshot_original_intensities,
                    handle_dim_toggle,
                    advance_light_fades,
                )
                    .chain()
                    .in_set(DimmerSystems),
            );
    }
}

#[derive(SystemSet, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DimmerSystems;

/// Request to flip a dimmer, same as pressing its key.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct ToggleLights {
    /// `None` toggles every dimmer.
    pub dimmer: Option<Entity>,
}

impl ToggleLights {
    pub fn all() -> Self {
        Self { dimmer: None }
    }

    pub fn dimmer(entity: Entity) -> Self {
        Self {
            dimmer: Some(entity),
        }
    }
}

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct DimStateChanged {
    pub dimmer: Entity,
    pub state: DimState,
    pub fades_started: usize,
}

/// Records the starting intensity of every light when a dimmer appears.
///
/// Lights another dimmer already knows keep that dimmer's original, so a
/// dimmer spawned while the scene is dimmed still restores to full brightness.
pub fn snapshot_original_intensities(
    mut dimmers: Query<(Entity, &mut LightDimmer)>,
    lights: SceneLightQuery,
) {
    let added: Vec<Entity> = dimmers
        .iter_mut()
        .filter(|(_, dimmer)| dimmer.is_added())
        .map(|(entity, _)| entity)
        .collect();
    if added.is_empty() {
        return;
    }

    let known: Vec<(LightKey, f32)> = dimmers
        .iter()
        .filter(|(entity, _)| !added.contains(entity))
        .flat_map(|(_, dimmer)| {
            dimmer
                .controller()
                .originals()
                .iter()
                .map(|(light, intensity)| (*light, *intensity))
                .collect::<Vec<_>>()
        })
        .collect();

    for entity in added {
        let Ok((_, mut dimmer)) = dimmers.get_mut(entity) else {
            continue;
        };
        let controller = dimmer.controller_mut();
        let adopted = controller.adopt_originals(known.iter().copied());
        let recorded = controller.snapshot(&lights);
        info!(
            "💡 Dimmer {:?} recorded original intensity of {} lights ({} shared)",
            entity,
            adopted + recorded,
            adopted
        );
    }
}

/// Flips dimmers on key presses and [`ToggleLights`] requests.
///
/// A light is faded by one dimmer at a time: the dimmer toggled last takes
/// over every light it starts fading from the others.
pub fn handle_dim_toggle(
    mut dimmers: Query<(Entity, &mut LightDimmer, Option<&ActionState<DimAction>>)>,
    mut requests: MessageReader<ToggleLights>,
    mut state_changes: MessageWriter<DimStateChanged>,
    lights: SceneLightQuery,
) {
    let requests: Vec<ToggleLights> = requests.read().copied().collect();

    let toggles: Vec<(Entity, usize)> = dimmers
        .iter()
        .filter_map(|(entity, _, action_state)| {
            let pressed = action_state
                .is_some_and(|action_state| action_state.just_pressed(&DimAction::ToggleLights));
            let requested = requests
                .iter()
                .filter(|request| request.dimmer.is_none_or(|target| target == entity))
                .count();
            let count = usize::from(pressed) + requested;
            (count > 0).then_some((entity, count))
        })
        .collect();

    for (entity, count) in toggles {
        let claimed: Vec<LightKey> = {
            let Ok((_, mut dimmer, _)) = dimmers.get_mut(entity) else {
                continue;
            };

            for _ in 0..count {
                let overrides = lights.resolve_overrides(&dimmer.overrides);
                let outcome = dimmer.controller_mut().toggle(&lights, &overrides);

                info!(
                    "💡 Lights {} ({} fades, {} skipped)",
                    if outcome.state.is_dimmed() { "DIMMING" } else { "RESTORING" },
                    outcome.fades_started,
                    outcome.skipped
                );

                state_changes.write(DimStateChanged {
                    dimmer: entity,
                    state: outcome.state,
                    fades_started: outcome.fades_started,
                });
            }

            dimmer.controller().fades().map(|(light, _)| *light).collect()
        };

        for (other, mut dimmer, _) in dimmers.iter_mut() {
            if other == entity {
                continue;
            }
            let released = claimed
                .iter()
                .filter(|light| dimmer.controller_mut().cancel(**light))
                .count();
            if released > 0 {
                debug!(
                    "Dimmer {:?} handed {} fades over to {:?}",
                    other, released, entity
                );
            }
        }
    }
}

pub fn advance_light_fades(
    time: Res<Time>,
    mut dimmers: Query<&mut LightDimmer>,
    mut lights: SceneLightQuery,
) {
    let dt = time.delta_secs();

    for mut dimmer in dimmers.iter_mut() {
        if !dimmer.controller().is_fading() {
            continue;
        }

        let summary = dimmer.controller_mut().tick(&mut lights, dt);
        if summary.completed > 0 && !dimmer.controller().is_fading() {
            debug!(
                "Dimmer settled in {:?} after {} fades completed this frame",
                dimmer.state(),
                summary.completed
            );
        }
    }
}
