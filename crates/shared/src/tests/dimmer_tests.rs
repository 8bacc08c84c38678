//! App-level tests for the dimmer plugin

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::DimmerPlugin;
use crate::components::dimmer::LightDimmer;
use crate::controller::DimState;
use crate::dimming::{DimStateChanged, ToggleLights};
use crate::lights::{LightKey, LightOverride, OverrideTarget};

const FRAME: Duration = Duration::from_millis(50);

fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(DimmerPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app
}

/// Runs enough frames for `secs` of game time to pass, plus slack.
fn run_for_secs(app: &mut App, secs: f32) {
    let frames = (secs / FRAME.as_secs_f32()).ceil() as usize + 3;
    for _ in 0..frames {
        app.update();
    }
}

fn spawn_point_light(app: &mut App, name: &str, intensity: f32) -> Entity {
    app.world_mut()
        .spawn((
            PointLight {
                intensity,
                ..default()
            },
            Name::new(name.to_string()),
        ))
        .id()
}

fn point_intensity(app: &App, entity: Entity) -> f32 {
    app.world()
        .get::<PointLight>(entity)
        .expect("light should exist")
        .intensity
}

fn toggle(app: &mut App) {
    app.world_mut().write_message(ToggleLights::all());
}

#[test]
fn test_snapshot_on_dimmer_spawn() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 1.0);
    let b = spawn_point_light(&mut app, "B", 2.0);
    let dimmer = app.world_mut().spawn(LightDimmer::default()).id();

    app.update();

    let dimmer = app.world().get::<LightDimmer>(dimmer).unwrap();
    assert_eq!(dimmer.controller().originals().len(), 2);
    assert_eq!(
        dimmer.controller().original_intensity(LightKey::point(a)),
        Some(1.0)
    );
    assert_eq!(
        dimmer.controller().original_intensity(LightKey::point(b)),
        Some(2.0)
    );
    assert_eq!(dimmer.state(), DimState::Bright);
}

#[test]
fn test_dim_and_restore_with_override() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 1.0);
    let b = spawn_point_light(&mut app, "B", 2.0);
    let dimmer = app
        .world_mut()
        .spawn(LightDimmer::default().with_override(LightOverride::entity(b, 0.5)))
        .id();
    app.update();

    toggle(&mut app);
    run_for_secs(&mut app, 1.0);

    assert_eq!(point_intensity(&app, a), 0.0);
    assert_eq!(point_intensity(&app, b), 0.5);
    assert!(app.world().get::<LightDimmer>(dimmer).unwrap().is_dimmed());

    toggle(&mut app);
    run_for_secs(&mut app, 1.0);

    assert_eq!(point_intensity(&app, a), 1.0);
    assert_eq!(point_intensity(&app, b), 2.0);
    assert_eq!(
        app.world().get::<LightDimmer>(dimmer).unwrap().state(),
        DimState::Bright
    );
}

#[test]
fn test_fade_takes_the_configured_duration() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 1.0);
    app.world_mut().spawn(LightDimmer::default());
    app.update();

    toggle(&mut app);
    for _ in 0..10 {
        app.update();
    }

    let halfway = point_intensity(&app, a);
    assert!(
        halfway > 0.0 && halfway < 1.0,
        "light should be mid-fade after half a second, got {halfway}"
    );
}

#[test]
fn test_named_override_matches_light_name() {
    let mut app = create_test_app();
    let desk = spawn_point_light(&mut app, "Desk", 3.0);
    let hall = spawn_point_light(&mut app, "Hall", 3.0);
    app.world_mut()
        .spawn(LightDimmer::default().with_override(LightOverride::named("Desk", 1.25)));
    app.update();

    toggle(&mut app);
    run_for_secs(&mut app, 1.0);

    assert_eq!(point_intensity(&app, desk), 1.25);
    assert_eq!(point_intensity(&app, hall), 0.0);
}

#[test]
fn test_spot_and_directional_lights_fade() {
    let mut app = create_test_app();
    let spot = app
        .world_mut()
        .spawn(SpotLight {
            intensity: 400.0,
            ..default()
        })
        .id();
    let sun = app
        .world_mut()
        .spawn(DirectionalLight {
            illuminance: 1000.0,
            ..default()
        })
        .id();
    app.world_mut()
        .spawn(LightDimmer::default().with_override(LightOverride::entity(sun, 100.0)));
    app.update();

    toggle(&mut app);
    run_for_secs(&mut app, 1.0);

    assert_eq!(app.world().get::<SpotLight>(spot).unwrap().intensity, 0.0);
    assert_eq!(
        app.world().get::<DirectionalLight>(sun).unwrap().illuminance,
        100.0
    );

    toggle(&mut app);
    run_for_secs(&mut app, 1.0);

    assert_eq!(app.world().get::<SpotLight>(spot).unwrap().intensity, 400.0);
    assert_eq!(
        app.world().get::<DirectionalLight>(sun).unwrap().illuminance,
        1000.0
    );
}

#[test]
fn test_light_added_later_is_dimmed_but_not_restored() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 1.0);
    app.world_mut().spawn(LightDimmer::default());
    app.update();

    let late = spawn_point_light(&mut app, "Late", 5.0);
    toggle(&mut app);
    run_for_secs(&mut app, 1.0);
    assert_eq!(point_intensity(&app, late), 0.0);

    toggle(&mut app);
    run_for_secs(&mut app, 1.0);

    assert_eq!(point_intensity(&app, a), 1.0);
    assert_eq!(
        point_intensity(&app, late),
        0.0,
        "light without a recorded original stays dimmed"
    );
}

#[test]
fn test_despawned_light_mid_fade_does_not_stop_others() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 1.0);
    let b = spawn_point_light(&mut app, "B", 1.0);
    let dimmer = app.world_mut().spawn(LightDimmer::default()).id();
    app.update();

    toggle(&mut app);
    for _ in 0..5 {
        app.update();
    }
    app.world_mut().despawn(a);
    run_for_secs(&mut app, 1.0);

    assert_eq!(point_intensity(&app, b), 0.0);
    let dimmer = app.world().get::<LightDimmer>(dimmer).unwrap();
    assert!(!dimmer.controller().is_fading());
}

#[test]
fn test_despawning_dimmer_cancels_its_fades() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 1.0);
    let dimmer = app.world_mut().spawn(LightDimmer::default()).id();
    app.update();

    toggle(&mut app);
    for _ in 0..10 {
        app.update();
    }
    app.world_mut().despawn(dimmer);
    let frozen = point_intensity(&app, a);

    run_for_secs(&mut app, 1.0);

    assert_eq!(point_intensity(&app, a), frozen);
    assert!(frozen > 0.0, "fade should have been interrupted");
}

#[test]
fn test_retrigger_restarts_from_mid_fade_value() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 2.0);
    let dimmer = app.world_mut().spawn(LightDimmer::default()).id();
    app.update();

    toggle(&mut app);
    for _ in 0..10 {
        app.update();
    }
    let mid = point_intensity(&app, a);
    assert!(mid > 0.0 && mid < 2.0);

    toggle(&mut app);
    app.update();

    let controller = app.world().get::<LightDimmer>(dimmer).unwrap().controller();
    assert_eq!(controller.active_fades(), 1, "old fade must be replaced");
    assert_eq!(controller.fade_target(LightKey::point(a)), Some(2.0));
    assert!(point_intensity(&app, a) >= mid);

    run_for_secs(&mut app, 1.0);
    assert_eq!(point_intensity(&app, a), 2.0);
}

#[test]
fn test_targeted_toggle_only_flips_that_dimmer() {
    let mut app = create_test_app();
    spawn_point_light(&mut app, "A", 1.0);
    let first = app.world_mut().spawn(LightDimmer::default()).id();
    let second = app.world_mut().spawn(LightDimmer::default()).id();
    app.update();

    app.world_mut().write_message(ToggleLights::dimmer(second));
    app.update();

    assert!(!app.world().get::<LightDimmer>(first).unwrap().is_dimmed());
    assert!(app.world().get::<LightDimmer>(second).unwrap().is_dimmed());
}

fn fade_owners(app: &App, dimmers: &[Entity], light: Entity) -> Vec<(Entity, f32)> {
    dimmers
        .iter()
        .filter_map(|dimmer| {
            app.world()
                .get::<LightDimmer>(*dimmer)
                .and_then(|d| d.controller().fade_target(LightKey::point(light)))
                .map(|target| (*dimmer, target))
        })
        .collect()
}

#[test]
fn test_two_dimmers_never_fade_the_same_light_together() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 1.0);
    let b = spawn_point_light(&mut app, "B", 2.0);
    let first = app
        .world_mut()
        .spawn(LightDimmer::default().with_override(LightOverride::entity(a, 0.5)))
        .id();
    let second = app.world_mut().spawn(LightDimmer::default()).id();
    app.update();

    toggle(&mut app);
    app.update();

    let dimmers = [first, second];
    for light in [a, b] {
        assert_eq!(
            fade_owners(&app, &dimmers, light).len(),
            1,
            "exactly one dimmer should be fading {light:?}"
        );
    }
    let (_, target_a) = fade_owners(&app, &dimmers, a)[0];

    run_for_secs(&mut app, 1.0);

    assert_eq!(point_intensity(&app, a), target_a);
    assert_eq!(point_intensity(&app, b), 0.0);
    for dimmer in dimmers {
        assert!(app.world().get::<LightDimmer>(dimmer).unwrap().is_dimmed());
    }
}

#[test]
fn test_later_toggle_takes_over_running_fades() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 2.0);
    let first = app.world_mut().spawn(LightDimmer::default()).id();
    let second = app
        .world_mut()
        .spawn(LightDimmer::default().with_override(LightOverride::entity(a, 1.0)))
        .id();
    app.update();

    app.world_mut().write_message(ToggleLights::dimmer(first));
    app.update();
    assert_eq!(fade_owners(&app, &[first, second], a), vec![(first, 0.0)]);

    app.world_mut().write_message(ToggleLights::dimmer(second));
    app.update();
    assert_eq!(fade_owners(&app, &[first, second], a), vec![(second, 1.0)]);

    run_for_secs(&mut app, 1.0);
    assert_eq!(point_intensity(&app, a), 1.0);
}

#[test]
fn test_dimmer_spawned_while_dimmed_keeps_true_originals() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 1.0);
    app.world_mut().spawn(LightDimmer::default());
    app.update();

    toggle(&mut app);
    run_for_secs(&mut app, 1.0);
    assert_eq!(point_intensity(&app, a), 0.0);

    let late = app.world_mut().spawn(LightDimmer::default()).id();
    app.update();
    assert_eq!(
        app.world()
            .get::<LightDimmer>(late)
            .unwrap()
            .controller()
            .original_intensity(LightKey::point(a)),
        Some(1.0)
    );

    app.world_mut().write_message(ToggleLights::dimmer(late));
    app.update();
    app.world_mut().write_message(ToggleLights::dimmer(late));
    run_for_secs(&mut app, 1.0);
    assert_eq!(point_intensity(&app, a), 1.0);
}

#[test]
fn test_override_without_target_dims_to_a_quarter() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 2.0);
    let b = spawn_point_light(&mut app, "B", 2.0);
    app.world_mut().spawn(
        LightDimmer::default().with_override(LightOverride::new(OverrideTarget::Entity(a))),
    );
    app.update();

    toggle(&mut app);
    run_for_secs(&mut app, 1.0);

    assert_eq!(point_intensity(&app, a), 0.25);
    assert_eq!(point_intensity(&app, b), 0.0);
}

#[test]
fn test_non_finite_override_target_falls_back_to_zero() {
    let mut app = create_test_app();
    let a = spawn_point_light(&mut app, "A", 1.0);
    let dimmer = app
        .world_mut()
        .spawn(LightDimmer::default().with_override(LightOverride::entity(a, f32::NAN)))
        .id();
    app.update();

    toggle(&mut app);
    run_for_secs(&mut app, 1.0);
    assert_eq!(point_intensity(&app, a), 0.0);

    // Restore and dim again within one frame
    toggle(&mut app);
    toggle(&mut app);
    run_for_secs(&mut app, 1.0);

    assert_eq!(point_intensity(&app, a), 0.0);
    assert!(app.world().get::<LightDimmer>(dimmer).unwrap().is_dimmed());
}

#[test]
fn test_state_change_messages_are_written() {
    let mut app = create_test_app();
    spawn_point_light(&mut app, "A", 1.0);
    spawn_point_light(&mut app, "B", 1.0);
    let dimmer = app.world_mut().spawn(LightDimmer::default()).id();
    app.update();

    toggle(&mut app);
    app.update();

    let messages = app.world().resource::<Messages<DimStateChanged>>();
    let mut cursor = messages.get_cursor();
    let changes: Vec<DimStateChanged> = cursor.read(messages).copied().collect();

    assert_eq!(
        changes,
        vec![DimStateChanged {
            dimmer,
            state: DimState::Dimmed,
            fades_started: 2,
        }]
    );
}

#[test]
fn test_dimmer_in_empty_scene() {
    let mut app = create_test_app();
    let dimmer = app.world_mut().spawn(LightDimmer::default()).id();
    app.update();

    toggle(&mut app);
    app.update();

    let dimmer = app.world().get::<LightDimmer>(dimmer).unwrap();
    assert!(dimmer.controller().originals().is_empty());
    assert!(dimmer.is_dimmed());
    assert!(!dimmer.controller().is_fading());
}
