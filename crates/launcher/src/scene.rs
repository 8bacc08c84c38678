use bevy::prelude::*;
use dimmer_shared::components::dimmer::LightDimmer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// What the demo room contains.
#[derive(Resource, Clone, Debug)]
pub struct DemoScene {
    pub dimmer: LightDimmer,
    /// Randomly placed point lights on top of the fixed ones.
    pub extra_lights: usize,
    pub seed: u64,
}

impl Default for DemoScene {
    fn default() -> Self {
        Self {
            dimmer: LightDimmer::default(),
            extra_lights: 0,
            seed: 42,
        }
    }
}

pub const CEILING_INTENSITY: f32 = 800_000.0;
pub const DESK_INTENSITY: f32 = 200_000.0;
pub const HALL_INTENSITY: f32 = 1_500_000.0;
pub const SUN_ILLUMINANCE: f32 = 2_000.0;

pub fn spawn_demo_lights(mut commands: Commands, scene: Res<DemoScene>) {
    commands.spawn((
        PointLight {
            intensity: CEILING_INTENSITY,
            range: 20.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 6.0, 0.0),
        Name::new("Ceiling"),
    ));

    commands.spawn((
        PointLight {
            color: Color::srgb(1.0, 0.8, 0.6),
            intensity: DESK_INTENSITY,
            range: 8.0,
            ..default()
        },
        Transform::from_xyz(3.0, 1.5, -2.0),
        Name::new("Desk"),
    ));

    commands.spawn((
        SpotLight {
            intensity: HALL_INTENSITY,
            range: 25.0,
            inner_angle: 0.3,
            outer_angle: 0.6,
            ..default()
        },
        Transform::from_xyz(-6.0, 5.0, 4.0).looking_at(Vec3::new(-6.0, 0.0, 0.0), Vec3::Y),
        Name::new("Hall"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: SUN_ILLUMINANCE,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Sun"),
    ));

    let mut rng = StdRng::seed_from_u64(scene.seed);
    for index in 0..scene.extra_lights {
        let position = Vec3::new(
            rng.random_range(-10.0..10.0),
            rng.random_range(0.5..4.0),
            rng.random_range(-10.0..10.0),
        );
        commands.spawn((
            PointLight {
                color: Color::hsl(rng.random_range(0.0..360.0), 0.7, 0.6),
                intensity: rng.random_range(50_000.0..400_000.0),
                range: 6.0,
                ..default()
            },
            Transform::from_translation(position),
            Name::new(format!("Extra{index}")),
        ));
    }

    commands.spawn((scene.dimmer.clone(), Name::new("LightDimmer")));
    info!(
        "🏠 Spawned demo room with {} extra lights",
        scene.extra_lights
    );
}

pub fn spawn_demo_props(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(-12.0, 9.0, 14.0).looking_at(Vec3::new(0.0, 1.0, 0.0), Vec3::Y),
        Name::new("DemoCamera"),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(30.0, 30.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.35, 0.38))),
        Name::new("Floor"),
    ));

    let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));
    let cube_material = materials.add(Color::srgb(0.8, 0.7, 0.6));
    for (x, z) in [(3.0, -2.0), (-4.0, 3.0), (1.0, 4.0), (-2.0, -4.0)] {
        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(cube_material.clone()),
            Transform::from_xyz(x, 0.5, z),
        ));
    }
}
