//! Pond scenery around the water surface: sky, lights, sand, rocks and plants.

use std::f32::consts::{PI, TAU};

use bevy::{pbr::DistanceFog, prelude::*};
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::water::WaterSimulation;

use crate::constants::*;

/// Half the side of the square rocks and plants are scattered over.
const SCATTER_HALF_EXTENT: f32 = 70.0;

#[derive(Component)]
pub struct PondProp;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropPlacement {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl PropPlacement {
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}

fn scatter_xz<R: Rng>(rng: &mut R) -> (f32, f32) {
    (
        rng.gen_range(-SCATTER_HALF_EXTENT..SCATTER_HALF_EXTENT),
        rng.gen_range(-SCATTER_HALF_EXTENT..SCATTER_HALF_EXTENT),
    )
}

/// Flattened boulders resting on the pond floor.
pub fn rock_placements<R: Rng>(rng: &mut R, count: usize) -> Vec<PropPlacement> {
    (0..count)
        .map(|_| {
            let scale = rng.gen_range(0.5..2.0);
            let (x, z) = scatter_xz(rng);
            let y = POND_FLOOR_DEPTH + 0.5 + rng.gen_range(0.0..2.0);
            PropPlacement {
                translation: Vec3::new(x, y, z),
                rotation: Quat::from_euler(
                    EulerRot::XYZ,
                    rng.gen_range(0.0..PI),
                    rng.gen_range(0.0..PI),
                    rng.gen_range(0.0..PI),
                ),
                scale: Vec3::new(scale, scale * 0.7, scale),
            }
        })
        .collect()
}

/// Upright seaweed stalks, slightly bent.
pub fn plant_placements<R: Rng>(rng: &mut R, count: usize) -> Vec<PropPlacement> {
    (0..count)
        .map(|_| {
            let (x, z) = scatter_xz(rng);
            PropPlacement {
                translation: Vec3::new(x, POND_FLOOR_DEPTH + 1.5, z),
                rotation: Quat::from_euler(
                    EulerRot::XYZ,
                    rng.gen_range(-0.25..0.25),
                    rng.gen_range(0.0..TAU),
                    rng.gen_range(-0.25..0.25),
                ),
                scale: Vec3::new(1.0, rng.gen_range(1.0..2.0), 1.0),
            }
        })
        .collect()
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    simulation: Res<WaterSimulation>,
) {
    commands.insert_resource(ClearColor(SKY_COLOR));
    commands.insert_resource(AmbientLight {
        color: AMBIENT_COLOR,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            color: SUN_COLOR,
            illuminance: SUN_ILLUMINANCE,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(SUN_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            color: FILL_COLOR,
            illuminance: FILL_ILLUMINANCE,
            ..default()
        },
        Transform::from_translation(FILL_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let size = simulation.grid().size();
    commands.spawn((
        PondProp,
        Name::new("Pond floor"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(size, size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: SAND_COLOR,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, POND_FLOOR_DEPTH, 0.0),
    ));

    // Props get their own stream so the splash sequence does not depend on them
    let mut rng = StdRng::seed_from_u64(simulation.seed().rotate_left(17));

    let rock_mesh = meshes.add(Sphere::new(1.0).mesh().uv(6, 6));
    let rock_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.5, 0.5),
        perceptual_roughness: 0.9,
        ..default()
    });
    for placement in rock_placements(&mut rng, ROCK_COUNT) {
        commands.spawn((
            PondProp,
            Mesh3d(rock_mesh.clone()),
            MeshMaterial3d(rock_material.clone()),
            placement.transform(),
        ));
    }

    let plant_mesh = meshes.add(Cylinder::new(0.1, 3.0));
    let plant_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.098, 0.431, 0.114),
        perceptual_roughness: 0.8,
        ..default()
    });
    for placement in plant_placements(&mut rng, PLANT_COUNT) {
        commands.spawn((
            PondProp,
            Mesh3d(plant_mesh.clone()),
            MeshMaterial3d(plant_material.clone()),
            placement.transform(),
        ));
    }

    info!(
        "Pond scene ready: {} rocks, {} plants",
        ROCK_COUNT, PLANT_COUNT
    );
}

/// Distance fog matching the sky, attached to the main camera.
pub fn pond_fog() -> DistanceFog {
    DistanceFog {
        color: SKY_COLOR,
        falloff: FogFalloff::Linear {
            start: FOG_START,
            end: FOG_END,
        },
        ..default()
    }
}
