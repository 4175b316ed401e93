//! Splash particle visuals.
//!
//! Every live particle owns one small sphere entity and its own additive
//! material, so its opacity can follow its life independently. Visual
//! resources are released in the frame the simulation reaps the particle.

use bevy::prelude::*;
use shared::water::{ParticleId, SplashParticle, WaterSimulation};
use std::collections::HashMap;

use crate::constants::SPLASH_COLOR;

#[derive(Component)]
pub struct SplashDroplet(pub ParticleId);

struct DropletVisual {
    entity: Entity,
    material: Handle<StandardMaterial>,
}

#[derive(Resource, Default)]
pub struct SplashVisuals {
    mesh: Option<Handle<Mesh>>,
    droplets: HashMap<ParticleId, DropletVisual>,
}

impl SplashVisuals {
    pub fn len(&self) -> usize {
        self.droplets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.droplets.is_empty()
    }
}

fn droplet_material(opacity: f32) -> StandardMaterial {
    StandardMaterial {
        base_color: SPLASH_COLOR.with_alpha(opacity),
        alpha_mode: AlphaMode::Add,
        unlit: true,
        ..default()
    }
}

fn droplet_transform(particle: &SplashParticle, radius: f32) -> Transform {
    Transform::from_translation(particle.position)
        .with_scale(Vec3::splat(radius * particle.scale.max(0.0)))
}

pub fn setup_splash_visuals(mut visuals: ResMut<SplashVisuals>, mut meshes: ResMut<Assets<Mesh>>) {
    visuals.mesh = Some(meshes.add(Sphere::new(1.0)));
}

/// Mirrors the particle system into entities.
pub fn sync_splash_visuals(
    mut commands: Commands,
    mut simulation: ResMut<WaterSimulation>,
    mut visuals: ResMut<SplashVisuals>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut transforms: Query<&mut Transform, With<SplashDroplet>>,
) {
    let SplashVisuals { mesh, droplets } = &mut *visuals;
    let Some(mesh) = mesh.clone() else {
        return;
    };

    for id in simulation.splashes_mut().drain_reaped() {
        if let Some(visual) = droplets.remove(&id) {
            commands.entity(visual.entity).despawn();
            materials.remove(&visual.material);
        }
    }

    let splashes = simulation.splashes();
    let radius = splashes.params().radius;

    for particle in splashes.particles() {
        match droplets.get(&particle.id) {
            Some(visual) => {
                if let Ok(mut transform) = transforms.get_mut(visual.entity) {
                    *transform = droplet_transform(particle, radius);
                }
                if let Some(material) = materials.get_mut(&visual.material) {
                    material.base_color.set_alpha(particle.opacity());
                }
            }
            None => {
                let material = materials.add(droplet_material(particle.opacity()));
                let entity = commands
                    .spawn((
                        SplashDroplet(particle.id),
                        Mesh3d(mesh.clone()),
                        MeshMaterial3d(material.clone()),
                        droplet_transform(particle, radius),
                    ))
                    .id();
                droplets.insert(particle.id, DropletVisual { entity, material });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_droplet_transform_follows_particle() {
        let particle = SplashParticle {
            id: 1,
            position: Vec3::new(1.0, 2.0, 3.0),
            velocity: Vec3::ZERO,
            life: 0.5,
            scale: 0.5,
        };
        let transform = droplet_transform(&particle, 0.2);
        assert_eq!(transform.translation, particle.position);
        assert!((transform.scale.x - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_droplet_material_is_additive() {
        let material = droplet_material(0.25);
        assert!(matches!(material.alpha_mode, AlphaMode::Add));
        assert!((material.base_color.alpha() - 0.25).abs() < 1e-6);
    }
}
