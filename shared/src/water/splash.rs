//! Short-lived droplets thrown up by strong impacts.
//!
//! Particles are integrated with per-frame constants scaled by
//! `dt / reference_dt`. Dead particles are removed in the tick they die and
//! their ids are queued so the renderer can free their visuals.

use std::f32::consts::TAU;

use bevy::math::Vec3;
use bevy_log::warn;
use rand::Rng;

use super::config::SplashParams;
use crate::constants::SPLASH_SPAWN_OFFSET;

/// Stable identifier of a particle, unique for the lifetime of the system.
pub type ParticleId = u64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashParticle {
    pub id: ParticleId,
    pub position: Vec3,
    /// Displacement per reference frame
    pub velocity: Vec3,
    /// 1 at spawn, dead at 0
    pub life: f32,
    /// Visual size multiplier
    pub scale: f32,
}

impl SplashParticle {
    /// Transparency follows the remaining life.
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.life.clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct SplashParticleSystem {
    particles: Vec<SplashParticle>,
    reaped: Vec<ParticleId>,
    params: SplashParams,
    next_id: ParticleId,
}

impl Default for SplashParticleSystem {
    fn default() -> Self {
        Self::new(SplashParams::default())
    }
}

impl SplashParticleSystem {
    pub fn new(params: SplashParams) -> Self {
        Self {
            particles: Vec::new(),
            reaped: Vec::new(),
            params,
            next_id: 0,
        }
    }

    pub fn params(&self) -> &SplashParams {
        &self.params
    }

    /// Picks a burst size in `[min_count, min_count + count_spread)`.
    pub fn burst_size<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let spread = if self.params.count_spread > 0 {
            rng.gen_range(0..self.params.count_spread)
        } else {
            0
        };
        (self.params.min_count + spread) as usize
    }

    /// Spawns up to `count` particles just above `position`.
    /// Returns how many were actually created.
    pub fn spawn<R: Rng + ?Sized>(&mut self, position: Vec3, count: usize, rng: &mut R) -> usize {
        let room = self.params.max_particles.saturating_sub(self.particles.len());
        if room < count {
            warn!(
                "Splash particle cap reached ({}), dropping {} particles",
                self.params.max_particles,
                count - room
            );
        }
        let count = count.min(room);
        let origin = position + SPLASH_SPAWN_OFFSET;

        for _ in 0..count {
            let angle = rng.gen_range(0.0..TAU);
            let speed = self.params.horizontal_speed.sample(rng);
            let velocity = Vec3::new(
                angle.cos() * speed,
                self.params.upward_speed.sample(rng),
                angle.sin() * speed,
            );
            self.particles.push(SplashParticle {
                id: self.next_id,
                position: origin,
                velocity,
                life: 1.0,
                scale: 1.0,
            });
            self.next_id += 1;
        }
        count
    }

    /// Integrates every particle and removes the dead ones.
    pub fn tick(&mut self, dt: f32) {
        let p = self.params;
        let frames = dt / p.reference_dt;
        let scale_factor = p.scale_decay.powf(frames);
        let reaped = &mut self.reaped;

        self.particles.retain_mut(|particle| {
            particle.velocity.y -= p.gravity * frames;
            particle.position += particle.velocity * frames;
            particle.life -= p.life_decay * frames;
            particle.scale *= scale_factor;

            let alive = particle.life > 0.0 && particle.position.y >= p.floor;
            if !alive {
                reaped.push(particle.id);
            }
            alive
        });
    }

    /// Ids of particles removed since the last call.
    pub fn drain_reaped(&mut self) -> std::vec::Drain<'_, ParticleId> {
        self.reaped.drain(..)
    }

    /// Removes every particle, queuing all of them as reaped.
    pub fn clear(&mut self) {
        self.reaped.extend(self.particles.drain(..).map(|p| p.id));
    }

    pub fn particles(&self) -> &[SplashParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::REFERENCE_FRAME_DT;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(1234)
    }

    #[test]
    fn test_spawn_initial_state() {
        let mut system = SplashParticleSystem::default();
        let created = system.spawn(Vec3::new(3.0, 0.0, 7.0), 20, &mut rng());
        assert_eq!(created, 20);
        for p in system.particles() {
            assert_eq!(p.life, 1.0);
            assert_eq!(p.position, Vec3::new(3.0, 0.2, 7.0));
            assert!(p.velocity.y >= 0.3 && p.velocity.y < 0.8);
            let horizontal = (p.velocity.x.powi(2) + p.velocity.z.powi(2)).sqrt();
            assert!((0.1 - 1e-5..0.4 + 1e-5).contains(&horizontal));
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut system = SplashParticleSystem::default();
        let mut rng = rng();
        system.spawn(Vec3::ZERO, 10, &mut rng);
        system.spawn(Vec3::ONE, 10, &mut rng);
        let mut ids: Vec<_> = system.particles().iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_burst_size_range() {
        let system = SplashParticleSystem::default();
        let mut rng = rng();
        for _ in 0..500 {
            let n = system.burst_size(&mut rng);
            assert!((15..=25).contains(&n));
        }
    }

    #[test]
    fn test_life_strictly_decreases_until_removed() {
        let mut system = SplashParticleSystem::default();
        system.spawn(Vec3::ZERO, 1, &mut rng());
        let id = system.particles()[0].id;
        let mut previous = 1.0;
        let mut ticks = 0;

        loop {
            system.tick(REFERENCE_FRAME_DT);
            ticks += 1;
            match system.particles().iter().find(|p| p.id == id) {
                Some(p) => {
                    assert!(p.life < previous, "life must strictly decrease");
                    assert!(p.life > 0.0, "dead particle still in the active set");
                    previous = p.life;
                }
                None => break,
            }
            assert!(ticks <= 60, "particle outlived its life");
        }
        assert_eq!(system.drain_reaped().collect::<Vec<_>>(), vec![id]);
    }

    #[test]
    fn test_particles_fall_and_are_reaped_below_floor() {
        let mut system = SplashParticleSystem::new(SplashParams {
            life_decay: 0.0001,
            ..SplashParams::default()
        });
        system.spawn(Vec3::ZERO, 5, &mut rng());
        for _ in 0..200 {
            system.tick(REFERENCE_FRAME_DT);
        }
        assert!(system.is_empty(), "gravity should pull everything below the floor");
        assert_eq!(system.drain_reaped().count(), 5);
    }

    #[test]
    fn test_particles_rise_then_fall() {
        let mut system = SplashParticleSystem::default();
        system.spawn(Vec3::ZERO, 1, &mut rng());
        let y0 = system.particles()[0].position.y;
        system.tick(REFERENCE_FRAME_DT);
        let p = system.particles()[0];
        assert!(p.position.y > y0);
        assert!(p.scale < 1.0);
        assert!((p.opacity() - p.life).abs() < 1e-6);
    }

    #[test]
    fn test_capacity_is_enforced() {
        let mut system = SplashParticleSystem::new(SplashParams {
            max_particles: 30,
            ..SplashParams::default()
        });
        let mut rng = rng();
        assert_eq!(system.spawn(Vec3::ZERO, 20, &mut rng), 20);
        assert_eq!(system.spawn(Vec3::ZERO, 20, &mut rng), 10);
        assert_eq!(system.len(), 30);
    }

    #[test]
    fn test_no_growth_under_repeated_bursts() {
        let mut system = SplashParticleSystem::default();
        let mut rng = rng();
        for _ in 0..1000 {
            let n = system.burst_size(&mut rng);
            system.spawn(Vec3::ZERO, n, &mut rng);
            system.tick(REFERENCE_FRAME_DT);
            system.drain_reaped().for_each(drop);
        }
        // Each particle lives at most 50 frames
        assert!(system.len() <= 50 * 25);
    }
}
