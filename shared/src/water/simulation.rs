use bevy::math::{Vec2, Vec3, Vec4};
use bevy_ecs::resource::Resource;
use bevy_log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::clock::SimulationClock;
use super::config::WaterConfig;
use super::grid::{SurfaceGrid, SurfaceVertex};
use super::input::{InputController, InputOutcome, InputTargets, PointerEvent, SurfaceRaycast};
use super::ripples::RippleRegistry;
use super::shading::{ShadingInput, ShadingModel};
use super::splash::SplashParticleSystem;
use super::surface::{HeightFieldSynthesizer, SurfaceSample};

/// Owns every piece of water state. Systems reach it as a single resource.
#[derive(Resource)]
pub struct WaterSimulation {
    synthesizer: HeightFieldSynthesizer,
    ripples: RippleRegistry,
    splashes: SplashParticleSystem,
    clock: SimulationClock,
    shading: ShadingModel,
    input: InputController,
    grid: SurfaceGrid,
    config: WaterConfig,
    seed: u64,
    rng: StdRng,
}

impl WaterSimulation {
    pub fn from_config(config: &WaterConfig, seed: u64) -> Self {
        let config = &config.clone().sanitized();
        Self {
            synthesizer: HeightFieldSynthesizer::from_config(config),
            ripples: RippleRegistry::new(config.ripple_decay),
            splashes: SplashParticleSystem::new(config.splash),
            clock: SimulationClock::new(config.clock),
            shading: ShadingModel::new(config.shading),
            input: InputController::new(config.input),
            grid: SurfaceGrid::new(config.surface),
            config: config.clone(),
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Feeds one pointer event through the input state machine.
    pub fn handle_pointer<C>(&mut self, event: PointerEvent, raycast: &mut C) -> InputOutcome
    where
        C: SurfaceRaycast + ?Sized,
    {
        self.input.handle(
            event,
            raycast,
            InputTargets {
                ripples: &mut self.ripples,
                splashes: &mut self.splashes,
                rng: &mut self.rng,
            },
        )
    }

    /// Advances the simulation by one frame and returns the applied step.
    pub fn step(&mut self, measured_dt: Option<f32>) -> f32 {
        let dt = self.clock.advance(measured_dt);
        self.ripples.tick(dt);
        self.splashes.tick(dt);
        dt
    }

    /// Height and normal at a world point for the current time and ripples.
    pub fn sample_surface(&self, x: f32, z: f32) -> SurfaceSample {
        self.synthesizer
            .sample(x, z, self.clock.elapsed(), self.ripples.snapshot())
    }

    /// Surface color at a point seen from `camera_position`.
    pub fn shade_vertex(&self, base_position: Vec3, uv: Vec2, camera_position: Vec3) -> Vec4 {
        let sample = self.sample_surface(base_position.x, base_position.z);
        let displaced = base_position + Vec3::Y * sample.height;
        self.shading.shade(&ShadingInput {
            height: sample.height,
            normal: sample.normal,
            view_dir: (displaced - camera_position).normalize_or(Vec3::NEG_Y),
            uv,
            time: self.clock.elapsed(),
        })
    }

    /// Evaluates the whole grid on the CPU.
    pub fn evaluate_surface(&self, out: &mut Vec<SurfaceVertex>, camera_position: Vec3) {
        self.grid.evaluate_into(
            out,
            &self.synthesizer,
            &self.shading,
            self.ripples.snapshot(),
            self.clock.elapsed(),
            camera_position,
        );
    }

    /// Viewport changed. Simulation state is left alone.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.shading.set_resolution(width, height);
    }

    /// Back to the state right after construction, keeping the resolution.
    pub fn restart(&mut self) {
        info!("Restarting water simulation (seed {})", self.seed);
        self.ripples.clear();
        self.splashes.clear();
        self.clock.reset();
        self.input.reset();
        self.rng = StdRng::seed_from_u64(self.seed);
    }

    pub fn time(&self) -> f32 {
        self.clock.elapsed()
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn ripples(&self) -> &RippleRegistry {
        &self.ripples
    }

    pub fn splashes(&self) -> &SplashParticleSystem {
        &self.splashes
    }

    pub fn splashes_mut(&mut self) -> &mut SplashParticleSystem {
        &mut self.splashes
    }

    pub fn shading(&self) -> &ShadingModel {
        &self.shading
    }

    pub fn grid(&self) -> &SurfaceGrid {
        &self.grid
    }

    pub fn config(&self) -> &WaterConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAX_RIPPLES, REFERENCE_FRAME_DT};
    use crate::water::config::{ClockMode, SurfaceParams};
    use std::time::Duration;

    fn simulation() -> WaterSimulation {
        WaterSimulation::from_config(&WaterConfig::default(), 99)
    }

    fn click(sim: &mut WaterSimulation, x: f32, z: f32, at_ms: u64) -> InputOutcome {
        let mut hit = |_ndc: Vec2| Some(Vec3::new(x, 0.0, z));
        let at = Duration::from_millis(at_ms);
        let outcome = sim.handle_pointer(PointerEvent::down(Vec2::ZERO, at), &mut hit);
        sim.handle_pointer(PointerEvent::up(Vec2::ZERO, at), &mut hit);
        outcome
    }

    #[test]
    fn test_step_advances_fixed_clock() {
        let mut sim = simulation();
        for _ in 0..10 {
            assert_eq!(sim.step(Some(0.5)), REFERENCE_FRAME_DT);
        }
        assert!((sim.time() - 0.16).abs() < 1e-5);
    }

    #[test]
    fn test_measured_clock_from_config() {
        let mut config = WaterConfig::default();
        config.clock.mode = ClockMode::Measured;
        let mut sim = WaterSimulation::from_config(&config, 1);
        assert_eq!(sim.step(Some(0.03)), 0.03);
    }

    #[test]
    fn test_click_then_ripple_decays_away() {
        let mut sim = simulation();
        assert!(click(&mut sim, 3.0, 7.0, 0).injected());
        assert_eq!(sim.ripples().active_count(), 1);

        // 0.98^n < 0.01 / 1.2 after roughly 240 frames
        for _ in 0..400 {
            sim.step(None);
        }
        assert_eq!(sim.ripples().active_count(), 0);
        assert!(sim.splashes().is_empty(), "particles should be gone by now");
    }

    #[test]
    fn test_ripples_fade_even_without_configured_decay() {
        let mut config = WaterConfig::default();
        config.ripple_decay.decay = 1.0;
        let mut sim = WaterSimulation::from_config(&config, 1);
        assert!(click(&mut sim, 0.0, 0.0, 0).injected());

        // 0.999^n < 0.01 / 1.2 after roughly 4800 frames
        for _ in 0..6000 {
            sim.step(None);
        }
        assert_eq!(sim.ripples().active_count(), 0);
    }

    #[test]
    fn test_ripple_raises_local_height() {
        let mut sim = simulation();
        let before = sim.sample_surface(3.0, 7.0).height;
        click(&mut sim, 3.0, 7.0, 0);
        sim.step(None);
        let after = sim.sample_surface(3.0, 7.0).height;
        assert_ne!(before, after);
    }

    #[test]
    fn test_registry_never_exceeds_capacity() {
        let mut sim = simulation();
        for i in 0..40 {
            click(&mut sim, i as f32, 0.0, i * 60);
            sim.step(None);
            assert!(sim.ripples().active_count() <= MAX_RIPPLES);
        }
    }

    #[test]
    fn test_resize_keeps_state() {
        let mut sim = simulation();
        click(&mut sim, 0.0, 0.0, 0);
        sim.step(None);
        let time = sim.time();
        let ripples = *sim.ripples().snapshot();

        sim.resize(800.0, 600.0);
        assert_eq!(sim.shading().resolution(), Vec2::new(800.0, 600.0));
        assert_eq!(sim.time(), time);
        assert_eq!(*sim.ripples().snapshot(), ripples);
    }

    #[test]
    fn test_restart_is_deterministic() {
        let mut sim = simulation();
        let first = click(&mut sim, 1.0, 2.0, 0);
        for _ in 0..5 {
            sim.step(None);
        }
        sim.restart();
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.ripples().active_count(), 0);
        assert!(sim.splashes().is_empty());
        assert_eq!(click(&mut sim, 1.0, 2.0, 0), first);
    }

    #[test]
    fn test_shade_vertex_matches_grid_evaluation() {
        let config = WaterConfig {
            surface: SurfaceParams {
                size: 20.0,
                segments: 4,
            },
            ..WaterConfig::default()
        };
        let mut sim = WaterSimulation::from_config(&config, 5);
        click(&mut sim, 2.0, -2.0, 0);
        sim.step(None);

        let camera = Vec3::new(0.0, 30.0, 60.0);
        let mut vertices = Vec::new();
        sim.evaluate_surface(&mut vertices, camera);
        for (v, (base, uv)) in vertices.iter().zip(sim.grid().vertices()) {
            assert_eq!(v.base_position, base);
            assert_eq!(v.color, sim.shade_vertex(base, uv, camera));
        }
    }
}
