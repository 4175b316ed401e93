//! Tunable water parameters shared between the CPU simulation and the shader.
//!
//! Every value here was tuned by eye for the pond scene. They are defaults, not
//! physical truths, and can all be overridden from a RON file.

use std::time::Duration;

use bevy::math::Vec3;
use bevy_log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    MAX_RIPPLE_DECAY, MAX_SURFACE_SEGMENTS, REFERENCE_FRAME_DT, RIPPLE_EPSILON, SPLASH_FLOOR,
    SURFACE_SEGMENTS, SURFACE_SIZE,
};

/// Number of noise octaves summed into the base height (matches the shader).
pub const OCTAVE_COUNT: usize = 3;

/// One layer of the base height noise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveOctave {
    /// Peak height contributed by this layer
    pub amplitude: f32,
    /// Spatial frequency applied to the surface coordinates
    pub frequency: f32,
    /// Multiplier applied to simulation time
    pub time_scale: f32,
}

impl WaveOctave {
    pub const fn new(amplitude: f32, frequency: f32, time_scale: f32) -> Self {
        Self {
            amplitude,
            frequency,
            time_scale,
        }
    }
}

/// Large slow swells, medium waves, small ripples.
pub const DEFAULT_OCTAVES: [WaveOctave; OCTAVE_COUNT] = [
    WaveOctave::new(2.0, 0.01, 0.1),
    WaveOctave::new(1.0, 0.04, 0.3),
    WaveOctave::new(0.3, 0.1, 0.5),
];

/// Shape of the circular wave emitted by a ripple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleWaveParams {
    pub speed: f32,
    pub wave_length: f32,
    /// Distance at which a ripple stops contributing
    pub radius_cutoff: f32,
    /// Age at which a ripple stops contributing is `1 / time_decay_rate`
    pub time_decay_rate: f32,
    pub spread_factor: f32,
    /// Height per unit of impact
    pub amplitude_scale: f32,
}

impl Default for RippleWaveParams {
    fn default() -> Self {
        Self {
            speed: 5.0,
            wave_length: 4.0,
            radius_cutoff: 20.0,
            time_decay_rate: 0.5,
            spread_factor: 0.4,
            amplitude_scale: 2.0,
        }
    }
}

/// How fast ripple slots age and lose strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleDecayParams {
    /// Ripple age advances by `dt * age_rate` per tick
    pub age_rate: f32,
    /// Impact multiplier applied once per tick
    pub decay: f32,
    pub epsilon: f32,
}

impl Default for RippleDecayParams {
    fn default() -> Self {
        Self {
            age_rate: 3.0,
            decay: 0.98,
            epsilon: RIPPLE_EPSILON,
        }
    }
}

/// Noise sampled around each vertex to perturb the shading normal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalDetailParams {
    /// Central difference step
    pub epsilon: f32,
    pub frequency: f32,
    pub time_scale: f32,
}

impl Default for NormalDetailParams {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            frequency: 1.0,
            time_scale: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShadingParams {
    pub shallow_color: Vec3,
    pub deep_color: Vec3,
    pub sky_color: Vec3,
    /// Direction towards the sun, normalized on use
    pub sun_direction: Vec3,
    pub sun_color: Vec3,
    pub fresnel_power: f32,
    /// Fraction of the Fresnel term blended towards the sky color
    pub reflection_weight: f32,
    pub specular_power: f32,
    pub specular_intensity: f32,
    pub caustic_tint: Vec3,
    pub crest_low: f32,
    pub crest_high: f32,
    pub crest_intensity: f32,
    pub min_alpha: f32,
    pub alpha_fresnel: f32,
    pub max_alpha: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            shallow_color: Vec3::new(0.0, 0.5, 0.8),
            deep_color: Vec3::new(0.0, 0.05, 0.2),
            sky_color: Vec3::new(0.3, 0.6, 0.9),
            sun_direction: Vec3::new(0.5, 0.8, 0.3),
            sun_color: Vec3::ONE,
            fresnel_power: 3.0,
            reflection_weight: 0.5,
            specular_power: 100.0,
            specular_intensity: 0.8,
            caustic_tint: Vec3::new(0.5, 0.7, 1.0),
            crest_low: 0.4,
            crest_high: 0.5,
            crest_intensity: 0.3,
            min_alpha: 0.9,
            alpha_fresnel: 0.1,
            max_alpha: 0.98,
        }
    }
}

/// Half-open `[min, max)` range a random value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRange {
    pub min: f32,
    pub max: f32,
}

impl SampleRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Draws a value in the range. A degenerate range yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.gen_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Splash particle behaviour. Per-frame rates are expressed against
/// [`REFERENCE_FRAME_DT`] and scaled by the actual step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplashParams {
    /// Fewest particles in a burst
    pub min_count: u32,
    /// Bursts add `0..count_spread` particles on top of `min_count`
    pub count_spread: u32,
    pub horizontal_speed: SampleRange,
    pub upward_speed: SampleRange,
    pub gravity: f32,
    pub life_decay: f32,
    pub scale_decay: f32,
    pub floor: f32,
    pub max_particles: usize,
    /// Radius of a droplet sphere at scale 1
    pub radius: f32,
    pub reference_dt: f32,
}

impl Default for SplashParams {
    fn default() -> Self {
        Self {
            min_count: 15,
            count_spread: 10,
            horizontal_speed: SampleRange::new(0.1, 0.4),
            upward_speed: SampleRange::new(0.3, 0.8),
            gravity: 0.015,
            life_decay: 0.02,
            scale_decay: 0.98,
            floor: SPLASH_FLOOR,
            max_particles: 512,
            radius: 0.15,
            reference_dt: REFERENCE_FRAME_DT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputParams {
    /// Minimum spacing between a press injection and the previous injection
    pub press_interval_ms: u64,
    /// Minimum spacing between a drag injection and the previous injection
    pub drag_interval_ms: u64,
    pub strong_impact: SampleRange,
    pub light_impact: SampleRange,
}

impl InputParams {
    pub fn press_interval(&self) -> Duration {
        Duration::from_millis(self.press_interval_ms)
    }

    pub fn drag_interval(&self) -> Duration {
        Duration::from_millis(self.drag_interval_ms)
    }
}

impl Default for InputParams {
    fn default() -> Self {
        Self {
            press_interval_ms: 50,
            drag_interval_ms: 100,
            strong_impact: SampleRange::new(0.8, 1.2),
            light_impact: SampleRange::new(0.3, 0.5),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClockMode {
    /// Advance by `fixed_dt` every frame regardless of frame time
    #[default]
    Fixed,
    /// Advance by the host's measured frame time, clamped
    Measured,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockParams {
    pub mode: ClockMode,
    pub fixed_dt: f32,
    pub min_dt: f32,
    pub max_dt: f32,
}

impl Default for ClockParams {
    fn default() -> Self {
        Self {
            mode: ClockMode::Fixed,
            fixed_dt: REFERENCE_FRAME_DT,
            min_dt: 0.001,
            max_dt: 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceParams {
    pub size: f32,
    pub segments: u32,
}

impl Default for SurfaceParams {
    fn default() -> Self {
        Self {
            size: SURFACE_SIZE,
            segments: SURFACE_SEGMENTS,
        }
    }
}

/// Complete water configuration.
/// Can be loaded from and written to a RON file by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterConfig {
    pub octaves: [WaveOctave; OCTAVE_COUNT],
    pub ripple_wave: RippleWaveParams,
    pub ripple_decay: RippleDecayParams,
    pub normal_detail: NormalDetailParams,
    pub shading: ShadingParams,
    pub splash: SplashParams,
    pub input: InputParams,
    pub clock: ClockParams,
    pub surface: SurfaceParams,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self {
            octaves: DEFAULT_OCTAVES,
            ripple_wave: RippleWaveParams::default(),
            ripple_decay: RippleDecayParams::default(),
            normal_detail: NormalDetailParams::default(),
            shading: ShadingParams::default(),
            splash: SplashParams::default(),
            input: InputParams::default(),
            clock: ClockParams::default(),
            surface: SurfaceParams::default(),
        }
    }
}

impl WaterConfig {
    /// Peak absolute height the noise octaves alone can reach.
    pub fn max_base_height(&self) -> f32 {
        self.octaves.iter().map(|o| o.amplitude.abs()).sum()
    }

    /// Pulls values that would break the simulation back into range.
    ///
    /// Ripple decay must stay below 1 so every ripple fades out, and the grid
    /// resolution is bounded so vertex indices fit in `u32`.
    pub fn sanitized(mut self) -> Self {
        let original = self.clone();
        let defaults = WaterConfig::default();

        let decay = &mut self.ripple_decay;
        let fallback = defaults.ripple_decay;
        decay.decay = finite_clamp(decay.decay, 0.0, MAX_RIPPLE_DECAY, fallback.decay);
        decay.epsilon = finite_clamp(decay.epsilon, f32::EPSILON, 1.0, fallback.epsilon);
        decay.age_rate = finite_clamp(decay.age_rate, 0.0, f32::MAX, fallback.age_rate);

        let surface = &mut self.surface;
        surface.segments = surface.segments.clamp(1, MAX_SURFACE_SEGMENTS);
        surface.size = finite_clamp(surface.size, f32::EPSILON, f32::MAX, SURFACE_SIZE);

        if self != original {
            warn!("Water config had out of range values, they were clamped");
        }
        self
    }
}

fn finite_clamp(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}
