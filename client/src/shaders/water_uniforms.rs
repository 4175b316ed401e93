//! Water shader uniform data
//!
//! Separated into its own module to isolate the `#![allow(dead_code)]` directive,
//! which is required due to the ShaderType derive macro generating internal
//! `check` functions that trigger warnings.

#![allow(dead_code)]

use bevy::{prelude::*, render::render_resource::ShaderType};
use shared::water::config::{OCTAVE_COUNT, WaterConfig};
use shared::water::{RippleRegistry, ShadingModel};
use shared::MAX_RIPPLES;

/// Uniform block of `water.wgsl` (matches the WGSL `WaterMaterialUniform` struct).
///
/// Scalars are packed into `Vec4`s so the layout is identical on every backend.
#[derive(ShaderType, Debug, Clone, Copy)]
pub struct WaterMaterialUniform {
    /// (x, z, impact, age) per ripple slot
    pub ripples: [Vec4; MAX_RIPPLES],
    /// (amplitude, frequency, time_scale, 0) per octave
    pub octaves: [Vec4; OCTAVE_COUNT],
    /// (speed, wave_length, radius_cutoff, time_decay_rate)
    pub ripple_wave: Vec4,
    /// (spread_factor, amplitude_scale, epsilon, 0)
    pub ripple_shape: Vec4,
    /// (epsilon, frequency, time_scale, 0)
    pub normal_detail: Vec4,
    pub shallow_color: Vec4,
    pub deep_color: Vec4,
    pub sky_color: Vec4,
    pub sun_direction: Vec4,
    pub sun_color: Vec4,
    /// (fresnel_power, reflection_weight, specular_power, specular_intensity)
    pub lighting: Vec4,
    pub caustic_tint: Vec4,
    /// (low, high, intensity, 0)
    pub crest: Vec4,
    /// (min, fresnel weight, max, 0)
    pub alpha: Vec4,
    /// (time, viewport width, viewport height, 0)
    pub frame: Vec4,
}

impl WaterMaterialUniform {
    /// Static part of the uniform, taken from the configuration.
    pub fn from_config(config: &WaterConfig) -> Self {
        let w = &config.ripple_wave;
        let n = &config.normal_detail;
        let s = &config.shading;

        Self {
            ripples: [Vec4::ZERO; MAX_RIPPLES],
            octaves: config
                .octaves
                .map(|o| Vec4::new(o.amplitude, o.frequency, o.time_scale, 0.0)),
            ripple_wave: Vec4::new(w.speed, w.wave_length, w.radius_cutoff, w.time_decay_rate),
            ripple_shape: Vec4::new(
                w.spread_factor,
                w.amplitude_scale,
                config.ripple_decay.epsilon,
                0.0,
            ),
            normal_detail: Vec4::new(n.epsilon, n.frequency, n.time_scale, 0.0),
            shallow_color: s.shallow_color.extend(1.0),
            deep_color: s.deep_color.extend(1.0),
            sky_color: s.sky_color.extend(1.0),
            sun_direction: s.sun_direction.normalize_or(Vec3::Y).extend(0.0),
            sun_color: s.sun_color.extend(1.0),
            lighting: Vec4::new(
                s.fresnel_power,
                s.reflection_weight,
                s.specular_power,
                s.specular_intensity,
            ),
            caustic_tint: s.caustic_tint.extend(0.0),
            crest: Vec4::new(s.crest_low, s.crest_high, s.crest_intensity, 0.0),
            alpha: Vec4::new(s.min_alpha, s.alpha_fresnel, s.max_alpha, 0.0),
            frame: Vec4::new(0.0, 1.0, 1.0, 0.0),
        }
    }

    /// Copies the per-frame state: time, viewport size and ripple slots.
    pub fn update_frame(&mut self, time: f32, shading: &ShadingModel, ripples: &RippleRegistry) {
        let resolution = shading.resolution();
        self.frame = Vec4::new(time, resolution.x, resolution.y, 0.0);
        self.ripples = ripples.uniforms();
    }

    pub fn time(&self) -> f32 {
        self.frame.x
    }
}

impl Default for WaterMaterialUniform {
    fn default() -> Self {
        Self::from_config(&WaterConfig::default())
    }
}
