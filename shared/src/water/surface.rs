//! Height field synthesis: noise octaves plus ripple waves.
//!
//! This is the CPU mirror of the vertex stage in `water.wgsl`. Both must use
//! the same formulas and constants so the two render paths look identical.

use bevy::math::{Vec2, Vec3};

use super::config::{
    NormalDetailParams, RippleWaveParams, WaterConfig, WaveOctave, DEFAULT_OCTAVES, OCTAVE_COUNT,
};
use super::noise::NoiseField;
use super::ripples::Ripple;
use crate::constants::RIPPLE_EPSILON;

/// Height and shading normal at one surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSample {
    pub height: f32,
    pub normal: Vec3,
}

#[derive(Debug, Clone)]
pub struct HeightFieldSynthesizer {
    noise: NoiseField,
    octaves: [WaveOctave; OCTAVE_COUNT],
    ripple_wave: RippleWaveParams,
    normal_detail: NormalDetailParams,
    ripple_epsilon: f32,
}

impl Default for HeightFieldSynthesizer {
    fn default() -> Self {
        Self {
            noise: NoiseField::new(),
            octaves: DEFAULT_OCTAVES,
            ripple_wave: RippleWaveParams::default(),
            normal_detail: NormalDetailParams::default(),
            ripple_epsilon: RIPPLE_EPSILON,
        }
    }
}

impl HeightFieldSynthesizer {
    pub fn from_config(config: &WaterConfig) -> Self {
        Self {
            noise: NoiseField::new(),
            octaves: config.octaves,
            ripple_wave: config.ripple_wave,
            normal_detail: config.normal_detail,
            ripple_epsilon: config.ripple_decay.epsilon,
        }
    }

    /// Sum of the three noise octaves.
    #[inline]
    pub fn base_height(&self, x: f32, z: f32, time: f32) -> f32 {
        self.octaves
            .iter()
            .map(|o| {
                o.amplitude
                    * self
                        .noise
                        .sample(x * o.frequency, z * o.frequency, time * o.time_scale)
            })
            .sum()
    }

    /// Contribution of a single ripple at `(x, z)`. Inactive ripples add nothing.
    #[inline]
    pub fn ripple_height(&self, x: f32, z: f32, ripple: &Ripple) -> f32 {
        if !ripple.is_active(self.ripple_epsilon) {
            return 0.0;
        }
        let w = &self.ripple_wave;
        let dist = Vec2::new(x, z).distance(ripple.position);
        let phase = dist * w.wave_length - ripple.age * w.speed;
        let attenuation = (1.0 - dist / w.radius_cutoff).max(0.0)
            * (1.0 - ripple.age * w.time_decay_rate).max(0.0);

        phase.sin() * (ripple.impact * w.amplitude_scale) * attenuation
            / (1.0 + dist * w.spread_factor)
    }

    /// Final displacement: noise octaves plus every active ripple.
    pub fn height(&self, x: f32, z: f32, time: f32, ripples: &[Ripple]) -> f32 {
        let ripple_sum: f32 = ripples.iter().map(|r| self.ripple_height(x, z, r)).sum();
        self.base_height(x, z, time) + ripple_sum
    }

    /// Shading normal from central differences of the noise detail term.
    ///
    /// Ripples are not part of the estimate; the result perturbs the flat
    /// up vector with noise-driven detail.
    pub fn normal(&self, x: f32, z: f32, time: f32) -> Vec3 {
        let NormalDetailParams {
            epsilon,
            frequency,
            time_scale,
        } = self.normal_detail;
        let t = time * time_scale;
        let detail = |px: f32, pz: f32| self.noise.sample(px * frequency, pz * frequency, t);

        let h_l = detail(x - epsilon, z);
        let h_r = detail(x + epsilon, z);
        let h_d = detail(x, z - epsilon);
        let h_u = detail(x, z + epsilon);

        let inv = 1.0 / (2.0 * epsilon);
        Vec3::new((h_l - h_r) * inv, 1.0, (h_d - h_u) * inv).normalize_or(Vec3::Y)
    }

    pub fn sample(&self, x: f32, z: f32, time: f32, ripples: &[Ripple]) -> SurfaceSample {
        SurfaceSample {
            height: self.height(x, z, time, ripples),
            normal: self.normal(x, z, time),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_RIPPLES;

    fn ripple_at(x: f32, z: f32, impact: f32, age: f32) -> Ripple {
        Ripple {
            position: Vec2::new(x, z),
            impact,
            age,
        }
    }

    #[test]
    fn test_base_height_within_octave_bounds() {
        let synth = HeightFieldSynthesizer::default();
        let bound = WaterConfig::default().max_base_height();
        for i in 0..200 {
            let x = i as f32 * 0.75 - 75.0;
            let h = synth.base_height(x, -x * 0.5, i as f32 * 0.1);
            assert!(h.abs() <= bound + 1e-4, "height {h} exceeds {bound}");
        }
    }

    #[test]
    fn test_inactive_ripples_ignored() {
        let synth = HeightFieldSynthesizer::default();
        let ripples = [ripple_at(0.0, 0.0, 0.0, 0.0); MAX_RIPPLES];
        assert_eq!(
            synth.height(1.0, 2.0, 3.0, &ripples),
            synth.base_height(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_ripple_cut_off_beyond_radius() {
        let synth = HeightFieldSynthesizer::default();
        let ripple = ripple_at(0.0, 0.0, 1.0, 0.1);
        assert_eq!(synth.ripple_height(25.0, 0.0, &ripple), 0.0);
        assert!(synth.ripple_height(1.3, 0.0, &ripple).abs() > 0.0);
    }

    #[test]
    fn test_ripple_expires_with_age() {
        let synth = HeightFieldSynthesizer::default();
        // 1 - age * 0.5 reaches zero at age 2
        let ripple = ripple_at(0.0, 0.0, 1.0, 2.5);
        for d in [0.5, 1.0, 5.0, 10.0] {
            assert_eq!(synth.ripple_height(d, 0.0, &ripple), 0.0);
        }
    }

    #[test]
    fn test_ripple_matches_formula() {
        let synth = HeightFieldSynthesizer::default();
        let ripple = ripple_at(3.0, 7.0, 1.0, 0.3);
        let (x, z) = (5.0, 7.0);
        let dist = 2.0_f32;
        let phase = dist * 4.0 - 0.3 * 5.0;
        let attenuation = (1.0 - dist / 20.0) * (1.0 - 0.3 * 0.5);
        let expected = phase.sin() * 2.0 * attenuation / (1.0 + dist * 0.4);
        assert!((synth.ripple_height(x, z, &ripple) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_height_is_continuous() {
        let synth = HeightFieldSynthesizer::default();
        let ripples = [
            ripple_at(0.0, 0.0, 1.2, 0.2),
            ripple_at(4.0, -3.0, 0.8, 0.9),
            ripple_at(-10.0, 2.0, 0.4, 0.0),
        ];
        let t = 12.5;
        let spacing = 0.01;
        for row in 0..40 {
            let z = row as f32 * 0.5 - 10.0;
            let mut prev = synth.height(-20.0, z, t, &ripples);
            let mut x = -20.0 + spacing;
            while x < 20.0 {
                let h = synth.height(x, z, t, &ripples);
                assert!(h.is_finite());
                assert!(
                    (h - prev).abs() < 0.25,
                    "height jumped by {} at ({x}, {z})",
                    (h - prev).abs()
                );
                prev = h;
                x += spacing;
            }
        }
    }

    #[test]
    fn test_normal_is_unit_and_up_facing() {
        let synth = HeightFieldSynthesizer::default();
        for i in 0..100 {
            let x = i as f32 * 1.3 - 60.0;
            let n = synth.normal(x, x * 0.25, 4.0);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.y > 0.0, "normal should point up, got {n:?}");
        }
    }

    #[test]
    fn test_height_varies_with_time() {
        let synth = HeightFieldSynthesizer::default();
        let h1 = synth.base_height(10.0, 10.0, 0.0);
        let h2 = synth.base_height(10.0, 10.0, 5.0);
        assert!((h1 - h2).abs() > 1e-4, "height should vary with time");
    }
}
