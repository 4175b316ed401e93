//! Surface color model, mirrored by the fragment stage of `water.wgsl`.

use bevy::math::{Vec2, Vec3, Vec4};

use super::config::ShadingParams;

/// Per-fragment inputs.
#[derive(Debug, Clone, Copy)]
pub struct ShadingInput {
    pub height: f32,
    pub normal: Vec3,
    /// From the camera towards the surface, normalized
    pub view_dir: Vec3,
    pub uv: Vec2,
    pub time: f32,
}

#[derive(Debug, Clone)]
pub struct ShadingModel {
    params: ShadingParams,
    sun_direction: Vec3,
    resolution: Vec2,
}

impl Default for ShadingModel {
    fn default() -> Self {
        Self::new(ShadingParams::default())
    }
}

impl ShadingModel {
    pub fn new(params: ShadingParams) -> Self {
        Self {
            sun_direction: params.sun_direction.normalize_or(Vec3::Y),
            params,
            resolution: Vec2::ONE,
        }
    }

    pub fn params(&self) -> &ShadingParams {
        &self.params
    }

    /// Normalized direction towards the sun.
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_direction
    }

    pub fn resolution(&self) -> Vec2 {
        self.resolution
    }

    /// Updates the viewport size. Simulation state is left alone.
    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.resolution = Vec2::new(width.max(1.0), height.max(1.0));
    }

    /// Height remapped the way the shader does before color lookups.
    #[inline]
    pub fn normalized_height(height: f32) -> f32 {
        height * 0.5 + 0.5
    }

    pub fn fresnel(&self, view_dir: Vec3, normal: Vec3) -> f32 {
        (1.0 + view_dir.dot(normal))
            .clamp(0.0, 1.0)
            .powf(self.params.fresnel_power)
    }

    pub fn specular(&self, view_dir: Vec3, normal: Vec3) -> f32 {
        let reflected = reflect(-self.sun_direction, normal);
        reflected
            .dot(-view_dir)
            .max(0.0)
            .powf(self.params.specular_power)
            * self.params.specular_intensity
    }

    pub fn caustics(uv: Vec2, time: f32) -> f32 {
        let a = (uv.x * 30.0 + time * 2.0).sin() * (uv.y * 30.0 + time * 2.0).sin() * 0.03;
        let b = (uv.x * 20.0 - time).sin() * (uv.y * 20.0 - time).sin() * 0.02;
        a + b
    }

    pub fn crest(&self, height: f32) -> f32 {
        smoothstep(
            self.params.crest_low,
            self.params.crest_high,
            Self::normalized_height(height),
        ) * self.params.crest_intensity
    }

    pub fn alpha(&self, fresnel: f32) -> f32 {
        (self.params.min_alpha + fresnel * self.params.alpha_fresnel).min(self.params.max_alpha)
    }

    /// RGBA color of the surface, RGB saturated to `[0, 1]`.
    pub fn shade(&self, input: &ShadingInput) -> Vec4 {
        let p = &self.params;
        let n = Self::normalized_height(input.height);

        let depth_factor = (1.0 - n * 2.0).clamp(0.0, 1.0);
        let mut color = p.shallow_color.lerp(p.deep_color, depth_factor);

        let fresnel = self.fresnel(input.view_dir, input.normal);
        color = color.lerp(p.sky_color, (fresnel * p.reflection_weight).clamp(0.0, 1.0));
        color += p.sun_color * self.specular(input.view_dir, input.normal);
        color += p.caustic_tint * Self::caustics(input.uv, input.time);
        color += Vec3::splat(self.crest(input.height));

        color
            .clamp(Vec3::ZERO, Vec3::ONE)
            .extend(self.alpha(fresnel))
    }
}

/// GLSL `reflect`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

/// GLSL `smoothstep`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(height: f32, view_dir: Vec3) -> ShadingInput {
        ShadingInput {
            height,
            normal: Vec3::Y,
            view_dir,
            uv: Vec2::new(0.25, 0.75),
            time: 3.0,
        }
    }

    #[test]
    fn test_alpha_is_bounded() {
        let model = ShadingModel::default();
        for dir in [Vec3::NEG_Y, Vec3::new(1.0, -0.1, 0.0).normalize(), Vec3::Y] {
            for height in [-3.0, -0.5, 0.0, 0.5, 3.0] {
                let a = model.shade(&input(height, dir)).w;
                assert!((0.9..=0.98).contains(&a), "alpha {a} out of range");
            }
        }
    }

    #[test]
    fn test_fresnel_grows_at_grazing_angles() {
        let model = ShadingModel::default();
        let head_on = model.fresnel(Vec3::NEG_Y, Vec3::Y);
        let grazing = model.fresnel(Vec3::new(1.0, -0.05, 0.0).normalize(), Vec3::Y);
        assert!(head_on < 1e-6);
        assert!(grazing > 0.8);
    }

    #[test]
    fn test_deeper_is_darker() {
        let model = ShadingModel::default();
        let view = Vec3::NEG_Y;
        let shallow = model.shade(&input(0.0, view));
        let deep = model.shade(&input(-1.0, view));
        assert!(deep.z < shallow.z, "troughs should look deeper");
    }

    #[test]
    fn test_specular_peaks_on_mirror_direction() {
        let model = ShadingModel::default();
        let sun = model.sun_direction();
        // Looking down the mirror of the sun direction
        let view_dir = reflect(sun, Vec3::Y);
        assert!((model.specular(view_dir, Vec3::Y) - 0.8).abs() < 1e-3);
        assert_eq!(model.specular(-view_dir, Vec3::Y), 0.0);
    }

    #[test]
    fn test_color_is_saturated() {
        let model = ShadingModel::default();
        let sun = model.sun_direction();
        let c = model.shade(&input(0.0, reflect(sun, Vec3::Y)));
        for v in [c.x, c.y, c.z] {
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_crest_threshold() {
        let model = ShadingModel::default();
        assert_eq!(model.crest(-1.0), 0.0);
        assert!((model.crest(0.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_resize_updates_resolution() {
        let mut model = ShadingModel::default();
        model.set_resolution(1920.0, 1080.0);
        assert_eq!(model.resolution(), Vec2::new(1920.0, 1080.0));
        model.set_resolution(0.0, -5.0);
        assert_eq!(model.resolution(), Vec2::ONE);
    }
}
