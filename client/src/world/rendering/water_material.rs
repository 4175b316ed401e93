//! Water material for the animated surface.
//!
//! This module provides a custom material that extends Bevy's StandardMaterial
//! with the uniform block read by `water.wgsl`.

use bevy::{
    asset::Asset,
    pbr::{ExtendedMaterial, MaterialExtension, StandardMaterial},
    prelude::*,
    render::render_resource::{AsBindGroup, ShaderRef},
};
use shared::water::WaterConfig;

use crate::shaders::{paths::WATER_SHADER, WaterMaterialUniform};

/// Water material extension carrying the surface uniforms.
///
/// This is used with `ExtendedMaterial<StandardMaterial, WaterMaterialExtension>`.
/// The base material only contributes the blend state; color is computed
/// entirely by the extension's fragment stage.
#[derive(Asset, AsBindGroup, TypePath, Debug, Clone, Default)]
pub struct WaterMaterialExtension {
    #[uniform(100)]
    pub uniform: WaterMaterialUniform,
}

impl MaterialExtension for WaterMaterialExtension {
    fn vertex_shader() -> ShaderRef {
        WATER_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        WATER_SHADER.into()
    }
}

/// Type alias for the complete water material.
pub type WaterMaterial = ExtendedMaterial<StandardMaterial, WaterMaterialExtension>;

pub fn create_water_material(config: &WaterConfig) -> WaterMaterial {
    ExtendedMaterial {
        base: StandardMaterial {
            base_color: Color::WHITE,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            cull_mode: None, // Visible from below when the camera dips under a crest
            double_sided: true,
            ..default()
        },
        extension: WaterMaterialExtension {
            uniform: WaterMaterialUniform::from_config(config),
        },
    }
}

/// Material used by the CPU surface path, which bakes color into the vertices.
pub fn create_vertex_color_material() -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        cull_mode: None,
        double_sided: true,
        ..default()
    }
}

/// Handle of the shader material, present only on the GPU path.
#[derive(Resource)]
pub struct WaterMaterialResource {
    pub handle: Handle<WaterMaterial>,
}

/// Which path computes the surface every frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceMode {
    /// Displacement and color in `water.wgsl`
    #[default]
    Gpu,
    /// Displacement and color evaluated in `shared` and written into the mesh
    Cpu,
}

/// Settings to control water rendering.
#[derive(Resource, Debug, Clone, Default)]
pub struct WaterRenderSettings {
    pub mode: SurfaceMode,
}

impl WaterRenderSettings {
    pub fn cpu_surface(&self) -> bool {
        self.mode == SurfaceMode::Cpu
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_is_transparent() {
        let material = create_water_material(&WaterConfig::default());
        assert!(matches!(material.base.alpha_mode, AlphaMode::Blend));
        assert_eq!(material.extension.uniform.time(), 0.0);
        assert!(matches!(
            create_vertex_color_material().alpha_mode,
            AlphaMode::Blend
        ));
    }

    #[test]
    fn test_default_mode_is_gpu() {
        assert!(!WaterRenderSettings::default().cpu_surface());
    }
}
