//! Custom shader integration.
//!
//! ## Water Shader
//! `assets/shaders/water.wgsl` displaces the surface with three noise octaves
//! plus the active ripples, and shades it with a depth tint, a Fresnel sky
//! reflection and a sun highlight. Its uniform block is [`WaterMaterialUniform`].

pub mod water_uniforms;

pub use water_uniforms::WaterMaterialUniform;

/// Shader asset paths
pub mod paths {
    /// Path to the water surface shader
    pub const WATER_SHADER: &str = "shaders/water.wgsl";
}
