//! Per-frame water uniforms and viewport tracking.

use bevy::{prelude::*, window::WindowResized};
use shared::water::WaterSimulation;

use super::water_material::{WaterMaterial, WaterMaterialResource};

/// Copies time, resolution and ripple slots into the shader material.
pub fn update_water_uniforms(
    simulation: Res<WaterSimulation>,
    material: Option<Res<WaterMaterialResource>>,
    mut materials: ResMut<Assets<WaterMaterial>>,
) {
    let Some(material) = material else {
        return;
    };
    let Some(water) = materials.get_mut(&material.handle) else {
        return;
    };
    water.extension.uniform.update_frame(
        simulation.time(),
        simulation.shading(),
        simulation.ripples(),
    );
}

/// Keeps the resolution in sync with the window. Simulation state is untouched.
pub fn handle_window_resize(
    mut events: EventReader<WindowResized>,
    mut simulation: ResMut<WaterSimulation>,
) {
    if let Some(event) = events.read().last() {
        debug!("Viewport resized to {}x{}", event.width, event.height);
        simulation.resize(event.width, event.height);
    }
}

/// Seeds the resolution from the primary window once at startup.
pub fn init_water_resolution(
    window: Query<&Window, With<bevy::window::PrimaryWindow>>,
    mut simulation: ResMut<WaterSimulation>,
) {
    if let Ok(window) = window.single() {
        simulation.resize(window.width(), window.height());
    }
}
