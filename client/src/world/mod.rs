pub mod rendering;
pub mod scene;
pub mod simulation;

pub use rendering::*;

use bevy::prelude::*;
use shared::sets::WaterUpdateSet;

/// Simulation stepping and everything drawn in the pond.
pub struct WaterWorldPlugin;

impl Plugin for WaterWorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(WaterRenderPlugin)
            .add_systems(Startup, scene::setup_scene)
            .add_systems(
                Update,
                simulation::step_water_simulation.in_set(WaterUpdateSet::Simulation),
            );
    }
}
