pub mod splash;
pub mod water;
pub mod water_material;
pub mod water_mesh;

use bevy::prelude::*;
use shared::sets::WaterUpdateSet;

pub use splash::*;
pub use water::*;
pub use water_material::*;
pub use water_mesh::*;

/// Water surface, its material and the splash droplets.
pub struct WaterRenderPlugin;

impl Plugin for WaterRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<WaterMaterial>::default())
            .init_resource::<SplashVisuals>()
            .add_systems(
                Startup,
                (
                    setup_water_surface,
                    setup_splash_visuals,
                    init_water_resolution,
                ),
            )
            .add_systems(
                Update,
                handle_window_resize.in_set(WaterUpdateSet::Simulation),
            )
            .add_systems(
                Update,
                (update_water_uniforms, update_cpu_surface, sync_splash_visuals)
                    .in_set(WaterUpdateSet::Rendering),
            );
    }
}
