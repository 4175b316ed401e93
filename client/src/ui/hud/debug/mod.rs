pub mod setup;
pub mod stats;

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
pub use setup::*;
use shared::sets::WaterUpdateSet;
pub use stats::*;

pub struct DebugHudPlugin;
impl Plugin for DebugHudPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        }
        app.add_systems(Startup, setup_debug_hud).add_systems(
            Update,
            (
                toggle_hud_system,
                fps_text_update_system,
                water_stats_update_system,
            )
                .in_set(WaterUpdateSet::Ui),
        );
    }
}
