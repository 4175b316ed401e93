pub mod data;
pub mod keyboard;
pub mod pointer;

use bevy::prelude::*;
use shared::sets::WaterUpdateSet;

pub use keyboard::KeyMap;

pub struct WaterInputPlugin;

impl Plugin for WaterInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyMap>().add_systems(
            Update,
            (keyboard::restart_system, pointer::pointer_input_system)
                .chain()
                .in_set(WaterUpdateSet::Input),
        );
    }
}
