use bevy::prelude::*;

/// Per-frame ordering of the water systems. Configured as a chain by the client.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WaterUpdateSet {
    Input,
    Simulation,
    Rendering,
    Ui,
}
