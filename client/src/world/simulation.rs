use bevy::prelude::*;
use shared::water::{ClockMode, WaterSimulation};

/// Advances the water by one frame.
pub fn step_water_simulation(mut simulation: ResMut<WaterSimulation>, time: Res<Time>) {
    let measured = match simulation.clock().mode() {
        ClockMode::Measured => Some(time.delta_secs()),
        ClockMode::Fixed => None,
    };
    simulation.step(measured);
}
