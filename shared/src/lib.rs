pub mod constants;
pub mod sets;
pub mod water;

pub use constants::*;
pub use sets::WaterUpdateSet;
