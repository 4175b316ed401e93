use bevy::prelude::*;

/// Number of ripple slots. Must match the array size in `water.wgsl`.
pub const MAX_RIPPLES: usize = 10;
/// A ripple with an impact at or below this value is free for reuse.
pub const RIPPLE_EPSILON: f32 = 0.01;
/// Frame length the per-frame particle constants were tuned against.
pub const REFERENCE_FRAME_DT: f32 = 0.016;
/// Side length of the water plane in world units.
pub const SURFACE_SIZE: f32 = 150.0;
/// Grid subdivisions along each side of the water plane.
pub const SURFACE_SEGMENTS: u32 = 160;
/// Upper bound on grid subdivisions so vertex indices stay within `u32`.
pub const MAX_SURFACE_SEGMENTS: u32 = 1024;
/// Largest per-tick ripple decay that still fades ripples out.
pub const MAX_RIPPLE_DECAY: f32 = 0.999;
/// Resting level of the water plane.
pub const WATER_LEVEL: f32 = 0.0;
/// Particles below this height are reaped.
pub const SPLASH_FLOOR: f32 = -0.5;
pub const SPLASH_SPAWN_OFFSET: Vec3 = Vec3 {
    x: 0.0,
    y: 0.2,
    z: 0.0,
};
pub const DEFAULT_SEED: u64 = 0x5EED_0F_7A7E;
pub const CONFIG_READ_ERROR: &str = "Failed to read water config";
pub const CONFIG_WRITE_ERROR: &str = "Failed to write water config";
