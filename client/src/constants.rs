use bevy::prelude::*;

pub const WINDOW_TITLE: &str = "Water";

// Scene
pub const SKY_COLOR: Color = Color::srgb(0.529, 0.808, 0.922);
pub const FOG_START: f32 = 100.0;
pub const FOG_END: f32 = 300.0;
pub const AMBIENT_COLOR: Color = Color::srgb(0.42, 0.49, 0.557);
pub const AMBIENT_BRIGHTNESS: f32 = 600.0;
pub const SUN_COLOR: Color = Color::srgb(1.0, 0.98, 0.94);
pub const SUN_ILLUMINANCE: f32 = 12_000.0;
pub const SUN_POSITION: Vec3 = Vec3::new(-30.0, 50.0, 30.0);
pub const FILL_COLOR: Color = Color::srgb(1.0, 0.933, 0.867);
pub const FILL_ILLUMINANCE: f32 = 8_000.0;
pub const FILL_POSITION: Vec3 = Vec3::new(10.0, 40.0, -30.0);
pub const SAND_COLOR: Color = Color::srgb(0.878, 0.788, 0.651);
pub const POND_FLOOR_DEPTH: f32 = -8.0;
pub const ROCK_COUNT: usize = 15;
pub const PLANT_COUNT: usize = 20;

// Camera
pub const CAMERA_START: Vec3 = Vec3::new(0.0, 30.0, 60.0);
pub const CAMERA_MIN_DISTANCE: f32 = 20.0;
pub const CAMERA_MAX_DISTANCE: f32 = 150.0;
/// Largest angle between the camera and the vertical axis
pub const CAMERA_MAX_POLAR: f32 = std::f32::consts::PI * 0.45;
pub const CAMERA_MIN_POLAR: f32 = 0.05;
pub const CAMERA_ROTATE_SPEED: f32 = 0.005;
pub const CAMERA_ZOOM_SPEED: f32 = 0.1;

// Splash visuals
pub const SPLASH_COLOR: Color = Color::srgb(0.8, 0.9, 1.0);
