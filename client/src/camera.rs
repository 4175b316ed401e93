use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit},
    prelude::*,
};

use crate::constants::{
    CAMERA_MAX_DISTANCE, CAMERA_MAX_POLAR, CAMERA_MIN_DISTANCE, CAMERA_MIN_POLAR,
    CAMERA_ROTATE_SPEED, CAMERA_START, CAMERA_ZOOM_SPEED,
};
use crate::world::scene::pond_fog;

/// Orbit state around a focus point. `polar` is measured from the vertical axis.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
}

impl OrbitCamera {
    pub fn from_position(position: Vec3, focus: Vec3) -> Self {
        let offset = position - focus;
        let distance = offset.length().max(f32::EPSILON);
        let mut camera = Self {
            focus,
            azimuth: offset.x.atan2(offset.z),
            polar: (offset.y / distance).clamp(-1.0, 1.0).acos(),
            distance,
        };
        camera.clamp();
        camera
    }

    fn clamp(&mut self) {
        self.polar = self.polar.clamp(CAMERA_MIN_POLAR, CAMERA_MAX_POLAR);
        self.distance = self.distance.clamp(CAMERA_MIN_DISTANCE, CAMERA_MAX_DISTANCE);
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * CAMERA_ROTATE_SPEED;
        self.polar -= delta.y * CAMERA_ROTATE_SPEED;
        self.clamp();
    }

    /// Positive steps zoom in.
    pub fn zoom(&mut self, steps: f32) {
        self.distance *= 1.0 - steps * CAMERA_ZOOM_SPEED;
        self.clamp();
    }

    pub fn position(&self) -> Vec3 {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        self.focus + Vec3::new(sin_p * sin_a, cos_p, sin_p * cos_a) * self.distance
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position()).looking_at(self.focus, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::from_position(CAMERA_START, Vec3::ZERO)
    }
}

pub fn spawn_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        Camera3d::default(),
        orbit.transform(),
        orbit,
        pond_fog(),
        Name::new("Main camera"),
    ));
}

/// Right-drag orbits, the wheel zooms. Left button is reserved for the water.
pub fn orbit_camera_system(
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
) {
    let Ok((mut orbit, mut transform)) = cameras.single_mut() else {
        return;
    };

    let mut changed = false;
    if mouse_buttons.pressed(MouseButton::Right) && motion.delta != Vec2::ZERO {
        orbit.rotate(motion.delta);
        changed = true;
    }
    if scroll.delta.y != 0.0 {
        let steps = match scroll.unit {
            MouseScrollUnit::Line => scroll.delta.y,
            MouseScrollUnit::Pixel => scroll.delta.y / 100.0,
        };
        orbit.zoom(steps);
        changed = true;
    }

    if changed {
        *transform = orbit.transform();
    }
}
