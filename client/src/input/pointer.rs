//! Mouse and touch adapter for the water input state machine.
//!
//! Host events are converted to NDC pointer events stamped with real time,
//! then fed to [`WaterSimulation::handle_pointer`] together with a ray caster
//! that only tests the water surface mesh.

use bevy::{
    input::touch::{TouchInput, TouchPhase},
    prelude::*,
    window::{CursorMoved, PrimaryWindow},
};
use shared::water::{InputOutcome, PointerEvent, PointerEventKind, WaterSimulation};

use crate::camera::OrbitCamera;
use crate::world::rendering::WaterSurface;

/// Window position (logical pixels, y down) to NDC (y up).
pub fn window_to_ndc(position: Vec2, window_size: Vec2) -> Vec2 {
    let size = window_size.max(Vec2::ONE);
    Vec2::new(
        position.x / size.x * 2.0 - 1.0,
        1.0 - position.y / size.y * 2.0,
    )
}

/// Inverse of [`window_to_ndc`].
pub fn ndc_to_window(ndc: Vec2, window_size: Vec2) -> Vec2 {
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * window_size.x,
        (1.0 - ndc.y) * 0.5 * window_size.y,
    )
}

/// Follows a single touch so multi-finger gestures do not fight over the pointer.
#[derive(Default, Debug)]
pub struct TouchTracker {
    active: Option<u64>,
}

impl TouchTracker {
    pub fn translate(&mut self, id: u64, phase: TouchPhase) -> Option<PointerEventKind> {
        match (self.active, phase) {
            (None, TouchPhase::Started) => {
                self.active = Some(id);
                Some(PointerEventKind::Down)
            }
            (Some(active), TouchPhase::Moved) if active == id => Some(PointerEventKind::Move),
            (Some(active), TouchPhase::Ended | TouchPhase::Canceled) if active == id => {
                self.active = None;
                Some(PointerEventKind::Up)
            }
            _ => None,
        }
    }
}

/// Gathers this frame's pointer events in arrival order.
fn collect_pointer_events(
    window: &Window,
    mouse_buttons: &ButtonInput<MouseButton>,
    cursor_moved: &mut EventReader<CursorMoved>,
    touches: &mut EventReader<TouchInput>,
    tracker: &mut TouchTracker,
    at: std::time::Duration,
) -> Vec<PointerEvent> {
    let size = window.size();
    let mut events = Vec::new();
    let event = |kind, position: Vec2| PointerEvent {
        kind,
        ndc: window_to_ndc(position, size),
        at,
    };

    if mouse_buttons.just_pressed(MouseButton::Left) {
        if let Some(position) = window.cursor_position() {
            events.push(event(PointerEventKind::Down, position));
        }
    }
    for moved in cursor_moved.read() {
        events.push(event(PointerEventKind::Move, moved.position));
    }
    if mouse_buttons.just_released(MouseButton::Left) {
        let position = window.cursor_position().unwrap_or(size * 0.5);
        events.push(event(PointerEventKind::Up, position));
    }

    for touch in touches.read() {
        if let Some(kind) = tracker.translate(touch.id, touch.phase) {
            events.push(event(kind, touch.position));
        }
    }

    events
}

pub fn pointer_input_system(
    mut simulation: ResMut<WaterSimulation>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_moved: EventReader<CursorMoved>,
    mut touches: EventReader<TouchInput>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<OrbitCamera>>,
    surface: Query<Entity, With<WaterSurface>>,
    mut ray_cast: MeshRayCast,
    time: Res<Time<Real>>,
    mut tracker: Local<TouchTracker>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let events = collect_pointer_events(
        window,
        &mouse_buttons,
        &mut cursor_moved,
        &mut touches,
        &mut tracker,
        time.elapsed(),
    );
    if events.is_empty() {
        return;
    }

    let Ok((camera, camera_transform)) = cameras.single() else {
        debug!("Camera not found");
        return;
    };
    let surface = surface.single().ok();
    let window_size = window.size();

    let mut raycast = |ndc: Vec2| -> Option<Vec3> {
        let surface = surface?;
        let ray = camera
            .viewport_to_world(camera_transform, ndc_to_window(ndc, window_size))
            .ok()?;
        let only_surface = |entity: Entity| entity == surface;
        let settings = MeshRayCastSettings::default().with_filter(&only_surface);
        ray_cast
            .cast_ray(ray, &settings)
            .first()
            .map(|(_, hit)| hit.point)
    };

    for event in events {
        match simulation.handle_pointer(event, &mut raycast) {
            InputOutcome::Splash {
                slot, particles, ..
            } => debug!("Splash in ripple slot {} with {} droplets", slot, particles),
            InputOutcome::Missed => log::trace!("Pointer {:?} missed the water", event.kind),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ndc_conversion() {
        let size = Vec2::new(800.0, 600.0);
        assert_eq!(window_to_ndc(Vec2::new(400.0, 300.0), size), Vec2::ZERO);
        assert_eq!(window_to_ndc(Vec2::ZERO, size), Vec2::new(-1.0, 1.0));
        assert_eq!(window_to_ndc(size, size), Vec2::new(1.0, -1.0));

        let p = Vec2::new(123.0, 456.0);
        let back = ndc_to_window(window_to_ndc(p, size), size);
        assert!(back.distance(p) < 1e-3);
    }

    #[test]
    fn test_touch_tracker_follows_first_finger() {
        let mut tracker = TouchTracker::default();
        assert_eq!(
            tracker.translate(1, TouchPhase::Started),
            Some(PointerEventKind::Down)
        );
        // A second finger is ignored while the first is down
        assert_eq!(tracker.translate(2, TouchPhase::Started), None);
        assert_eq!(tracker.translate(2, TouchPhase::Moved), None);
        assert_eq!(
            tracker.translate(1, TouchPhase::Moved),
            Some(PointerEventKind::Move)
        );
        assert_eq!(
            tracker.translate(1, TouchPhase::Canceled),
            Some(PointerEventKind::Up)
        );
        assert_eq!(
            tracker.translate(2, TouchPhase::Started),
            Some(PointerEventKind::Down)
        );
    }
}
