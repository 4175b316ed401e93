//! Pointer state machine turning a host event stream into ripples and splashes.

use std::time::Duration;

use bevy::math::{Vec2, Vec3};
use bevy_log::debug;
use rand::Rng;

use super::config::InputParams;
use super::ripples::RippleRegistry;
use super::splash::SplashParticleSystem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerPhase {
    #[default]
    Idle,
    Pressed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
}

/// Pointer or touch event in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    /// x and y in `[-1, 1]`, y up
    pub ndc: Vec2,
    /// Host timestamp, only differences matter
    pub at: Duration,
}

impl PointerEvent {
    pub fn down(ndc: Vec2, at: Duration) -> Self {
        Self {
            kind: PointerEventKind::Down,
            ndc,
            at,
        }
    }

    pub fn moved(ndc: Vec2, at: Duration) -> Self {
        Self {
            kind: PointerEventKind::Move,
            ndc,
            at,
        }
    }

    pub fn up(ndc: Vec2, at: Duration) -> Self {
        Self {
            kind: PointerEventKind::Up,
            ndc,
            at,
        }
    }
}

/// Intersects a screen point with the water surface.
pub trait SurfaceRaycast {
    /// World-space hit for the given NDC point, or `None` on a miss.
    fn screen_point_to_world_hit(&mut self, ndc: Vec2) -> Option<Vec3>;
}

impl<F> SurfaceRaycast for F
where
    F: FnMut(Vec2) -> Option<Vec3>,
{
    fn screen_point_to_world_hit(&mut self, ndc: Vec2) -> Option<Vec3> {
        self(ndc)
    }
}

/// What a single pointer event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputOutcome {
    /// Not relevant in the current phase
    Ignored,
    /// Too soon after the previous injection
    RateLimited,
    /// The ray missed the surface
    Missed,
    /// A light ripple was injected
    Ripple { slot: usize, impact: f32 },
    /// A strong ripple was injected along with splash particles
    Splash {
        slot: usize,
        impact: f32,
        particles: usize,
    },
}

impl InputOutcome {
    pub fn injected(&self) -> bool {
        matches!(self, Self::Ripple { .. } | Self::Splash { .. })
    }
}

/// Mutable targets a pointer event may write to.
pub struct InputTargets<'a, R: Rng + ?Sized> {
    pub ripples: &'a mut RippleRegistry,
    pub splashes: &'a mut SplashParticleSystem,
    pub rng: &'a mut R,
}

#[derive(Debug, Clone)]
pub struct InputController {
    phase: PointerPhase,
    last_injection: Option<Duration>,
    params: InputParams,
}

impl Default for InputController {
    fn default() -> Self {
        Self::new(InputParams::default())
    }
}

impl InputController {
    pub fn new(params: InputParams) -> Self {
        Self {
            phase: PointerPhase::Idle,
            last_injection: None,
            params,
        }
    }

    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    pub fn last_injection(&self) -> Option<Duration> {
        self.last_injection
    }

    pub fn params(&self) -> &InputParams {
        &self.params
    }

    pub fn reset(&mut self) {
        self.phase = PointerPhase::Idle;
        self.last_injection = None;
    }

    /// One timer for presses and drags.
    fn allows(&self, at: Duration, interval: Duration) -> bool {
        match self.last_injection {
            Some(last) => at.saturating_sub(last) >= interval,
            None => true,
        }
    }

    pub fn handle<C, R>(
        &mut self,
        event: PointerEvent,
        raycast: &mut C,
        targets: InputTargets<'_, R>,
    ) -> InputOutcome
    where
        C: SurfaceRaycast + ?Sized,
        R: Rng + ?Sized,
    {
        match (self.phase, event.kind) {
            (_, PointerEventKind::Down) => {
                self.phase = PointerPhase::Pressed;
                self.inject(event, true, raycast, targets)
            }
            (PointerPhase::Pressed, PointerEventKind::Move) => {
                self.inject(event, false, raycast, targets)
            }
            (PointerPhase::Pressed, PointerEventKind::Up) => {
                self.phase = PointerPhase::Idle;
                InputOutcome::Ignored
            }
            (PointerPhase::Idle, _) => InputOutcome::Ignored,
        }
    }

    fn inject<C, R>(
        &mut self,
        event: PointerEvent,
        strong: bool,
        raycast: &mut C,
        targets: InputTargets<'_, R>,
    ) -> InputOutcome
    where
        C: SurfaceRaycast + ?Sized,
        R: Rng + ?Sized,
    {
        let interval = if strong {
            self.params.press_interval()
        } else {
            self.params.drag_interval()
        };
        if !self.allows(event.at, interval) {
            log::trace!("Pointer {:?} rate limited at {:?}", event.kind, event.at);
            return InputOutcome::RateLimited;
        }

        let Some(hit) = raycast.screen_point_to_world_hit(event.ndc) else {
            log::trace!("Pointer {:?} at {} missed the surface", event.kind, event.ndc);
            return InputOutcome::Missed;
        };

        self.last_injection = Some(event.at);
        let InputTargets {
            ripples,
            splashes,
            rng,
        } = targets;

        let position = Vec2::new(hit.x, hit.z);
        if strong {
            let impact = self.params.strong_impact.sample(rng);
            let slot = ripples.inject(position, impact);
            let count = splashes.burst_size(rng);
            let particles = splashes.spawn(hit, count, rng);
            debug!(
                "Splash at ({:.2}, {:.2}) impact {:.2}, slot {}, {} particles",
                position.x, position.y, impact, slot, particles
            );
            InputOutcome::Splash {
                slot,
                impact,
                particles,
            }
        } else {
            let impact = self.params.light_impact.sample(rng);
            let slot = ripples.inject(position, impact);
            log::trace!(
                "Drag ripple at ({:.2}, {:.2}) impact {:.2}, slot {}",
                position.x,
                position.y,
                impact,
                slot
            );
            InputOutcome::Ripple { slot, impact }
        }
    }
}
