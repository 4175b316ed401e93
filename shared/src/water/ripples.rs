//! Fixed pool of ripple impulses.
//!
//! The registry owns exactly [`MAX_RIPPLES`] slots. A slot is active while its
//! impact is above the epsilon; once it decays below, the slot is free again.
//! Nothing is ever allocated after construction.

use bevy::math::{Vec2, Vec4};
use bevy_log::debug;

use super::config::RippleDecayParams;
use crate::constants::MAX_RIPPLES;

/// One ripple slot.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Ripple {
    /// Impact location on the surface plane (world x, z)
    pub position: Vec2,
    /// Current strength
    pub impact: f32,
    /// Simulation time elapsed since injection, scaled by the age rate
    pub age: f32,
}

impl Ripple {
    #[inline]
    pub fn is_active(&self, epsilon: f32) -> bool {
        self.impact > epsilon
    }

    /// Packed as `(x, z, impact, age)` for the shader uniform.
    #[inline]
    pub fn to_uniform(&self) -> Vec4 {
        Vec4::new(self.position.x, self.position.y, self.impact, self.age)
    }
}

#[derive(Debug, Clone)]
pub struct RippleRegistry {
    slots: [Ripple; MAX_RIPPLES],
    params: RippleDecayParams,
}

impl Default for RippleRegistry {
    fn default() -> Self {
        Self::new(RippleDecayParams::default())
    }
}

impl RippleRegistry {
    pub fn new(params: RippleDecayParams) -> Self {
        Self {
            slots: [Ripple::default(); MAX_RIPPLES],
            params,
        }
    }

    /// Activates a slot for a new ripple and returns its index.
    ///
    /// Free slots are used first. When every slot is active, the ripple with
    /// the largest age is replaced. Ties go to the lowest index.
    pub fn inject(&mut self, position: Vec2, impact: f32) -> usize {
        let epsilon = self.params.epsilon;
        let index = match self.slots.iter().position(|r| !r.is_active(epsilon)) {
            Some(free) => free,
            None => {
                let oldest = self.oldest_active().unwrap_or(0);
                debug!(
                    "Ripple pool full, evicting slot {} (age {:.3})",
                    oldest, self.slots[oldest].age
                );
                oldest
            }
        };

        self.slots[index] = Ripple {
            position,
            impact: impact.max(0.0),
            age: 0.0,
        };
        index
    }

    fn oldest_active(&self) -> Option<usize> {
        let epsilon = self.params.epsilon;
        let mut oldest: Option<usize> = None;
        for (i, ripple) in self.slots.iter().enumerate() {
            if !ripple.is_active(epsilon) {
                continue;
            }
            match oldest {
                Some(best) if self.slots[best].age >= ripple.age => {}
                _ => oldest = Some(i),
            }
        }
        oldest
    }

    /// Ages and decays every active ripple.
    pub fn tick(&mut self, dt: f32) {
        let RippleDecayParams {
            age_rate,
            decay,
            epsilon,
        } = self.params;

        for ripple in self.slots.iter_mut().filter(|r| r.is_active(epsilon)) {
            ripple.age += dt * age_rate;
            ripple.impact *= decay;
        }
    }

    /// All slots, active or not.
    #[inline]
    pub fn snapshot(&self) -> &[Ripple; MAX_RIPPLES] {
        &self.slots
    }

    pub fn active(&self) -> impl Iterator<Item = &Ripple> {
        let epsilon = self.params.epsilon;
        self.slots.iter().filter(move |r| r.is_active(epsilon))
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    pub fn clear(&mut self) {
        self.slots = [Ripple::default(); MAX_RIPPLES];
    }

    /// Slot data in the layout the shader expects.
    pub fn uniforms(&self) -> [Vec4; MAX_RIPPLES] {
        self.slots.map(|r| r.to_uniform())
    }
}
