use super::config::{ClockMode, ClockParams};

/// Monotonic simulation time, advanced once per rendered frame.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    elapsed: f32,
    frame: u64,
    last_dt: f32,
    params: ClockParams,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(ClockParams::default())
    }
}

impl SimulationClock {
    pub fn new(params: ClockParams) -> Self {
        Self {
            elapsed: 0.0,
            frame: 0,
            last_dt: 0.0,
            params,
        }
    }

    /// Advances by one frame and returns the step that was applied.
    ///
    /// In fixed mode the measured delta is ignored. In measured mode the host
    /// delta is clamped to `[min_dt, max_dt]`; a missing or non-finite delta
    /// falls back to the fixed step. The returned step is always positive.
    pub fn advance(&mut self, measured_dt: Option<f32>) -> f32 {
        let p = &self.params;
        let dt = match (p.mode, measured_dt) {
            (ClockMode::Measured, Some(dt)) if dt.is_finite() => dt,
            _ => p.fixed_dt,
        };
        let min_dt = p.min_dt.max(f32::EPSILON);
        let dt = dt.clamp(min_dt, p.max_dt.max(min_dt));

        self.elapsed += dt;
        self.frame += 1;
        self.last_dt = dt;
        dt
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.frame = 0;
        self.last_dt = 0.0;
    }

    /// Simulation time in seconds.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn last_dt(&self) -> f32 {
        self.last_dt
    }

    pub fn mode(&self) -> ClockMode {
        self.params.mode
    }
}
