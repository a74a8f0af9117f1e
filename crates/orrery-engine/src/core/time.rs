/// Fixed timestep accumulator with a simulation time scale.
///
/// Wall-clock frame deltas go in; a whole number of fixed steps comes out.
/// Each step advances the simulation by `fixed_dt · time_scale` seconds.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    /// Wall-clock duration of one step.
    fixed_dt: f64,
    /// Simulated seconds per wall-clock second.
    time_scale: f64,
    /// Accumulated wall time not yet consumed by a step.
    accumulator: f64,
    paused: bool,
}

/// Cap to prevent a spiral of death after a long stall.
const MAX_STEPS_PER_FRAME: u32 = 10;

impl SimulationClock {
    pub fn new(fixed_dt: f64) -> Self {
        Self {
            fixed_dt,
            time_scale: 1.0,
            accumulator: 0.0,
            paused: false,
        }
    }

    pub fn with_time_scale(mut self, scale: f64) -> Self {
        self.time_scale = scale.max(0.0);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// A paused clock consumes the frame time and yields no steps.
    pub fn advance(&mut self, frame_dt: f64) -> u32 {
        if self.paused {
            return 0;
        }
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.fixed_dt * MAX_STEPS_PER_FRAME as f64);
        let steps = (self.accumulator / self.fixed_dt) as u32;
        self.accumulator -= steps as f64 * self.fixed_dt;
        steps
    }

    /// Interpolation alpha for rendering between steps (0.0 to 1.0).
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.fixed_dt
    }

    /// Simulated seconds covered by one step.
    pub fn step_dt(&self) -> f64 {
        self.fixed_dt * self.time_scale
    }

    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn set_time_scale(&mut self, scale: f64) {
        self.time_scale = scale.max(0.0);
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }
}
