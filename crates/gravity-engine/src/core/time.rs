/// Fraction of a step treated as rounding noise when draining the accumulator.
const STEP_EPSILON: f32 = 1e-3;

/// Fixed timestep accumulator.
/// Ensures game logic runs at a consistent rate regardless of frame time.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Maximum steps drained per frame (spiral-of-death guard).
    max_steps: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: 10,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    ///
    /// Time beyond `max_steps` is dropped, not carried over.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let wanted = ((self.accumulator + self.dt * STEP_EPSILON) / self.dt) as u32;
        let steps = wanted.min(self.max_steps);
        self.accumulator = (self.accumulator - steps as f32 * self.dt).max(0.0);
        if wanted > steps {
            log::trace!(
                "dropping {} fixed steps ({:.4}s)",
                wanted - steps,
                self.accumulator
            );
            self.accumulator = 0.0;
        }
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Leftover time that has not yet formed a full step.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Restore a previously saved accumulator.
    pub fn set_accumulator(&mut self, accumulator: f32) {
        self.accumulator = accumulator.max(0.0);
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
