/// Ticks run for one frame at most; the rest of a long stall (background
/// tab, debugger pause) is dropped.
const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed-rate clock for the viewer.
///
/// The host reports whatever time passed since the last animation frame;
/// the viewer advances orbits and transitions in whole ticks of `dt` so
/// motion does not depend on the display refresh rate.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self { dt, accumulator: 0.0 }
    }

    /// Add frame time and return how many ticks to run now.
    /// Negative or non-finite frame times count as zero.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(self.dt * MAX_STEPS_PER_FRAME as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Fraction of a tick left over (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
