/// Fixed-step helpers driven by frame deltas

/// Yields fixed simulation steps so movement speed does not depend on the
/// render rate
#[derive(Debug, Clone)]
pub struct Accumulator {
    timestep: f32,
    accumulator: f32,
    max_steps: u8,
}

impl Accumulator {
    /// Create accumulator stepping at `hz`; at most `max_steps` per tick
    pub fn new(hz: f32, max_steps: u8) -> Self {
        Self {
            timestep: 1.0 / hz,
            accumulator: 0.0,
            max_steps,
        }
    }

    /// Add `delta` seconds and return how many steps to run now
    pub fn tick(&mut self, delta: f32) -> usize {
        self.accumulator += delta;

        let steps = (self.accumulator / self.timestep).min(self.max_steps as f32) as usize;
        self.accumulator -= steps as f32 * self.timestep;

        // A long stall should not queue up a burst of catch-up steps
        if steps == self.max_steps as usize {
            self.accumulator = self.accumulator.min(self.timestep);
        }
        steps
    }
}

/// Fires every N ticks
#[derive(Debug, Clone, Copy)]
pub struct EveryNTicks {
    interval: u64,
    count: u64,
}

impl EveryNTicks {
    pub fn new(interval: u64) -> Self {
        Self { interval, count: 0 }
    }

    /// Tick once, returns true if should fire
    pub fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.interval {
            self.count = 0;
            true
        } else {
            false
        }
    }
}
