#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;

// Gravity timer. Turns elapsed time into at most one drop attempt per frame.
#[derive(Resource, Debug, Clone, Default)]
pub struct DropScheduler {
    pub timer: f32,
}

impl DropScheduler {
    /// Adds `delta_seconds` and reports whether a drop is due at `rate` moves
    /// per second. Owed ticks beyond the first are drained, not replayed.
    pub fn tick(&mut self, delta_seconds: f32, rate: f32) -> bool {
        // Time doesn't bank up while gravity is off
        if !(rate.is_finite() && rate > 0.0) {
            return false;
        }
        self.timer += delta_seconds;

        let interval = 1.0 / rate;
        if self.timer <= interval {
            return false;
        }
        while self.timer > interval {
            self.timer -= interval;
        }
        true
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
    }
}
