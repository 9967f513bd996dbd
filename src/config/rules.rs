#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::Resource;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::game::{FAST_DROP_RATE, INITIAL_DROP_RATE, LINES_PER_RATE_STEP, RATE_STEP, SHIFT_RATE};

// Timing and progression knobs for a run. Rates are moves per second.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub initial_drop_rate: f32,
    pub fast_drop_rate: f32,
    pub shift_rate: f32,
    // 0 disables rate progression
    pub lines_per_rate_step: u32,
    pub rate_step: f32,
    // Fixed seed for the piece generator, random when unset
    pub seed: Option<u64>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_drop_rate: INITIAL_DROP_RATE,
            fast_drop_rate: FAST_DROP_RATE,
            shift_rate: SHIFT_RATE,
            lines_per_rate_step: LINES_PER_RATE_STEP,
            rate_step: RATE_STEP,
            seed: None,
        }
    }
}

impl Rules {
    #[must_use]
    pub fn rng(&self) -> fastrand::Rng {
        self.seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
    }

    // Shift and fast-drop rates must be positive; bad values fall back to the defaults.
    // The initial drop rate is left alone since zero or less turns gravity off.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.shift_rate.is_finite() && self.shift_rate > 0.0) {
            warn!(
                "Invalid shift_rate {}, using {}",
                self.shift_rate, defaults.shift_rate
            );
            self.shift_rate = defaults.shift_rate;
        }
        if !(self.fast_drop_rate.is_finite() && self.fast_drop_rate > 0.0) {
            warn!(
                "Invalid fast_drop_rate {}, using {}",
                self.fast_drop_rate, defaults.fast_drop_rate
            );
            self.fast_drop_rate = defaults.fast_drop_rate;
        }
        if !self.initial_drop_rate.is_finite() {
            warn!(
                "Invalid initial_drop_rate {}, using {}",
                self.initial_drop_rate, defaults.initial_drop_rate
            );
            self.initial_drop_rate = defaults.initial_drop_rate;
        }
        self
    }
}
