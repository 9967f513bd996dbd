pub mod app;
pub mod components;
pub mod config;
pub mod game;
pub mod gravity;
pub mod grid;
pub mod lifecycle;
pub mod line_clear;
pub mod piece;
pub mod queue;
pub mod render;
pub mod shapes;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    started: Instant,
    last_update: Instant,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            delta: Duration::default(),
            started: now,
            last_update: now,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.last_update = now;
    }

    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }

    #[must_use]
    pub fn total_seconds(&self) -> f32 {
        self.last_update.duration_since(self.started).as_secs_f32()
    }
}
