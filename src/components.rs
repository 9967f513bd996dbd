#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow precision loss when casting between numeric types since exact precision isn't critical in this game
    clippy::cast_precision_loss,
    // Line counts per lock are at most four
    clippy::cast_possible_truncation
)]

use bevy_ecs::prelude::*;
use std::time::{Duration, Instant};

use crate::config::rules::Rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    GameOver,
}

#[derive(Debug, Resource, Clone)]
pub struct GameState {
    pub phase: Phase,
    pub lines: u32,
    pub drop_rate: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            lines: 0,
            drop_rate: crate::game::INITIAL_DROP_RATE,
        }
    }
}

impl GameState {
    #[must_use]
    pub fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn reset(&mut self, rules: &Rules) {
        self.lines = 0;
        self.drop_rate = rules.initial_drop_rate;
    }

    /// Adds `cleared` lines and bumps the drop rate once for every multiple of
    /// `lines_per_rate_step` passed on the way. Returns the number of bumps.
    pub fn record_lines(&mut self, cleared: u32, rules: &Rules) -> u32 {
        let bumps = (1..=cleared)
            .filter(|i| {
                (self.lines + i)
                    .checked_rem(rules.lines_per_rate_step)
                    .is_some_and(|rem| rem == 0)
            })
            .count() as u32;
        self.lines += cleared;
        self.drop_rate += bumps as f32 * rules.rate_step;
        bumps
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
}

impl Key {
    pub const ALL: [Key; 5] = [
        Key::Left,
        Key::Right,
        Key::Down,
        Key::RotateCw,
        Key::RotateCcw,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct KeyState {
    down: bool,
    pressed: bool,
    released: bool,
    last_seen: Option<Instant>,
}

// Keyboard state as seen by one frame. Edges are cleared by `end_frame`.
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    keys: [KeyState; 5],
}

impl Input {
    pub fn press(&mut self, key: Key) {
        let state = &mut self.keys[key.index()];
        if !state.down {
            state.pressed = true;
        }
        state.down = true;
    }

    pub fn press_at(&mut self, key: Key, now: Instant) {
        self.press(key);
        self.keys[key.index()].last_seen = Some(now);
    }

    pub fn release(&mut self, key: Key) {
        let state = &mut self.keys[key.index()];
        if state.down {
            state.released = true;
        }
        state.down = false;
        state.last_seen = None;
    }

    // For terminals that never report key releases
    pub fn release_stale(&mut self, now: Instant, hold: Duration) {
        for key in Key::ALL {
            let stale = self.keys[key.index()]
                .last_seen
                .is_some_and(|seen| now.duration_since(seen) >= hold);
            if stale {
                self.release(key);
            }
        }
    }

    #[must_use]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys[key.index()].down
    }

    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys[key.index()].pressed
    }

    #[must_use]
    pub fn key_released(&self, key: Key) -> bool {
        self.keys[key.index()].released
    }

    pub fn end_frame(&mut self) {
        for state in &mut self.keys {
            state.pressed = false;
            state.released = false;
        }
    }

    // +1 clockwise, -1 counter-clockwise
    #[must_use]
    pub fn rotation_delta(&self) -> i32 {
        i32::from(self.key_pressed(Key::RotateCw)) - i32::from(self.key_pressed(Key::RotateCcw))
    }

    /// Held horizontal direction: +1 right, -1 left, 0 for neither or both.
    #[must_use]
    pub fn shift_direction(&self) -> i32 {
        i32::from(self.key_down(Key::Right)) - i32::from(self.key_down(Key::Left))
    }

    #[must_use]
    pub fn shift_held(&self) -> bool {
        self.key_down(Key::Left) || self.key_down(Key::Right)
    }

    #[must_use]
    pub fn shift_released(&self) -> bool {
        self.key_released(Key::Left) || self.key_released(Key::Right)
    }
}

// Grid rows cleared since the renderer last looked
#[derive(Resource, Debug, Clone, Default)]
pub struct ClearedRows {
    pub rows: Vec<usize>,
}

impl ClearedRows {
    pub fn drain(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.rows)
    }
}
