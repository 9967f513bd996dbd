#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::debug;

use crate::game::{KICK_OFFSETS, SPAWN_X, SPAWN_Y};
use crate::grid::Grid;
use crate::shapes::{self, PieceType, ShapeMask};

// `x`/`y` locate the top-left corner of the 4x4 box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub piece: PieceType,
    pub rotation: u8,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    #[must_use]
    pub fn spawn(piece: PieceType) -> Self {
        Self {
            piece,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    #[must_use]
    pub fn mask(&self) -> ShapeMask {
        shapes::rotate(self.piece, self.rotation)
    }

    #[must_use]
    pub fn fits(&self, grid: &Grid) -> bool {
        grid.can_place(&self.mask(), self.x, self.y)
    }
}

#[derive(Resource, Debug, Clone)]
pub struct PieceController {
    pub active: Option<ActivePiece>,
    shift_timer: f32,
    shift_interval: f32,
}

impl PieceController {
    #[must_use]
    pub fn new(shift_rate: f32) -> Self {
        // A rate of zero or less turns auto-shift off
        let shift_interval = if shift_rate > 0.0 {
            1.0 / shift_rate
        } else {
            f32::INFINITY
        };
        Self {
            active: None,
            // Primed so the first press moves straight away
            shift_timer: shift_interval,
            shift_interval,
        }
    }

    #[must_use]
    pub fn shift_timer(&self) -> f32 {
        self.shift_timer
    }

    pub fn reset(&mut self) {
        self.active = None;
        self.shift_timer = self.shift_interval;
    }

    // Kick nudges are tried in order when the turned piece doesn't fit
    pub fn rotate(&mut self, grid: &Grid, delta: i32) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if delta == 0 {
            return false;
        }

        let rotation = (i32::from(active.rotation) + delta).rem_euclid(4);
        let rotation = u8::try_from(rotation).unwrap_or(0);
        let mask = shapes::rotate(active.piece, rotation);

        if grid.can_place(&mask, active.x, active.y) {
            active.rotation = rotation;
            return true;
        }

        for (dx, dy) in KICK_OFFSETS {
            if grid.can_place(&mask, active.x + dx, active.y + dy) {
                debug!("Rotation kicked by ({dx}, {dy})");
                active.rotation = rotation;
                active.x += dx;
                active.y += dy;
                return true;
            }
        }

        debug!("Rotation rejected for {:?}", active.piece);
        false
    }

    pub fn try_move(&mut self, grid: &Grid, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if grid.can_place(&active.mask(), active.x + dx, active.y + dy) {
            active.x += dx;
            active.y += dy;
            true
        } else {
            false
        }
    }

    // At most one cell per call, leftover time carries over
    pub fn shift(&mut self, grid: &Grid, direction: i32, delta_seconds: f32) -> bool {
        if !self.shift_interval.is_finite() {
            return false;
        }
        self.shift_timer += delta_seconds;
        if self.shift_timer < self.shift_interval {
            return false;
        }
        self.shift_timer -= self.shift_interval;

        direction != 0 && self.try_move(grid, direction.signum(), 0)
    }

    pub fn release_shift(&mut self) {
        self.shift_timer = self.shift_interval;
    }
}
