#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::{debug, info, trace};

use crate::components::{ClearedRows, GameState, Input, Key};
use crate::config::rules::Rules;
use crate::gravity::DropScheduler;
use crate::grid::Grid;
use crate::lifecycle;
use crate::line_clear;
use crate::piece::PieceController;
use crate::queue::PieceQueue;

pub fn clear_transient_system(world: &mut World) {
    world.resource_mut::<Grid>().clear_transient();
}

/// Brings in the next piece when nothing is falling. Returns false if the
/// new piece landed on settled cells and the game ended.
pub fn spawn_system(world: &mut World) -> bool {
    if world.resource::<PieceController>().active.is_some() {
        return true;
    }

    let spawned = world.resource_scope(|world, mut queue: Mut<PieceQueue>| {
        queue.spawn(world.resource::<Grid>())
    });
    world.resource_mut::<PieceController>().active = Some(spawned.piece);

    if spawned.blocked {
        info!("Spawn blocked by the stack");
        lifecycle::end_game(world);
        return false;
    }
    true
}

pub fn rotation_system(world: &mut World) {
    let delta = world.resource::<Input>().rotation_delta();
    if delta == 0 {
        return;
    }
    world.resource_scope(|world, mut controller: Mut<PieceController>| {
        controller.rotate(world.resource::<Grid>(), delta);
    });
}

pub fn shift_system(world: &mut World, delta_seconds: f32) {
    let (held, released, direction) = {
        let input = world.resource::<Input>();
        (
            input.shift_held(),
            input.shift_released(),
            input.shift_direction(),
        )
    };

    world.resource_scope(|world, mut controller: Mut<PieceController>| {
        if held {
            controller.shift(world.resource::<Grid>(), direction, delta_seconds);
        }
        if released {
            controller.release_shift();
        }
    });
}

pub fn gravity_system(world: &mut World, delta_seconds: f32) {
    let rate = if world.resource::<Input>().key_down(Key::Down) {
        world.resource::<Rules>().fast_drop_rate
    } else {
        world.resource::<GameState>().drop_rate
    };

    if !world
        .resource_mut::<DropScheduler>()
        .tick(delta_seconds, rate)
    {
        return;
    }

    let moved = world.resource_scope(|world, mut controller: Mut<PieceController>| {
        controller.try_move(world.resource::<Grid>(), 0, 1)
    });
    if moved {
        trace!("Piece fell one row");
    } else {
        lock_in_system(world);
    }
}

/// Settles the active piece, clears rows and ends the game if the piece
/// came to rest in the hidden rows.
pub fn lock_in_system(world: &mut World) {
    let Some(active) = world.resource_mut::<PieceController>().active.take() else {
        return;
    };
    debug!(
        "Locking {:?} at ({}, {}) rotation {}",
        active.piece, active.x, active.y, active.rotation
    );

    let overflow = world.resource_mut::<Grid>().lock(
        &active.mask(),
        active.x,
        active.y,
        active.piece,
    );

    let rules = world.resource::<Rules>().clone();
    world.resource_scope(|world, mut grid: Mut<Grid>| {
        world.resource_scope(|world, mut state: Mut<GameState>| {
            let mut events = world.resource_mut::<ClearedRows>();
            line_clear::clear_full_rows(&mut grid, &mut state, &rules, |row| {
                events.rows.push(row);
            });
        });
    });

    if overflow {
        info!("Piece locked above the visible field");
        lifecycle::end_game(world);
    }
}

pub fn paint_system(world: &mut World) {
    let Some(active) = world.resource::<PieceController>().active else {
        return;
    };
    world
        .resource_mut::<Grid>()
        .paint(&active.mask(), active.x, active.y, active.piece);
}
