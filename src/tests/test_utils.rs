use bevy_ecs::prelude::*;

use crate::components::{GameState, Phase};
use crate::config::rules::Rules;
use crate::game::GRID_WIDTH;
use crate::grid::{Cell, Grid};
use crate::lifecycle;
use crate::piece::{ActivePiece, PieceController};
use crate::shapes::PieceType;

pub const TEST_SEED: u64 = 0x5EED;

#[must_use]
pub fn test_rules() -> Rules {
    Rules {
        seed: Some(TEST_SEED),
        ..Rules::default()
    }
}

/// Creates a world with every game resource, seeded for repeatable queues.
#[must_use]
pub fn create_test_world() -> World {
    lifecycle::create_world(test_rules())
}

/// Same as `create_test_world` but already in the `Running` phase.
#[must_use]
pub fn create_running_world() -> World {
    let mut world = create_test_world();
    lifecycle::start_game(&mut world);
    assert_eq!(world.resource::<GameState>().phase, Phase::Running);
    world
}

pub fn lock_cell(grid: &mut Grid, x: usize, y: usize) {
    grid.cells[y][x] = Cell {
        piece: Some(PieceType::O),
        locked: true,
    };
}

// Locks every column of `row` except those listed in `gaps`
pub fn fill_row(grid: &mut Grid, row: usize, gaps: &[usize]) {
    for x in 0..GRID_WIDTH {
        if !gaps.contains(&x) {
            lock_cell(grid, x, row);
        }
    }
}

pub fn set_active(world: &mut World, piece: ActivePiece) {
    world.resource_mut::<PieceController>().active = Some(piece);
}

#[must_use]
pub fn active(world: &World) -> Option<ActivePiece> {
    world.resource::<PieceController>().active
}
