#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;

use crate::components::{ClearedRows, GameState, Phase};
use crate::game::{GRID_WIDTH, QUEUE_LEN, VISIBLE_HEIGHT, VISIBLE_ROW_OFFSET};
use crate::grid::Grid;
use crate::queue::PieceQueue;
use crate::shapes::{PieceType, ShapeMask};

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    // Visible rows only, top to bottom
    pub cells: [[Option<PieceType>; GRID_WIDTH]; VISIBLE_HEIGHT],
    pub queue: [(PieceType, ShapeMask); QUEUE_LEN],
    pub lines_text: String,
    pub rate_text: String,
    pub show_start: bool,
    pub show_game_over: bool,
    // Visible row indices cleared since the previous snapshot
    pub cleared_rows: Vec<usize>,
}

impl Snapshot {
    /// Reads the world and drains its pending row-cleared notifications.
    pub fn capture(world: &mut World) -> Self {
        let grid = world.resource::<Grid>();
        let cells = std::array::from_fn(|row| {
            std::array::from_fn(|col| grid.cell(col, row + VISIBLE_ROW_OFFSET).piece)
        });

        let queue = world
            .resource::<PieceQueue>()
            .upcoming()
            .map(|piece| (piece, piece.mask()));

        let state = world.resource::<GameState>();
        let lines_text = format!("Lines: {}", state.lines);
        let rate_text = format!("Rate: {:.1}", state.drop_rate);
        let show_start = state.phase == Phase::Idle;
        let show_game_over = state.phase == Phase::GameOver;

        let cleared_rows = world
            .resource_mut::<ClearedRows>()
            .drain()
            .into_iter()
            .filter_map(|row| row.checked_sub(VISIBLE_ROW_OFFSET))
            .collect();

        Self {
            cells,
            queue,
            lines_text,
            rate_text,
            show_start,
            show_game_over,
            cleared_rows,
        }
    }
}

/// Receives the per-frame output of the simulation.
pub trait RenderSink {
    type Error;

    fn present(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

pub fn present_system<S: RenderSink>(world: &mut World, sink: &mut S) -> Result<(), S::Error> {
    let snapshot = Snapshot::capture(world);
    sink.present(&snapshot)
}
