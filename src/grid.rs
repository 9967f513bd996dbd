#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since grid dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;

use crate::game::{GRID_HEIGHT, GRID_WIDTH, VISIBLE_ROW_OFFSET};
use crate::shapes::{PieceType, ShapeMask};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub piece: Option<PieceType>,
    // Only true once a piece has settled here
    pub locked: bool,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        piece: None,
        locked: false,
    };
}

// Row 0 is the top of the hidden area
#[derive(Resource, Debug, Clone)]
pub struct Grid {
    pub cells: [[Cell; GRID_WIDTH]; GRID_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[Cell::EMPTY; GRID_WIDTH]; GRID_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::EMPTY);
        }
    }

    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[y][x]
    }

    // Absolute grid coordinates if the position is on the field
    fn in_bounds(x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || x >= GRID_WIDTH as i32 || y < 0 || y >= GRID_HEIGHT as i32 {
            None
        } else {
            Some((x as usize, y as usize))
        }
    }

    fn covered(
        mask: &ShapeMask,
        origin_x: i32,
        origin_y: i32,
    ) -> impl Iterator<Item = (i32, i32)> + '_ {
        mask.cells().map(move |(dx, dy)| (origin_x + dx, origin_y + dy))
    }

    #[must_use]
    pub fn can_place(&self, mask: &ShapeMask, origin_x: i32, origin_y: i32) -> bool {
        Self::covered(mask, origin_x, origin_y).all(|(x, y)| {
            Self::in_bounds(x, y).is_some_and(|(x, y)| !self.cells[y][x].locked)
        })
    }

    #[must_use]
    pub fn overlaps_locked(&self, mask: &ShapeMask, origin_x: i32, origin_y: i32) -> bool {
        Self::covered(mask, origin_x, origin_y).any(|(x, y)| {
            Self::in_bounds(x, y).is_some_and(|(x, y)| self.cells[y][x].locked)
        })
    }

    pub fn clear_transient(&mut self) {
        for cell in self.cells.iter_mut().flatten() {
            if !cell.locked {
                cell.piece = None;
            }
        }
    }

    pub fn paint(&mut self, mask: &ShapeMask, origin_x: i32, origin_y: i32, piece: PieceType) {
        for (x, y) in Self::covered(mask, origin_x, origin_y) {
            if let Some((x, y)) = Self::in_bounds(x, y) {
                let cell = &mut self.cells[y][x];
                if !cell.locked {
                    cell.piece = Some(piece);
                }
            }
        }
    }

    // True if any cell landed in the hidden rows
    pub fn lock(
        &mut self,
        mask: &ShapeMask,
        origin_x: i32,
        origin_y: i32,
        piece: PieceType,
    ) -> bool {
        let mut overflow = false;
        for (x, y) in Self::covered(mask, origin_x, origin_y) {
            if let Some((x, y)) = Self::in_bounds(x, y) {
                self.cells[y][x] = Cell {
                    piece: Some(piece),
                    locked: true,
                };
                overflow |= y < VISIBLE_ROW_OFFSET;
            }
        }
        overflow
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.locked)
    }

    // Bottom to top
    #[must_use]
    pub fn full_rows(&self) -> Vec<usize> {
        (0..GRID_HEIGHT).rev().filter(|&row| self.is_row_full(row)).collect()
    }

    // Each kept row drops by the number of cleared rows below it
    pub fn collapse(&mut self, cleared: &[usize]) {
        let mut is_cleared = [false; GRID_HEIGHT];
        for &row in cleared {
            if row < GRID_HEIGHT {
                is_cleared[row] = true;
            }
        }

        let mut collapse_distance = 0;
        for row in (0..GRID_HEIGHT).rev() {
            if is_cleared[row] {
                collapse_distance += 1;
                continue;
            }
            if collapse_distance == 0 {
                continue;
            }
            self.cells[row + collapse_distance] = self.cells[row];
            self.cells[row].fill(Cell::EMPTY);
        }

        // Anything left at the very top has nothing above it to fall in
        for row in &mut self.cells[..collapse_distance] {
            row.fill(Cell::EMPTY);
        }
    }
}
