#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Mask offsets are 0..4 and always fit in i32
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use crate::game::MASK_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    I,
    L,
    J,
    O,
    S,
    T,
    Z,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::I,
        PieceType::L,
        PieceType::J,
        PieceType::O,
        PieceType::S,
        PieceType::T,
        PieceType::Z,
    ];

    #[must_use]
    pub fn random(rng: &mut fastrand::Rng) -> Self {
        Self::ALL[rng.usize(..Self::ALL.len())]
    }

    #[must_use]
    pub fn mask(self) -> ShapeMask {
        let rows = match self {
            PieceType::I => [
                [0, 1, 0, 0],
                [0, 1, 0, 0],
                [0, 1, 0, 0],
                [0, 1, 0, 0],
            ],
            PieceType::L => [
                [0, 1, 0, 0],
                [0, 1, 0, 0],
                [0, 1, 1, 0],
                [0, 0, 0, 0],
            ],
            PieceType::J => [
                [0, 0, 1, 0],
                [0, 0, 1, 0],
                [0, 1, 1, 0],
                [0, 0, 0, 0],
            ],
            PieceType::O => [
                [0, 0, 0, 0],
                [0, 1, 1, 0],
                [0, 1, 1, 0],
                [0, 0, 0, 0],
            ],
            PieceType::S => [
                [0, 0, 0, 0],
                [0, 1, 1, 0],
                [1, 1, 0, 0],
                [0, 0, 0, 0],
            ],
            PieceType::T => [
                [0, 0, 0, 0],
                [0, 1, 0, 0],
                [1, 1, 1, 0],
                [0, 0, 0, 0],
            ],
            PieceType::Z => [
                [0, 0, 0, 0],
                [0, 1, 1, 0],
                [0, 0, 1, 1],
                [0, 0, 0, 0],
            ],
        };
        ShapeMask::from_bits(rows)
    }
}

/// A 4x4 occupancy mask, indexed `[row][column]` with row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeMask([[bool; MASK_SIZE]; MASK_SIZE]);

impl ShapeMask {
    #[must_use]
    pub fn from_bits(rows: [[u8; MASK_SIZE]; MASK_SIZE]) -> Self {
        let mut mask = [[false; MASK_SIZE]; MASK_SIZE];
        for (i, row) in rows.iter().enumerate() {
            for (j, &bit) in row.iter().enumerate() {
                mask[i][j] = bit == 1;
            }
        }
        Self(mask)
    }

    #[must_use]
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.0[row][col]
    }

    #[must_use]
    pub fn rotated_once(&self) -> Self {
        let mut out = [[false; MASK_SIZE]; MASK_SIZE];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.0[j][MASK_SIZE - 1 - i];
            }
        }
        Self(out)
    }

    /// Offsets `(dx, dy)` of every set cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.0.iter().enumerate().flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, set)| **set)
                .map(move |(j, _)| (j as i32, i as i32))
        })
    }
}

// Only rotation % 4 matters
#[must_use]
pub fn rotate(piece: PieceType, rotation: u8) -> ShapeMask {
    (0..rotation % 4).fold(piece.mask(), |mask, _| mask.rotated_once())
}
