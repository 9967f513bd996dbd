#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use log::debug;

use crate::game::QUEUE_LEN;
use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::shapes::PieceType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spawned {
    pub piece: ActivePiece,
    // The new piece overlaps settled cells: the stack has topped off
    pub blocked: bool,
}

// Lookahead of upcoming pieces, head first
#[derive(Resource, Debug, Clone)]
pub struct PieceQueue {
    upcoming: [PieceType; QUEUE_LEN],
    rng: fastrand::Rng,
}

impl PieceQueue {
    #[must_use]
    pub fn new(mut rng: fastrand::Rng) -> Self {
        let upcoming = std::array::from_fn(|_| PieceType::random(&mut rng));
        Self { upcoming, rng }
    }

    #[must_use]
    pub fn upcoming(&self) -> [PieceType; QUEUE_LEN] {
        self.upcoming
    }

    /// Takes the head of the queue as the new active piece at the spawn point
    /// and refills the tail.
    pub fn spawn(&mut self, grid: &Grid) -> Spawned {
        let head = self.upcoming[0];
        self.upcoming.rotate_left(1);
        self.upcoming[QUEUE_LEN - 1] = PieceType::random(&mut self.rng);

        let piece = ActivePiece::spawn(head);
        let blocked = grid.overlaps_locked(&piece.mask(), piece.x, piece.y);
        debug!("Spawned {head:?}, next up {:?}", self.upcoming);
        Spawned { piece, blocked }
    }
}
