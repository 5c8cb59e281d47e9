//! Active piece: a kind, a rotation state, and an anchor position.

use arrayvec::ArrayVec;

use crate::core::board::Board;
use crate::core::shapes;
use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// The falling piece. The anchor (x, y) is the top-left corner of the
/// rotation bounding box and may sit above the top of the board while the
/// piece is still entering the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// Piece at the shared entry position, rotation state 0.
    pub fn spawn(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::SPAWN,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Absolute board coordinates of the four occupied cells.
    pub fn cells(&self) -> ArrayVec<(i8, i8), 4> {
        shapes::rotation_mask(self.kind, self.rotation)
            .cells()
            .into_iter()
            .map(|(col, row)| (self.x + col, self.y + row))
            .collect()
    }

    /// True when every cell of the piece lands on a free position.
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| !board.is_occupied(x, y))
    }
}
