//! Lock snapshots: the durable record captured every time a piece locks.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// State captured after a lock resolves: the grid with full rows already
/// removed, plus the updated score and turn counters. Cells hold piece
/// kind codes (1..=7) with 0 for empty, so files parse without the enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub score: u32,
    pub turn: u32,
}

impl LockRecord {
    pub fn capture(board: &Board, score: u32, turn: u32) -> Self {
        let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for y in 0..BOARD_HEIGHT as i8 {
            for x in 0..BOARD_WIDTH as i8 {
                if let Some(Some(kind)) = board.get(x, y) {
                    grid[y as usize][x as usize] = kind.code();
                }
            }
        }
        Self {
            board: grid,
            score,
            turn,
        }
    }
}
