//! Board module - manages the locked-cell grid
//!
//! The board is a 10x20 grid where each cell can be empty or filled with a piece kind.
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the top (y < 0) are a staging area for freshly spawned pieces: they are
//! never stored and never collide, so [`Board::is_occupied`] reports them empty.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if outside the stored grid
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if outside the stored grid
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Collision query for piece placement. Side walls and the floor count
    /// as occupied, the staging rows above the top count as empty, and
    /// stored cells report whether a piece is locked there.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 {
            return true;
        }
        if y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Write a piece's absolute cells onto the board. Cells still in the
    /// staging rows above the top are dropped rather than stored; callers
    /// validate the placement before locking.
    pub fn lock(&mut self, cells: &[(i8, i8)], kind: PieceKind) {
        for &(x, y) in cells {
            self.set(x, y, Some(kind));
        }
    }

    /// True when any locked cell sits in a row strictly above `row`.
    pub fn any_locked_above(&self, row: i8) -> bool {
        let limit = row.clamp(0, BOARD_HEIGHT as i8) as usize;
        self.cells[..limit * BOARD_WIDTH as usize]
            .iter()
            .any(|cell| cell.is_some())
    }

    /// Clear all full rows and return their indices in ascending order
    /// (top row first). Uses a two-pointer compaction so surviving rows
    /// move at most once, with zero allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                // This row is full, record it and skip
                cleared_rows.push(read_y);
            } else {
                // This row is not full, move it down to the write position
                write_y -= 1;
                if write_y != read_y {
                    // Copy row using copy_within (no allocation, handles overlap)
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the remaining rows at the top
        for y in 0..write_y {
            let start = y * width;
            let end = start + width;
            for cell in &mut self.cells[start..end] {
                *cell = None;
            }
        }

        // Reverse the bottom-up scan order
        cleared_rows.reverse();
        cleared_rows
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i8, kind: PieceKind) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(kind));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_board_get_set() {
        let mut board = Board::new();

        assert!(board.set(0, 0, Some(PieceKind::I)));
        assert!(board.set(5, 10, Some(PieceKind::T)));
        assert!(!board.set(0, -1, Some(PieceKind::O)));
        assert!(!board.set(10, 0, Some(PieceKind::O)));

        assert_eq!(board.get(0, 0), Some(Some(PieceKind::I)));
        assert_eq!(board.get(5, 10), Some(Some(PieceKind::T)));
        assert_eq!(board.get(1, 1), Some(None));
        assert_eq!(board.get(0, -1), None);

        // Verify internal array
        assert_eq!(board.cells[0], Some(PieceKind::I));
        assert_eq!(board.cells[10 * 10 + 5], Some(PieceKind::T));
    }

    #[test]
    fn test_occupied_walls_floor_and_staging_rows() {
        let board = Board::new();

        // Side walls block at any height, even above the top
        assert!(board.is_occupied(-1, 5));
        assert!(board.is_occupied(10, 5));
        assert!(board.is_occupied(-1, -1));

        // The floor blocks
        assert!(board.is_occupied(0, 20));
        assert!(board.is_occupied(9, 25));

        // Staging rows above the top are always free
        assert!(!board.is_occupied(0, -1));
        assert!(!board.is_occupied(9, -3));

        // Empty in-grid cells are free
        assert!(!board.is_occupied(4, 10));
    }

    #[test]
    fn test_occupied_sees_locked_cells() {
        let mut board = Board::new();
        board.set(4, 10, Some(PieceKind::Z));

        assert!(board.is_occupied(4, 10));
        assert!(!board.is_occupied(4, 9));
    }

    #[test]
    fn test_lock_drops_cells_above_the_top() {
        let mut board = Board::new();
        board.lock(&[(4, -1), (3, 0), (4, 0), (5, 0)], PieceKind::T);

        assert_eq!(board.get(3, 0), Some(Some(PieceKind::T)));
        assert_eq!(board.get(4, 0), Some(Some(PieceKind::T)));
        assert_eq!(board.get(5, 0), Some(Some(PieceKind::T)));
        // (4, -1) had nowhere to go and the rest of the grid stays empty
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 3);
    }

    #[test]
    fn test_is_row_full() {
        let mut board = Board::new();
        assert!(!board.is_row_full(19));
        assert!(!board.is_row_full(20));

        fill_row(&mut board, 19, PieceKind::J);
        assert!(board.is_row_full(19));

        board.set(0, 19, None);
        assert!(!board.is_row_full(19));
    }

    #[test]
    fn test_clear_single_row_shifts_rows_down() {
        let mut board = Board::new();
        fill_row(&mut board, 19, PieceKind::I);
        board.set(0, 18, Some(PieceKind::L));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19]);

        // The marker from row 18 lands on row 19, row 18 is now empty
        assert_eq!(board.get(0, 19), Some(Some(PieceKind::L)));
        assert_eq!(board.get(0, 18), Some(None));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_clear_renumbers_around_surviving_rows() {
        let mut board = Board::new();
        // Full rows 16, 18, 19 with survivor markers on 17 and 15
        fill_row(&mut board, 16, PieceKind::S);
        fill_row(&mut board, 18, PieceKind::S);
        fill_row(&mut board, 19, PieceKind::S);
        board.set(2, 17, Some(PieceKind::O));
        board.set(5, 15, Some(PieceKind::J));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[16, 18, 19]);

        // Survivors compact to the bottom: 17 -> 19, 15 -> 18
        assert_eq!(board.get(2, 19), Some(Some(PieceKind::O)));
        assert_eq!(board.get(5, 18), Some(Some(PieceKind::J)));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_clear_without_full_rows_changes_nothing() {
        let mut board = Board::new();
        board.set(0, 19, Some(PieceKind::T));
        board.set(9, 18, Some(PieceKind::Z));
        board.set(4, 0, Some(PieceKind::I));
        let before = board.clone();

        let cleared = board.clear_full_rows();
        assert!(cleared.is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_any_locked_above() {
        let mut board = Board::new();
        assert!(!board.any_locked_above(1));

        board.set(0, 5, Some(PieceKind::L));
        assert!(!board.any_locked_above(1));
        assert!(board.any_locked_above(6));

        board.set(3, 0, Some(PieceKind::L));
        assert!(board.any_locked_above(1));
    }

    #[test]
    fn test_clear_board() {
        let mut board = Board::new();
        fill_row(&mut board, 10, PieceKind::S);
        board.clear();
        assert!(board.cells().iter().all(|c| c.is_none()));
    }
}
