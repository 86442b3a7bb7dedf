//! Board module - manages the game grid
//!
//! A fixed 10x20 grid of cell ids stored as a flat array for cache locality.
//! Coordinates: (x, y) with x in 0..10 left to right and y in 0..20 top to
//! bottom. The grid is only ever mutated by `merge`, `sweep` and `clear`;
//! its dimensions never change.

use arrayvec::ArrayVec;

use crate::core::catalog::Shape;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [0; BOARD_SIZE],
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

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at (x, y), or `None` if out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True iff (x, y) is inside the grid and empty.
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(0))
    }

    /// The single collision predicate. Every movement, rotation, spawn and
    /// drop decision goes through this.
    ///
    /// Returns true if any occupied cell of `shape`, offset by (x, y), falls
    /// outside the grid or onto a nonzero board cell.
    pub fn collides(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .occupied()
            .any(|(dx, dy, _)| !self.is_free(x + dx as i8, y + dy as i8))
    }

    /// Fix a piece's cells into the grid.
    ///
    /// Precondition: the placement is collision-free (`collides` returned
    /// false). Merge itself does not re-check; an out-of-bounds write under a
    /// violated precondition panics in debug builds and is dropped in
    /// release.
    pub fn merge(&mut self, shape: &Shape, x: i8, y: i8) {
        for (dx, dy, id) in shape.occupied() {
            let px = x + dx as i8;
            let py = y + dy as i8;
            debug_assert!(
                Self::index(px, py).is_some(),
                "merge precondition violated at ({px}, {py})"
            );
            self.set(px, py, id);
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|&cell| cell != 0)
    }

    /// Remove every full row, inserting empty rows at the top to keep the
    /// grid's height fixed and the surviving rows' relative order intact.
    ///
    /// Scans bottom to top with a separate write cursor, so a row pulled down
    /// into the scan position is re-examined rather than skipped. Returns the
    /// count of rows cleared (0-4: one lock occupies at most 4 rows).
    pub fn sweep(&mut self) -> u32 {
        let rows = self.sweep_rows();
        rows.len() as u32
    }

    /// Like [`Board::sweep`], but reports which row indices were full
    /// (bottom to top).
    pub fn sweep_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                let _ = cleared.try_push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    let dst = write_y * width;
                    self.cells.copy_within(src..src + width, dst);
                }
            }
        }

        // Fresh empty rows at the top, one per cleared row.
        for cell in &mut self.cells[..write_y * width] {
            *cell = 0;
        }

        cleared
    }

    /// Clear the entire board (game reset).
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Flat view of the cells (read-only, for rendering and tests).
    pub fn cells(&self) -> &[Cell] {
        &self.cells
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
    use crate::types::PieceKind;

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, 1);
        }
    }

    #[test]
    fn test_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let board = Board::new();
        let shape = PieceKind::O.shape();

        // O occupies local columns 1..=2 and rows 0..=1.
        assert!(!board.collides(&shape, 0, 0));
        assert!(board.collides(&shape, -2, 0)); // past left wall
        assert!(board.collides(&shape, 8, 0)); // past right wall
        assert!(board.collides(&shape, 0, 19)); // below the floor
        assert!(!board.collides(&shape, 0, 18)); // resting on the floor
    }

    #[test]
    fn test_collides_with_occupied_cells() {
        let mut board = Board::new();
        let shape = PieceKind::O.shape();
        board.set(1, 1, 7);
        assert!(board.collides(&shape, 0, 0));
        assert!(!board.collides(&shape, 2, 0));
    }

    #[test]
    fn test_merge_writes_piece_ids() {
        let mut board = Board::new();
        let shape = PieceKind::T.shape();
        board.merge(&shape, 3, 5);

        assert_eq!(board.get(4, 5), Some(6));
        assert_eq!(board.get(3, 6), Some(6));
        assert_eq!(board.get(4, 6), Some(6));
        assert_eq!(board.get(5, 6), Some(6));
        // Empty matrix cells stay empty on the board.
        assert_eq!(board.get(3, 5), Some(0));
    }

    #[test]
    fn test_sweep_single_row() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        board.set(0, 18, 5);

        assert_eq!(board.sweep(), 1);
        // The cell above the cleared row moved down.
        assert_eq!(board.get(0, 19), Some(5));
        assert_eq!(board.get(0, 18), Some(0));
    }

    #[test]
    fn test_sweep_adjacent_rows_not_skipped() {
        let mut board = Board::new();
        // Four full rows in a block: the re-examination rule must catch all.
        for y in 16..20 {
            fill_row(&mut board, y);
        }
        board.set(3, 15, 2);

        assert_eq!(board.sweep(), 4);
        assert_eq!(board.get(3, 19), Some(2));
        assert!(!board.is_row_full(19));
    }

    #[test]
    fn test_sweep_preserves_row_order() {
        let mut board = Board::new();
        fill_row(&mut board, 5);
        fill_row(&mut board, 10);
        fill_row(&mut board, 15);
        board.set(0, 4, 2); // above all three
        board.set(0, 9, 3); // above two
        board.set(0, 14, 5); // above one

        assert_eq!(board.sweep(), 3);
        assert_eq!(board.get(0, 7), Some(2));
        assert_eq!(board.get(0, 11), Some(3));
        assert_eq!(board.get(0, 15), Some(5));
    }

    #[test]
    fn test_sweep_empty_board() {
        let mut board = Board::new();
        assert_eq!(board.sweep(), 0);
        assert!(board.cells().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_clear() {
        let mut board = Board::new();
        fill_row(&mut board, 10);
        board.clear();
        assert!(board.cells().iter().all(|&c| c == 0));
    }
}
