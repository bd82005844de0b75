//! Grid coordinates.
//!
//! Positions are 1-indexed (row, column) pairs on the 15x15 board. They are
//! ordered by row, then column, so sorting a set of positions yields the
//! row-major scan order used for rendering and by the built-in strategies.

use serde::{Deserialize, Serialize};

/// Number of rows (and columns) on the board.
pub const BOARD_SIZE: i32 = 15;

/// A cell on the board, addressed by 1-indexed row and column.
///
/// Out-of-range coordinates are representable so that a strategy can
/// propose them; the validator rejects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

/// Orthogonal unit offsets in up, down, left, right order.
pub const ORTHOGONAL_STEPS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

impl Position {
    pub const fn new(row: i32, col: i32) -> Self {
        Position { row, col }
    }

    /// Returns true if the position lies within 1..=15 on both axes.
    pub const fn in_bounds(self) -> bool {
        self.row >= 1 && self.row <= BOARD_SIZE && self.col >= 1 && self.col <= BOARD_SIZE
    }

    /// Returns the position shifted by the given row and column deltas.
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Position {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// Returns the four orthogonal neighbours, including out-of-bounds ones.
    pub fn neighbors(self) -> [Position; 4] {
        ORTHOGONAL_STEPS.map(|(dr, dc)| self.offset(dr, dc))
    }

    pub const fn manhattan(self, other: Position) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// True iff exactly one coordinate differs, and by exactly one.
    pub const fn is_orthogonally_adjacent(self, other: Position) -> bool {
        let dr = (self.row - other.row).abs();
        let dc = (self.col - other.col).abs();
        (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
    }

    /// Point reflection through the board centre: (r, c) -> (16-r, 16-c).
    ///
    /// Player one's formation is player zero's mirrored. Applying it twice
    /// yields the original position.
    pub const fn mirrored(self) -> Self {
        Position {
            row: BOARD_SIZE + 1 - self.row,
            col: BOARD_SIZE + 1 - self.col,
        }
    }

    /// Zero-based (row, col) index into a 15x15 array, if in bounds.
    pub(crate) fn index(self) -> Option<(usize, usize)> {
        if self.in_bounds() {
            Some(((self.row - 1) as usize, (self.col - 1) as usize))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Every in-bounds position in row-major order.
pub fn all_positions() -> impl Iterator<Item = Position> {
    (1..=BOARD_SIZE).flat_map(|row| (1..=BOARD_SIZE).map(move |col| Position::new(row, col)))
}
