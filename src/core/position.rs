//! Board dimensions and cell coordinates.

use serde::{Deserialize, Serialize};

/// Number of rows. Row 0 is the top row.
pub const ROWS: usize = 6;

/// Number of columns.
pub const COLS: usize = 9;

/// A cell coordinate on the board.
///
/// Ordering is row-major (top row first), which is also the order the
/// full-board scanner visits cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Check whether the position lies inside the grid.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.row < ROWS && self.col < COLS
    }

    /// Step by a signed delta, returning `None` when leaving the grid.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        let pos = Position::new(row, col);
        pos.in_bounds().then_some(pos)
    }

    /// Iterate over every cell in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Position::new(row, col)))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_inside() {
        let pos = Position::new(3, 4);
        assert_eq!(pos.offset(1, -1), Some(Position::new(4, 3)));
        assert_eq!(pos.offset(-3, 4), Some(Position::new(0, 8)));
    }

    #[test]
    fn test_offset_leaves_grid() {
        assert_eq!(Position::new(0, 0).offset(-1, 0), None);
        assert_eq!(Position::new(0, 0).offset(0, -1), None);
        assert_eq!(Position::new(ROWS - 1, 0).offset(1, 0), None);
        assert_eq!(Position::new(0, COLS - 1).offset(0, 1), None);
    }

    #[test]
    fn test_all_is_row_major() {
        let cells: Vec<_> = Position::all().collect();
        assert_eq!(cells.len(), ROWS * COLS);
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[1], Position::new(0, 1));
        assert_eq!(cells[COLS], Position::new(1, 0));
        assert!(cells.windows(2).all(|w| w[0] < w[1]));
    }
}
