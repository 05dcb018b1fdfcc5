//! Grid-of-states snapshots of a board.
//!
//! A snapshot stores only the cell markers (0 empty, 1 and 2 for the players)
//! plus the move counter. Loading validates the shape and gravity, then
//! rebuilds the per-player index with a row-major scan.

use serde::{Deserialize, Serialize};

use super::grid::{Board, Cell};
use crate::core::{Position, SnapshotError, COLS, ROWS};

/// Serializable board contents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Rows top to bottom, each `COLS` markers wide.
    pub grid: Vec<Vec<u8>>,
    pub move_count: u32,
}

impl BoardSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl From<&Board> for BoardSnapshot {
    fn from(board: &Board) -> Self {
        Self {
            grid: board
                .rows()
                .iter()
                .map(|row| row.iter().map(|cell| cell.marker()).collect())
                .collect(),
            move_count: board.move_count(),
        }
    }
}

impl From<Board> for BoardSnapshot {
    fn from(board: Board) -> Self {
        Self::from(&board)
    }
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = SnapshotError;

    fn try_from(snapshot: BoardSnapshot) -> Result<Self, Self::Error> {
        if snapshot.grid.len() != ROWS {
            return Err(SnapshotError::Dimensions {
                expected_rows: ROWS,
                expected_cols: COLS,
                rows: snapshot.grid.len(),
            });
        }

        let mut cells = [[Cell::Empty; COLS]; ROWS];
        for (row, markers) in snapshot.grid.iter().enumerate() {
            if markers.len() != COLS {
                return Err(SnapshotError::RowWidth {
                    row,
                    cols: markers.len(),
                });
            }
            for (col, &marker) in markers.iter().enumerate() {
                cells[row][col] =
                    Cell::from_marker(marker).ok_or(SnapshotError::InvalidCellValue(marker))?;
            }
        }

        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if !cells[row][col].is_empty() && cells[row + 1][col].is_empty() {
                    return Err(SnapshotError::FloatingDisc { row, col });
                }
            }
        }

        Ok(Board::from_cells(cells, snapshot.move_count))
    }
}

impl Board {
    /// Capture this board as a snapshot.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(self)
    }

    /// Occupied cells of both players, row-major. Handy for comparing boards
    /// whose indexes were built in different orders.
    #[must_use]
    pub fn occupancy(&self) -> Vec<(Position, Cell)> {
        Position::all()
            .map(|pos| (pos, self.get(pos)))
            .filter(|(_, cell)| !cell.is_empty())
            .collect()
    }
}
