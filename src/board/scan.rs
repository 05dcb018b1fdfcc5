//! Win and draw detection.
//!
//! Mod effects can complete a line anywhere on the board, so after every
//! resolution the controller scans the whole board rather than only the drop
//! site. Scan order is fixed (row-major cells, then axis order) so results are
//! reproducible.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::grid::{Board, Cell};
use crate::core::{Player, PlayerMap, Position};

/// Discs in a row needed to win.
pub const WIN_LENGTH: usize = 4;

/// Line direction checked through a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    DiagonalDownRight,
    DiagonalDownLeft,
}

impl Axis {
    /// Axes in scan order.
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalDownRight,
        Axis::DiagonalDownLeft,
    ];

    /// (row, col) step of the axis.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::DiagonalDownRight => (1, 1),
            Axis::DiagonalDownLeft => (1, -1),
        }
    }
}

/// A line of at least `WIN_LENGTH` same-player discs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinningRun {
    pub player: Player,
    pub axis: Axis,
    /// Every disc of the line, row-major.
    pub cells: SmallVec<[Position; 8]>,
}

/// Stateless win/draw scanner.
pub struct WinScanner;

impl WinScanner {
    /// Check the four axes through one cell.
    ///
    /// Returns the full line of the first axis reaching `WIN_LENGTH`.
    #[must_use]
    pub fn scan_from_point(board: &Board, origin: Position) -> Option<WinningRun> {
        let player = board.get(origin).owner()?;

        Axis::ALL.into_iter().find_map(|axis| {
            let cells = Self::line_through(board, origin, player, axis);
            (cells.len() >= WIN_LENGTH).then_some(WinningRun { player, axis, cells })
        })
    }

    /// Find the first winning line anywhere on the board.
    #[must_use]
    pub fn scan_full_board(board: &Board) -> Option<WinningRun> {
        Position::all().find_map(|pos| Self::scan_from_point(board, pos))
    }

    /// First winning line of each player, in full-board scan order.
    #[must_use]
    pub fn scan_all_winners(board: &Board) -> PlayerMap<Option<WinningRun>> {
        let mut found: PlayerMap<Option<WinningRun>> = PlayerMap::with_value(None);
        for pos in Position::all() {
            let Some(player) = board.get(pos).owner() else {
                continue;
            };
            if found[player].is_some() {
                continue;
            }
            found[player] = Self::scan_from_point(board, pos);
            if found.iter().all(|(_, run)| run.is_some()) {
                break;
            }
        }
        found
    }

    /// A draw: the top row is full and nobody has a line.
    #[must_use]
    pub fn is_draw(board: &Board, win_found: bool) -> bool {
        !win_found && board.is_full()
    }

    fn line_through(
        board: &Board,
        origin: Position,
        player: Player,
        axis: Axis,
    ) -> SmallVec<[Position; 8]> {
        let (d_row, d_col) = axis.delta();
        let mut cells: SmallVec<[Position; 8]> = SmallVec::new();
        cells.push(origin);

        for sign in [1, -1] {
            let mut cursor = origin;
            while let Some(next) = cursor.offset(d_row * sign, d_col * sign) {
                if board.get(next) != Cell::Disc(player) {
                    break;
                }
                cells.push(next);
                cursor = next;
            }
        }

        cells.sort_unstable();
        cells
    }
}
