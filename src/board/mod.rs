//! Board model, cell index, win scanning and snapshots.
//!
//! - `Board`: the 9x6 grid with placement, removal, gravity and relocation
//! - `PlayerCellIndex`: each player's occupied cells, kept in sync with the grid
//! - `WinScanner`: point and full-board four-in-a-row detection
//! - `BoardSnapshot`: serializable grid of 0/1/2 markers

mod grid;
mod index;
mod scan;
mod snapshot;

pub use grid::{Board, Cell, DiscMove, InvariantViolation};
pub use index::{CellList, PlayerCellIndex};
pub use scan::{Axis, WinScanner, WinningRun, WIN_LENGTH};
pub use snapshot::BoardSnapshot;
