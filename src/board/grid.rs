//! The 9x6 grid and its mutation primitives.
//!
//! ## Invariants
//!
//! After every public method returns:
//! - occupied cells of each column form a contiguous block from the bottom row
//! - the `PlayerCellIndex` holds exactly the cells showing each player's disc
//!
//! `check_invariants` verifies both and is used by tests and debug builds.

use serde::{Deserialize, Serialize};

use super::index::PlayerCellIndex;
use super::snapshot::BoardSnapshot;
use crate::core::{BoardError, GameRng, Player, Position, COLS, ROWS};

/// State of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    Disc(Player),
}

impl Cell {
    /// Owner of the disc in this cell, if any.
    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Disc(player) => Some(player),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Snapshot marker: 0 for empty, 1 or 2 for a player.
    #[must_use]
    pub const fn marker(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Disc(player) => player.marker(),
        }
    }

    /// Parse a snapshot marker.
    #[must_use]
    pub const fn from_marker(marker: u8) -> Option<Cell> {
        match marker {
            0 => Some(Cell::Empty),
            _ => match Player::from_marker(marker) {
                Some(player) => Some(Cell::Disc(player)),
                None => None,
            },
        }
    }
}

/// A disc that changed cells (gravity fall or relocation).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscMove {
    pub player: Player,
    pub from: Position,
    pub to: Position,
}

/// A broken board invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("disc at {0} floats above an empty cell")]
    FloatingDisc(Position),

    #[error("{0} disc at {1} is missing from the index")]
    Unindexed(Player, Position),

    #[error("index lists {1} for {0} but the cell disagrees")]
    StaleIndex(Player, Position),
}

/// The game board.
///
/// Serializes as a [`BoardSnapshot`] grid of 0/1/2 markers; the cell index is
/// rebuilt on load.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "BoardSnapshot", try_from = "BoardSnapshot")]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
    index: PlayerCellIndex,
    move_count: u32,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
            index: PlayerCellIndex::new(),
            move_count: 0,
        }
    }

    /// Rebuild a board from raw cells, indexing discs in row-major order.
    pub(crate) fn from_cells(cells: [[Cell; COLS]; ROWS], move_count: u32) -> Self {
        let mut index = PlayerCellIndex::new();
        for pos in Position::all() {
            if let Some(player) = cells[pos.row][pos.col].owner() {
                index.insert(player, pos);
            }
        }
        Self {
            cells,
            index,
            move_count,
        }
    }

    /// Get the cell at a position.
    ///
    /// Panics if the position is outside the grid; coordinates reaching the
    /// board are always produced by the engine itself.
    #[must_use]
    pub fn get(&self, pos: Position) -> Cell {
        assert!(pos.in_bounds(), "cell {pos} is outside the {ROWS}x{COLS} grid");
        self.cells[pos.row][pos.col]
    }

    /// Raw rows, top row first.
    #[must_use]
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Lowest empty row of a column, scanning from the bottom.
    #[must_use]
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col].is_empty())
    }

    /// Check if a column is full. Out-of-range columns count as full.
    #[must_use]
    pub fn is_column_full(&self, col: usize) -> bool {
        col >= COLS || !self.cells[0][col].is_empty()
    }

    /// Check if every column is full.
    #[must_use]
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Columns that still accept a disc.
    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(|&col| !self.is_column_full(col))
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.index.total()
    }

    /// Discs placed this round, including mod fills.
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// One player's occupied cells in index order.
    #[must_use]
    pub fn player_cells(&self, player: Player) -> &[Position] {
        self.index.cells(player).as_slice()
    }

    /// The per-player cell index.
    #[must_use]
    pub fn index(&self) -> &PlayerCellIndex {
        &self.index
    }

    /// Drop a disc into a column, returning the landing row.
    ///
    /// Counts as a move.
    pub fn place(&mut self, col: usize, player: Player) -> Result<usize, BoardError> {
        let row = self.land(col, player)?;
        self.move_count += 1;
        Ok(row)
    }

    /// Put a disc on the lowest empty row without counting a move.
    fn land(&mut self, col: usize, player: Player) -> Result<usize, BoardError> {
        if col >= COLS {
            return Err(BoardError::InvalidCell { row: 0, col });
        }
        let row = self.lowest_empty_row(col).ok_or(BoardError::ColumnFull(col))?;
        self.cells[row][col] = Cell::Disc(player);
        self.index.insert(player, Position::new(row, col));
        Ok(row)
    }

    /// Empty a cell, returning the owner of the removed disc.
    ///
    /// Leaves a gap when discs sit above; follow with `apply_gravity`.
    pub fn clear(&mut self, pos: Position) -> Option<Player> {
        let player = self.get(pos).owner()?;
        self.cells[pos.row][pos.col] = Cell::Empty;
        self.index.remove(player, pos);
        Some(player)
    }

    /// Set a cell to a player's disc, returning the previous owner.
    ///
    /// Used by column fills. Counts as a move unless the cell already held
    /// the player's disc. Callers fill bottom-up so the column stays
    /// contiguous.
    pub fn overwrite(&mut self, pos: Position, player: Player) -> Option<Player> {
        let previous = self.get(pos).owner();
        if previous == Some(player) {
            return previous;
        }
        debug_assert!(
            previous.is_some() || pos.row == ROWS - 1 || !self.cells[pos.row + 1][pos.col].is_empty(),
            "overwrite at {pos} would leave a floating disc"
        );
        if let Some(old) = previous {
            self.index.remove(old, pos);
        }
        self.cells[pos.row][pos.col] = Cell::Disc(player);
        self.index.insert(player, pos);
        self.move_count += 1;
        previous
    }

    /// Compact a column so its discs sit contiguously on the bottom.
    ///
    /// Index entries are rewritten in place. Returns the falls performed,
    /// which is empty when the column was already compact.
    pub fn apply_gravity(&mut self, col: usize) -> Vec<DiscMove> {
        let mut moves = Vec::new();
        if col >= COLS {
            return moves;
        }

        for target_row in (0..ROWS).rev() {
            if !self.cells[target_row][col].is_empty() {
                continue;
            }
            let source = (0..target_row).rev().find(|&row| !self.cells[row][col].is_empty());
            let Some(source_row) = source else {
                break;
            };
            let Cell::Disc(player) = self.cells[source_row][col] else {
                continue;
            };

            let from = Position::new(source_row, col);
            let to = Position::new(target_row, col);
            self.cells[target_row][col] = Cell::Disc(player);
            self.cells[source_row][col] = Cell::Empty;
            self.index.rewrite(player, from, to);
            tracing::trace!(%from, %to, %player, "disc fell");
            moves.push(DiscMove { player, from, to });
        }

        moves
    }

    /// Drop a player's disc into a random column with room.
    ///
    /// Starts at a random column and walks forward circularly, trying each
    /// column exactly once. Does not count as a move.
    pub fn relocate(&mut self, player: Player, rng: &mut GameRng) -> Result<Position, BoardError> {
        let start = rng.gen_range_usize(0..COLS);
        for offset in 0..COLS {
            let col = (start + offset) % COLS;
            if !self.is_column_full(col) {
                let row = self.land(col, player)?;
                return Ok(Position::new(row, col));
            }
        }
        Err(BoardError::NoSpace)
    }

    /// Verify contiguity and index consistency.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for col in 0..COLS {
            let mut seen_empty = false;
            for row in (0..ROWS).rev() {
                match self.cells[row][col] {
                    Cell::Empty => seen_empty = true,
                    Cell::Disc(_) if seen_empty => {
                        return Err(InvariantViolation::FloatingDisc(Position::new(row, col)));
                    }
                    Cell::Disc(_) => {}
                }
            }
        }

        for pos in Position::all() {
            if let Some(player) = self.get(pos).owner() {
                if !self.index.contains(player, pos) {
                    return Err(InvariantViolation::Unindexed(player, pos));
                }
            }
        }

        for (player, pos) in self.index.iter() {
            if self.get(pos) != Cell::Disc(player) {
                return Err(InvariantViolation::StaleIndex(player, pos));
            }
        }

        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        // The index is a function of the cells.
        self.cells == other.cells && self.move_count == other.move_count
    }
}

impl Eq for Board {}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Disc(Player::One) => 'X',
                    Cell::Disc(Player::Two) => 'O',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
