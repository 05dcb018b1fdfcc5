//! Per-player index of occupied cells.
//!
//! Mod effects pick random discs of a player many times per round; the index
//! answers that without scanning the grid. Each list keeps a slot map so
//! removal and in-place rewrites are O(1).

use rustc_hash::FxHashMap;

use crate::core::{Player, PlayerMap, Position};

/// Ordered list of one player's occupied cells.
#[derive(Clone, Debug, Default)]
pub struct CellList {
    cells: Vec<Position>,
    slots: FxHashMap<Position, usize>,
}

impl CellList {
    /// Append a cell. Returns false if it was already present.
    pub fn push(&mut self, pos: Position) -> bool {
        if self.slots.contains_key(&pos) {
            return false;
        }
        self.slots.insert(pos, self.cells.len());
        self.cells.push(pos);
        true
    }

    /// Remove a cell. Returns false if it was not present.
    pub fn remove(&mut self, pos: Position) -> bool {
        let Some(slot) = self.slots.remove(&pos) else {
            return false;
        };
        self.cells.swap_remove(slot);
        if let Some(&moved) = self.cells.get(slot) {
            self.slots.insert(moved, slot);
        }
        true
    }

    /// Rewrite a coordinate in place, keeping its slot.
    pub fn rewrite(&mut self, from: Position, to: Position) -> bool {
        if from == to {
            return self.slots.contains_key(&from);
        }
        if self.slots.contains_key(&to) {
            return false;
        }
        let Some(slot) = self.slots.remove(&from) else {
            return false;
        };
        self.cells[slot] = to;
        self.slots.insert(to, slot);
        true
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.slots.contains_key(&pos)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in index order.
    #[must_use]
    pub fn as_slice(&self) -> &[Position] {
        &self.cells
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn sorted(&self) -> Vec<Position> {
        let mut cells = self.cells.clone();
        cells.sort_unstable();
        cells
    }
}

/// Occupied cells of both players, kept in lockstep with the grid.
#[derive(Clone, Debug, Default)]
pub struct PlayerCellIndex {
    lists: PlayerMap<CellList>,
}

impl PlayerCellIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, player: Player, pos: Position) -> bool {
        self.lists[player].push(pos)
    }

    pub fn remove(&mut self, player: Player, pos: Position) -> bool {
        self.lists[player].remove(pos)
    }

    pub fn rewrite(&mut self, player: Player, from: Position, to: Position) -> bool {
        self.lists[player].rewrite(from, to)
    }

    #[must_use]
    pub fn contains(&self, player: Player, pos: Position) -> bool {
        self.lists[player].contains(pos)
    }

    /// Get one player's cell list.
    #[must_use]
    pub fn cells(&self, player: Player) -> &CellList {
        &self.lists[player]
    }

    /// Total indexed cells across both players.
    #[must_use]
    pub fn total(&self) -> usize {
        self.lists.iter().map(|(_, list)| list.len()).sum()
    }

    /// Every indexed cell with its owner, player one first.
    pub fn iter(&self) -> impl Iterator<Item = (Player, Position)> + '_ {
        self.lists
            .iter()
            .flat_map(|(player, list)| list.as_slice().iter().map(move |&pos| (player, pos)))
    }
}
