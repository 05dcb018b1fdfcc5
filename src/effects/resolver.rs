//! Effect resolution against the board.
//!
//! Mods never see the controller. They get a `BoardHandle`, which pairs the
//! board with the mod's own RNG stream and exposes only the queries and
//! primitives effects need.

use tracing::{debug, warn};

use crate::board::{Board, Cell, DiscMove};
use crate::core::{BoardError, GameRng, Player, Position, ROWS};

use super::effect::{BoardEffect, ColumnFill, EffectOutcome};

/// Narrow mutation access handed to mod hooks.
pub struct BoardHandle<'a> {
    board: &'a mut Board,
    rng: &'a mut GameRng,
}

impl<'a> BoardHandle<'a> {
    pub fn new(board: &'a mut Board, rng: &'a mut GameRng) -> Self {
        Self { board, rng }
    }

    #[must_use]
    pub fn get(&self, pos: Position) -> Cell {
        self.board.get(pos)
    }

    #[must_use]
    pub fn player_cells(&self, player: Player) -> &[Position] {
        self.board.player_cells(player)
    }

    pub fn clear(&mut self, pos: Position) -> Option<Player> {
        self.board.clear(pos)
    }

    pub fn overwrite(&mut self, pos: Position, player: Player) -> Option<Player> {
        self.board.overwrite(pos, player)
    }

    pub fn relocate(&mut self, player: Player) -> Result<Position, BoardError> {
        self.board.relocate(player, self.rng)
    }
}

/// Resolves effects on a board.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply an effect and report what changed.
    pub fn resolve(effect: &BoardEffect, handle: &mut BoardHandle<'_>) -> EffectOutcome {
        let outcome = match *effect {
            BoardEffect::RemoveOwnDiscs {
                player,
                count,
                exclude,
            } => Self::remove_own_discs(handle, player, count, exclude),
            BoardEffect::FillColumn { col, player } => Self::fill_column(handle, col, player),
            BoardEffect::Abduct { min, max, exclude } => Self::abduct(handle, min, max, exclude),
        };

        debug_assert!(
            handle.board.check_invariants().is_ok(),
            "{} left the board inconsistent",
            effect.name()
        );
        debug!(
            effect = effect.name(),
            removed = outcome.removed.len(),
            falls = outcome.falls.len(),
            relocated = outcome.relocated.len(),
            lost = outcome.lost.len(),
            "effect resolved"
        );
        outcome
    }

    fn remove_own_discs(
        handle: &mut BoardHandle<'_>,
        player: Player,
        count: usize,
        exclude: Position,
    ) -> EffectOutcome {
        let mut eligible: Vec<Position> = handle
            .player_cells(player)
            .iter()
            .copied()
            .filter(|&pos| pos != exclude)
            .collect();
        // Index order depends on history; rolls must depend on the cells only.
        eligible.sort_unstable();
        let picked = handle.rng.sample(&eligible, count);

        let mut outcome = EffectOutcome::default();
        for pos in picked {
            if let Some(owner) = handle.clear(pos) {
                outcome.removed.push((pos, owner));
            }
        }
        outcome.falls = Self::settle(handle.board, &outcome.removed);
        outcome
    }

    fn fill_column(handle: &mut BoardHandle<'_>, col: usize, player: Player) -> EffectOutcome {
        let mut fill = ColumnFill {
            col,
            player,
            cells: Vec::new(),
            overridden: Vec::new(),
        };

        // Bottom-up keeps the column contiguous while empties are painted.
        for row in (0..ROWS).rev() {
            let pos = Position::new(row, col);
            match handle.get(pos) {
                Cell::Disc(owner) if owner == player => {}
                Cell::Disc(_) => {
                    handle.overwrite(pos, player);
                    fill.overridden.push(pos);
                    fill.cells.push(pos);
                }
                Cell::Empty => {
                    handle.overwrite(pos, player);
                    fill.cells.push(pos);
                }
            }
        }

        EffectOutcome {
            fill: Some(fill),
            ..EffectOutcome::default()
        }
    }

    fn abduct(
        handle: &mut BoardHandle<'_>,
        min: usize,
        max: usize,
        exclude: Position,
    ) -> EffectOutcome {
        let mut eligible: Vec<Position> = handle
            .board
            .index()
            .iter()
            .map(|(_, pos)| pos)
            .filter(|&pos| pos != exclude)
            .collect();
        eligible.sort_unstable();
        let wanted = handle.rng.gen_range_inclusive(min..=max.max(min));
        let picked = handle.rng.sample(&eligible, wanted);

        let mut outcome = EffectOutcome::default();
        for pos in picked {
            if let Some(owner) = handle.clear(pos) {
                outcome.removed.push((pos, owner));
            }
        }
        outcome.falls = Self::settle(handle.board, &outcome.removed);

        for &(from, player) in &outcome.removed {
            match handle.relocate(player) {
                Ok(to) => outcome.relocated.push(DiscMove { player, from, to }),
                Err(err) => {
                    warn!(%from, %player, %err, "abducted disc lost");
                    outcome.lost.push((from, player));
                }
            }
        }
        outcome
    }

    /// Re-apply gravity once per column that lost a disc.
    fn settle(board: &mut Board, removed: &[(Position, Player)]) -> Vec<DiscMove> {
        let mut cols: Vec<usize> = removed.iter().map(|(pos, _)| pos.col).collect();
        cols.sort_unstable();
        cols.dedup();
        cols.into_iter()
            .flat_map(|col| board.apply_gravity(col))
            .collect()
    }
}
