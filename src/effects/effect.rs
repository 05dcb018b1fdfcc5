//! Effect definitions and their reports.

use serde::{Deserialize, Serialize};

use crate::board::DiscMove;
use crate::core::{Player, Position};
use crate::mods::ModKind;
use crate::presentation::PresentationEvent;

/// A board mutation a mod can trigger.
///
/// Effects are resolved synchronously by the `EffectResolver`; the board is
/// back in a consistent state (contiguous columns, index in sync) when
/// resolution returns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEffect {
    /// Remove up to `count` of `player`'s discs, never the one at `exclude`.
    RemoveOwnDiscs {
        player: Player,
        count: usize,
        exclude: Position,
    },

    /// Paint every cell of a column with `player`'s disc.
    FillColumn { col: usize, player: Player },

    /// Lift `min..=max` discs of either player (never the one at `exclude`)
    /// and drop each back into a random column for its owner.
    Abduct {
        min: usize,
        max: usize,
        exclude: Position,
    },
}

impl BoardEffect {
    /// Effect name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            BoardEffect::RemoveOwnDiscs { .. } => "remove_own_discs",
            BoardEffect::FillColumn { .. } => "fill_column",
            BoardEffect::Abduct { .. } => "abduct",
        }
    }
}

/// Cells painted by a column fill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFill {
    pub col: usize,
    pub player: Player,
    /// Every painted cell, bottom first.
    pub cells: Vec<Position>,
    /// The subset of `cells` that held an opponent disc.
    pub overridden: Vec<Position>,
}

/// Everything a resolved effect changed, in the order it happened.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectOutcome {
    /// Cleared cells with the owner of the disc that left.
    pub removed: Vec<(Position, Player)>,
    /// Gravity falls after the removals.
    pub falls: Vec<DiscMove>,
    pub fill: Option<ColumnFill>,
    /// Abducted discs: `from` is the cell they were lifted from.
    pub relocated: Vec<DiscMove>,
    /// Abducted discs that found no free column.
    pub lost: Vec<(Position, Player)>,
}

impl EffectOutcome {
    /// Net change in occupied cells.
    #[must_use]
    pub fn occupancy_delta(&self) -> isize {
        let filled = self
            .fill
            .as_ref()
            .map_or(0, |fill| fill.cells.len() - fill.overridden.len());
        (filled + self.relocated.len()) as isize - self.removed.len() as isize
    }

    /// Presentation events, ordered removals, falls, fill, relocations.
    #[must_use]
    pub fn events(&self) -> Vec<PresentationEvent> {
        let mut events = Vec::with_capacity(
            self.removed.len() + self.falls.len() + self.relocated.len() + 1,
        );
        events.extend(
            self.removed
                .iter()
                .map(|&(pos, _)| PresentationEvent::DiscRemoved { pos }),
        );
        events.extend(self.falls.iter().map(|m| PresentationEvent::DiscFell {
            from: m.from,
            to: m.to,
            player: m.player,
        }));
        if let Some(fill) = &self.fill {
            events.push(PresentationEvent::ColumnFilled {
                col: fill.col,
                player: fill.player,
                cells: fill.cells.clone(),
            });
        }
        events.extend(self.relocated.iter().map(|m| PresentationEvent::DiscRelocated {
            from: m.from,
            to: m.to,
            player: m.player,
        }));
        events
    }
}

/// A triggered mod effect: which feature fired, where, for whom, and what it
/// did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectReport {
    pub kind: ModKind,
    pub trigger: Position,
    pub player: Player,
    pub outcome: EffectOutcome,
}

impl EffectReport {
    /// The trigger event followed by the outcome's events.
    #[must_use]
    pub fn events(&self) -> Vec<PresentationEvent> {
        let mut events = vec![PresentationEvent::EffectTriggered {
            kind: self.kind,
            pos: self.trigger,
        }];
        events.extend(self.outcome.events());
        events
    }
}
