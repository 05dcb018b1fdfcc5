//! Presentation events emitted by the engine.

use serde::{Deserialize, Serialize};

use crate::core::{Player, Position};
use crate::mods::ModKind;

/// A board change the presentation layer may animate.
///
/// Events describe changes that have already been applied to the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationEvent {
    /// A player's drop landed.
    DiscPlaced { pos: Position, player: Player },

    /// A disc left its cell (bomb removal or abduction).
    DiscRemoved { pos: Position },

    /// Gravity pulled a disc down its column.
    DiscFell {
        from: Position,
        to: Position,
        player: Player,
    },

    /// An abducted disc landed in a new column.
    DiscRelocated {
        from: Position,
        to: Position,
        player: Player,
    },

    /// A column fill painted these cells, bottom first.
    ColumnFilled {
        col: usize,
        player: Player,
        cells: Vec<Position>,
    },

    /// A hidden feature went off at `pos`.
    EffectTriggered { kind: ModKind, pos: Position },
}

impl PresentationEvent {
    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            PresentationEvent::DiscPlaced { .. } => "disc_placed",
            PresentationEvent::DiscRemoved { .. } => "disc_removed",
            PresentationEvent::DiscFell { .. } => "disc_fell",
            PresentationEvent::DiscRelocated { .. } => "disc_relocated",
            PresentationEvent::ColumnFilled { .. } => "column_filled",
            PresentationEvent::EffectTriggered { .. } => "effect_triggered",
        }
    }
}
