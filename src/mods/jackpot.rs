//! Jackpot: one hidden cell that paints its whole column.

use serde::{Deserialize, Serialize};

use crate::core::{Player, Position};
use crate::effects::BoardEffect;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jackpot {
    triggered: u32,
}

impl Jackpot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.triggered = 0;
    }

    #[must_use]
    pub fn triggered(&self) -> u32 {
        self.triggered
    }

    pub(super) fn feature_count(&self) -> usize {
        1
    }

    pub(super) fn effect(&mut self, trigger: Position, player: Player) -> BoardEffect {
        self.triggered += 1;
        BoardEffect::FillColumn {
            col: trigger.col,
            player,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_trigger_column() {
        let mut jackpot = Jackpot::new();
        assert_eq!(
            jackpot.effect(Position::new(4, 6), Player::One),
            BoardEffect::FillColumn {
                col: 6,
                player: Player::One
            }
        );
        assert_eq!(jackpot.triggered(), 1);
    }
}
