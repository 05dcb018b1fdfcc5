//! Bombs: hidden cells that blow away the dropper's own discs.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, Player, Position};
use crate::effects::BoardEffect;

/// Bomb mod state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bombs {
    /// Bombs hidden per round.
    pub count: usize,
    /// Own discs each explosion removes.
    pub discs_removed: usize,
    triggered: u32,
}

impl Bombs {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            count: config.bomb_count(),
            discs_removed: config.bomb_discs_removed,
            triggered: 0,
        }
    }

    pub fn reset(&mut self) {
        self.triggered = 0;
    }

    /// Explosions so far this match.
    #[must_use]
    pub fn triggered(&self) -> u32 {
        self.triggered
    }

    pub(super) fn feature_count(&self) -> usize {
        self.count
    }

    pub(super) fn effect(&mut self, trigger: Position, player: Player) -> BoardEffect {
        self.triggered += 1;
        BoardEffect::RemoveOwnDiscs {
            player,
            count: self.discs_removed,
            exclude: trigger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bomb_count() {
        let bombs = Bombs::new(&GameConfig::default());
        assert_eq!(bombs.count, 8);
        assert_eq!(bombs.discs_removed, 2);
    }

    #[test]
    fn test_effect_targets_dropper() {
        let mut bombs = Bombs::new(&GameConfig::default().with_bomb_discs_removed(3));
        let effect = bombs.effect(Position::new(5, 2), Player::Two);

        assert_eq!(
            effect,
            BoardEffect::RemoveOwnDiscs {
                player: Player::Two,
                count: 3,
                exclude: Position::new(5, 2),
            }
        );
        assert_eq!(bombs.triggered(), 1);
        bombs.reset();
        assert_eq!(bombs.triggered(), 0);
    }
}
