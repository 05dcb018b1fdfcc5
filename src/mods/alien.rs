//! Alien: a hidden portal that abducts discs of both players and drops them
//! back at random.

use serde::{Deserialize, Serialize};

use crate::core::{GameConfig, Player, Position};
use crate::effects::BoardEffect;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alien {
    pub min_abducted: usize,
    pub max_abducted: usize,
    triggered: u32,
}

impl Alien {
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        Self {
            min_abducted: config.alien_min_abducted,
            max_abducted: config.alien_max_abducted,
            triggered: 0,
        }
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

    // The dropper does not matter: abductions hit both players.
    pub(super) fn effect(&mut self, trigger: Position, _player: Player) -> BoardEffect {
        self.triggered += 1;
        BoardEffect::Abduct {
            min: self.min_abducted,
            max: self.max_abducted,
            exclude: trigger,
        }
    }
}
