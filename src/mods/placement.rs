//! Hidden feature coordinates claimed by mods for the current round.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use super::ModKind;
use crate::core::{GameRng, Position};

/// Claimed coordinates per mod kind.
///
/// Claims of different kinds never share a coordinate, so at most one
/// feature can fire per landing cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturePlacement {
    claims: FxHashMap<ModKind, FxHashSet<Position>>,
}

impl FeaturePlacement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every claim.
    pub fn clear(&mut self) {
        self.claims.clear();
    }

    /// Claim coordinates for `kind`, skipping any held by another kind.
    ///
    /// Returns how many new claims were recorded.
    pub fn claim(&mut self, kind: ModKind, positions: impl IntoIterator<Item = Position>) -> usize {
        let mut claimed = 0;
        for pos in positions {
            let taken = self.owner_of(pos).is_some_and(|owner| owner != kind);
            debug_assert!(!taken, "{pos} is already claimed by another mod");
            if taken {
                continue;
            }
            if self.claims.entry(kind).or_default().insert(pos) {
                claimed += 1;
            }
        }
        claimed
    }

    /// Remove a claim if `kind` holds it. Returns whether it did.
    pub fn consume(&mut self, kind: ModKind, pos: Position) -> bool {
        self.claims
            .get_mut(&kind)
            .is_some_and(|positions| positions.remove(&pos))
    }

    /// Kind holding a coordinate.
    #[must_use]
    pub fn owner_of(&self, pos: Position) -> Option<ModKind> {
        self.claims
            .iter()
            .find(|(_, positions)| positions.contains(&pos))
            .map(|(&kind, _)| kind)
    }

    #[must_use]
    pub fn is_claimed_by(&self, kind: ModKind, pos: Position) -> bool {
        self.claims
            .get(&kind)
            .is_some_and(|positions| positions.contains(&pos))
    }

    /// One kind's claims in row-major order.
    #[must_use]
    pub fn claimed(&self, kind: ModKind) -> Vec<Position> {
        let mut positions: Vec<Position> = self
            .claims
            .get(&kind)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default();
        positions.sort_unstable();
        positions
    }

    /// Union of every other kind's claims.
    #[must_use]
    pub fn claimed_by_others(&self, kind: ModKind) -> FxHashSet<Position> {
        self.claims
            .iter()
            .filter(|(other, _)| **other != kind)
            .flat_map(|(_, positions)| positions.iter().copied())
            .collect()
    }

    /// Total number of live claims.
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.values().map(FxHashSet::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample up to `amount` cells no other kind has claimed.
    ///
    /// The pool is built in row-major order so a given RNG state always
    /// yields the same cells. Returns fewer (possibly none) when the pool is
    /// small.
    pub fn select_unclaimed_positions(
        &self,
        kind: ModKind,
        amount: usize,
        rng: &mut GameRng,
    ) -> Vec<Position> {
        let taken = self.claimed_by_others(kind);
        let pool: Vec<Position> = Position::all().filter(|pos| !taken.contains(pos)).collect();
        rng.sample(&pool, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{COLS, ROWS};

    #[test]
    fn test_claim_and_consume() {
        let mut placement = FeaturePlacement::new();
        let pos = Position::new(3, 3);

        assert_eq!(placement.claim(ModKind::Jackpot, [pos]), 1);
        assert_eq!(placement.owner_of(pos), Some(ModKind::Jackpot));
        assert!(!placement.consume(ModKind::Bombs, pos));
        assert!(placement.consume(ModKind::Jackpot, pos));
        assert!(!placement.consume(ModKind::Jackpot, pos));
        assert!(placement.is_empty());
    }

    #[test]
    fn test_selection_avoids_other_claims() {
        let mut placement = FeaturePlacement::new();
        let mut rng = GameRng::new(11);

        let bombs = placement.select_unclaimed_positions(ModKind::Bombs, 8, &mut rng);
        placement.claim(ModKind::Bombs, bombs.iter().copied());
        let portal = placement.select_unclaimed_positions(ModKind::Alien, 1, &mut rng);
        placement.claim(ModKind::Alien, portal.iter().copied());

        assert_eq!(placement.claimed(ModKind::Bombs).len(), 8);
        assert_eq!(portal.len(), 1);
        assert!(!bombs.contains(&portal[0]));
        assert_eq!(placement.len(), 9);
    }

    #[test]
    fn test_selection_when_board_is_claimed() {
        let mut placement = FeaturePlacement::new();
        placement.claim(ModKind::Bombs, Position::all());
        let mut rng = GameRng::new(2);

        assert_eq!(placement.len(), ROWS * COLS);
        assert!(placement
            .select_unclaimed_positions(ModKind::Jackpot, 1, &mut rng)
            .is_empty());
    }

    #[test]
    fn test_selection_is_deterministic() {
        let placement = FeaturePlacement::new();
        let a = placement.select_unclaimed_positions(ModKind::Bombs, 8, &mut GameRng::new(4));
        let b = placement.select_unclaimed_positions(ModKind::Bombs, 8, &mut GameRng::new(4));
        assert_eq!(a, b);
    }
}
