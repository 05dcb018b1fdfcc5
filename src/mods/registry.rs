//! The ordered set of active mods and the after-drop pipeline.

use tracing::debug;

use super::{FeaturePlacement, GameMod, ModKind};
use crate::board::Board;
use crate::core::{ConfigError, GameConfig, GameRng, GameRngState, Player, Position};
use crate::effects::{BoardHandle, EffectReport};
use crate::presentation::{play_all, PresentationBridge};

/// An active mod and its private RNG stream.
#[derive(Clone, Debug)]
struct ActiveMod {
    module: GameMod,
    rng: GameRng,
}

/// Active mods in selection order, plus the round's feature placement.
#[derive(Clone, Debug)]
pub struct ModRegistry {
    active: Vec<ActiveMod>,
    placement: FeaturePlacement,
}

impl ModRegistry {
    /// Most mods a match may run at once.
    pub const MAX_ACTIVE: usize = 2;

    /// Build a registry for the selected kinds.
    ///
    /// Rejects more than `MAX_ACTIVE` kinds and duplicates.
    pub fn new(kinds: &[ModKind], config: &GameConfig) -> Result<Self, ConfigError> {
        if kinds.len() > Self::MAX_ACTIVE {
            return Err(ConfigError::TooManyMods(kinds.len()));
        }
        for (i, kind) in kinds.iter().enumerate() {
            if kinds[..i].contains(kind) {
                return Err(ConfigError::DuplicateMod(*kind));
            }
        }

        let seed_rng = GameRng::new(config.seed);
        let active = kinds
            .iter()
            .map(|&kind| ActiveMod {
                module: GameMod::new(kind, config),
                rng: seed_rng.for_context(kind.id()),
            })
            .collect();

        Ok(Self {
            active,
            placement: FeaturePlacement::new(),
        })
    }

    /// Start a match: reset every mod and derive its RNG stream from the
    /// match RNG.
    pub fn activate(&mut self, match_rng: &GameRng) {
        for slot in &mut self.active {
            slot.rng = match_rng.for_context(slot.module.kind().id());
            slot.module.on_activate();
        }
        self.placement.clear();
    }

    /// Active kinds in selection order.
    #[must_use]
    pub fn kinds(&self) -> Vec<ModKind> {
        self.active.iter().map(|slot| slot.module.kind()).collect()
    }

    pub fn mods(&self) -> impl Iterator<Item = &GameMod> {
        self.active.iter().map(|slot| &slot.module)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Feature cells claimed for the current round.
    #[must_use]
    pub fn placement(&self) -> &FeaturePlacement {
        &self.placement
    }

    /// Replace the round's placement, e.g. when restoring a saved round.
    pub fn set_placement(&mut self, placement: FeaturePlacement) {
        self.placement = placement;
    }

    /// Current position of every active mod's RNG stream.
    #[must_use]
    pub fn streams(&self) -> Vec<(ModKind, GameRngState)> {
        self.active
            .iter()
            .map(|slot| (slot.module.kind(), slot.rng.state()))
            .collect()
    }

    /// Rewind mod streams to saved positions. Kinds that are not active are
    /// ignored.
    pub fn restore_streams(&mut self, streams: &[(ModKind, GameRngState)]) {
        for slot in &mut self.active {
            let kind = slot.module.kind();
            if let Some((_, state)) = streams.iter().find(|(saved, _)| *saved == kind) {
                slot.rng = GameRng::from_state(state);
            }
        }
    }

    /// Clear last round's claims and let each mod hide its features.
    pub fn start_round(&mut self) {
        self.placement.clear();
        for slot in &mut self.active {
            slot.module.on_round_start(&mut self.placement, &mut slot.rng);
        }
    }

    /// Run every mod's after-drop hook in order.
    ///
    /// Each triggered effect is resolved on the board before its events are
    /// presented, and its presentation is awaited before the next hook runs.
    pub async fn run_after_drop<B>(
        &mut self,
        board: &mut Board,
        trigger: Position,
        player: Player,
        bridge: &mut B,
    ) -> Vec<EffectReport>
    where
        B: PresentationBridge + ?Sized,
    {
        let mut reports = Vec::new();

        for slot in &mut self.active {
            let report = {
                let mut handle = BoardHandle::new(board, &mut slot.rng);
                slot.module
                    .on_after_drop(&mut self.placement, &mut handle, trigger, player)
            };
            let Some(report) = report else {
                continue;
            };

            debug!(kind = %report.kind, %trigger, "presenting effect");
            play_all(bridge, report.events()).await;
            reports.push(report);
        }

        reports
    }
}
