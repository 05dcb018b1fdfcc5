//! Optional board mods and the hook pipeline that runs them.
//!
//! A match activates zero, one or two mods. Each round every mod hides its
//! feature cells on the fresh board; when a drop lands on one of them the
//! claim is consumed and the mod's effect is resolved.
//!
//! ## Hooks
//!
//! - `on_activate`: once per match, resets the mod's counters
//! - `on_round_start`: claims feature cells not held by another mod
//! - `on_after_drop`: fires the effect when the landing cell is claimed
//!
//! Mods are a closed set, dispatched through the `GameMod` enum in the order
//! they were selected.

mod alien;
mod bombs;
mod jackpot;
mod placement;
mod registry;

pub use alien::Alien;
pub use bombs::Bombs;
pub use jackpot::Jackpot;
pub use placement::FeaturePlacement;
pub use registry::ModRegistry;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{GameConfig, GameRng, Player, Position};
use crate::effects::{BoardHandle, EffectReport, EffectResolver};

/// Identifies a mod.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModKind {
    Bombs,
    Jackpot,
    Alien,
}

impl ModKind {
    /// Every mod, in menu order.
    pub const ALL: [ModKind; 3] = [ModKind::Bombs, ModKind::Jackpot, ModKind::Alien];

    /// Stable identifier, also used to derive the mod's RNG stream.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            ModKind::Bombs => "bombs",
            ModKind::Jackpot => "jackpot",
            ModKind::Alien => "alien",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ModKind::Bombs => "Bombs",
            ModKind::Jackpot => "Jackpot",
            ModKind::Alien => "Alien",
        }
    }

    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            ModKind::Bombs => "\u{1F4A3}",
            ModKind::Jackpot => "\u{1F3B0}",
            ModKind::Alien => "\u{1F47D}",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            ModKind::Bombs => "Hidden bombs take away your own discs.",
            ModKind::Jackpot => "Find the jackpot and fill the whole column.",
            ModKind::Alien => "A hidden portal abducts discs and drops them somewhere else.",
        }
    }

    /// Look a mod up by its identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<ModKind> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }
}

impl std::fmt::Display for ModKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An active mod with its private state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMod {
    Bombs(Bombs),
    Jackpot(Jackpot),
    Alien(Alien),
}

impl GameMod {
    /// Build a mod from its kind and the engine configuration.
    #[must_use]
    pub fn new(kind: ModKind, config: &GameConfig) -> Self {
        match kind {
            ModKind::Bombs => GameMod::Bombs(Bombs::new(config)),
            ModKind::Jackpot => GameMod::Jackpot(Jackpot::new()),
            ModKind::Alien => GameMod::Alien(Alien::new(config)),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ModKind {
        match self {
            GameMod::Bombs(_) => ModKind::Bombs,
            GameMod::Jackpot(_) => ModKind::Jackpot,
            GameMod::Alien(_) => ModKind::Alien,
        }
    }

    /// Times the feature fired this match.
    #[must_use]
    pub fn triggered(&self) -> u32 {
        match self {
            GameMod::Bombs(m) => m.triggered(),
            GameMod::Jackpot(m) => m.triggered(),
            GameMod::Alien(m) => m.triggered(),
        }
    }

    /// Called once when the mod is selected for a match.
    pub fn on_activate(&mut self) {
        match self {
            GameMod::Bombs(m) => m.reset(),
            GameMod::Jackpot(m) => m.reset(),
            GameMod::Alien(m) => m.reset(),
        }
        debug!(kind = %self.kind(), "mod activated");
    }

    /// Hide this round's feature cells.
    ///
    /// If every cell is already claimed the mod sits this round out.
    pub fn on_round_start(&mut self, placement: &mut FeaturePlacement, rng: &mut GameRng) {
        let kind = self.kind();
        let wanted = match self {
            GameMod::Bombs(m) => m.feature_count(),
            GameMod::Jackpot(m) => m.feature_count(),
            GameMod::Alien(m) => m.feature_count(),
        };
        let cells = placement.select_unclaimed_positions(kind, wanted, rng);
        let claimed = placement.claim(kind, cells);
        debug!(%kind, wanted, claimed, "features hidden");
    }

    /// Fire the effect if the landing cell holds this mod's feature.
    ///
    /// The board is fully resolved when this returns; the caller presents
    /// the report afterwards.
    pub fn on_after_drop(
        &mut self,
        placement: &mut FeaturePlacement,
        handle: &mut BoardHandle<'_>,
        trigger: Position,
        player: Player,
    ) -> Option<EffectReport> {
        let kind = self.kind();
        if !placement.consume(kind, trigger) {
            return None;
        }

        let effect = match self {
            GameMod::Bombs(m) => m.effect(trigger, player),
            GameMod::Jackpot(m) => m.effect(trigger, player),
            GameMod::Alien(m) => m.effect(trigger, player),
        };
        debug!(%kind, %trigger, %player, effect = effect.name(), "feature triggered");

        let outcome = EffectResolver::resolve(&effect, handle);
        Some(EffectReport {
            kind,
            trigger,
            player,
            outcome,
        })
    }
}
