//! # connect-mods
//!
//! Move-resolution engine for a 9x6 Connect Four variant with optional,
//! randomized board mods.
//!
//! ## Design Principles
//!
//! 1. **Mutation before presentation**: every board change of a drop is
//!    applied synchronously. Only then are the matching events handed to the
//!    presentation bridge and awaited.
//!
//! 2. **Full-board scan**: mods can complete lines far from the drop site, so
//!    the winner is whoever owns the line, not whoever dropped.
//!
//! 3. **Deterministic randomness**: one seed drives every feature placement
//!    and effect. Each mod draws from its own stream.
//!
//! ## Modules
//!
//! - `core`: Players, positions, RNG, configuration, errors
//! - `board`: Grid, per-player cell index, win scanner, snapshots
//! - `effects`: Board effects and their resolver
//! - `mods`: Bombs, jackpot and alien mods plus the hook pipeline
//! - `presentation`: Bridge trait and stock bridges
//! - `rules`: Turn/round controller and scoring
//!
//! ```
//! use connect_mods::{DropOutcome, Game, GameConfig, NullBridge, Player};
//! use futures::executor::block_on;
//!
//! let mut game = Game::new(GameConfig::default(), &[]).unwrap();
//! for col in [0, 8, 1, 8, 2, 8] {
//!     block_on(game.drop_disc(col, &mut NullBridge)).unwrap();
//! }
//! let report = block_on(game.drop_disc(3, &mut NullBridge)).unwrap();
//! assert!(matches!(report.outcome, DropOutcome::Won { winner: Player::One, .. }));
//! ```

pub mod board;
pub mod core;
pub mod effects;
pub mod mods;
pub mod presentation;
pub mod rules;

pub use crate::core::{
    BoardError, ConfigError, GameConfig, GameRng, GameRngState, MoveError, Player, PlayerMap,
    Position, SnapshotError, COLS, ROWS,
};

pub use crate::board::{
    Axis, Board, BoardSnapshot, Cell, DiscMove, InvariantViolation, WinScanner, WinningRun,
    WIN_LENGTH,
};

pub use crate::effects::{BoardEffect, BoardHandle, EffectOutcome, EffectReport, EffectResolver};

pub use crate::mods::{FeaturePlacement, GameMod, ModKind, ModRegistry};

pub use crate::presentation::{NullBridge, PresentationBridge, PresentationEvent, RecordingBridge};

pub use crate::rules::{
    round_points, DropOutcome, DropReport, Game, MatchState, Phase, RoundSave, RoundState,
};
