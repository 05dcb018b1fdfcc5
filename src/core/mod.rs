//! Core engine types: players, positions, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these.

pub mod config;
pub mod error;
pub mod player;
pub mod position;
pub mod rng;

pub use config::GameConfig;
pub use error::{BoardError, ConfigError, MoveError, SnapshotError};
pub use player::{Player, PlayerMap};
pub use position::{Position, COLS, ROWS};
pub use rng::{GameRng, GameRngState};
