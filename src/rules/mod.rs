//! Turn, round and match rules.
//!
//! - `Game`: the controller driving drops through the mod pipeline
//! - `RoundState` / `MatchState`: per-round and cumulative state
//! - `round_points`: speed-weighted scoring

mod controller;
mod scoring;
mod state;

pub use controller::{DropOutcome, DropReport, Game};
pub use scoring::round_points;
pub use state::{MatchState, MoveRecord, Phase, RoundSave, RoundState};
