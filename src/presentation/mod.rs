//! Boundary to whatever renders the game.
//!
//! The engine finishes every board mutation first, then hands the
//! corresponding `PresentationEvent`s to a `PresentationBridge` and awaits
//! each one in order. Bridges are pure suspension points: nothing they do
//! feeds back into engine state.

mod bridge;
mod event;

pub use bridge::{dispatch, play_all, NullBridge, PresentationBridge, RecordingBridge};
pub use event::PresentationEvent;
