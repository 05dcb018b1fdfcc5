//! Board effects triggered by mods.
//!
//! - `BoardEffect`: the three mutations mods can request
//! - `EffectResolver`: applies an effect through a `BoardHandle`
//! - `EffectReport`: what changed, convertible into presentation events
//!
//! ## Ordering
//!
//! Resolution is synchronous. Discs are cleared first, then gravity runs once
//! per affected column, then abducted discs are relocated. Only after the
//! board is consistent again are the report's events handed to the bridge.

mod effect;
mod resolver;

pub use effect::{BoardEffect, ColumnFill, EffectOutcome, EffectReport};
pub use resolver::{BoardHandle, EffectResolver};
