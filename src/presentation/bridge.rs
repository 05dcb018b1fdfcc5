//! The presentation bridge trait and two stock implementations.

use futures::future::{self, BoxFuture, FutureExt};

use super::event::PresentationEvent;
use crate::core::{Player, Position};
use crate::mods::ModKind;

/// Receives board changes and resolves once they have been shown.
///
/// Only `present` is required; the named methods forward to it and can be
/// overridden individually. The engine awaits every returned future before
/// its next state change, but never depends on how long it takes.
pub trait PresentationBridge {
    /// Show one event.
    fn present(&mut self, event: PresentationEvent) -> BoxFuture<'_, ()>;

    fn disc_placed(&mut self, pos: Position, player: Player) -> BoxFuture<'_, ()> {
        self.present(PresentationEvent::DiscPlaced { pos, player })
    }

    fn disc_removed(&mut self, pos: Position) -> BoxFuture<'_, ()> {
        self.present(PresentationEvent::DiscRemoved { pos })
    }

    fn disc_fell(&mut self, from: Position, to: Position, player: Player) -> BoxFuture<'_, ()> {
        self.present(PresentationEvent::DiscFell { from, to, player })
    }

    fn disc_relocated(
        &mut self,
        from: Position,
        to: Position,
        player: Player,
    ) -> BoxFuture<'_, ()> {
        self.present(PresentationEvent::DiscRelocated { from, to, player })
    }

    fn column_filled(
        &mut self,
        col: usize,
        player: Player,
        cells: Vec<Position>,
    ) -> BoxFuture<'_, ()> {
        self.present(PresentationEvent::ColumnFilled { col, player, cells })
    }

    fn effect_triggered(&mut self, kind: ModKind, pos: Position) -> BoxFuture<'_, ()> {
        self.present(PresentationEvent::EffectTriggered { kind, pos })
    }
}

/// Route an event to the matching bridge method.
pub fn dispatch<B>(bridge: &mut B, event: PresentationEvent) -> BoxFuture<'_, ()>
where
    B: PresentationBridge + ?Sized,
{
    match event {
        PresentationEvent::DiscPlaced { pos, player } => bridge.disc_placed(pos, player),
        PresentationEvent::DiscRemoved { pos } => bridge.disc_removed(pos),
        PresentationEvent::DiscFell { from, to, player } => bridge.disc_fell(from, to, player),
        PresentationEvent::DiscRelocated { from, to, player } => {
            bridge.disc_relocated(from, to, player)
        }
        PresentationEvent::ColumnFilled { col, player, cells } => {
            bridge.column_filled(col, player, cells)
        }
        PresentationEvent::EffectTriggered { kind, pos } => bridge.effect_triggered(kind, pos),
    }
}

/// Show events one after another, awaiting each.
pub async fn play_all<B, I>(bridge: &mut B, events: I)
where
    B: PresentationBridge + ?Sized,
    I: IntoIterator<Item = PresentationEvent>,
{
    for event in events {
        tracing::trace!(event = event.label(), "presenting");
        dispatch(bridge, event).await;
    }
}

/// Bridge that shows nothing and resolves immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBridge;

impl PresentationBridge for NullBridge {
    fn present(&mut self, _event: PresentationEvent) -> BoxFuture<'_, ()> {
        future::ready(()).boxed()
    }
}

/// Bridge that records every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingBridge {
    events: Vec<PresentationEvent>,
}

impl RecordingBridge {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events seen so far.
    #[must_use]
    pub fn events(&self) -> &[PresentationEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn take(&mut self) -> Vec<PresentationEvent> {
        std::mem::take(&mut self.events)
    }

    /// Labels of the recorded events.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.events.iter().map(PresentationEvent::label).collect()
    }
}

impl PresentationBridge for RecordingBridge {
    fn present(&mut self, event: PresentationEvent) -> BoxFuture<'_, ()> {
        self.events.push(event);
        future::ready(()).boxed()
    }
}
