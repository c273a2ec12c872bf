//! Double-buffered event storage.
//!
//! The bus keeps two buffers:
//! - **Active buffer**: where new events are written via [`send()`](Bus::send)
//! - **Stable buffer**: where events are read via [`iter()`](Bus::iter) and inbox construction
//!
//! When [`swap()`](Bus::swap) is called (once at the start of every tick):
//! 1. The active buffer becomes the stable buffer (events become readable)
//! 2. The old stable buffer is dropped and a fresh active buffer starts
//!
//! Systems therefore read what was emitted before the tick began and write what the next tick
//! will read, regardless of the order systems run in.
//!
//! ```rust,ignore
//! let mut bus = Bus::new();
//!
//! // Tick N: write events
//! bus.send(Event::to("moveable", e1, json!({ "offset_x": 5 })));
//! assert!(bus.is_empty());
//!
//! // Start of tick N+1
//! bus.swap();
//! assert_eq!(bus.len(), 1);
//! ```

use std::sync::Arc;

use crate::ecs::{
    entity::Entity,
    event::{Event, Selector},
};

/// Double-buffered event bus.
///
/// Buffers are shared between clones of the state and copied on write.
#[derive(Debug, Clone, Default)]
pub struct Bus {
    /// Events emitted since the last swap.
    active: Arc<Vec<Event>>,
    /// Events readable during the current tick.
    stable: Arc<Vec<Event>>,
}

impl Bus {
    /// Creates a new, empty bus.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send an event to the active buffer.
    #[inline]
    pub fn send(&mut self, event: Event) {
        Arc::make_mut(&mut self.active).push(event);
    }

    /// Send many events to the active buffer, keeping their order.
    pub fn send_all(&mut self, events: impl IntoIterator<Item = Event>) {
        let mut events = events.into_iter().peekable();
        if events.peek().is_some() {
            Arc::make_mut(&mut self.active).extend(events);
        }
    }

    /// Make the active buffer readable and start a fresh one.
    pub fn swap(&mut self) {
        self.stable = std::mem::take(&mut self.active);
    }

    /// Returns an iterator over events in the stable buffer, in the order they were sent.
    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.stable.iter()
    }

    /// Returns an iterator over events in the active buffer, in the order they were sent.
    pub fn pending(&self) -> impl Iterator<Item = &Event> {
        self.active.iter()
    }

    /// Returns the number of events in the stable buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.stable.len()
    }

    /// Returns `true` if the stable buffer contains no events.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stable.is_empty()
    }

    /// Returns the number of events in the active buffer.
    #[inline]
    pub fn pending_len(&self) -> usize {
        self.active.len()
    }

    /// Collect the stable events accepted by any of the selectors, read on behalf of `entity`.
    ///
    /// Each event appears at most once, in the order it was sent.
    pub fn subscribed(&self, entity: &Entity, selectors: &[Selector]) -> Vec<Event> {
        if selectors.is_empty() {
            return Vec::new();
        }
        self.stable
            .iter()
            .filter(|event| {
                selectors
                    .iter()
                    .any(|selector| selector.accepts(entity, &event.selector))
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn new_bus_is_empty() {
        let bus = Bus::new();
        assert!(bus.is_empty());
        assert_eq!(bus.pending_len(), 0);
    }

    #[test]
    fn send_goes_to_active_buffer() {
        // Given
        let mut bus = Bus::new();

        // When
        bus.send(Event::broadcast("x", json!(1)));

        // Then
        assert!(bus.is_empty());
        assert_eq!(bus.pending_len(), 1);
    }

    #[test]
    fn swap_makes_events_readable_and_drops_old() {
        // Given
        let mut bus = Bus::new();
        bus.send_all([
            Event::broadcast("x", json!(1)),
            Event::broadcast("x", json!(2)),
        ]);

        // When
        bus.swap();

        // Then
        let payloads: Vec<_> = bus.iter().map(|event| event.payload.clone()).collect();
        assert_eq!(payloads, vec![json!(1), json!(2)]);
        assert_eq!(bus.pending_len(), 0);

        // When
        bus.send(Event::broadcast("x", json!(3)));
        bus.swap();

        // Then
        assert_eq!(bus.len(), 1);
        assert_eq!(bus.iter().next().unwrap().payload, json!(3));
    }

    #[test]
    fn subscribed_filters_and_deduplicates() {
        // Given
        let a = Entity::from("a");
        let b = Entity::from("b");
        let mut bus = Bus::new();
        bus.send_all([
            Event::to("x", a.clone(), json!("for a")),
            Event::to("x", b.clone(), json!("for b")),
            Event::broadcast("x", json!("for all")),
            Event::to("y", a.clone(), json!("other")),
        ]);
        bus.swap();

        // When - Two selectors both accept the same events
        let inbox = bus.subscribed(&a, &[Selector::from("x"), Selector::entity("x", a.clone())]);

        // Then
        let payloads: Vec<_> = inbox.into_iter().map(|event| event.payload).collect();
        assert_eq!(payloads, vec![json!("for a"), json!("for all")]);
        assert!(bus.subscribed(&a, &[]).is_empty());
    }

    #[test]
    fn clones_keep_their_buffers() {
        // Given
        let mut bus = Bus::new();
        bus.send(Event::broadcast("x", json!(1)));
        let snapshot = bus.clone();

        // When
        bus.swap();

        // Then
        assert_eq!(snapshot.pending_len(), 1);
        assert!(snapshot.is_empty());
        assert_eq!(bus.len(), 1);
    }
}
