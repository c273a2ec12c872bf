//! Events and their routing.
//!
//! An [`Event`] is a payload plus a [`Selector`] naming who it is for: every entity of a
//! component (`Selector::Component`) or one entity of a component (`Selector::Entity`).
//!
//! Events live on the state's [`Bus`]. Emitting appends to the pending buffer; inboxes are built
//! from the settled buffer, which holds what was pending when the current tick began. See
//! [`Bus`] for the buffer model.
//!
//! # Scoping
//!
//! Components declare subscriptions by bare component id (`"move-change"`). When the inbox for
//! entity `e` is built, a bare subscription is scoped to `e`: it receives events addressed to
//! `("move-change", e)` and events broadcast to `"move-change"`, never events addressed to another
//! entity. An entity-scoped subscription (`("move-change", other)`) matches exactly that address.
//!
//! Events nobody subscribes to are dropped silently when the bus settles.

mod bus;

pub use bus::Bus;

use log::trace;

use crate::ecs::{State, Value, component, entity::Entity};

/// The address of an event, or a declared interest in events or component state.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Selector {
    /// A component, for every entity (or, in a subscription, for the requesting entity).
    Component(component::Id),
    /// A component of one specific entity.
    Entity(component::Id, Entity),
}

impl Selector {
    /// Construct an entity-scoped selector.
    #[inline]
    pub fn entity(id: impl Into<component::Id>, entity: impl Into<Entity>) -> Self {
        Self::Entity(id.into(), entity.into())
    }

    /// Get the component this selector names.
    #[inline]
    pub fn component(&self) -> &component::Id {
        match self {
            Self::Component(id) | Self::Entity(id, _) => id,
        }
    }

    /// Scope a bare selector to an entity. Entity-scoped selectors are returned unchanged.
    pub fn scoped_to(&self, entity: &Entity) -> Self {
        match self {
            Self::Component(id) => Self::Entity(id.clone(), entity.clone()),
            scoped @ Self::Entity(..) => scoped.clone(),
        }
    }

    /// Determine if an event address is accepted by this selector when read on behalf of `entity`.
    ///
    /// An address matches the selector itself (a broadcast for a bare selector) or the selector
    /// scoped to `entity`.
    pub fn accepts(&self, entity: &Entity, address: &Selector) -> bool {
        self == address || self.scoped_to(entity) == *address
    }
}

impl From<component::Id> for Selector {
    fn from(id: component::Id) -> Self {
        Self::Component(id)
    }
}

impl From<&str> for Selector {
    fn from(id: &str) -> Self {
        Self::Component(id.into())
    }
}

impl<I: Into<component::Id>> From<(I, Entity)> for Selector {
    fn from((id, entity): (I, Entity)) -> Self {
        Self::Entity(id.into(), entity)
    }
}

/// A message routed to component instances by its selector.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// The event data.
    pub payload: Value,
    /// Who the event is for.
    pub selector: Selector,
}

impl Event {
    /// Construct an event for a selector.
    #[inline]
    pub fn new(selector: impl Into<Selector>, payload: Value) -> Self {
        Self {
            payload,
            selector: selector.into(),
        }
    }

    /// Construct an event for one entity's instance of a component.
    #[inline]
    pub fn to(id: impl Into<component::Id>, entity: impl Into<Entity>, payload: Value) -> Self {
        Self::new(Selector::entity(id, entity), payload)
    }

    /// Construct an event for every entity owning a component.
    #[inline]
    pub fn broadcast(id: impl Into<component::Id>, payload: Value) -> Self {
        Self::new(Selector::Component(id.into()), payload)
    }
}

impl State {
    /// Append events to the pending buffer. They become readable after the bus settles.
    pub fn emit(mut self, events: impl IntoIterator<Item = Event>) -> Self {
        let before = self.events().pending_len();
        self.events_mut().send_all(events);
        trace!("Emitted {} events", self.events().pending_len() - before);
        self.touch()
    }

    /// Move pending events to the settled buffer, discarding the previously settled ones.
    pub fn settle_events(mut self) -> Self {
        self.events_mut().swap();
        self.touch()
    }

    /// Get the events emitted since the bus last settled.
    pub fn pending_events(&self) -> impl Iterator<Item = &Event> {
        self.events().pending()
    }

    /// Get the settled events accepted by any of the selectors, read on behalf of `entity`.
    pub fn subscribed_events(&self, entity: &Entity, selectors: &[Selector]) -> Vec<Event> {
        self.events().subscribed(entity, selectors)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_subscription_is_scoped_to_reader() {
        // Given
        let subscription = Selector::from("x");
        let a = Entity::from("a");
        let b = Entity::from("b");
        let address = Selector::entity("x", a.clone());

        // Then
        assert!(subscription.accepts(&a, &address));
        assert!(!subscription.accepts(&b, &address));
        assert!(subscription.accepts(&b, &Selector::from("x")));
        assert!(!subscription.accepts(&a, &Selector::from("y")));
    }

    #[test]
    fn entity_subscription_matches_exactly() {
        // Given
        let a = Entity::from("a");
        let b = Entity::from("b");
        let subscription = Selector::entity("x", a.clone());

        // Then - Reader does not matter, only the address
        assert!(subscription.accepts(&b, &Selector::entity("x", a.clone())));
        assert!(!subscription.accepts(&a, &Selector::entity("x", b)));
        assert!(!subscription.accepts(&a, &Selector::from("x")));
    }

    #[test]
    fn scoped_to_only_scopes_bare_selectors() {
        // Given
        let a = Entity::from("a");
        let b = Entity::from("b");

        // Then
        assert_eq!(
            Selector::from("x").scoped_to(&a),
            Selector::entity("x", a.clone())
        );
        assert_eq!(
            Selector::entity("x", b.clone()).scoped_to(&a),
            Selector::entity("x", b)
        );
    }

    #[test]
    fn emitted_events_are_readable_after_settle() {
        // Given
        let e1 = Entity::from("e1");
        let state = State::new().emit([Event::to("x", e1.clone(), json!(1))]);

        // Then - Still pending
        assert!(state.subscribed_events(&e1, &[Selector::from("x")]).is_empty());
        assert_eq!(state.pending_events().count(), 1);

        // When
        let state = state.settle_events();

        // Then
        let inbox = state.subscribed_events(&e1, &[Selector::from("x")]);
        assert_eq!(inbox, vec![Event::to("x", e1.clone(), json!(1))]);
        assert_eq!(state.pending_events().count(), 0);

        // When - Nothing new was emitted
        let state = state.settle_events();

        // Then
        assert!(state.subscribed_events(&e1, &[Selector::from("x")]).is_empty());
    }
}
