use std::collections::BTreeMap;

use crate::ecs::{
    State, Value, component,
    entity::Entity,
    event::{Event, Selector},
};

/// Everything a component function sees besides its own prior state.
///
/// - The **inbox**: settled events addressed to this entity's instance of the component (or
///   broadcast to the component), plus events matching the component's declared subscriptions.
/// - The **selected** state of other components, keyed by the selector that picked it. A bare
///   component selector picks that component's state for the same entity; an entity-scoped one
///   picks it for the named entity. Missing state reads as an empty record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    inbox: Vec<Event>,
    selected: BTreeMap<Selector, Value>,
}

impl Context {
    /// Construct a context directly, e.g. to call a component function in isolation.
    #[inline]
    pub fn new(inbox: Vec<Event>, selected: BTreeMap<Selector, Value>) -> Self {
        Self { inbox, selected }
    }

    /// Build the context for one entity of a component.
    pub(crate) fn build(
        state: &State,
        id: &component::Id,
        entity: &Entity,
        def: &component::Def,
    ) -> Self {
        let mut selectors = Vec::with_capacity(def.subscriptions().len() + 1);
        selectors.push(Selector::Component(id.clone()));
        selectors.extend(def.subscriptions().iter().cloned());
        let inbox = state.subscribed_events(entity, &selectors);

        let selected = def
            .select_components()
            .iter()
            .map(|selector| {
                let value = match selector {
                    Selector::Component(other) => state.component_state(other, entity),
                    Selector::Entity(other, target) => state.component_state(other, target),
                };
                (
                    selector.clone(),
                    value.cloned().unwrap_or_else(crate::ecs::empty_record),
                )
            })
            .collect();

        Self { inbox, selected }
    }

    /// Get the events delivered to this entity.
    #[inline]
    pub fn inbox(&self) -> &[Event] {
        &self.inbox
    }

    /// Iterate over the payloads of the inbox events.
    pub fn payloads(&self) -> impl Iterator<Item = &Value> {
        self.inbox.iter().map(|event| &event.payload)
    }

    /// Get selected state by the selector that was declared.
    #[inline]
    pub fn get(&self, selector: &Selector) -> Option<&Value> {
        self.selected.get(selector)
    }

    /// Get the selected state of another component for the same entity.
    #[inline]
    pub fn selected(&self, id: impl Into<component::Id>) -> Option<&Value> {
        self.get(&Selector::Component(id.into()))
    }

    /// Get the selected state of another component for a specific entity.
    #[inline]
    pub fn selected_of(
        &self,
        id: impl Into<component::Id>,
        entity: impl Into<Entity>,
    ) -> Option<&Value> {
        self.get(&Selector::entity(id, entity))
    }
}
