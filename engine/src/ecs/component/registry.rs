use std::collections::BTreeMap;

use log::debug;

use crate::ecs::{
    Error, Result, State,
    component::{Def, Function, Id, Registration},
};

/// The component registry. Maps component ids to their definitions.
///
/// Why not replace on re-registration?
/// - Setup code commonly registers a component's function in one place and its subscriptions or
///   cleanup in another. Merging keeps both.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Definitions keyed by component id.
    defs: BTreeMap<Id, Def>,
}

impl Registry {
    /// Create a new, empty component registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            defs: BTreeMap::new(),
        }
    }

    /// Register a component, merging into an existing definition for the same id.
    pub fn register(&mut self, id: Id, registration: Registration) {
        match self.defs.get_mut(&id) {
            Some(def) => def.merge(registration),
            None => {
                self.defs.insert(id, Def::from(registration));
            }
        }
    }

    /// Get the definition for a component, if registered.
    #[inline]
    pub fn get(&self, id: &Id) -> Option<&Def> {
        self.defs.get(id)
    }

    /// Get the definition for a component, failing if it was never registered.
    #[inline]
    pub fn def(&self, id: &Id) -> Result<&Def> {
        self.defs
            .get(id)
            .ok_or_else(|| Error::MissingComponent(id.clone()))
    }

    /// Get the function of a component, failing if it was never registered.
    #[inline]
    pub fn function(&self, id: &Id) -> Result<&Function> {
        self.def(id).map(Def::function)
    }

    /// Determine if a component is registered.
    #[inline]
    pub fn contains(&self, id: &Id) -> bool {
        self.defs.contains_key(id)
    }

    /// Iterate over the registered component ids in order.
    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        self.defs.keys()
    }

    /// Get the number of registered components.
    #[inline]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Determine if no component is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl State {
    /// Register a component, or merge new settings into an already registered one.
    pub fn register_component(mut self, id: impl Into<Id>, registration: Registration) -> Self {
        let id = id.into();
        debug!("Registering component {:?}", id);
        self.components_mut().register(id, registration);
        self.touch()
    }

    /// Get a component's function.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingComponent`] when the component was never registered, which is a
    /// wiring mistake rather than a runtime condition.
    #[inline]
    pub fn get_component_fn(&self, id: &Id) -> Result<&Function> {
        self.components().function(id)
    }

    /// Determine if a component is registered.
    #[inline]
    pub fn is_component_registered(&self, id: &Id) -> bool {
        self.components().contains(id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ecs::{entity::Entity, system::{Context, Output}};

    fn constant(value: i64) -> Registration {
        Registration::new(move |_, _, _| Output::from(json!(value)))
    }

    #[test]
    fn component_registration() {
        // Given
        let mut registry = Registry::new();

        // When
        registry.register(Id::from("position"), constant(1));
        registry.register(Id::from("velocity"), constant(2));

        // Then
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&Id::from("position")));
        assert_eq!(
            registry.ids().cloned().collect::<Vec<_>>(),
            vec![Id::from("position"), Id::from("velocity")]
        );
    }

    #[test]
    fn re_registration_replaces_function() {
        // Given
        let mut registry = Registry::new();
        registry.register(Id::from("health"), constant(1).subscribe("damage"));

        // When
        registry.register(Id::from("health"), constant(2));

        // Then
        let def = registry.get(&Id::from("health")).unwrap();
        let output = (def.function())(&Entity::from("e"), &json!({}), &Context::default());
        assert_eq!(output.into_parts().0, json!(2));
        assert_eq!(def.subscriptions().len(), 1);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn missing_component_is_an_error() {
        // Given
        let state = State::new();

        // When
        let result = state.get_component_fn(&Id::from("mana"));

        // Then
        assert_eq!(
            result.err(),
            Some(Error::MissingComponent(Id::from("mana")))
        );
    }

    #[test]
    fn register_component_bumps_version() {
        // Given
        let state = State::new();

        // When
        let next = state.clone().register_component("health", constant(1));

        // Then
        assert!(next.version() > state.version());
        assert!(next.is_component_registered(&Id::from("health")));
        assert!(!state.is_component_registered(&Id::from("health")));
    }
}
