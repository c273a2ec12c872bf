//! Entity and component membership operations on [`State`].

use std::collections::BTreeSet;

use log::debug;

use crate::ecs::{State, Value, component, entity::Entity, storage::Slice};

impl State {
    /// Create an entity with the given components, or add components to an existing entity.
    ///
    /// Each spec attaches one component and writes its initial state (an empty record for bare
    /// specs). Membership is a set: attaching a component the entity already owns leaves membership
    /// unchanged and only rewrites the state.
    pub fn create_entity<S>(
        mut self,
        entity: impl Into<Entity>,
        specs: impl IntoIterator<Item = S>,
    ) -> Self
    where
        S: Into<component::Spec>,
    {
        let entity = entity.into();
        self.index_mut().insert_entity(&entity);
        for spec in specs {
            let (id, value) = spec.into().into_parts();
            self.attach(&entity, id, value);
        }
        debug!(
            "Created entity {:?} with components {:?}",
            entity,
            self.components_of(&entity)
        );
        self.touch()
    }

    /// Attach one component to an existing (or new) entity.
    pub fn add_component(
        mut self,
        entity: impl Into<Entity>,
        spec: impl Into<component::Spec>,
    ) -> Self {
        let entity = entity.into();
        let (id, value) = spec.into().into_parts();
        self.attach(&entity, id, value);
        self.touch()
    }

    /// Detach one component from an entity, deleting its state. The cleanup hook is not run; it
    /// belongs to entity removal. Detaching a component the entity does not own is a no-op.
    pub fn remove_component(mut self, entity: &Entity, id: &component::Id) -> Self {
        if self.index_mut().detach(entity, id) {
            debug!("Detached {:?} from entity {:?}", id, entity);
        }
        self.storage_mut().remove(id, entity);
        self.touch()
    }

    /// Remove an entity and everything recorded about it.
    ///
    /// Cleanup hooks of the entity's components run first, in component id order, each receiving
    /// the state left by the previous one. Afterwards the entity's state is deleted from every
    /// component, and the entity leaves both directions of the index. Removing an unknown entity is
    /// a no-op.
    pub fn remove_entity(self, entity: &Entity) -> Self {
        let owned: BTreeSet<component::Id> =
            self.components_of(entity).cloned().unwrap_or_default();

        let cleanups: Vec<_> = owned
            .iter()
            .filter_map(|id| self.components().get(id)?.cleanup().cloned())
            .collect();
        let mut state = cleanups
            .into_iter()
            .fold(self, |state, cleanup| cleanup(state, entity));

        // Cleanup hooks may have attached more components; clear whatever the entity owns now.
        let remaining = state.index_mut().remove_entity(entity).unwrap_or_default();
        let storage = state.storage_mut();
        for id in owned.iter().chain(remaining.iter()) {
            storage.remove(id, entity);
        }
        debug!("Removed entity {:?}", entity);
        state.touch()
    }

    /// Replace the state of a component for an entity. Does nothing unless the entity owns the
    /// component.
    pub fn update_component_state(
        mut self,
        id: &component::Id,
        entity: &Entity,
        value: Value,
    ) -> Self {
        if self.owns(entity, id) {
            self.storage_mut().insert(id, entity, value);
        }
        self.touch()
    }

    /// Get the entities owning a component, in order.
    pub fn entities_with_component(&self, id: &component::Id) -> BTreeSet<Entity> {
        self.index().entities_with(id).cloned().unwrap_or_default()
    }

    /// Get the entities owning every one of the given components.
    pub fn entities_with_all_components<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a component::Id>,
    ) -> BTreeSet<Entity> {
        self.index().entities_with_all(ids)
    }

    /// Get the components owned by an entity.
    #[inline]
    pub fn components_of(&self, entity: &Entity) -> Option<&BTreeSet<component::Id>> {
        self.index().components_of(entity)
    }

    /// Get the state of a component for an entity.
    #[inline]
    pub fn component_state(&self, id: &component::Id, entity: &Entity) -> Option<&Value> {
        self.storage().get(id, entity)
    }

    /// Get the state of a component for every entity owning it.
    #[inline]
    pub fn component_states(&self, id: &component::Id) -> Option<&Slice> {
        self.storage().slice(id)
    }

    /// Determine if the entity exists.
    #[inline]
    pub fn contains_entity(&self, entity: &Entity) -> bool {
        self.index().contains_entity(entity)
    }

    /// Determine if the entity owns the component.
    #[inline]
    pub fn owns(&self, entity: &Entity, id: &component::Id) -> bool {
        self.components_of(entity)
            .is_some_and(|components| components.contains(id))
    }

    /// Iterate over all entities in order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.index().entities()
    }

    /// Get the number of entities.
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.index().len()
    }

    fn attach(&mut self, entity: &Entity, id: component::Id, value: Value) {
        self.index_mut().attach(entity, &id);
        self.storage_mut().insert(&id, entity, value);
    }
}
