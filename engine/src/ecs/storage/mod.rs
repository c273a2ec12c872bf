//! Storage for the ECS state value.
//!
//! Two structures live here:
//!
//! - [`Index`](index::Index): which entity owns which components, in both directions.
//! - [`Storage`]: the per-component, per-entity state values.
//!
//! Both are plain values. The [`State`](crate::ecs::State) keeps each behind an `Arc` and copies
//! on write, so older state values keep seeing the data they were built with.
//!
//! ```text
//! Storage
//!   ├── :moveable ─► Arc<Slice> { e1 ─► {pos_x: 0}, e2 ─► {pos_x: 4} }
//!   └── :sprite   ─► Arc<Slice> { e1 ─► {...} }
//! ```

pub(crate) mod index;

use std::{collections::BTreeMap, sync::Arc};

use crate::ecs::{Value, component, entity::Entity};

/// The state of one component for every entity owning it.
pub type Slice = BTreeMap<Entity, Value>;

/// Per-component state storage.
///
/// Each component's slice sits behind its own `Arc`, so replacing the slice of one component
/// (what a system run does) never copies the slices of the others.
#[derive(Debug, Clone, Default)]
pub(crate) struct Storage {
    slices: BTreeMap<component::Id, Arc<Slice>>,
}

impl Storage {
    /// Create a new, empty storage.
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state of a component for an entity.
    #[inline]
    pub fn get(&self, id: &component::Id, entity: &Entity) -> Option<&Value> {
        self.slices.get(id)?.get(entity)
    }

    /// Get the full slice of a component.
    #[inline]
    pub fn slice(&self, id: &component::Id) -> Option<&Slice> {
        self.slices.get(id).map(Arc::as_ref)
    }

    /// Write the state of a component for an entity.
    pub fn insert(&mut self, id: &component::Id, entity: &Entity, value: Value) {
        let slice = self.slices.entry(id.clone()).or_default();
        Arc::make_mut(slice).insert(entity.clone(), value);
    }

    /// Delete the state of a component for an entity. Empty slices are dropped.
    pub fn remove(&mut self, id: &component::Id, entity: &Entity) -> Option<Value> {
        let slice = self.slices.get_mut(id)?;
        if !slice.contains_key(entity) {
            return None;
        }
        let removed = Arc::make_mut(slice).remove(entity);
        if slice.is_empty() {
            self.slices.remove(id);
        }
        removed
    }

    /// Replace the whole slice of a component.
    pub fn replace_slice(&mut self, id: &component::Id, slice: Slice) {
        if slice.is_empty() {
            self.slices.remove(id);
        } else {
            self.slices.insert(id.clone(), Arc::new(slice));
        }
    }

    /// Determine if any component holds state for the entity.
    #[cfg(test)]
    pub fn holds_entity(&self, entity: &Entity) -> bool {
        self.slices.values().any(|slice| slice.contains_key(entity))
    }

    /// Iterate over components and their slices in order.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = (&component::Id, &Slice)> {
        self.slices.iter().map(|(id, slice)| (id, slice.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn insert_and_remove() {
        // Given
        let mut storage = Storage::new();
        let position = component::Id::from("position");
        let e1 = Entity::from("e1");

        // When
        storage.insert(&position, &e1, json!({ "x": 1 }));

        // Then
        assert_eq!(storage.get(&position, &e1), Some(&json!({ "x": 1 })));
        assert!(storage.holds_entity(&e1));

        // When
        assert_eq!(storage.remove(&position, &e1), Some(json!({ "x": 1 })));

        // Then - Empty slice is dropped entirely
        assert!(storage.slice(&position).is_none());
        assert_eq!(storage.remove(&position, &e1), None);
    }

    #[test]
    fn clones_do_not_observe_writes() {
        // Given
        let mut storage = Storage::new();
        let position = component::Id::from("position");
        let e1 = Entity::from("e1");
        storage.insert(&position, &e1, json!(1));
        let snapshot = storage.clone();

        // When
        storage.insert(&position, &e1, json!(2));

        // Then
        assert_eq!(snapshot.get(&position, &e1), Some(&json!(1)));
        assert_eq!(storage.get(&position, &e1), Some(&json!(2)));
    }

    #[test]
    fn replace_slice_with_empty_drops_component() {
        // Given
        let mut storage = Storage::new();
        let position = component::Id::from("position");
        storage.insert(&position, &Entity::from("e1"), json!(1));

        // When
        storage.replace_slice(&position, Slice::new());

        // Then
        assert_eq!(storage.iter().count(), 0);
    }
}
