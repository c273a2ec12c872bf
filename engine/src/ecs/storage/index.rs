use std::collections::{BTreeMap, BTreeSet};

use fixedbitset::FixedBitSet;

use crate::ecs::{component, entity::Entity};

/// The components owned by a single entity.
///
/// Keeps an ordered set for iteration and a bitset over interned component slots for fast
/// superset checks. Both always describe the same set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Membership {
    /// The component ids, ordered.
    components: BTreeSet<component::Id>,
    /// Bit N is set when the component interned to slot N is owned.
    bits: FixedBitSet,
}

impl Membership {
    /// Get the owned component ids.
    #[inline]
    pub fn components(&self) -> &BTreeSet<component::Id> {
        &self.components
    }

    /// Check whether this membership contains every slot in `query`.
    #[inline]
    fn contains_all(&self, query: &FixedBitSet) -> bool {
        self.bits.is_superset(query)
    }

    fn insert(&mut self, id: component::Id, slot: usize) -> bool {
        self.bits.grow(slot + 1);
        self.bits.insert(slot);
        self.components.insert(id)
    }

    fn remove(&mut self, id: &component::Id, slot: usize) -> bool {
        if slot < self.bits.len() {
            self.bits.set(slot, false);
        }
        self.components.remove(id)
    }
}

/// Bidirectional index between entities and the components they own.
///
/// # Invariants
///
/// - `c ∈ by_entity[e]` if and only if `e ∈ by_component[c]`.
/// - Every component that appears in either map has an interned slot.
/// - Slots are never reused, so a bitset built from an older slot table stays meaningful.
#[derive(Debug, Clone, Default)]
pub(crate) struct Index {
    /// Entity to owned components.
    by_entity: BTreeMap<Entity, Membership>,
    /// Component to owning entities (the reverse index).
    by_component: BTreeMap<component::Id, BTreeSet<Entity>>,
    /// Component to bit slot, assigned on first attachment.
    slots: BTreeMap<component::Id, usize>,
}

impl Index {
    /// Create a new, empty index.
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the entity is present, even if it owns no components.
    pub fn insert_entity(&mut self, entity: &Entity) {
        if !self.by_entity.contains_key(entity) {
            self.by_entity.insert(entity.clone(), Membership::default());
        }
    }

    /// Attach a component to an entity, creating the entity if needed.
    ///
    /// Returns `true` when the component was not attached before.
    pub fn attach(&mut self, entity: &Entity, id: &component::Id) -> bool {
        let slot = self.slot_or_intern(id);
        self.insert_entity(entity);
        let inserted = self
            .by_entity
            .get_mut(entity)
            .is_some_and(|membership| membership.insert(id.clone(), slot));
        self.by_component
            .entry(id.clone())
            .or_default()
            .insert(entity.clone());
        inserted
    }

    /// Detach a component from an entity. The entity itself stays indexed.
    ///
    /// Returns `true` when the component was attached.
    pub fn detach(&mut self, entity: &Entity, id: &component::Id) -> bool {
        let Some(&slot) = self.slots.get(id) else {
            return false;
        };
        let removed = self
            .by_entity
            .get_mut(entity)
            .is_some_and(|membership| membership.remove(id, slot));
        if let Some(entities) = self.by_component.get_mut(id) {
            entities.remove(entity);
        }
        removed
    }

    /// Remove an entity from both directions of the index, returning the components it owned.
    pub fn remove_entity(&mut self, entity: &Entity) -> Option<BTreeSet<component::Id>> {
        let membership = self.by_entity.remove(entity)?;
        for id in membership.components() {
            if let Some(entities) = self.by_component.get_mut(id) {
                entities.remove(entity);
            }
        }
        Some(membership.components)
    }

    /// Get the components owned by an entity.
    #[inline]
    pub fn components_of(&self, entity: &Entity) -> Option<&BTreeSet<component::Id>> {
        self.by_entity.get(entity).map(Membership::components)
    }

    /// Get the entities owning a component.
    #[inline]
    pub fn entities_with(&self, id: &component::Id) -> Option<&BTreeSet<Entity>> {
        self.by_component.get(id)
    }

    /// Get the entities owning every one of the given components.
    ///
    /// This is a scan over all entities testing bitset containment. An empty query matches every
    /// entity; a query naming a component that was never attached matches none.
    pub fn entities_with_all<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a component::Id>,
    ) -> BTreeSet<Entity> {
        let mut query = FixedBitSet::new();
        for id in ids {
            let Some(&slot) = self.slots.get(id) else {
                return BTreeSet::new();
            };
            query.grow(slot + 1);
            query.insert(slot);
        }
        self.by_entity
            .iter()
            .filter(|(_, membership)| membership.contains_all(&query))
            .map(|(entity, _)| entity.clone())
            .collect()
    }

    /// Determine if the entity is indexed.
    #[inline]
    pub fn contains_entity(&self, entity: &Entity) -> bool {
        self.by_entity.contains_key(entity)
    }

    /// Iterate over all indexed entities in order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.by_entity.keys()
    }

    /// Get the number of indexed entities.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_entity.len()
    }

    /// Check that both directions of the index agree.
    #[cfg(test)]
    pub fn is_consistent(&self) -> bool {
        let forward = self.by_entity.iter().all(|(entity, membership)| {
            membership.components().iter().all(|id| {
                self.slots
                    .get(id)
                    .is_some_and(|&slot| membership.bits.contains(slot))
                    && self
                        .by_component
                        .get(id)
                        .is_some_and(|entities| entities.contains(entity))
            }) && membership.bits.count_ones(..) == membership.components().len()
        });
        let reverse = self.by_component.iter().all(|(id, entities)| {
            entities.iter().all(|entity| {
                self.by_entity
                    .get(entity)
                    .is_some_and(|membership| membership.components().contains(id))
            })
        });
        forward && reverse
    }

    fn slot_or_intern(&mut self, id: &component::Id) -> usize {
        if let Some(&slot) = self.slots.get(id) {
            return slot;
        }
        let slot = self.slots.len();
        self.slots.insert(id.clone(), slot);
        slot
    }
}
