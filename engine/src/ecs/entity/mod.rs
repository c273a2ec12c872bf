//! Entity identifiers.
//!
//! An entity is nothing more than an opaque identifier. Everything an entity "is" comes from the set
//! of components the [`State`](crate::ecs::State) records for it. Callers may pick identifiers
//! themselves (`Entity::from("player")`) or ask for a generated one with [`Entity::generate`],
//! which is backed by a random (v4) UUID so two generated entities never collide in practice.

use uuid::Uuid;

crate::define_id!(
    /// An entity in the ECS. Entities are ordered by their identifier, which is the order systems
    /// visit them in.
    pub Entity
);

impl Entity {
    /// Generate a new entity with a random, process-unique identifier.
    #[inline]
    pub fn generate() -> Self {
        Self::from(Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn generated_entities_are_unique() {
        // When
        let entities: BTreeSet<Entity> = (0..1_000).map(|_| Entity::generate()).collect();

        // Then
        assert_eq!(entities.len(), 1_000);
    }

    #[test]
    fn named_entities_compare_equal() {
        assert_eq!(Entity::from("e1"), Entity::new("e1"));
        assert_ne!(Entity::from("e1"), Entity::from("e2"));
    }
}
