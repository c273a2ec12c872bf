//! The versioned game state value.
//!
//! [`State`] holds everything the ECS knows: the entity/component index, the component registry,
//! per-component state, the registered systems, the scenes and the event bus. Every operation
//! consumes a state and returns the next one; cloning is cheap (each part sits behind an `Arc`) and
//! writes copy only the part they touch, so a state kept around for diagnostics never changes under
//! the caller.
//!
//! Operations are grouped by concern:
//!
//! - entities and their components: [`entities`] (this module)
//! - component registration: [`component::Registry`](crate::ecs::component::Registry)
//! - events: [`event`](crate::ecs::event)
//! - system execution: [`system`](crate::ecs::system)
//! - scenes and ticking: [`scene`](crate::ecs::scene)
//!
//! ```rust,ignore
//! let before = State::new().create_entity("e1", ["moveable"]);
//! let after = before.clone().remove_entity(&Entity::from("e1"));
//!
//! assert!(before.contains_entity(&Entity::from("e1")));
//! assert!(!after.contains_entity(&Entity::from("e1")));
//! ```

mod entities;

use std::{any::Any, fmt, sync::Arc};

use crate::ecs::{
    component, event, scene, system,
    storage::{Storage, index::Index},
};

/// Opaque handle owned by the rendering driver. The ECS never looks inside it.
pub type RenderingHandle = Arc<dyn Any + Send + Sync>;

/// An immutable, versioned snapshot of the whole game.
#[derive(Clone, Default)]
pub struct State {
    /// Bumped by every transformation.
    version: u64,
    /// Entity to components and component to entities.
    index: Arc<Index>,
    /// Registered component definitions.
    components: Arc<component::Registry>,
    /// Per-component, per-entity state.
    storage: Arc<Storage>,
    /// Registered systems.
    systems: Arc<system::Registry>,
    /// Scene definitions and the current scene.
    scenes: Arc<scene::Scenes>,
    /// Pending and settled events.
    events: event::Bus,
    /// Renderer owned handle.
    rendering: Option<RenderingHandle>,
}

impl State {
    /// Create a new, empty state at version 0.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the version of this state. Every transformation returns a higher version.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Attach the renderer's opaque handle.
    pub fn with_rendering_handle(mut self, handle: RenderingHandle) -> Self {
        self.rendering = Some(handle);
        self.touch()
    }

    /// Get the renderer's opaque handle.
    #[inline]
    pub fn rendering_handle(&self) -> Option<&RenderingHandle> {
        self.rendering.as_ref()
    }

    /// Get the component registry.
    #[inline]
    pub fn components(&self) -> &component::Registry {
        &self.components
    }

    /// Get the system registry.
    #[inline]
    pub fn systems(&self) -> &system::Registry {
        &self.systems
    }

    /// Get the scene table.
    #[inline]
    pub fn scenes(&self) -> &scene::Scenes {
        &self.scenes
    }

    /// Get the event bus.
    #[inline]
    pub fn events(&self) -> &event::Bus {
        &self.events
    }

    #[inline]
    pub(crate) fn index(&self) -> &Index {
        &self.index
    }

    #[inline]
    pub(crate) fn storage(&self) -> &Storage {
        &self.storage
    }

    #[inline]
    pub(crate) fn index_mut(&mut self) -> &mut Index {
        Arc::make_mut(&mut self.index)
    }

    #[inline]
    pub(crate) fn storage_mut(&mut self) -> &mut Storage {
        Arc::make_mut(&mut self.storage)
    }

    #[inline]
    pub(crate) fn components_mut(&mut self) -> &mut component::Registry {
        Arc::make_mut(&mut self.components)
    }

    #[inline]
    pub(crate) fn systems_mut(&mut self) -> &mut system::Registry {
        Arc::make_mut(&mut self.systems)
    }

    #[inline]
    pub(crate) fn scenes_mut(&mut self) -> &mut scene::Scenes {
        Arc::make_mut(&mut self.scenes)
    }

    #[inline]
    pub(crate) fn events_mut(&mut self) -> &mut event::Bus {
        &mut self.events
    }

    /// Finish a transformation: bump the version.
    #[inline]
    pub(crate) fn touch(mut self) -> Self {
        self.version += 1;
        #[cfg(test)]
        self.assert_invariants();
        self
    }

    /// Check both directions of the index and that every stored component state belongs to an
    /// entity owning that component.
    #[cfg(test)]
    fn assert_invariants(&self) {
        assert!(self.index.is_consistent(), "entity/component index diverged");
        let indexed = self.storage.iter().all(|(id, slice)| {
            slice.keys().all(|entity| {
                self.index
                    .components_of(entity)
                    .is_some_and(|owned| owned.contains(id))
            })
        });
        assert!(indexed, "component state stored for a non-owner");
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("version", &self.version)
            .field("entities", &self.index.len())
            .field("components", &self.components.len())
            .field("systems", &self.systems.len())
            .field("scene", &self.scenes.current())
            .field("events", &self.events.len())
            .field("pending_events", &self.events.pending_len())
            .finish()
    }
}
