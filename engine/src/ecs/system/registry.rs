//! System registry for storing and retrieving ECS systems.

use std::collections::BTreeMap;

use log::debug;

use crate::ecs::{
    Error, Result, State,
    system::{Id, System},
};

/// A registry for storing systems by id.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// All registered systems, keyed by their [`Id`].
    systems: BTreeMap<Id, System>,
}

impl Registry {
    /// Create a new, empty system registry.
    #[inline]
    pub const fn new() -> Self {
        Self {
            systems: BTreeMap::new(),
        }
    }

    /// Register a system, replacing any system registered under the same id.
    #[inline]
    pub fn register(&mut self, id: Id, system: System) {
        self.systems.insert(id, system);
    }

    /// Retrieve a system by its identifier.
    #[inline]
    pub fn get(&self, id: &Id) -> Option<&System> {
        self.systems.get(id)
    }

    /// Get the number of registered systems.
    #[inline]
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Determine if no system is registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }
}

impl State {
    /// Register a system under an id.
    ///
    /// # Errors
    ///
    /// A component system must name a registered component; otherwise this fails with
    /// [`Error::MissingComponent`] so the wiring mistake surfaces at setup instead of mid-game.
    pub fn register_system(mut self, id: impl Into<Id>, system: System) -> Result<Self> {
        let id = id.into();
        if let System::Component(component) = &system {
            if !self.is_component_registered(component) {
                return Err(Error::MissingComponent(component.clone()));
            }
        }
        debug!("Registering system {:?} as {:?}", id, system);
        self.systems_mut().register(id, system);
        Ok(self.touch())
    }
}
