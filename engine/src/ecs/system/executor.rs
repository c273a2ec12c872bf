//! Running systems against a state.
//!
//! A component system run has two halves:
//!
//! 1. [`State::compute_next_component_state`] reads the state: for every entity owning the
//!    component (in entity order) it builds a [`Context`], calls the component function and
//!    collects the next value and any emitted events. Nothing is written.
//! 2. [`State::run_system`] commits: the new slice replaces the component's state and the
//!    collected events go to the pending buffer, in one state transformation.
//!
//! Every entity sees the state as it was before the run, never a partially updated one.

use log::trace;

use crate::ecs::{
    Result, State, component, empty_record,
    event::Event,
    storage::Slice,
    system::{Context, Id, System},
};

impl State {
    /// Compute the next state of a component for every entity owning it.
    ///
    /// Returns the full replacement slice and the events emitted while computing it.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::MissingComponent`](crate::ecs::Error::MissingComponent) when the
    /// component is not registered.
    pub fn compute_next_component_state(
        &self,
        id: &component::Id,
    ) -> Result<(Slice, Vec<Event>)> {
        let def = self.components().def(id)?;
        let function = def.function();
        let empty = empty_record();

        let mut next = Slice::new();
        let mut events = Vec::new();
        for entity in self.index().entities_with(id).into_iter().flatten() {
            let prior = self.component_state(id, entity).unwrap_or(&empty);
            let context = Context::build(self, id, entity, def);
            let (value, emitted) = function(entity, prior, &context).into_parts();
            trace!(
                "{:?} computed {:?} for {:?} ({} events)",
                id,
                value,
                entity,
                emitted.len()
            );
            next.insert(entity.clone(), value);
            events.extend(emitted);
        }
        Ok((next, events))
    }

    /// Run a component's system: compute the next slice and commit it with its events.
    pub fn run_component_system(mut self, id: &component::Id) -> Result<Self> {
        let (slice, events) = self.compute_next_component_state(id)?;
        self.storage_mut().replace_slice(id, slice);
        if events.is_empty() {
            return Ok(self.touch());
        }
        Ok(self.emit(events))
    }

    /// Run a system value.
    pub fn run(self, system: &System) -> Result<Self> {
        match system {
            System::Component(id) => self.run_component_system(id),
            System::Raw(function) => Ok(function(self).touch()),
        }
    }

    /// Run a registered system by id. Unknown ids leave the state unchanged.
    pub fn run_system(self, id: &Id) -> Result<Self> {
        match self.systems().get(id).cloned() {
            Some(system) => self.run(&system),
            None => {
                trace!("No system registered for {:?}", id);
                Ok(self)
            }
        }
    }
}
