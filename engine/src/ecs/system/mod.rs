//! System execution for ECS logic.
//!
//! # Overview
//!
//! A system is the unit of per-tick execution. Systems are registered under a [`Id`] and come in
//! two kinds (see [`System`]):
//!
//! - **Component**: the generated per-component iterator. Running it calls the component's function
//!   once per owning entity and commits the resulting slice plus any emitted events.
//! - **Raw**: a plain `State -> State` function, for work that does not map onto the entities of a
//!   single component (global bookkeeping, spawning, despawning).
//!
//! ```rust,ignore
//! use rusty_ecs::ecs::{State, system::{Output, System}, component::Registration};
//!
//! let state = State::new()
//!     .register_component("moveable", Registration::new(|_, prior, _| Output::from(prior.clone())))
//!     .register_system("move-system", System::component("moveable"))?
//!     .register_system("cleanup-system", System::raw(|state| state))?;
//! ```
//!
//! # Component Function Output
//!
//! Component functions return an [`Output`]: either just the next state, or the next state plus
//! events to emit. The executor treats both shapes alike; a function returning
//! `Output::WithEvents(s, vec![])` produces exactly the state `Output::Value(s)` would.

mod context;
mod executor;
mod registry;

use std::{fmt, sync::Arc};

pub use context::Context;
pub use registry::Registry;

use crate::ecs::{State, component, event::Event};

crate::define_id!(
    /// A system identifier.
    pub Id
);

/// A raw system function.
pub type RawFn = Arc<dyn Fn(State) -> State + Send + Sync>;

/// A registered system.
#[derive(Clone)]
pub enum System {
    /// Runs the function of a component for every entity owning it.
    Component(component::Id),
    /// Transforms the whole state.
    Raw(RawFn),
}

impl System {
    /// Construct a system iterating the entities of a component.
    #[inline]
    pub fn component(id: impl Into<component::Id>) -> Self {
        Self::Component(id.into())
    }

    /// Construct a raw system from a state transformation.
    #[inline]
    pub fn raw<F>(function: F) -> Self
    where
        F: Fn(State) -> State + Send + Sync + 'static,
    {
        Self::Raw(Arc::new(function))
    }
}

impl fmt::Debug for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component(id) => f.debug_tuple("Component").field(id).finish(),
            Self::Raw(_) => f.write_str("Raw(..)"),
        }
    }
}

/// What a component function returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Output<S> {
    /// The next component state.
    Value(S),
    /// The next component state and events to emit.
    WithEvents(S, Vec<Event>),
}

impl<S> Output<S> {
    /// Split the output into the next state and the (possibly empty) emitted events.
    #[inline]
    pub fn into_parts(self) -> (S, Vec<Event>) {
        match self {
            Self::Value(state) => (state, Vec::new()),
            Self::WithEvents(state, events) => (state, events),
        }
    }

    /// Get the next state.
    #[inline]
    pub fn state(&self) -> &S {
        match self {
            Self::Value(state) | Self::WithEvents(state, _) => state,
        }
    }
}

impl<S> From<S> for Output<S> {
    #[inline]
    fn from(state: S) -> Self {
        Self::Value(state)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn output_shapes_split_alike() {
        // Given
        let bare = Output::from(json!({ "f": 1 }));
        let paired = Output::WithEvents(json!({ "f": 1 }), Vec::new());

        // Then
        assert_eq!(bare.state(), paired.state());
        assert_eq!(bare.into_parts(), paired.into_parts());
    }

    #[test]
    fn system_debug_hides_raw_function() {
        assert_eq!(format!("{:?}", System::raw(|state| state)), "Raw(..)");
        assert_eq!(
            format!("{:?}", System::component("moveable")),
            "Component(:moveable)"
        );
    }
}
