//! Component management for the ECS.
//!
//! A component is a named aspect of an entity (position, health, input, ...). Unlike a classic
//! data-only ECS, every component carries its own behavior: a [`Function`] that computes the next
//! state of the component for one entity, given its prior state and a
//! [`Context`](crate::ecs::system::Context).
//!
//! ## Architecture
//!
//! - [`Id`]: Opaque identifier for a component.
//! - [`Def`]: The registered definition of a component: its function plus optional event
//!   subscriptions, selected peer components, and a cleanup hook for entity removal.
//! - [`Registration`]: What a caller hands to
//!   [`State::register_component`](crate::ecs::State::register_component). Registering the same
//!   id twice merges field by field (last write wins) instead of replacing the definition.
//! - [`Registry`]: The id to definition map held by the state.
//! - [`Spec`]: How a component is attached to an entity at creation, optionally with initial state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rusty_ecs::ecs::{component::Registration, system::Output, State};
//!
//! let state = State::new().register_component(
//!     "moveable",
//!     Registration::new(|_entity, prior, _ctx| Output::from(prior.clone()))
//!         .subscribe("move-change"),
//! );
//! ```

mod def;
mod registry;
mod spec;

pub use def::{CleanupFn, Def, Function, Options, Registration};
pub use registry::Registry;
pub use spec::Spec;

crate::define_id!(
    /// A component identifier. Component ids carry no structure; two components are the same
    /// component exactly when their ids are equal.
    pub Id
);
