//! Rusty ECS: an entity-component-system runtime over an immutable, versioned game state.
//!
//! - [`ecs`]: the core. Entities, components with their behavior functions, events, systems,
//!   scenes and the [`State`](ecs::State) value that ties them together.
//! - [`core`]: the driver side. Lifecycle control, a fixed cadence runner thread, configuration
//!   and log capture.

pub mod core;
pub mod ecs;
