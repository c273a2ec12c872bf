//! Error types for the ECS core.
//!
//! Only configuration errors are errors. Lookup misses (an unknown system in a scene, a component
//! state that was never written) are soft and fall back to empty defaults, and removing something
//! that does not exist is a no-op. Driver misuse is reported by [`crate::core::Error`].

use thiserror::Error;

use crate::ecs::component;

/// Errors raised by the ECS core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A system was wired to a component that was never registered.
    #[error("component not registered: {0}")]
    MissingComponent(component::Id),
}

/// Result alias used throughout the ECS core.
pub type Result<T> = std::result::Result<T, Error>;
