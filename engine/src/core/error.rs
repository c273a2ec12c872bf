//! Errors raised while driving the game loop.

use thiserror::Error;

use crate::{core::control::Lifecycle, ecs};

/// Errors raised by the controller and the runner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A tick failed inside the ECS core.
    #[error(transparent)]
    Ecs(#[from] ecs::Error),

    /// The driver was asked to move between two lifecycle states that are not connected.
    #[error("invalid lifecycle transition from {from:?} to {to:?}")]
    InvalidTransition {
        /// The lifecycle state the driver was in.
        from: Lifecycle,
        /// The lifecycle state that was requested.
        to: Lifecycle,
    },

    /// The runner thread is gone and can no longer receive commands.
    #[error("runner thread disconnected")]
    RunnerDisconnected,
}

/// Result alias used by the driver.
pub type Result<T> = std::result::Result<T, Error>;
