//! Driver side of the runtime.
//!
//! The ECS core never schedules itself. Something outside it owns the current state, decides when
//! to tick and when to stop. This module provides that something:
//!
//! - [`control::Controller`]: owns the state and the game lifecycle, ticks on demand.
//! - [`runner::Runner`]: runs a controller on its own thread at a fixed cadence.
//! - [`config::Config`]: cadence, tick limit and log level.
//! - [`Error`]: driver misuse, plus failed ticks carrying the core's [`ecs::Error`](crate::ecs::Error).
//! - [`logger`]: a `log` implementation forwarding records over a channel.

pub mod config;
pub mod control;
mod error;
pub mod logger;
pub mod runner;

pub use config::Config;
pub use control::{Controller, Lifecycle};
pub use error::{Error, Result};
pub use runner::Runner;
