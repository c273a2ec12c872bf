//! Realistic game scenario benchmarks.
//!
//! # Scenarios
//!
//! - **Particles**: many short lived entities, spawn/despawn every tick

pub mod particles;

pub use particles::{ParticleConfig, ParticleScenario};

/// Common trait for benchmark scenarios.
pub trait Scenario {
    /// Human-readable name of the scenario.
    fn name(&self) -> &'static str;

    /// Number of entities in this scenario.
    fn entity_count(&self) -> usize;

    /// Set up the scenario (spawn entities, initialize state).
    fn setup(&mut self);

    /// Run one tick of the scenario.
    fn update(&mut self);
}
