//! Particle system benchmark scenario.
//!
//! - Components: moveable (selects velocity), velocity, lifetime
//! - Systems: movement, lifetime decay, a raw reaper removing expired particles and spawning
//!   replacements
//!
//! This scenario tests:
//! - Component system iteration with context construction
//! - Event delivery across ticks (lifetime emits, reaper consumes)
//! - Entity removal and creation throughput

use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rusty_ecs::ecs::{
    State,
    component::Spec,
    entity::Entity,
    system::System,
};

use crate::{components, scenarios::Scenario};

/// Configuration for the particle benchmark.
pub struct ParticleConfig {
    /// Total number of particles to maintain.
    pub particle_count: usize,
    /// Random seed for reproducibility.
    pub seed: u64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            particle_count: 1_000,
            seed: 12345,
        }
    }
}

/// Particle scenario.
pub struct ParticleScenario {
    config: ParticleConfig,
    state: State,
}

impl ParticleScenario {
    /// Create the scenario with default settings.
    pub fn new() -> Self {
        Self::with_config(ParticleConfig::default())
    }

    /// Create the scenario with custom settings.
    pub fn with_config(config: ParticleConfig) -> Self {
        Self {
            config,
            state: State::new(),
        }
    }

    /// Get the current state.
    pub fn state(&self) -> &State {
        &self.state
    }
}

impl Default for ParticleScenario {
    fn default() -> Self {
        Self::new()
    }
}

fn particle(rng: &mut ChaCha8Rng) -> Vec<Spec> {
    vec![
        Spec::with_state("moveable", components::position(rng)),
        Spec::with_state("velocity", components::velocity(rng)),
        Spec::with_state("lifetime", components::lifetime_state(rng)),
    ]
}

/// Removes every entity named by a reaper event and spawns a replacement.
fn reaper(rng: Arc<Mutex<ChaCha8Rng>>) -> System {
    System::raw(move |state| {
        let expired: Vec<Entity> = state
            .events()
            .iter()
            .filter(|event| event.selector.component().as_str() == "reaper")
            .filter_map(|event| event.payload.as_str().map(Entity::from))
            .collect();
        let Ok(mut rng) = rng.lock() else {
            return state;
        };
        expired.iter().fold(state, |state, entity| {
            state
                .remove_entity(entity)
                .create_entity(Entity::generate(), particle(&mut rng))
        })
    })
}

impl Scenario for ParticleScenario {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn entity_count(&self) -> usize {
        self.state.entity_count()
    }

    fn setup(&mut self) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        let mut state = State::new()
            .register_component("moveable", components::moveable())
            .register_component("lifetime", components::lifetime());
        for _ in 0..self.config.particle_count {
            state = state.create_entity(Entity::generate(), particle(&mut rng));
        }
        let rng = Arc::new(Mutex::new(rng));
        self.state = state
            .register_system("movement", System::component("moveable"))
            .and_then(|state| state.register_system("lifetime", System::component("lifetime")))
            .and_then(|state| state.register_system("reaper", reaper(rng)))
            .expect("particle components are registered")
            .define_scene("particles", ["movement", "lifetime", "reaper"])
            .set_current_scene("particles");
    }

    fn update(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.state = state.tick().expect("particle tick");
    }
}
