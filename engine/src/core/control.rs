//! Lifecycle control for the game loop.
//!
//! ```text
//! Uninitialized ──start──► Running ──pause──► Paused
//!                             ▲                  │
//!                             └──────resume──────┘
//!          (any) ──stop──► Stopped
//! ```
//!
//! Pausing only stops ticking. The state value does not know whether it is paused; the
//! [`Controller`] checks its lifecycle before calling [`State::tick`].

use log::info;

use crate::{
    core::{Error, Result},
    ecs::State,
};

/// Enumeration of possible lifecycle states of the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// The game has never been started.
    Uninitialized,
    /// Ticks advance the state.
    Running,
    /// Ticks are suspended.
    Paused,
    /// The game is over; no further transitions.
    Stopped,
}

/// Owns the current state and the lifecycle, and ticks when running.
///
/// This is the only writer of the state it holds. A failed tick leaves the previous state in
/// place and hands the error to the caller, who decides whether to stop.
#[derive(Debug)]
pub struct Controller {
    lifecycle: Lifecycle,
    state: State,
    ticks: u64,
}

impl Controller {
    /// Construct a controller around an initial state.
    pub fn new(state: State) -> Self {
        Self {
            lifecycle: Lifecycle::Uninitialized,
            state,
            ticks: 0,
        }
    }

    /// Get the current lifecycle state.
    #[inline]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Get the current game state.
    #[inline]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Get the number of ticks performed.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Replace the game state, e.g. after setup code reconfigured scenes. Returns the replaced state.
    pub fn replace(&mut self, state: State) -> State {
        std::mem::replace(&mut self.state, state)
    }

    /// Tear down the controller and hand back the state.
    pub fn into_state(self) -> State {
        self.state
    }

    /// Start ticking.
    pub fn start(&mut self) -> Result<()> {
        self.transition(Lifecycle::Uninitialized, Lifecycle::Running)?;
        info!("Starting game loop");
        Ok(())
    }

    /// Suspend ticking.
    pub fn pause(&mut self) -> Result<()> {
        self.transition(Lifecycle::Running, Lifecycle::Paused)?;
        info!("Pausing game loop after {} ticks", self.ticks);
        Ok(())
    }

    /// Resume ticking.
    pub fn resume(&mut self) -> Result<()> {
        self.transition(Lifecycle::Paused, Lifecycle::Running)?;
        info!("Resuming game loop");
        Ok(())
    }

    /// Stop for good. Stopping a stopped controller is a no-op.
    pub fn stop(&mut self) {
        if self.lifecycle == Lifecycle::Stopped {
            return;
        }
        self.lifecycle = Lifecycle::Stopped;
        info!("Game loop stopped after {} ticks", self.ticks);
    }

    /// Tick once if running. Returns whether a tick happened.
    ///
    /// # Errors
    ///
    /// Propagates the tick's error as [`Error::Ecs`]; the state from before the tick is kept.
    pub fn step(&mut self) -> Result<bool> {
        if self.lifecycle != Lifecycle::Running {
            return Ok(false);
        }
        self.state = self.state.clone().tick()?;
        self.ticks += 1;
        Ok(true)
    }

    fn transition(&mut self, from: Lifecycle, to: Lifecycle) -> Result<()> {
        if self.lifecycle != from {
            return Err(Error::InvalidTransition {
                from: self.lifecycle,
                to,
            });
        }
        self.lifecycle = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ecs::{
        self,
        component::{self, Registration},
        entity::Entity,
        system::{Output, System},
    };

    fn counting_state() -> State {
        State::new()
            .register_component(
                "counter",
                Registration::new(|_, prior, _| {
                    Output::from(json!(prior.as_i64().unwrap_or(0) + 1))
                }),
            )
            .register_system("count", System::component("counter"))
            .unwrap()
            .define_scene("main", ["count"])
            .set_current_scene("main")
            .create_entity("e", [("counter", json!(0))])
    }

    fn count(controller: &Controller) -> i64 {
        controller
            .state()
            .component_state(&component::Id::from("counter"), &Entity::from("e"))
            .and_then(|value| value.as_i64())
            .unwrap()
    }

    #[test]
    fn lifecycle_transitions() {
        // Given
        let mut controller = Controller::new(State::new());
        assert_eq!(controller.lifecycle(), Lifecycle::Uninitialized);

        // When / Then
        controller.start().unwrap();
        assert_eq!(controller.lifecycle(), Lifecycle::Running);
        controller.pause().unwrap();
        assert_eq!(controller.lifecycle(), Lifecycle::Paused);
        controller.resume().unwrap();
        assert_eq!(controller.lifecycle(), Lifecycle::Running);
        controller.stop();
        assert_eq!(controller.lifecycle(), Lifecycle::Stopped);
        controller.stop();
        assert_eq!(controller.lifecycle(), Lifecycle::Stopped);
    }

    #[test]
    fn invalid_transitions_are_rejected() {
        // Given
        let mut controller = Controller::new(State::new());

        // Then
        assert_eq!(
            controller.pause(),
            Err(Error::InvalidTransition {
                from: Lifecycle::Uninitialized,
                to: Lifecycle::Paused,
            })
        );
        controller.start().unwrap();
        assert!(controller.start().is_err());
        assert!(controller.resume().is_err());
        controller.stop();
        assert!(controller.start().is_err());
    }

    #[test]
    fn step_ticks_only_while_running() {
        // Given
        let mut controller = Controller::new(counting_state());

        // Then - Not started yet
        assert!(!controller.step().unwrap());
        assert_eq!(count(&controller), 0);

        // When
        controller.start().unwrap();
        assert!(controller.step().unwrap());
        assert!(controller.step().unwrap());

        // Then
        assert_eq!(count(&controller), 2);

        // When
        controller.pause().unwrap();

        // Then
        assert!(!controller.step().unwrap());
        assert_eq!(count(&controller), 2);
        assert_eq!(controller.ticks(), 2);
    }

    #[test]
    fn replace_swaps_state_between_ticks() {
        // Given
        let mut controller = Controller::new(counting_state());
        controller.start().unwrap();
        controller.step().unwrap();

        // When
        let previous = controller.replace(counting_state());

        // Then
        assert_eq!(
            previous
                .component_state(&component::Id::from("counter"), &Entity::from("e"))
                .and_then(|value| value.as_i64()),
            Some(1)
        );
        assert_eq!(count(&controller), 0);
        assert_eq!(controller.lifecycle(), Lifecycle::Running);

        // When - Ticking continues on the new state
        controller.step().unwrap();

        // Then
        assert_eq!(count(&controller), 1);
        assert_eq!(controller.ticks(), 2);
    }

    #[test]
    fn failed_tick_keeps_previous_state() {
        // Given - Scene runs a component system whose component registration is missing
        let good = counting_state();
        let mut broken = State::new()
            .create_entity("e", [("counter", json!(0))])
            .define_scene("main", ["count"])
            .set_current_scene("main");
        broken.systems_mut().register(
            "count".into(),
            good.systems().get(&"count".into()).unwrap().clone(),
        );
        let version = broken.version();
        let mut controller = Controller::new(broken);
        controller.start().unwrap();

        // When
        let result = controller.step();

        // Then
        assert_eq!(
            result,
            Err(Error::Ecs(ecs::Error::MissingComponent(component::Id::from(
                "counter"
            ))))
        );
        assert_eq!(controller.state().version(), version);
        assert_eq!(controller.ticks(), 0);
    }
}
