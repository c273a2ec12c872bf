//! Scenes and the per-tick fold.
//!
//! A scene is a named, ordered list of system ids representing one mode of the game (menu,
//! gameplay, ...). Exactly one scene is current. [`State::tick`] is the single entry point the
//! external loop calls once per frame:
//!
//! ```text
//! tick(state)
//!   ├── settle events (pending ─► readable)
//!   └── fold the current scene's systems left to right
//!         state ─► :input-system ─► :move-system ─► :render-bookkeeping ─► state'
//! ```
//!
//! System ids that resolve to nothing are skipped, so a scene can name systems that are not wired
//! up yet while the game is under construction.

use std::collections::BTreeMap;

use log::{debug, trace};

use crate::ecs::{Result, State, system};

crate::define_id!(
    /// A scene identifier.
    pub Id
);

/// The scene table: every defined scene and the current one.
#[derive(Debug, Clone, Default)]
pub struct Scenes {
    /// Ordered system ids per scene.
    scenes: BTreeMap<Id, Vec<system::Id>>,
    /// The active scene, if any.
    current: Option<Id>,
}

impl Scenes {
    /// Create a new, empty scene table.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or redefine) a scene.
    pub fn define(&mut self, id: Id, systems: Vec<system::Id>) {
        self.scenes.insert(id, systems);
    }

    /// Get the systems of a scene, in execution order.
    #[inline]
    pub fn get(&self, id: &Id) -> Option<&[system::Id]> {
        self.scenes.get(id).map(Vec::as_slice)
    }

    /// Get the current scene.
    #[inline]
    pub fn current(&self) -> Option<&Id> {
        self.current.as_ref()
    }

    /// Get the systems of the current scene. Empty when no scene is current or the current scene
    /// was never defined.
    pub fn current_systems(&self) -> &[system::Id] {
        self.current
            .as_ref()
            .and_then(|id| self.get(id))
            .unwrap_or_default()
    }

    fn set_current(&mut self, id: Id) {
        self.current = Some(id);
    }
}

impl State {
    /// Define a scene as an ordered list of system ids.
    pub fn define_scene<S>(
        mut self,
        id: impl Into<Id>,
        systems: impl IntoIterator<Item = S>,
    ) -> Self
    where
        S: Into<system::Id>,
    {
        let id = id.into();
        let systems: Vec<system::Id> = systems.into_iter().map(Into::into).collect();
        debug!("Defining scene {:?} as {:?}", id, systems);
        self.scenes_mut().define(id, systems);
        self.touch()
    }

    /// Make a scene current.
    pub fn set_current_scene(mut self, id: impl Into<Id>) -> Self {
        let id = id.into();
        debug!("Switching to scene {:?}", id);
        self.scenes_mut().set_current(id);
        self.touch()
    }

    /// Get the current scene.
    #[inline]
    pub fn current_scene(&self) -> Option<&Id> {
        self.scenes().current()
    }

    /// Get the systems of a scene.
    #[inline]
    pub fn scene(&self, id: &Id) -> Option<&[system::Id]> {
        self.scenes().get(id)
    }

    /// Advance the game by one tick.
    ///
    /// Settles the event bus, then folds the state through the current scene's systems left to
    /// right. Unknown system ids are skipped.
    ///
    /// # Errors
    ///
    /// Propagates the first system error (an unregistered component); no later system runs.
    pub fn tick(self) -> Result<Self> {
        let systems = self.scenes().current_systems().to_vec();
        let state = self.settle_events();
        trace!("Tick at version {} over {} systems", state.version(), systems.len());
        systems.iter().try_fold(state, |state, id| {
            match state.systems().get(id).cloned() {
                Some(system) => state.run(&system),
                None => {
                    debug!("Skipping unknown system {:?}", id);
                    Ok(state)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ecs::{
        Error, Value,
        component::{self, Registration},
        entity::Entity,
        event::Event,
        system::{Output, System},
    };

    fn writer(value: i64) -> System {
        System::raw(move |state| {
            state.update_component_state(
                &component::Id::from("record"),
                &Entity::from("e"),
                json!({ "f": value }),
            )
        })
    }

    fn setup() -> State {
        State::new()
            .create_entity("e", ["record"])
            .register_system("s1", writer(1))
            .and_then(|state| state.register_system("s2", writer(2)))
            .unwrap()
    }

    fn field(state: &State) -> Value {
        state
            .component_state(&component::Id::from("record"), &Entity::from("e"))
            .unwrap()["f"]
            .clone()
    }

    #[test]
    fn scene_folds_left_to_right() {
        // When
        let forward = setup()
            .define_scene("main", ["s1", "s2"])
            .set_current_scene("main")
            .tick()
            .unwrap();
        let reversed = setup()
            .define_scene("main", ["s2", "s1"])
            .set_current_scene("main")
            .tick()
            .unwrap();

        // Then
        assert_eq!(field(&forward), json!(2));
        assert_eq!(field(&reversed), json!(1));
    }

    #[test]
    fn unknown_systems_are_skipped() {
        // When
        let state = setup()
            .define_scene("main", ["missing", "s1", "also-missing"])
            .set_current_scene("main")
            .tick()
            .unwrap();

        // Then
        assert_eq!(field(&state), json!(1));
    }

    #[test]
    fn tick_without_scene_only_settles_events() {
        // Given
        let state = State::new().emit([Event::broadcast("x", json!(1))]);

        // When
        let state = state.tick().unwrap();

        // Then
        assert!(state.current_scene().is_none());
        assert_eq!(state.events().len(), 1);
        assert_eq!(state.events().pending_len(), 0);
    }

    #[test]
    fn switching_scenes_changes_systems() {
        // Given
        let state = setup()
            .define_scene("menu", ["s1"])
            .define_scene("game", ["s2"])
            .set_current_scene("menu");

        // When
        let state = state.tick().unwrap();

        // Then
        assert_eq!(field(&state), json!(1));

        // When
        let state = state.set_current_scene("game").tick().unwrap();

        // Then
        assert_eq!(state.current_scene(), Some(&Id::from("game")));
        assert_eq!(field(&state), json!(2));
        assert_eq!(state.scene(&Id::from("menu")).unwrap().len(), 1);
    }

    #[test]
    fn tick_propagates_missing_component() {
        // Given - A component system whose component registration was lost
        let state = State::new()
            .register_component(
                "c",
                Registration::new(|_, prior, _| Output::from(prior.clone())),
            )
            .register_system("s", System::component("c"))
            .unwrap();
        let mut broken = State::new()
            .create_entity("e", ["c"])
            .define_scene("main", ["s"])
            .set_current_scene("main");
        broken.systems_mut().register(
            system::Id::from("s"),
            state.systems().get(&system::Id::from("s")).unwrap().clone(),
        );

        // When
        let result = broken.tick();

        // Then
        assert_eq!(
            result.err(),
            Some(Error::MissingComponent(component::Id::from("c")))
        );
    }
}
