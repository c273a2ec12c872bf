//! The ECS core: a versioned state value and the pure operations over it.
//!
//! # Architecture
//!
//! ```text
//! State
//!   ├── index       entity ─► {component}, component ─► {entity}
//!   ├── components  component ─► Def { function, subscriptions, select, cleanup }
//!   ├── storage     component ─► entity ─► state value
//!   ├── systems     system ─► Component(component) | Raw(fn)
//!   ├── scenes      scene ─► [system], current scene
//!   └── events      pending buffer, settled buffer
//! ```
//!
//! Every operation takes a [`State`] and returns the next one. Nothing is shared mutably, so there
//! is no locking anywhere in the core; the driver owning the state is the only writer.
//!
//! # Example
//!
//! ```rust
//! use rusty_ecs::ecs::{Event, State, component::Registration, entity::Entity, system::{Output, System}};
//! use serde_json::json;
//!
//! let state = State::new()
//!     .register_component(
//!         "moveable",
//!         Registration::new(|_, prior, ctx| {
//!             let offset: i64 = ctx.payloads().filter_map(|p| p["offset_x"].as_i64()).sum();
//!             let pos_x = prior["pos_x"].as_i64().unwrap_or(0);
//!             Output::from(json!({ "pos_x": pos_x + offset }))
//!         }),
//!     )
//!     .register_system("move-system", System::component("moveable"))?
//!     .define_scene("main", ["move-system"])
//!     .set_current_scene("main")
//!     .create_entity("e1", [("moveable", json!({ "pos_x": 0 }))])
//!     .emit([Event::to("moveable", "e1", json!({ "offset_x": 5 }))])
//!     .tick()?;
//!
//! let e1 = Entity::from("e1");
//! assert_eq!(state.component_state(&"moveable".into(), &e1), Some(&json!({ "pos_x": 5 })));
//! # Ok::<(), rusty_ecs::ecs::Error>(())
//! ```

pub mod component;
pub mod entity;
mod error;
pub mod event;
pub mod scene;
pub mod state;
pub(crate) mod storage;
pub mod system;
pub(crate) mod util;

pub use entity::Entity;
pub use error::{Error, Result};
pub use event::{Event, Selector};
pub use state::State;
pub use storage::Slice;
pub use system::{Context, Output, System};

/// A component state or event payload.
pub type Value = serde_json::Value;

/// The empty record, the default state of a component attached without one.
#[inline]
pub fn empty_record() -> Value {
    Value::Object(serde_json::Map::new())
}
