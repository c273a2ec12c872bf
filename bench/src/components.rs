//! Component registrations shared by the benchmarks.
//!
//! State values are JSON records shaped like what a small browser game keeps per entity.

use rand::Rng;
use rusty_ecs::ecs::{
    Event, Value,
    component::Registration,
    system::Output,
};
use serde_json::json;

/// Integrates velocity into position.
pub fn moveable() -> Registration {
    Registration::new(|_, prior, ctx| {
        let velocity = ctx.selected("velocity").cloned().unwrap_or_default();
        let x = prior["x"].as_f64().unwrap_or(0.0) + velocity["x"].as_f64().unwrap_or(0.0);
        let y = prior["y"].as_f64().unwrap_or(0.0) + velocity["y"].as_f64().unwrap_or(0.0);
        Output::from(json!({ "x": x, "y": y }))
    })
    .select("velocity")
}

/// Counts down and asks for removal on the tick it expires.
pub fn lifetime() -> Registration {
    Registration::new(|entity, prior, _| {
        let remaining = prior["remaining"].as_i64().unwrap_or(0) - 1;
        let next = json!({ "remaining": remaining });
        if remaining != 0 {
            return Output::from(next);
        }
        Output::WithEvents(next, vec![Event::broadcast("reaper", json!(entity.as_str()))])
    })
}

/// A random position record.
pub fn position(rng: &mut impl Rng) -> Value {
    json!({ "x": rng.gen_range(-100.0..100.0), "y": rng.gen_range(-100.0..100.0) })
}

/// A random velocity record.
pub fn velocity(rng: &mut impl Rng) -> Value {
    json!({ "x": rng.gen_range(-1.0..1.0), "y": rng.gen_range(-1.0..1.0) })
}

/// A random lifetime record.
pub fn lifetime_state(rng: &mut impl Rng) -> Value {
    json!({ "remaining": rng.gen_range(1..300) })
}
