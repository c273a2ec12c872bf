//! A player entity walks right, driven by input events, while a raw system despawns anything that
//! wanders past the edge of the screen. Runs 120 ticks on a runner thread and prints the log.

use rusty_ecs::{
    core::{self, Config, Runner, logger},
    ecs::{
        self, Event, State,
        component::{self, Registration},
        entity::Entity,
        system::{Output, System},
    },
};
use serde_json::json;

const SCREEN_WIDTH: i64 = 200;

/// Moves by the `offset_x` of every input event and echoes the new position to the renderer.
fn moveable() -> Registration {
    Registration::new(|entity, prior, ctx| {
        let offset: i64 = ctx
            .payloads()
            .filter_map(|payload| payload["offset_x"].as_i64())
            .sum();
        let pos_x = prior["pos_x"].as_i64().unwrap_or(0) + offset;
        Output::WithEvents(
            json!({ "pos_x": pos_x }),
            vec![Event::to("sprite", entity.clone(), json!({ "draw_x": pos_x }))],
        )
    })
    .subscribe("input")
}

/// Keeps the last position it was told to draw at.
fn sprite() -> Registration {
    Registration::new(|_, prior, ctx| match ctx.payloads().last() {
        Some(payload) => Output::from(payload.clone()),
        None => Output::from(prior.clone()),
    })
    .cleanup(|state, entity| {
        log::info!("Releasing sprite of {}", entity);
        state
    })
}

/// Feeds a constant walk-right input to every moveable entity.
fn input_system(state: State) -> State {
    let events: Vec<_> = state
        .entities_with_component(&component::Id::from("moveable"))
        .into_iter()
        .map(|entity| Event::to("input", entity, json!({ "offset_x": 3 })))
        .collect();
    state.emit(events)
}

/// Removes entities that left the screen.
fn despawn_system(state: State) -> State {
    let moveable = component::Id::from("moveable");
    let gone: Vec<Entity> = state
        .component_states(&moveable)
        .into_iter()
        .flatten()
        .filter(|(_, value)| value["pos_x"].as_i64().unwrap_or(0) > SCREEN_WIDTH)
        .map(|(entity, _)| entity.clone())
        .collect();
    gone.iter().fold(state, |state, entity| state.remove_entity(entity))
}

fn setup() -> ecs::Result<State> {
    Ok(State::new()
        .register_component("moveable", moveable())
        .register_component("sprite", sprite())
        .register_system("input-system", System::raw(input_system))?
        .register_system("move-system", System::component("moveable"))?
        .register_system("sprite-system", System::component("sprite"))?
        .register_system("despawn-system", System::raw(despawn_system))?
        .define_scene(
            "gameplay",
            ["input-system", "move-system", "sprite-system", "despawn-system"],
        )
        .set_current_scene("gameplay")
        .create_entity("player", [("moveable", json!({ "pos_x": 0 })), ("sprite", json!({}))])
        .create_entity("rock", [("sprite", json!({ "draw_x": 50 }))]))
}

fn main() -> core::Result<()> {
    let config = Config::from_hz(240).with_max_ticks(120);
    let logs = logger::init(config.log_level).ok();

    let state = Runner::spawn(setup()?, config).join()?;

    println!("Finished at version {}: {:?}", state.version(), state);
    for entity in state.entities() {
        println!(
            "  {} owns {:?}",
            entity,
            state.components_of(entity).into_iter().flatten().collect::<Vec<_>>()
        );
    }
    if let Some(logs) = logs {
        for record in logs.try_iter() {
            println!("{:>5} {}", record.level, record.message);
        }
    }
    Ok(())
}
