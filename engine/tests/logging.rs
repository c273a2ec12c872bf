//! The channel logger is global, so it gets a test binary of its own.

use log::LevelFilter;
use rusty_ecs::{
    core::{Config, Runner, logger},
    ecs::State,
};

#[test]
fn state_transitions_are_logged() {
    // Given
    let receiver = logger::init(LevelFilter::Debug).unwrap();

    // When
    let _state = State::new()
        .create_entity("e1", ["a"])
        .define_scene("main", ["s"])
        .set_current_scene("main");

    // Then
    let messages: Vec<_> = receiver.try_iter().map(|record| record.message).collect();
    assert!(messages.iter().any(|message| message.contains("Created entity :e1")));
    assert!(messages.iter().any(|message| message.contains("Switching to scene :main")));

    // Then - Only one global logger
    assert!(logger::init(LevelFilter::Info).is_err());

    // When - A runner applies its configured level
    let config = Config::default().with_max_ticks(0).with_log_level(LevelFilter::Warn);
    Runner::spawn(State::new(), config).join().unwrap();
    let _ = receiver.try_iter().count();
    let _state = State::new().create_entity("e2", ["a"]);

    // Then
    assert_eq!(log::max_level(), LevelFilter::Warn);
    assert!(receiver.try_iter().all(|record| !record.message.contains("Created entity :e2")));
}
