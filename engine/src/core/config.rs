use std::time::Duration;

use log::LevelFilter;

/// The default fixed time step, in nanoseconds (60 ticks per second).
pub const DEFAULT_TICK_NANOS: u64 = 16_666_000;

/// Settings for driving the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Time between two ticks.
    pub tick_interval: Duration,
    /// Stop on its own after this many ticks. `None` runs until stopped.
    pub max_ticks: Option<u64>,
    /// Most verbose level let through the `log` facade while the runner drives the loop.
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_nanos(DEFAULT_TICK_NANOS),
            max_ticks: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Construct a config ticking `hz` times per second. A rate of zero is treated as one.
    pub fn from_hz(hz: u32) -> Self {
        Self::default().with_tick_interval(Duration::from_secs(1) / hz.max(1))
    }

    /// Set the time between two ticks.
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Stop after a number of ticks.
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, log_level: LevelFilter) -> Self {
        self.log_level = log_level;
        self
    }
}
