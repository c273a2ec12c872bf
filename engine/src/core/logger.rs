//! Log capture over a channel.
//!
//! [`ChannelLogger`] implements [`log::Log`] and forwards every enabled record into a `crossbeam`
//! channel. A driver (or a test) drains the receiving end at its own pace, e.g. once per rendered
//! frame, instead of having the tick thread write to a terminal.

use crossbeam::channel::{Receiver, Sender, unbounded};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// A captured log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    /// Severity of the record.
    pub level: log::Level,
    /// Module path the record came from.
    pub target: String,
    /// Formatted message.
    pub message: String,
}

/// A logger forwarding records at or above a level into a channel.
pub struct ChannelLogger {
    sender: Sender<LogMessage>,
    level: LevelFilter,
}

impl log::Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = self.sender.try_send(LogMessage {
                level: record.level(),
                target: record.target().to_owned(),
                message: format!("{}", record.args()),
            });
        }
    }

    fn flush(&self) {}
}

impl ChannelLogger {
    /// Construct a logger writing into an existing channel.
    pub fn new(sender: Sender<LogMessage>, level: LevelFilter) -> Self {
        Self { sender, level }
    }

    /// Construct a logger together with the receiving end of its channel.
    pub fn with_receiver(level: LevelFilter) -> (Self, Receiver<LogMessage>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender, level), receiver)
    }
}

/// Install a [`ChannelLogger`] as the global logger and return the receiving end.
///
/// # Errors
///
/// Fails when a global logger was already installed.
pub fn init(level: LevelFilter) -> Result<Receiver<LogMessage>, SetLoggerError> {
    let (logger, receiver) = ChannelLogger::with_receiver(level);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(receiver)
}

#[cfg(test)]
mod tests {
    use log::{Level, Log};

    use super::*;

    fn record(level: Level, message: &str) -> LogMessage {
        LogMessage {
            level,
            target: "rusty_ecs::test".into(),
            message: message.into(),
        }
    }

    #[test]
    fn forwards_enabled_records() {
        // Given
        let (logger, receiver) = ChannelLogger::with_receiver(LevelFilter::Info);

        // When
        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("rusty_ecs::test")
                .args(format_args!("tick {}", 1))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("rusty_ecs::test")
                .args(format_args!("hidden"))
                .build(),
        );

        // Then
        assert_eq!(receiver.try_recv(), Ok(record(Level::Info, "tick 1")));
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_does_not_panic() {
        // Given
        let (logger, receiver) = ChannelLogger::with_receiver(LevelFilter::Trace);
        drop(receiver);

        // When / Then
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .args(format_args!("nobody listens"))
                .build(),
        );
    }
}
