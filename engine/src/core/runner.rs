//! Fixed cadence game loop on a dedicated thread.
//!
//! The [`Runner`] moves a [`Controller`] onto its own thread and ticks it every
//! [`Config::tick_interval`]. Commands travel over a `crossbeam` channel and are handled between
//! ticks, so a tick is never interrupted and never overlaps another one. The runner applies
//! [`Config::log_level`] as the global `log` max level when it starts.
//!
//! ```rust,ignore
//! let runner = Runner::spawn(state, Config::from_hz(60));
//! runner.pause()?;
//! runner.resume()?;
//! let state = runner.stop()?;
//! ```

use std::thread::{self, JoinHandle};

use crossbeam::{
    channel::{Receiver, Sender, bounded, unbounded},
    select,
};
use log::{error, warn};

use crate::{
    core::{Config, Controller, Error, Result},
    ecs::State,
};

/// Commands understood by the runner thread.
#[derive(Debug, Clone)]
pub enum Command {
    /// Suspend ticking.
    Pause,
    /// Resume ticking.
    Resume,
    /// Send a copy of the current state back, e.g. for the renderer to draw from.
    Snapshot(Sender<State>),
    /// Stop the loop and hand back the state.
    Stop,
}

/// Handle to a game loop running on its own thread.
pub struct Runner {
    handle: Option<JoinHandle<Result<State>>>,
    /// A channel sender that allows outside threads to send commands to the loop.
    sender: Sender<Command>,
}

impl Runner {
    /// Spawn the loop. It starts running immediately.
    pub fn spawn(state: State, config: Config) -> Self {
        let (sender, receiver) = unbounded::<Command>();
        let handle = thread::spawn(move || run(Controller::new(state), config, receiver));
        Self {
            handle: Some(handle),
            sender,
        }
    }

    /// Send a command to the loop.
    pub fn send(&self, command: Command) -> Result<()> {
        self.sender
            .send(command)
            .map_err(|_| Error::RunnerDisconnected)
    }

    /// Suspend ticking.
    pub fn pause(&self) -> Result<()> {
        self.send(Command::Pause)
    }

    /// Resume ticking.
    pub fn resume(&self) -> Result<()> {
        self.send(Command::Resume)
    }

    /// Get a copy of the current state. Commands are handled in order, so the snapshot reflects
    /// every command sent before it.
    pub fn snapshot(&self) -> Result<State> {
        let (reply, receiver) = bounded(1);
        self.send(Command::Snapshot(reply))?;
        receiver.recv().map_err(|_| Error::RunnerDisconnected)
    }

    /// Determine if the loop has exited (stopped, hit its tick limit, or failed).
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .is_none_or(|handle| handle.is_finished())
    }

    /// Stop the loop and wait for it, returning the final state.
    ///
    /// # Errors
    ///
    /// Returns the tick error if the loop had already failed.
    pub fn stop(self) -> Result<State> {
        // The loop may already have exited on its own.
        let _ = self.sender.send(Command::Stop);
        self.join()
    }

    /// Wait for the loop to exit on its own (see [`Config::max_ticks`]).
    pub fn join(mut self) -> Result<State> {
        let handle = self.handle.take().ok_or(Error::RunnerDisconnected)?;
        match handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// The loop body run on the runner thread.
fn run(mut controller: Controller, config: Config, commands: Receiver<Command>) -> Result<State> {
    log::set_max_level(config.log_level);
    controller.start()?;
    let ticker = crossbeam::channel::tick(config.tick_interval);
    loop {
        select! {
            recv(commands) -> command => match command {
                Ok(Command::Pause) => {
                    if let Err(error) = controller.pause() {
                        warn!("Ignoring pause: {}", error);
                    }
                }
                Ok(Command::Resume) => {
                    if let Err(error) = controller.resume() {
                        warn!("Ignoring resume: {}", error);
                    }
                }
                Ok(Command::Snapshot(reply)) => {
                    let _ = reply.send(controller.state().clone());
                }
                // A dropped handle stops the loop as well.
                Ok(Command::Stop) | Err(_) => {
                    controller.stop();
                    return Ok(controller.into_state());
                }
            },
            recv(ticker) -> _ => {
                if config.max_ticks.is_some_and(|max| controller.ticks() >= max) {
                    controller.stop();
                    return Ok(controller.into_state());
                }
                if let Err(tick_error) = controller.step() {
                    error!("Tick failed, stopping: {}", tick_error);
                    controller.stop();
                    return Err(tick_error);
                }
            }
        }
    }
}
