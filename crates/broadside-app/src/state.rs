//! Runner state shared between the input side and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use thiserror::Error;
use tracing::info;

use broadside_core::commands::PlayerCommand;
use broadside_core::state::Snapshot;

use crate::config::RunnerConfig;
use crate::game_loop;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("simulation already running")]
    AlreadyRunning,
    #[error("simulation not started")]
    NotStarted,
    #[error("game loop has stopped")]
    Disconnected,
    #[error("runner state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Handle on a (possibly running) game loop.
///
/// - `command_tx` is `None` until [`RunnerState::start`]
/// - `latest_snapshot` is written by the game loop after every frame
#[derive(Default)]
pub struct RunnerState {
    command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    latest_snapshot: Arc<Mutex<Option<Snapshot>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RunnerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread.
    pub fn start(&self, config: &RunnerConfig) -> Result<(), RunnerError> {
        let mut tx_lock = self.command_tx.lock().map_err(|_| RunnerError::Poisoned)?;
        if tx_lock.is_some() {
            return Err(RunnerError::AlreadyRunning);
        }

        let (tx, handle) = game_loop::spawn_game_loop(config.clone(), self.latest_snapshot.clone())?;
        *tx_lock = Some(tx);
        *self.handle.lock().map_err(|_| RunnerError::Poisoned)? = Some(handle);
        info!(seed = config.seed, scenario = ?config.scenario, "simulation started");
        Ok(())
    }

    /// Forward a player command to the game loop.
    pub fn send_command(&self, command: PlayerCommand) -> Result<(), RunnerError> {
        self.send(GameLoopCommand::PlayerCommand(command))
    }

    /// Ask the game loop to stop. It finishes its current frame first.
    pub fn shutdown(&self) -> Result<(), RunnerError> {
        match self.send(GameLoopCommand::Shutdown) {
            Err(RunnerError::Disconnected) => Ok(()),
            other => other,
        }
    }

    /// Block until the game loop thread exits.
    pub fn join(&self) -> Result<(), RunnerError> {
        let handle = self.handle.lock().map_err(|_| RunnerError::Poisoned)?.take();
        if let Some(handle) = handle {
            handle.join().map_err(|_| RunnerError::Disconnected)?;
        }
        Ok(())
    }

    /// Most recent snapshot, if a frame has run.
    pub fn latest_snapshot(&self) -> Result<Option<Snapshot>, RunnerError> {
        let lock = self.latest_snapshot.lock().map_err(|_| RunnerError::Poisoned)?;
        Ok(lock.clone())
    }

    fn send(&self, command: GameLoopCommand) -> Result<(), RunnerError> {
        let tx_lock = self.command_tx.lock().map_err(|_| RunnerError::Poisoned)?;
        match tx_lock.as_ref() {
            Some(tx) => tx.send(command).map_err(|_| RunnerError::Disconnected),
            None => Err(RunnerError::NotStarted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use broadside_core::enums::GameSpeed;

    #[test]
    fn test_runner_state_creation() {
        let state = RunnerState::new();
        assert!(state.latest_snapshot().unwrap().is_none());
        assert!(matches!(
            state.send_command(PlayerCommand::LaunchDecoy),
            Err(RunnerError::NotStarted)
        ));
    }

    #[test]
    fn test_start_run_and_shutdown() {
        let state = RunnerState::new();
        let config = RunnerConfig {
            frame_rate: 200,
            game_speed: GameSpeed::Fast,
            duration: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        state.start(&config).unwrap();
        assert!(matches!(state.start(&config), Err(RunnerError::AlreadyRunning)));

        state
            .send_command(PlayerCommand::SetDesiredSpeed { speed: 2.0 })
            .unwrap();
        std::thread::sleep(Duration::from_millis(100));
        state.shutdown().unwrap();
        state.join().unwrap();

        let snapshot = state.latest_snapshot().unwrap().unwrap();
        assert!(snapshot.clock.tick > 0);
        assert_eq!(snapshot.world.player().unwrap().desired_speed, 2.0);
    }
}
