//! Simulation engine: the owner of the world between frames.
//!
//! `SimulationEngine` holds the current `WorldState`, the simulated clock,
//! the game speed and the seeded RNG. It drains queued player commands at
//! each frame boundary, runs [`step`] on the scaled frame delta and produces
//! `Snapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use broadside_core::commands::PlayerCommand;
use broadside_core::enums::{GameSpeed, ScenarioId};
use broadside_core::events::SimEvent;
use broadside_core::state::{SimClock, Snapshot, WorldState};

use crate::commands;
use crate::scenario;
use crate::step::step;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial game speed.
    pub game_speed: GameSpeed,
    /// Starting fleet.
    pub scenario: ScenarioId,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game_speed: GameSpeed::default(),
            scenario: ScenarioId::default(),
        }
    }
}

/// The simulation engine. Owns the world and all sim state.
pub struct SimulationEngine {
    world: WorldState,
    clock: SimClock,
    speed: GameSpeed,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine on the configured scenario.
    pub fn new(config: SimConfig) -> Self {
        Self::with_world(config, scenario::build_world(config.scenario))
    }

    /// Create an engine on a prepared world (scenario ignored).
    pub fn with_world(config: SimConfig, world: WorldState) -> Self {
        Self {
            world,
            clock: SimClock::default(),
            speed: config.game_speed,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next frame boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one rendered frame of `frame_delta` wall seconds.
    ///
    /// The delta is scaled by the game speed in effect after this frame's
    /// commands. Commands are processed even while paused; the step itself
    /// is skipped at zero scaled delta.
    pub fn advance(&mut self, frame_delta: f64) -> Snapshot {
        self.process_commands();
        let dt = if frame_delta.is_finite() && frame_delta > 0.0 {
            frame_delta * self.speed.multiplier()
        } else {
            0.0
        };
        self.run_frame(dt)
    }

    /// Advance by `dt` simulated seconds, bypassing the game-speed scale.
    pub fn advance_simulated(&mut self, dt: f64) -> Snapshot {
        self.process_commands();
        self.run_frame(dt)
    }

    fn run_frame(&mut self, dt: f64) -> Snapshot {
        if dt.is_finite() && dt > 0.0 {
            let now = self.clock.elapsed_secs + dt;
            let outcome = step(&self.world, dt, now, &mut self.rng);
            self.world = outcome.world;
            self.events.extend(outcome.events);
            self.clock.tick += 1;
            self.clock.elapsed_secs = now;
        }

        Snapshot {
            clock: self.clock,
            speed: self.speed,
            world: self.world.clone(),
            events: std::mem::take(&mut self.events),
        }
    }

    /// Get a read-only reference to the world.
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Get the current simulation clock.
    pub fn clock(&self) -> SimClock {
        self.clock
    }

    /// Get the current game speed.
    pub fn game_speed(&self) -> GameSpeed {
        self.speed
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Rejections leave the world untouched.
    fn handle_command(&mut self, command: PlayerCommand) {
        if let PlayerCommand::SetGameSpeed { speed } = command {
            self.speed = speed;
            return;
        }

        match commands::apply(&self.world, &command, self.clock.elapsed_secs) {
            Ok((world, events)) => {
                self.world = world;
                self.events.extend(events);
            }
            Err(reason) => {
                debug!(?command, %reason, "command rejected");
            }
        }
    }
}
