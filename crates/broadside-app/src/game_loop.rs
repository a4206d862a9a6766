//! Game loop thread: advances the simulation at a fixed frame rate.
//!
//! The engine is created inside this thread because it's cleaner for ownership.
//! Commands arrive via `mpsc` channel. Snapshots are stored in shared state
//! for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Instant;

use tracing::{debug, info};

use broadside_core::events::SimEvent;
use broadside_core::state::Snapshot;
use broadside_sim::SimulationEngine;

use crate::config::RunnerConfig;
use crate::state::GameLoopCommand;

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: RunnerConfig,
    latest_snapshot: Arc<Mutex<Option<Snapshot>>>,
) -> std::io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("broadside-game-loop".into())
        .spawn(move || {
            run_game_loop(&config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Queue everything waiting on the channel. Returns false when the loop must stop.
fn drain_commands(engine: &mut SimulationEngine, cmd_rx: &mpsc::Receiver<GameLoopCommand>) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
            Ok(GameLoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

/// The game loop. Runs until Shutdown, channel disconnect, or the configured duration.
fn run_game_loop(
    config: &RunnerConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<Snapshot>>,
) {
    let mut engine = SimulationEngine::new(config.sim_config());
    let frame_interval = config.frame_interval();
    let frame_delta = frame_interval.as_secs_f64();
    let started = Instant::now();
    let mut next_frame_time = started;
    let mut frames: u64 = 0;

    loop {
        // 1. Drain all pending commands
        if !drain_commands(&mut engine, &cmd_rx) {
            break;
        }

        // 2. Advance one frame (engine applies game speed and pause)
        let snapshot = engine.advance(frame_delta);
        frames += 1;
        log_events(&snapshot.events);

        if frames % u64::from(config.frame_rate) == 0 {
            log_status(&snapshot);
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if config.duration.is_some_and(|d| started.elapsed() >= d) {
            break;
        }

        // 4. Sleep until the next frame
        next_frame_time += frame_interval;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame_interval * 2 {
            // Too far behind; reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }

    info!(frames, elapsed = ?started.elapsed(), "game loop stopped");
}

fn log_events(events: &[SimEvent]) {
    for event in events {
        match event {
            SimEvent::ShipDestroyed { .. } | SimEvent::ManeuverExecuting { .. } => {
                info!(?event, "sim event");
            }
            _ => debug!(?event, "sim event"),
        }
    }
}

fn log_status(snapshot: &Snapshot) {
    let world = &snapshot.world;
    let alive = world.ships.iter().filter(|s| !s.destroyed).count();
    let player_hull = world.player().map(|p| p.hull.current);
    info!(
        tick = snapshot.clock.tick,
        sim_secs = snapshot.clock.elapsed_secs,
        speed = ?snapshot.speed,
        ships = alive,
        projectiles = world.projectiles.len(),
        ?player_hull,
        "status"
    );
}
