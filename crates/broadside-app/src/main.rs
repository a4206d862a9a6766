//! Runs a scenario in real time.
//!
//! Player commands are read from stdin, one JSON object per line
//! (`{"type":"SetDesiredSpeed","speed":4.0}`). The final snapshot is printed
//! to stdout as JSON when the loop stops.

use std::io::BufRead;
use std::process::ExitCode;

use tracing::{error, warn};

use broadside_app::config::RunnerConfig;
use broadside_app::core::commands::PlayerCommand;
use broadside_app::state::RunnerState;
use broadside_app::telemetry::init_tracing;

fn main() -> ExitCode {
    let config = match RunnerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("broadside: {err}");
            return ExitCode::from(2);
        }
    };
    init_tracing(config.log_json);

    let state = std::sync::Arc::new(RunnerState::new());
    if let Err(err) = state.start(&config) {
        error!(%err, "could not start simulation");
        return ExitCode::FAILURE;
    }

    let input = state.clone();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line == "quit" {
                let _ = input.shutdown();
                break;
            }
            match serde_json::from_str::<PlayerCommand>(line) {
                Ok(command) => {
                    if input.send_command(command).is_err() {
                        break;
                    }
                }
                Err(err) => warn!(%err, "ignoring malformed command"),
            }
        }
    });

    if let Err(err) = state.join() {
        error!(%err, "game loop failed");
        return ExitCode::FAILURE;
    }

    match state.latest_snapshot() {
        Ok(Some(snapshot)) => match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                error!(%err, "could not serialize final snapshot");
                return ExitCode::FAILURE;
            }
        },
        Ok(None) => warn!("no frames were run"),
        Err(err) => {
            error!(%err, "could not read final snapshot");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
