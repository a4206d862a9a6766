//! BROADSIDE headless runner.
//!
//! This crate wires the simulation into a real-time loop: environment
//! configuration, logging, a game loop thread, and a command channel.

pub mod config;
pub mod game_loop;
pub mod state;
pub mod telemetry;

pub use broadside_core as core;
