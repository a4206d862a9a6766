//! Simulation engine for BROADSIDE.
//!
//! `step` is the pure per-tick state transition. `SimulationEngine` wraps it
//! with a clock, game speed, seeded RNG and a command queue, and produces
//! `Snapshot`s for rendering and UI consumers.

pub mod commands;
pub mod engine;
pub mod scenario;
pub mod step;
pub mod systems;
pub mod world_setup;

pub use broadside_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use step::{step, StepOutcome};

#[cfg(test)]
mod tests;
