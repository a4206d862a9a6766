//! Combat AI for BROADSIDE.
//!
//! Pure decision functions for computer-controlled ships: which point to
//! pursue, where to steer, and whether a weapon has a firing solution.
//! No world ownership. Operates on plain data handed in by the simulation.

pub mod gunnery;
pub mod pursuit;

pub use broadside_core as core;
