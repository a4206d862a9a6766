//! Per-tick systems composed by [`crate::step`].
//!
//! Systems are free functions over plain state. They do not own state; each
//! works on a fresh copy built from the previous snapshot.

pub mod ai;
pub mod cleanup;
pub mod decoys;
pub mod energy;
pub mod helm;
pub mod maneuver;
pub mod projectiles;
pub mod ships;
pub mod weapons;
