//! Core types and definitions for the BROADSIDE combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! ship records, commands, world state, events, errors, and constants.
//! It has no dependency on any runtime or rendering framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
