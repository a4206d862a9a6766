//! Ship subsystem records.
//!
//! Components are plain data structs with no behavior.
//! Game logic lives in the simulation systems, not here.

use serde::{Deserialize, Serialize};

use crate::enums::{FireMode, WeaponKind};

/// Structural integrity. Never regenerates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hull {
    pub current: f64,
    pub max: f64,
}

/// Reactor feeding every powered subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerPlant {
    /// Energy produced per second.
    pub output: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Engines {
    /// Allocation points; each adds 10% acceleration.
    pub allocation: u32,
}

/// One 60° shield facing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShieldSegment {
    /// Present strength. May exceed `max` up to the overcharge ceiling.
    pub current: f64,
    /// Nominal strength.
    pub max: f64,
    pub allocation: u32,
}

/// A mounted weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub kind: WeaponKind,
    /// Fire group (1-4) on the weapons console.
    pub group: u8,
    pub mode: FireMode,
    pub damage: f64,
    pub range: f64,
    /// Shots per second.
    pub fire_rate: f64,
    /// Clock time of the last shot, `None` if never fired.
    pub last_fired: Option<f64>,
    pub allocation: u32,
    pub current_charge: f64,
    pub min_charge_to_fire: f64,
    pub optimal_charge: f64,
    pub max_charge: f64,
}

/// Tractor beam emitters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TractorBeams {
    /// Installed emitters.
    pub total: u32,
    /// Emitters assigned to catching incoming projectiles.
    pub defensive_allocation: u32,
}

/// Decoy launcher magazine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DecoyBay {
    pub available: u32,
    pub max: u32,
}
