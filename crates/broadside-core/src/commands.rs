//! Player commands sent from the UI/input layer to the simulation.
//!
//! Commands are validated against the current world and applied at the
//! next frame boundary. Helm and defense commands address the player ship.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::state::EntityId;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Helm ---
    /// Turn toward an absolute yaw (radians). Derived from a click bearing upstream.
    SetTargetRotation { angle: f64 },
    /// Throttle setting in units/s.
    SetDesiredSpeed { speed: f64 },
    /// Begin charging a maneuver.
    InitiateManeuver { kind: ManeuverKind },
    /// Abort the active maneuver, whatever its state.
    CancelManeuver,
    ToggleErratic,
    ToggleIntercept,

    // --- Targeting ---
    /// Lock onto a ship.
    SetTargetShip { ship_id: EntityId },
    /// Drop the current lock.
    ClearTarget,

    // --- Ship systems ---
    SetAlertLevel { level: AlertLevel },
    /// `index` selects the shield facing or weapon; ignored for engines.
    SetEnergyAllocation {
        component: AllocationTarget,
        index: usize,
        value: u32,
    },
    TogglePointDefense,
    SetDefensiveTractors { count: u32 },
    LaunchDecoy,
    /// Discharge one weapon of any ship at its current target.
    FireWeapon {
        ship_id: EntityId,
        weapon_index: usize,
    },

    // --- Simulation control ---
    SetGameSpeed { speed: GameSpeed },
}
