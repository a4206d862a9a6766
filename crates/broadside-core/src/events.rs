//! Events emitted by the simulation for audio and HUD feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{ManeuverKind, ShieldFacing};
use crate::state::EntityId;

/// Something notable that happened during a step or command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Maneuver finished charging and began executing.
    ManeuverExecuting { kind: ManeuverKind },
    /// Maneuver ran to completion (or timed out).
    ManeuverCompleted { kind: ManeuverKind },
    /// A weapon discharged.
    ProjectileFired {
        ship_id: EntityId,
        weapon_index: usize,
        projectile_id: EntityId,
    },
    /// Caught by a defensive tractor beam.
    ProjectileCaptured {
        projectile_id: EntityId,
        defender_id: EntityId,
    },
    /// Destroyed by point defense.
    ProjectileShotDown {
        projectile_id: EntityId,
        defender_id: EntityId,
    },
    /// A projectile struck a shield facing.
    ShieldImpact {
        ship_id: EntityId,
        facing: ShieldFacing,
        absorbed: f64,
    },
    /// Damage bled through to the hull.
    HullDamaged { ship_id: EntityId, amount: f64 },
    /// Hull reached zero.
    ShipDestroyed { ship_id: EntityId },
    DecoyLaunched {
        decoy_id: EntityId,
        owner_id: EntityId,
    },
    DecoyExpired { decoy_id: EntityId },
    /// Intercept target vanished; intercept mode dropped.
    InterceptLost { ship_id: EntityId },
    /// Not enough power to sustain erratic maneuvers.
    ErraticDisengaged { ship_id: EntityId },
}
