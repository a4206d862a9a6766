//! World state: the complete simulation aggregate advanced each tick and
//! published to rendering/UI consumers.

use serde::{Deserialize, Serialize};

use crate::components::*;
use crate::constants::{ERRATIC_SPEED_FACTOR, SHIELD_SEGMENT_COUNT};
use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{Rotation, Vec3};

/// Identifier shared by ships, projectiles and decoys.
pub type EntityId = u32;

/// One combatant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub id: EntityId,
    pub name: String,
    pub class: HullClass,
    pub faction: Faction,

    pub position: Vec3,
    pub rotation: Rotation,
    /// Manual heading order (player) awaiting completion.
    pub target_rotation: Option<f64>,
    /// Steering goal for AI ships.
    pub destination: Option<Vec3>,

    pub max_speed: f64,
    pub current_speed: f64,
    pub desired_speed: f64,
    pub acceleration: f64,
    /// Radians per second.
    pub turn_rate: f64,

    pub hull: Hull,
    pub power: PowerPlant,
    pub engines: Engines,
    /// Clockwise from the bow, see [`ShieldFacing`].
    pub shields: [ShieldSegment; SHIELD_SEGMENT_COUNT],
    pub weapons: Vec<Weapon>,

    pub alert_level: AlertLevel,
    pub is_erratic: bool,
    pub is_intercepting: bool,
    pub point_defense_active: bool,
    pub tractor_beams: TractorBeams,
    pub decoys: DecoyBay,

    /// Render-only yaw wobble from erratic maneuvers. Not the logical heading.
    pub visual_yaw_offset: f64,
    /// Hull reached zero. Destroyed ships stay listed but no longer act.
    pub destroyed: bool,
}

impl Ship {
    /// Top speed after the erratic-maneuver penalty.
    pub fn effective_max_speed(&self) -> f64 {
        if self.is_erratic {
            self.max_speed * ERRATIC_SPEED_FACTOR
        } else {
            self.max_speed
        }
    }

    /// Sum of every allocation point on the ship.
    pub fn total_allocation(&self) -> u32 {
        self.engines.allocation
            + self.shields.iter().map(|s| s.allocation).sum::<u32>()
            + self.weapons.iter().map(|w| w.allocation).sum::<u32>()
    }

    /// Fraction of top speed currently in use (0 when the ship cannot move).
    pub fn speed_ratio(&self) -> f64 {
        if self.max_speed > 0.0 {
            self.current_speed / self.max_speed
        } else {
            0.0
        }
    }

    pub fn shield(&self, facing: ShieldFacing) -> &ShieldSegment {
        &self.shields[facing.index()]
    }
}

/// A round in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub damage: f64,
    pub range: f64,
    /// Distance covered so far; monotonically increasing.
    pub traveled: f64,
    pub owner_id: EntityId,
}

/// A stationary decoy drawing AI pursuit away from its owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoy {
    pub id: EntityId,
    pub position: Vec3,
    /// Seconds remaining.
    pub life: f64,
    pub launched_at: f64,
    pub owner_id: EntityId,
}

/// The single helm maneuver the player ship may have in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveManeuver {
    pub kind: ManeuverKind,
    pub charge: f64,
    pub charge_needed: f64,
    pub status: ManeuverStatus,
    /// Clock time execution began.
    pub start_time: Option<f64>,
    pub start_rotation: Option<f64>,
    pub target_rotation: Option<f64>,
    /// Length of an eased turn, seconds.
    pub duration: Option<f64>,
}

impl ActiveManeuver {
    pub fn new(kind: ManeuverKind, charge_needed: f64) -> Self {
        Self {
            kind,
            charge: 0.0,
            charge_needed,
            status: ManeuverStatus::Charging,
            start_time: None,
            start_rotation: None,
            target_rotation: None,
            duration: None,
        }
    }

    pub fn is_charging(&self) -> bool {
        self.status == ManeuverStatus::Charging
    }

    pub fn is_executing(&self) -> bool {
        self.status == ManeuverStatus::Executing
    }

    /// An eased turn is executing and owns the helm.
    pub fn is_smooth_turn(&self) -> bool {
        self.is_executing() && self.duration.is_some()
    }

    pub fn is_free_turn(&self) -> bool {
        self.is_executing() && self.kind == ManeuverKind::FreeTurn
    }
}

/// The whole simulation aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub ships: Vec<Ship>,
    pub projectiles: Vec<Projectile>,
    pub decoys: Vec<Decoy>,
    pub player_ship_id: EntityId,
    pub target_ship_id: Option<EntityId>,
    pub active_maneuver: Option<ActiveManeuver>,
    /// Next id handed to a spawned projectile or decoy.
    pub next_entity_id: EntityId,
}

impl WorldState {
    pub fn ship(&self, id: EntityId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id == id)
    }

    pub fn ship_mut(&mut self, id: EntityId) -> Option<&mut Ship> {
        self.ships.iter_mut().find(|s| s.id == id)
    }

    pub fn player(&self) -> Option<&Ship> {
        self.ship(self.player_ship_id)
    }

    pub fn player_mut(&mut self) -> Option<&mut Ship> {
        let id = self.player_ship_id;
        self.ship_mut(id)
    }

    /// Locked target, if it still exists and is not destroyed.
    pub fn target(&self) -> Option<&Ship> {
        self.target_ship_id
            .and_then(|id| self.ship(id))
            .filter(|s| !s.destroyed)
    }

    /// Reserve a fresh entity id.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = self.next_entity_id;
        self.next_entity_id = self.next_entity_id.wrapping_add(1);
        id
    }
}

/// Simulation clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    /// Number of steps executed (paused frames excluded).
    pub tick: u64,
    /// Simulated seconds elapsed.
    pub elapsed_secs: f64,
}

/// State published after every frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub clock: SimClock,
    pub speed: GameSpeed,
    pub world: WorldState,
    pub events: Vec<SimEvent>,
}
