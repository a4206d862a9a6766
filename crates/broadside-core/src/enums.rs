//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::PLAY_SPEED_BASE;

/// Starting line-up selected before a battle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioId {
    /// One fighter against one fighter.
    #[default]
    Duel,
    /// A Terran frigate and escort against a Xenos strike group.
    FleetAction,
}

/// Hull class of a ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HullClass {
    #[default]
    Fighter,
    Frigate,
    Cruiser,
}

/// Side a ship fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Terran,
    Xenos,
}

/// Bridge alert state. Cosmetic inside the core.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    #[default]
    Green,
    Yellow,
    Red,
}

/// Simulation speed selected by the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameSpeed {
    Paused,
    Slow,
    #[default]
    Play,
    Fast,
}

impl GameSpeed {
    /// Factor applied to the real frame delta to get simulated seconds.
    pub fn multiplier(self) -> f64 {
        match self {
            GameSpeed::Paused => 0.0,
            GameSpeed::Slow => PLAY_SPEED_BASE / 4.0,
            GameSpeed::Play => PLAY_SPEED_BASE,
            GameSpeed::Fast => PLAY_SPEED_BASE * 2.0,
        }
    }
}

/// Helm maneuvers that must charge before executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManeuverKind {
    /// Kill all forward speed in a single tick.
    EmergencyStop,
    /// Eased 90° turn to port.
    TurnLeft90,
    /// Eased 90° turn to starboard.
    TurnRight90,
    /// Eased half turn.
    Turn180,
    /// Time-boxed boost of the turn rate with free steering.
    FreeTurn,
}

impl ManeuverKind {
    /// Yaw offset for the eased turns; `None` for maneuvers that do not turn.
    pub fn turn_offset(self) -> Option<f64> {
        use std::f64::consts::{FRAC_PI_2, PI};
        match self {
            ManeuverKind::TurnLeft90 => Some(-FRAC_PI_2),
            ManeuverKind::TurnRight90 => Some(FRAC_PI_2),
            ManeuverKind::Turn180 => Some(PI),
            ManeuverKind::EmergencyStop | ManeuverKind::FreeTurn => None,
        }
    }
}

/// Maneuver lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ManeuverStatus {
    /// Accumulating energy; ship systems are unpowered.
    Charging,
    /// Charge complete, effect in progress.
    Executing,
}

/// How a weapon is fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    /// Draws on allocated energy and must hold a minimum charge to fire.
    Energy,
    /// Ammunition-fed; never charges.
    Projectile,
}

/// Weapon fire mode selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireMode {
    #[default]
    Normal,
    Overload,
    Proximity,
}

/// Ship subsystem addressed by an energy allocation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationTarget {
    Engines,
    Shield,
    Weapon,
}

/// The six shield facings, clockwise from the bow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShieldFacing {
    Front,
    FrontRight,
    RearRight,
    Rear,
    RearLeft,
    FrontLeft,
}

impl ShieldFacing {
    pub const ALL: [ShieldFacing; 6] = [
        ShieldFacing::Front,
        ShieldFacing::FrontRight,
        ShieldFacing::RearRight,
        ShieldFacing::Rear,
        ShieldFacing::RearLeft,
        ShieldFacing::FrontLeft,
    ];

    /// Index of this facing in a ship's shield array.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Facing struck by an impact at `degrees` clockwise from the bow.
    ///
    /// Each facing owns the half-open range `(lower, upper]`; the bow
    /// segment wraps around as `(330, 30]`.
    pub fn from_bearing_degrees(degrees: f64) -> ShieldFacing {
        let d = degrees.rem_euclid(360.0);
        if d > 330.0 || d <= 30.0 {
            ShieldFacing::Front
        } else if d <= 90.0 {
            ShieldFacing::FrontRight
        } else if d <= 150.0 {
            ShieldFacing::RearRight
        } else if d <= 210.0 {
            ShieldFacing::Rear
        } else if d <= 270.0 {
            ShieldFacing::RearLeft
        } else {
            ShieldFacing::FrontLeft
        }
    }
}
