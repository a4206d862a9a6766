//! Reasons a player command is refused.
//!
//! A rejected command never changes the world; callers typically log and drop it.

use thiserror::Error;

use crate::state::EntityId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandRejection {
    #[error("no player ship in the world")]
    NoPlayerShip,
    #[error("a maneuver is already active")]
    ManeuverActive,
    #[error("helm is busy with another order")]
    HelmBusy,
    #[error("no target selected")]
    NoTarget,
    #[error("unknown ship {0}")]
    UnknownShip(EntityId),
    #[error("ship {0} is destroyed")]
    ShipDestroyed(EntityId),
    #[error("index {index} out of range ({len} installed)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
    #[error("no decoys left")]
    NoDecoys,
    #[error("cannot fire: {0}")]
    FireBlocked(#[from] FireBlocked),
}

/// Why a weapon cannot fire right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FireBlocked {
    #[error("weapon is cycling")]
    Cooldown,
    #[error("target out of range")]
    OutOfRange,
    #[error("target outside firing arc")]
    NotFacing,
    #[error("insufficient charge")]
    Uncharged,
    #[error("nothing to shoot at")]
    NoTarget,
}
