//! Firing solutions.
//!
//! Shared by AI fire and the player's fire command so both obey the same
//! cooldown, charge, range and arc limits.

use broadside_core::components::Weapon;
use broadside_core::constants::{FIRING_ARC_DOT, PROJECTILE_SPEED};
use broadside_core::enums::WeaponKind;
use broadside_core::error::FireBlocked;
use broadside_core::types::{forward, Vec3};

/// Inputs to a single firing check.
pub struct FiringContext<'a> {
    pub weapon: &'a Weapon,
    pub shooter_position: Vec3,
    pub shooter_yaw: f64,
    pub target_position: Vec3,
    pub now: f64,
}

/// Seconds between shots, or `None` for a weapon that can never cycle.
pub fn cycle_time(weapon: &Weapon) -> Option<f64> {
    (weapon.fire_rate > 0.0).then(|| 1.0 / weapon.fire_rate)
}

/// Whether the weapon has finished cycling since its last shot.
pub fn is_cycled(weapon: &Weapon, now: f64) -> bool {
    match (weapon.last_fired, cycle_time(weapon)) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(last), Some(cycle)) => now - last >= cycle,
    }
}

/// Energy weapons need their minimum charge; projectile weapons are always fed.
pub fn is_charged(weapon: &Weapon) -> bool {
    match weapon.kind {
        WeaponKind::Energy => weapon.current_charge >= weapon.min_charge_to_fire,
        WeaponKind::Projectile => true,
    }
}

/// Check every firing condition, reporting the first that fails.
pub fn check(ctx: &FiringContext<'_>) -> Result<(), FireBlocked> {
    if !is_cycled(ctx.weapon, ctx.now) {
        return Err(FireBlocked::Cooldown);
    }
    if !is_charged(ctx.weapon) {
        return Err(FireBlocked::Uncharged);
    }

    let to_target = ctx.target_position - ctx.shooter_position;
    if to_target.length() > ctx.weapon.range {
        return Err(FireBlocked::OutOfRange);
    }

    let facing = forward(ctx.shooter_yaw).dot(to_target.normalize_or_zero());
    if facing <= FIRING_ARC_DOT {
        return Err(FireBlocked::NotFacing);
    }

    Ok(())
}

/// Velocity of a projectile leaving a ship with the given yaw.
pub fn muzzle_velocity(yaw: f64) -> Vec3 {
    forward(yaw) * PROJECTILE_SPEED
}
