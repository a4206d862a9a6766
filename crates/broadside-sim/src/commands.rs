//! Player command validation and application.
//!
//! `apply` never mutates its input: an accepted command yields a new world,
//! a refused one yields the reason and leaves the caller's world untouched.

use broadside_ai::gunnery::{self, FiringContext};
use broadside_core::commands::PlayerCommand;
use broadside_core::constants::MANEUVER_CHARGE_NEEDED;
use broadside_core::enums::{AllocationTarget, WeaponKind};
use broadside_core::error::{CommandRejection, FireBlocked};
use broadside_core::events::SimEvent;
use broadside_core::state::{ActiveManeuver, EntityId, Ship, WorldState};
use broadside_core::types::{wrap_angle, Vec3};

use crate::systems::{decoys, weapons};

/// Outcome of an accepted command.
pub type Applied = (WorldState, Vec<SimEvent>);

/// Validate `command` against `world` at clock time `now` and apply it.
///
/// `SetGameSpeed` is engine-level and passes through with the world unchanged.
pub fn apply(
    world: &WorldState,
    command: &PlayerCommand,
    now: f64,
) -> Result<Applied, CommandRejection> {
    let mut next = world.clone();
    let mut events = Vec::new();

    match *command {
        PlayerCommand::SetTargetRotation { angle } => {
            if !angle.is_finite() {
                return Err(CommandRejection::InvalidValue("angle must be finite"));
            }
            if next
                .active_maneuver
                .as_ref()
                .is_some_and(ActiveManeuver::is_smooth_turn)
            {
                return Err(CommandRejection::ManeuverActive);
            }
            let player = live_player(&mut next)?;
            if player.is_intercepting {
                return Err(CommandRejection::HelmBusy);
            }
            player.target_rotation = Some(wrap_angle(angle));
        }
        PlayerCommand::SetDesiredSpeed { speed } => {
            if !speed.is_finite() {
                return Err(CommandRejection::InvalidValue("speed must be finite"));
            }
            let player = live_player(&mut next)?;
            player.desired_speed = speed.clamp(0.0, player.max_speed);
        }
        PlayerCommand::InitiateManeuver { kind } => {
            if next.active_maneuver.is_some() {
                return Err(CommandRejection::ManeuverActive);
            }
            let player = live_player(&mut next)?;
            if player.is_erratic || player.is_intercepting {
                return Err(CommandRejection::HelmBusy);
            }
            next.active_maneuver = Some(ActiveManeuver::new(kind, MANEUVER_CHARGE_NEEDED));
        }
        PlayerCommand::CancelManeuver => {
            next.active_maneuver = None;
        }
        PlayerCommand::ToggleErratic => {
            let maneuver_active = next.active_maneuver.is_some();
            let player = live_player(&mut next)?;
            if player.is_erratic {
                player.is_erratic = false;
            } else {
                if maneuver_active {
                    return Err(CommandRejection::ManeuverActive);
                }
                player.is_erratic = true;
                player.is_intercepting = false;
            }
        }
        PlayerCommand::ToggleIntercept => {
            if next.active_maneuver.is_some() {
                return Err(CommandRejection::ManeuverActive);
            }
            let has_target = next.target().is_some();
            let player = live_player(&mut next)?;
            if player.is_intercepting {
                player.is_intercepting = false;
            } else {
                if !has_target {
                    return Err(CommandRejection::NoTarget);
                }
                player.is_intercepting = true;
                player.is_erratic = false;
            }
            player.target_rotation = None;
        }
        PlayerCommand::SetTargetShip { ship_id } => {
            let ship = next
                .ship(ship_id)
                .ok_or(CommandRejection::UnknownShip(ship_id))?;
            if ship.destroyed {
                return Err(CommandRejection::ShipDestroyed(ship_id));
            }
            if ship_id == next.player_ship_id {
                return Err(CommandRejection::InvalidValue("cannot target own ship"));
            }
            next.target_ship_id = Some(ship_id);
        }
        PlayerCommand::ClearTarget => {
            next.target_ship_id = None;
            if let Some(player) = next.player_mut() {
                player.is_intercepting = false;
            }
        }
        PlayerCommand::SetAlertLevel { level } => {
            live_player(&mut next)?.alert_level = level;
        }
        PlayerCommand::SetEnergyAllocation {
            component,
            index,
            value,
        } => {
            let player = live_player(&mut next)?;
            match component {
                AllocationTarget::Engines => player.engines.allocation = value,
                AllocationTarget::Shield => {
                    let len = player.shields.len();
                    let shield = player
                        .shields
                        .get_mut(index)
                        .ok_or(CommandRejection::IndexOutOfRange { index, len })?;
                    shield.allocation = value;
                }
                AllocationTarget::Weapon => {
                    let len = player.weapons.len();
                    let weapon = player
                        .weapons
                        .get_mut(index)
                        .ok_or(CommandRejection::IndexOutOfRange { index, len })?;
                    if weapon.kind != WeaponKind::Energy {
                        return Err(CommandRejection::InvalidValue(
                            "projectile weapons take no energy",
                        ));
                    }
                    weapon.allocation = value;
                }
            }
        }
        PlayerCommand::TogglePointDefense => {
            let player = live_player(&mut next)?;
            player.point_defense_active = !player.point_defense_active;
        }
        PlayerCommand::SetDefensiveTractors { count } => {
            let player = live_player(&mut next)?;
            player.tractor_beams.defensive_allocation = count.min(player.tractor_beams.total);
        }
        PlayerCommand::LaunchDecoy => {
            let id = next.next_entity_id;
            let player = live_player(&mut next)?;
            if player.decoys.available == 0 {
                return Err(CommandRejection::NoDecoys);
            }
            player.decoys.available -= 1;
            let decoy = decoys::spawn_decoy(player, id, now);
            events.push(SimEvent::DecoyLaunched {
                decoy_id: decoy.id,
                owner_id: decoy.owner_id,
            });
            next.decoys.push(decoy);
            next.allocate_id();
        }
        PlayerCommand::FireWeapon {
            ship_id,
            weapon_index,
        } => {
            fire_weapon(&mut next, ship_id, weapon_index, now, &mut events)?;
        }
        PlayerCommand::SetGameSpeed { .. } => {}
    }

    Ok((next, events))
}

/// The player ship, provided it exists and still fights.
fn live_player(world: &mut WorldState) -> Result<&mut Ship, CommandRejection> {
    let id = world.player_ship_id;
    let player = world.player_mut().ok_or(CommandRejection::NoPlayerShip)?;
    if player.destroyed {
        return Err(CommandRejection::ShipDestroyed(id));
    }
    Ok(player)
}

/// Where `ship_id` would shoot: the lock-on for the player, the player for everyone else.
fn aim_point(world: &WorldState, ship_id: EntityId) -> Result<Vec3, FireBlocked> {
    let target = if ship_id == world.player_ship_id {
        world.target()
    } else {
        world.player().filter(|p| !p.destroyed)
    };
    target.map(|t| t.position).ok_or(FireBlocked::NoTarget)
}

fn fire_weapon(
    world: &mut WorldState,
    ship_id: EntityId,
    weapon_index: usize,
    now: f64,
    events: &mut Vec<SimEvent>,
) -> Result<(), CommandRejection> {
    let target_position = aim_point(world, ship_id);
    let id = world.next_entity_id;

    let ship = world
        .ship_mut(ship_id)
        .ok_or(CommandRejection::UnknownShip(ship_id))?;
    if ship.destroyed {
        return Err(CommandRejection::ShipDestroyed(ship_id));
    }
    let len = ship.weapons.len();
    let weapon = ship
        .weapons
        .get(weapon_index)
        .ok_or(CommandRejection::IndexOutOfRange {
            index: weapon_index,
            len,
        })?;

    gunnery::check(&FiringContext {
        weapon,
        shooter_position: ship.position,
        shooter_yaw: ship.rotation.yaw,
        target_position: target_position?,
        now,
    })?;

    let projectile = weapons::discharge(ship, weapon_index, now, id).ok_or(
        CommandRejection::IndexOutOfRange {
            index: weapon_index,
            len,
        },
    )?;
    events.push(SimEvent::ProjectileFired {
        ship_id,
        weapon_index,
        projectile_id: projectile.id,
    });
    world.projectiles.push(projectile);
    world.allocate_id();
    Ok(())
}
