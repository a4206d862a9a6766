//! Projectile resolution: tractor capture, point defense, impacts, flight.
//!
//! Each projectile is offered to every eligible defender in ship-list order.
//! The first defender that captures, shoots down or is hit by the round
//! consumes it. Rounds nobody resolves fly on and expire at their range.

use rand::Rng;
use tracing::debug;

use broadside_core::constants::*;
use broadside_core::enums::ShieldFacing;
use broadside_core::events::SimEvent;
use broadside_core::state::{Projectile, Ship};
use broadside_core::types::{wrap_positive, Vec3};

/// How a defender dealt with a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    Captured,
    ShotDown,
    Impact,
}

/// Resolve and advance every projectile against the already-updated `ships`.
pub fn run<R: Rng + ?Sized>(
    ships: &mut [Ship],
    projectiles: impl IntoIterator<Item = Projectile>,
    dt: f64,
    rng: &mut R,
    events: &mut Vec<SimEvent>,
) -> Vec<Projectile> {
    // Tractor captures made by each ship this tick, indexed like `ships`.
    let mut captured = vec![0u32; ships.len()];
    let mut survivors = Vec::new();

    'projectiles: for mut projectile in projectiles {
        let Some(owner_faction) = ships
            .iter()
            .find(|s| s.id == projectile.owner_id)
            .map(|s| s.faction)
        else {
            // Owner no longer listed: the round still flies but hits nobody.
            if advance(&mut projectile, dt) {
                survivors.push(projectile);
            }
            continue;
        };

        for (index, defender) in ships.iter_mut().enumerate() {
            if defender.destroyed
                || defender.id == projectile.owner_id
                || defender.faction == owner_faction
            {
                continue;
            }

            let distance = projectile.position.distance(defender.position);
            let resolution = if distance < TRACTOR_CAPTURE_RANGE
                && captured[index] < defender.tractor_beams.defensive_allocation
            {
                captured[index] += 1;
                Some(Resolution::Captured)
            } else if defender.point_defense_active
                && distance < POINT_DEFENSE_RANGE
                && rng.gen_bool(POINT_DEFENSE_KILL_CHANCE)
            {
                Some(Resolution::ShotDown)
            } else if distance < SHIELD_RADIUS {
                apply_impact(defender, &projectile, events);
                Some(Resolution::Impact)
            } else {
                None
            };

            let Some(resolution) = resolution else {
                continue;
            };
            match resolution {
                Resolution::Captured => events.push(SimEvent::ProjectileCaptured {
                    projectile_id: projectile.id,
                    defender_id: defender.id,
                }),
                Resolution::ShotDown => events.push(SimEvent::ProjectileShotDown {
                    projectile_id: projectile.id,
                    defender_id: defender.id,
                }),
                Resolution::Impact => {}
            }
            debug!(
                projectile = projectile.id,
                defender = defender.id,
                ?resolution,
                "projectile resolved"
            );
            continue 'projectiles;
        }

        if advance(&mut projectile, dt) {
            survivors.push(projectile);
        }
    }

    survivors
}

/// Move a projectile along its velocity. Returns false once it has spent its range.
fn advance(projectile: &mut Projectile, dt: f64) -> bool {
    projectile.position += projectile.velocity * dt;
    projectile.traveled += projectile.velocity.length() * dt;
    projectile.traveled < projectile.range
}

/// Shield facing struck by a round arriving from `from`, relative to the ship's bow.
pub fn impact_facing(ship: &Ship, from: Vec3) -> ShieldFacing {
    let offset = from - ship.position;
    let relative = wrap_positive(offset.x.atan2(offset.z) - ship.rotation.yaw);
    ShieldFacing::from_bearing_degrees(relative.to_degrees())
}

/// Apply a projectile hit: the facing shield absorbs what it can, the hull takes the rest.
pub fn apply_impact(ship: &mut Ship, projectile: &Projectile, events: &mut Vec<SimEvent>) {
    let facing = impact_facing(ship, projectile.position);
    let damage = projectile.damage.max(0.0);
    let shield = &mut ship.shields[facing.index()];

    if shield.current > damage {
        shield.current -= damage;
        events.push(SimEvent::ShieldImpact {
            ship_id: ship.id,
            facing,
            absorbed: damage,
        });
        return;
    }

    let absorbed = shield.current;
    let overflow = damage - absorbed;
    shield.current = 0.0;
    if absorbed > 0.0 {
        events.push(SimEvent::ShieldImpact {
            ship_id: ship.id,
            facing,
            absorbed,
        });
    }

    if overflow > 0.0 {
        ship.hull.current = (ship.hull.current - overflow).max(0.0);
        events.push(SimEvent::HullDamaged {
            ship_id: ship.id,
            amount: overflow,
        });
    }
}
