//! Energy distribution: power budget, shield regeneration/decay, weapon charging.
//!
//! Available power is split evenly per allocation point across engines,
//! shields and weapons. Engine points are consumed by the helm as an
//! acceleration bonus rather than stored.

use broadside_core::constants::*;
use broadside_core::enums::WeaponKind;
use broadside_core::events::SimEvent;
use broadside_core::state::Ship;

/// Power left for ship systems this tick, after maneuver charging and
/// erratic drain. Disengages erratic maneuvers when they cannot be afforded.
pub fn available_power(
    ship: &mut Ship,
    charging_maneuver: bool,
    events: &mut Vec<SimEvent>,
) -> f64 {
    if charging_maneuver {
        if ship.is_erratic {
            ship.is_erratic = false;
            events.push(SimEvent::ErraticDisengaged { ship_id: ship.id });
        }
        return 0.0;
    }

    let output = ship.power.output;
    if ship.is_erratic {
        if output >= ERRATIC_POWER_DRAIN {
            return output - ERRATIC_POWER_DRAIN;
        }
        ship.is_erratic = false;
        events.push(SimEvent::ErraticDisengaged { ship_id: ship.id });
    }
    output
}

/// Energy per second delivered to each allocation point.
pub fn rate_per_point(available: f64, total_points: u32) -> f64 {
    if total_points == 0 {
        0.0
    } else {
        available / f64::from(total_points)
    }
}

/// Run energy distribution for one ship.
pub fn run(ship: &mut Ship, charging_maneuver: bool, dt: f64, events: &mut Vec<SimEvent>) {
    let available = available_power(ship, charging_maneuver, events);
    let rate = rate_per_point(available, ship.total_allocation());

    for shield in ship.shields.iter_mut() {
        let mut current = shield.current - SHIELD_DECAY_RATE * dt;
        if rate > 0.0 && shield.allocation > 0 {
            let regen = f64::from(shield.allocation) * rate * dt * SHIELD_RECHARGE_EFFICIENCY;
            current = (current + regen).min(shield.max * SHIELD_OVERCHARGE_FACTOR);
        }
        shield.current = current.max(0.0);
    }

    for weapon in ship.weapons.iter_mut() {
        if weapon.kind != WeaponKind::Energy || weapon.allocation == 0 || rate <= 0.0 {
            continue;
        }
        if weapon.current_charge < weapon.max_charge {
            let gain = f64::from(weapon.allocation) * rate * dt;
            weapon.current_charge = (weapon.current_charge + gain).min(weapon.max_charge);
        }
    }
}
