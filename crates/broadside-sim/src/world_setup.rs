//! Ship factories for setting up the simulation world.
//!
//! Loadouts are static definitions; scenarios place and number them.

use std::f64::consts::PI;

use broadside_core::components::*;
use broadside_core::constants::SHIELD_SEGMENT_COUNT;
use broadside_core::enums::*;
use broadside_core::state::{EntityId, Ship};
use broadside_core::types::{Rotation, Vec3};

/// Six identical shield facings at full strength.
pub fn shield_ring(max: f64, allocation: u32) -> [ShieldSegment; SHIELD_SEGMENT_COUNT] {
    [ShieldSegment {
        current: max,
        max,
        allocation,
    }; SHIELD_SEGMENT_COUNT]
}

fn energy_weapon(name: &str, group: u8, damage: f64, range: f64, fire_rate: f64) -> Weapon {
    Weapon {
        name: name.to_string(),
        kind: WeaponKind::Energy,
        group,
        mode: FireMode::Normal,
        damage,
        range,
        fire_rate,
        last_fired: None,
        allocation: 0,
        current_charge: 0.0,
        min_charge_to_fire: 0.0,
        optimal_charge: 0.0,
        max_charge: 0.0,
    }
}

fn projectile_weapon(name: &str, group: u8, damage: f64, range: f64, fire_rate: f64) -> Weapon {
    Weapon {
        kind: WeaponKind::Projectile,
        ..energy_weapon(name, group, damage, range, fire_rate)
    }
}

pub fn pulse_laser(group: u8) -> Weapon {
    Weapon {
        allocation: 4,
        min_charge_to_fire: 5.0,
        optimal_charge: 10.0,
        max_charge: 15.0,
        ..energy_weapon("Pulse Laser", group, 5.0, 40.0, 2.0)
    }
}

pub fn gatling_gun(group: u8) -> Weapon {
    projectile_weapon("Gatling Gun", group, 2.0, 30.0, 8.0)
}

pub fn mass_driver(group: u8) -> Weapon {
    projectile_weapon("Mass Driver", group, 6.0, 45.0, 1.0)
}

pub fn plasma_cannon(group: u8) -> Weapon {
    Weapon {
        allocation: 6,
        min_charge_to_fire: 8.0,
        optimal_charge: 15.0,
        max_charge: 20.0,
        ..energy_weapon("Plasma Cannon", group, 8.0, 35.0, 1.5)
    }
}

/// Terran light fighter (the default player ship).
pub fn terran_fighter(id: EntityId, name: &str, position: Vec3, yaw: f64) -> Ship {
    Ship {
        id,
        name: name.to_string(),
        class: HullClass::Fighter,
        faction: Faction::Terran,
        position,
        rotation: Rotation::from_yaw(yaw),
        target_rotation: None,
        destination: None,
        max_speed: 5.0,
        current_speed: 0.0,
        desired_speed: 0.0,
        acceleration: 2.0,
        turn_rate: PI / 2.0,
        hull: Hull {
            current: 100.0,
            max: 100.0,
        },
        power: PowerPlant { output: 50.0 },
        engines: Engines { allocation: 4 },
        shields: shield_ring(50.0, 2),
        weapons: vec![pulse_laser(1), gatling_gun(2)],
        alert_level: AlertLevel::Yellow,
        is_erratic: false,
        is_intercepting: false,
        point_defense_active: false,
        tractor_beams: TractorBeams {
            total: 2,
            defensive_allocation: 0,
        },
        decoys: DecoyBay {
            available: 3,
            max: 3,
        },
        visual_yaw_offset: 0.0,
        destroyed: false,
    }
}

/// Terran frigate: slow, heavily shielded, well stocked with countermeasures.
pub fn terran_frigate(id: EntityId, name: &str, position: Vec3, yaw: f64) -> Ship {
    Ship {
        class: HullClass::Frigate,
        max_speed: 3.5,
        acceleration: 1.2,
        turn_rate: PI / 4.0,
        hull: Hull {
            current: 250.0,
            max: 250.0,
        },
        power: PowerPlant { output: 90.0 },
        shields: shield_ring(80.0, 3),
        weapons: vec![pulse_laser(1), pulse_laser(1), gatling_gun(2), mass_driver(3)],
        tractor_beams: TractorBeams {
            total: 4,
            defensive_allocation: 0,
        },
        decoys: DecoyBay {
            available: 5,
            max: 5,
        },
        ..terran_fighter(id, name, position, yaw)
    }
}

/// Xenos raider. Spawns already under way toward `destination`.
pub fn xenos_fighter(id: EntityId, name: &str, position: Vec3, yaw: f64, destination: Vec3) -> Ship {
    Ship {
        id,
        name: name.to_string(),
        class: HullClass::Fighter,
        faction: Faction::Xenos,
        position,
        rotation: Rotation::from_yaw(yaw),
        target_rotation: None,
        destination: Some(destination),
        max_speed: 6.0,
        current_speed: 3.0,
        desired_speed: 3.0,
        acceleration: 3.0,
        turn_rate: PI,
        hull: Hull {
            current: 80.0,
            max: 80.0,
        },
        power: PowerPlant { output: 60.0 },
        engines: Engines { allocation: 5 },
        shields: shield_ring(40.0, 2),
        weapons: vec![plasma_cannon(1)],
        alert_level: AlertLevel::Red,
        is_erratic: false,
        is_intercepting: false,
        point_defense_active: false,
        tractor_beams: TractorBeams::default(),
        decoys: DecoyBay::default(),
        visual_yaw_offset: 0.0,
        destroyed: false,
    }
}

/// Xenos cruiser: a slow gun platform.
pub fn xenos_cruiser(id: EntityId, name: &str, position: Vec3, yaw: f64, destination: Vec3) -> Ship {
    Ship {
        class: HullClass::Cruiser,
        max_speed: 3.0,
        current_speed: 1.5,
        desired_speed: 3.0,
        acceleration: 1.0,
        turn_rate: PI / 5.0,
        hull: Hull {
            current: 300.0,
            max: 300.0,
        },
        power: PowerPlant { output: 100.0 },
        engines: Engines { allocation: 3 },
        shields: shield_ring(70.0, 3),
        weapons: vec![plasma_cannon(1), plasma_cannon(2)],
        point_defense_active: true,
        ..xenos_fighter(id, name, position, yaw, destination)
    }
}
