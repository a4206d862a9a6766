//! Scenario definitions: hardcoded starting fleets.

use std::f64::consts::PI;

use broadside_core::enums::ScenarioId;
use broadside_core::state::{EntityId, Ship, WorldState};
use broadside_core::types::Vec3;

use crate::world_setup::{terran_fighter, terran_frigate, xenos_cruiser, xenos_fighter};

/// Build the starting world for a scenario.
pub fn build_world(scenario: ScenarioId) -> WorldState {
    match scenario {
        ScenarioId::Duel => build_duel(),
        ScenarioId::FleetAction => build_fleet_action(),
    }
}

/// Duel: the TCS Arrow against a single Xenos raider already closing in.
fn build_duel() -> WorldState {
    let player_start = Vec3::new(0.0, 0.0, 10.0);
    let ships = vec![
        terran_fighter(1, "TCS Arrow", player_start, PI),
        xenos_fighter(
            2,
            "XN Stinger",
            Vec3::new(10.0, 0.0, -10.0),
            -PI / 2.0,
            player_start,
        ),
    ];
    assemble(ships, 1, Some(2))
}

/// Fleet action: a Terran frigate against a cruiser and two raiders.
fn build_fleet_action() -> WorldState {
    let player_start = Vec3::ZERO;
    let ships = vec![
        terran_frigate(1, "TCS Resolute", player_start, 0.0),
        xenos_cruiser(
            2,
            "XN Broodmother",
            Vec3::new(0.0, 0.0, 80.0),
            PI,
            player_start,
        ),
        xenos_fighter(
            3,
            "XN Stinger",
            Vec3::new(-40.0, 0.0, 60.0),
            3.0 * PI / 4.0,
            player_start,
        ),
        xenos_fighter(
            4,
            "XN Hornet",
            Vec3::new(40.0, 0.0, 60.0),
            -3.0 * PI / 4.0,
            player_start,
        ),
    ];
    assemble(ships, 1, Some(2))
}

fn assemble(ships: Vec<Ship>, player_ship_id: EntityId, target_ship_id: Option<EntityId>) -> WorldState {
    let next_entity_id = ships.iter().map(|s| s.id).max().unwrap_or(0) + 1;
    WorldState {
        ships,
        projectiles: Vec::new(),
        decoys: Vec::new(),
        player_ship_id,
        target_ship_id,
        active_maneuver: None,
        next_entity_id,
    }
}
