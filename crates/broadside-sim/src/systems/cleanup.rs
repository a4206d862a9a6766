//! Cleanup system: marks ships destroyed and drops references to them.

use tracing::info;

use broadside_core::events::SimEvent;
use broadside_core::state::WorldState;

/// Mark every ship whose hull ran out as destroyed, then clear the lock-on
/// and the player's maneuver if they refer to a destroyed ship.
pub fn run(world: &mut WorldState, events: &mut Vec<SimEvent>) {
    for ship in world.ships.iter_mut() {
        if ship.destroyed || ship.hull.current > 0.0 {
            continue;
        }
        ship.destroyed = true;
        ship.hull.current = 0.0;
        ship.current_speed = 0.0;
        ship.desired_speed = 0.0;
        ship.target_rotation = None;
        ship.destination = None;
        ship.is_erratic = false;
        ship.is_intercepting = false;
        ship.point_defense_active = false;
        ship.visual_yaw_offset = 0.0;

        info!(ship = ship.id, name = %ship.name, "ship destroyed");
        events.push(SimEvent::ShipDestroyed { ship_id: ship.id });
    }

    if let Some(target) = world.target_ship_id {
        if world.ship(target).map_or(true, |s| s.destroyed) {
            world.target_ship_id = None;
        }
    }

    if world.player().map_or(true, |p| p.destroyed) {
        world.active_maneuver = None;
    }
}
