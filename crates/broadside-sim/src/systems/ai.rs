//! AI ship behavior: pursue the player (or a decoy) and fire when a solution exists.
//!
//! Decision logic lives in `broadside-ai`; this system gathers the previous
//! tick's view of the world for it and applies the results.

use tracing::trace;

use broadside_ai::gunnery::{self, FiringContext};
use broadside_ai::pursuit::{self, PursuitContext};
use broadside_core::events::SimEvent;
use broadside_core::state::{EntityId, Projectile, Ship, WorldState};

/// Run pursuit and fire control for one AI ship.
pub fn run(
    ship: &mut Ship,
    prev: &WorldState,
    now: f64,
    next_id: &mut EntityId,
    spawned: &mut Vec<Projectile>,
    events: &mut Vec<SimEvent>,
) {
    let Some(player) = prev.player().filter(|p| !p.destroyed) else {
        return;
    };

    let decoy_position = prev
        .decoys
        .iter()
        .find(|d| d.owner_id == player.id)
        .map(|d| d.position);

    let player_last_fired = player
        .weapons
        .iter()
        .filter_map(|w| w.last_fired)
        .fold(None, |acc: Option<f64>, t| Some(acc.map_or(t, |a| a.max(t))));

    let plan = pursuit::plan(&PursuitContext {
        own_position: ship.position,
        player_position: player.position,
        player_speed_ratio: player.speed_ratio(),
        player_last_fired,
        decoy_position,
        now,
    });
    ship.destination = Some(plan.destination);

    for index in 0..ship.weapons.len() {
        let ctx = FiringContext {
            weapon: &ship.weapons[index],
            shooter_position: ship.position,
            shooter_yaw: ship.rotation.yaw,
            target_position: plan.target,
            now,
        };
        if gunnery::check(&ctx).is_err() {
            continue;
        }

        let id = *next_id;
        if let Some(projectile) = super::weapons::discharge(ship, index, now, id) {
            *next_id = next_id.wrapping_add(1);
            trace!(ship = ship.id, weapon = index, decoyed = plan.decoyed, "ai fired");
            events.push(SimEvent::ProjectileFired {
                ship_id: ship.id,
                weapon_index: index,
                projectile_id: id,
            });
            spawned.push(projectile);
        }
    }
}
