//! The simulation step: `(previous world, dt, clock) -> next world`.
//!
//! Every phase reads the previous snapshot and builds fresh values; the
//! input world is never mutated. Ships observe each other's previous-tick
//! positions regardless of list order.

use rand::Rng;

use broadside_core::events::SimEvent;
use broadside_core::state::{Projectile, WorldState};

use crate::systems;
use crate::systems::ships::ShipContext;

/// Result of one step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub world: WorldState,
    pub events: Vec<SimEvent>,
}

/// Advance `prev` by `dt` simulated seconds, ending at clock time `now`.
///
/// A non-positive or non-finite `dt` returns the world unchanged: nothing
/// charges, decays or moves while paused.
pub fn step<R: Rng + ?Sized>(prev: &WorldState, dt: f64, now: f64, rng: &mut R) -> StepOutcome {
    let mut events = Vec::new();
    if !(dt.is_finite() && dt > 0.0) {
        return StepOutcome {
            world: prev.clone(),
            events,
        };
    }

    // 1. Maneuver charging / timeout
    let mut maneuver = systems::maneuver::advance(
        prev.active_maneuver.as_ref(),
        prev.player(),
        dt,
        now,
        &mut events,
    );

    // 2. Per-ship update
    let mut next_entity_id = prev.next_entity_id;
    let mut spawned: Vec<Projectile> = Vec::new();
    let mut ships = Vec::with_capacity(prev.ships.len());
    for ship in &prev.ships {
        let ctx = ShipContext {
            prev,
            is_player: ship.id == prev.player_ship_id,
            dt,
            now,
        };
        ships.push(systems::ships::update(
            ship,
            &ctx,
            &mut maneuver,
            &mut next_entity_id,
            &mut spawned,
            &mut events,
        ));
    }

    // 3. Projectiles: in-flight rounds plus this tick's fire
    let in_flight = prev.projectiles.iter().cloned().chain(spawned);
    let projectiles = systems::projectiles::run(&mut ships, in_flight, dt, rng, &mut events);

    // 4. Decoys
    let decoys = systems::decoys::run(&prev.decoys, dt, &mut events);

    let mut world = WorldState {
        ships,
        projectiles,
        decoys,
        player_ship_id: prev.player_ship_id,
        target_ship_id: prev.target_ship_id,
        active_maneuver: maneuver,
        next_entity_id,
    };

    // 5. Destruction and stale lock-ons
    systems::cleanup::run(&mut world, &mut events);

    StepOutcome { world, events }
}
