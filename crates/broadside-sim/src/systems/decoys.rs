//! Decoy launch and lifetime.

use broadside_core::constants::{DECOY_LAUNCH_OFFSET, DECOY_LIFETIME};
use broadside_core::events::SimEvent;
use broadside_core::state::{Decoy, EntityId, Ship};
use broadside_core::types::forward;

/// Age every decoy by `dt`, dropping the ones that burned out.
pub fn run(decoys: &[Decoy], dt: f64, events: &mut Vec<SimEvent>) -> Vec<Decoy> {
    let mut alive = Vec::with_capacity(decoys.len());
    for decoy in decoys {
        let mut next = decoy.clone();
        next.life -= dt;
        if next.life > 0.0 {
            alive.push(next);
        } else {
            events.push(SimEvent::DecoyExpired { decoy_id: decoy.id });
        }
    }
    alive
}

/// A fresh decoy dropped astern of `ship`.
pub fn spawn_decoy(ship: &Ship, id: EntityId, now: f64) -> Decoy {
    Decoy {
        id,
        position: ship.position - forward(ship.rotation.yaw) * DECOY_LAUNCH_OFFSET,
        life: DECOY_LIFETIME,
        launched_at: now,
        owner_id: ship.id,
    }
}
