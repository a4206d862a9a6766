//! Per-ship update, applied to every ship once per tick.

use broadside_core::constants::FREE_TURN_RATE_MULTIPLIER;
use broadside_core::events::SimEvent;
use broadside_core::state::{ActiveManeuver, EntityId, Projectile, Ship, WorldState};

use super::helm::{self, HelmContext};
use super::{ai, energy, maneuver};

/// Read-only inputs shared by one ship's update.
pub struct ShipContext<'a> {
    /// Previous snapshot; the source of every other ship's state.
    pub prev: &'a WorldState,
    pub is_player: bool,
    pub dt: f64,
    pub now: f64,
}

/// Produce the next-tick copy of `ship`.
///
/// Order: AI or maneuver, energy, speed, heading, position.
pub fn update(
    ship: &Ship,
    ctx: &ShipContext<'_>,
    active_maneuver: &mut Option<ActiveManeuver>,
    next_id: &mut EntityId,
    spawned: &mut Vec<Projectile>,
    events: &mut Vec<SimEvent>,
) -> Ship {
    let mut next = ship.clone();
    if next.destroyed {
        return next;
    }

    if ctx.is_player {
        *active_maneuver = maneuver::execute(&mut next, active_maneuver.take(), ctx.now, events);
    } else {
        ai::run(&mut next, ctx.prev, ctx.now, next_id, spawned, events);
    }

    let player_maneuver = if ctx.is_player {
        active_maneuver.as_ref()
    } else {
        None
    };
    let charging = player_maneuver.is_some_and(ActiveManeuver::is_charging);
    let smooth_turn = player_maneuver.is_some_and(ActiveManeuver::is_smooth_turn);
    let free_turn = player_maneuver.is_some_and(ActiveManeuver::is_free_turn);

    energy::run(&mut next, charging, ctx.dt, events);
    helm::update_speed(&mut next, ctx.dt);

    let turn_rate = if free_turn {
        next.turn_rate * FREE_TURN_RATE_MULTIPLIER
    } else {
        next.turn_rate
    };
    helm::steer(
        &mut next,
        &HelmContext {
            prev: ctx.prev,
            is_player: ctx.is_player,
            smooth_turn,
            turn_rate,
            dt: ctx.dt,
        },
        events,
    );
    helm::integrate(&mut next, ctx.dt, ctx.now);

    next
}
