//! Helm: speed resolution, heading resolution, and position integration.

use broadside_core::constants::*;
use broadside_core::events::SimEvent;
use broadside_core::state::{Ship, WorldState};
use broadside_core::types::{
    approach, bearing, damp_angle, forward, starboard, turn_toward, wrap_angle,
};

/// Move current speed toward the (clamped) desired speed.
pub fn update_speed(ship: &mut Ship, dt: f64) {
    let max_speed = ship.effective_max_speed();
    let desired = ship.desired_speed.min(max_speed);

    let engine_bonus = 1.0 + f64::from(ship.engines.allocation) * ENGINE_EFFICIENCY_FACTOR;
    let acceleration = ship.acceleration * engine_bonus;

    ship.current_speed = if (desired - ship.current_speed).abs() > SPEED_SNAP_EPSILON {
        approach(ship.current_speed, desired, acceleration * dt)
    } else {
        desired
    };
    ship.current_speed = ship.current_speed.clamp(0.0, max_speed);
}

/// Inputs to heading resolution.
pub struct HelmContext<'a> {
    pub prev: &'a WorldState,
    pub is_player: bool,
    /// An eased turn currently owns the helm.
    pub smooth_turn: bool,
    /// Turn rate after maneuver boosts (rad/s).
    pub turn_rate: f64,
    pub dt: f64,
}

/// Resolve and apply this tick's heading change.
///
/// Precedence: eased turn, intercept, manual order, AI destination.
pub fn steer(ship: &mut Ship, ctx: &HelmContext<'_>, events: &mut Vec<SimEvent>) {
    if ctx.is_player && ctx.smooth_turn {
        return;
    }

    if ctx.is_player {
        steer_player(ship, ctx, events);
    } else {
        steer_ai(ship, ctx);
    }
}

fn steer_player(ship: &mut Ship, ctx: &HelmContext<'_>, events: &mut Vec<SimEvent>) {
    let mut heading = ship.target_rotation;

    if ship.is_intercepting {
        match ctx.prev.target().filter(|t| t.id != ship.id) {
            Some(target) => {
                let offset = target.position - ship.position;
                if offset.length_squared() > INTERCEPT_MIN_DISTANCE_SQ {
                    heading = Some(bearing(ship.position, target.position));
                }
            }
            None => {
                ship.is_intercepting = false;
                events.push(SimEvent::InterceptLost { ship_id: ship.id });
            }
        }
    }

    let Some(heading) = heading else {
        return;
    };

    ship.rotation.yaw = wrap_angle(damp_angle(ship.rotation.yaw, heading, ctx.turn_rate, ctx.dt));

    // Intercept is a continuous order; manual orders complete.
    if !ship.is_intercepting && wrap_angle(heading - ship.rotation.yaw).abs() < HEADING_TOLERANCE {
        ship.target_rotation = None;
    }
}

fn steer_ai(ship: &mut Ship, ctx: &HelmContext<'_>) {
    let Some(destination) = ship.destination else {
        return;
    };
    if ship.position.distance(destination) <= ARRIVAL_DISTANCE {
        return;
    }
    let wanted = bearing(ship.position, destination);
    let step = ctx.turn_rate * ctx.dt;
    ship.rotation.yaw = wrap_angle(turn_toward(ship.rotation.yaw, wanted, step));
}

/// Integrate position along the logical heading, adding the erratic swerve.
pub fn integrate(ship: &mut Ship, dt: f64, now: f64) {
    ship.visual_yaw_offset = 0.0;
    if ship.current_speed <= 0.0 {
        return;
    }

    let heading = forward(ship.rotation.yaw);
    let mut velocity = heading * ship.current_speed;

    if ship.is_erratic {
        let strength = ship.speed_ratio();
        let phase = now * ERRATIC_SWERVE_FREQUENCY;
        velocity += starboard(ship.rotation.yaw) * (phase.cos() * ERRATIC_LATERAL_AMPLITUDE * strength);
        ship.visual_yaw_offset = phase.sin() * ERRATIC_YAW_AMPLITUDE * strength;
    }

    ship.position += velocity * dt;
}
