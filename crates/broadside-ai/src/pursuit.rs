//! Pursuit target selection and steering destination.

use broadside_core::constants::*;
use broadside_core::types::Vec3;

/// What an AI ship knows about the chase this tick (previous-tick values).
pub struct PursuitContext {
    pub own_position: Vec3,
    pub player_position: Vec3,
    /// Player current speed over top speed.
    pub player_speed_ratio: f64,
    /// Most recent shot by any player weapon.
    pub player_last_fired: Option<f64>,
    /// Position of a live decoy launched by the player, if any.
    pub decoy_position: Option<Vec3>,
    pub now: f64,
}

/// Result of the pursuit decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PursuitPlan {
    /// Point being chased: the player or the decoy.
    pub target: Vec3,
    /// Where to steer this tick.
    pub destination: Vec3,
    /// Range from own position to `target`.
    pub distance: f64,
    /// True when the decoy pulled the pursuit off the player.
    pub decoyed: bool,
}

/// A fast-moving or recently firing player gives itself away, and decoys stop working.
pub fn is_vulnerable(speed_ratio: f64, last_fired: Option<f64>, now: f64) -> bool {
    let fired_recently = last_fired.is_some_and(|t| now - t < VULNERABLE_AFTER_FIRE_SECS);
    speed_ratio > VULNERABLE_SPEED_RATIO || fired_recently
}

/// Point on the orbit circle around `center` at clock time `now`.
pub fn orbit_point(center: Vec3, now: f64) -> Vec3 {
    let angle = now * AI_ORBIT_RATE;
    Vec3::new(
        center.x + angle.cos() * AI_ORBIT_RADIUS,
        center.y,
        center.z + angle.sin() * AI_ORBIT_RADIUS,
    )
}

/// Decide what to chase and where to steer.
pub fn plan(ctx: &PursuitContext) -> PursuitPlan {
    let vulnerable = is_vulnerable(ctx.player_speed_ratio, ctx.player_last_fired, ctx.now);

    let (target, decoyed) = match ctx.decoy_position {
        Some(decoy) if !vulnerable => (decoy, true),
        _ => (ctx.player_position, false),
    };

    let distance = ctx.own_position.distance(target);
    // Close in from afar, then circle instead of ramming.
    let destination = if distance > AI_ENGAGE_RANGE {
        target
    } else {
        orbit_point(target, ctx.now)
    };

    PursuitPlan {
        target,
        destination,
        distance,
        decoyed,
    }
}
