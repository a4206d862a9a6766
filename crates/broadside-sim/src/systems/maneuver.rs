//! Maneuver state machine: charging, execution, and expiry.
//!
//! `advance` runs once per tick before any ship moves; `execute` runs inside
//! the player ship's update and applies the maneuver's effect to the helm.

use tracing::info;

use broadside_core::constants::{FREE_TURN_DURATION, SMOOTH_TURN_DURATION};
use broadside_core::enums::{ManeuverKind, ManeuverStatus};
use broadside_core::events::SimEvent;
use broadside_core::state::{ActiveManeuver, Ship};
use broadside_core::types::{ease_out_quint, lerp, wrap_angle};

/// Charge a pending maneuver and expire a finished free turn.
///
/// The maneuver is dropped if the player ship is gone or destroyed.
pub fn advance(
    maneuver: Option<&ActiveManeuver>,
    player: Option<&Ship>,
    dt: f64,
    now: f64,
    events: &mut Vec<SimEvent>,
) -> Option<ActiveManeuver> {
    let maneuver = maneuver?;
    let player = player.filter(|p| !p.destroyed)?;
    let mut next = maneuver.clone();

    match next.status {
        ManeuverStatus::Charging => {
            next.charge += player.power.output * dt;
            if next.charge >= next.charge_needed {
                next.charge = next.charge_needed;
                next.status = ManeuverStatus::Executing;
                next.start_time = Some(now);

                if let Some(offset) = next.kind.turn_offset() {
                    let start = player.rotation.yaw;
                    next.start_rotation = Some(start);
                    next.target_rotation = Some(start + offset);
                    next.duration = Some(SMOOTH_TURN_DURATION);
                }

                info!(kind = ?next.kind, now, "maneuver executing");
                events.push(SimEvent::ManeuverExecuting { kind: next.kind });
            }
            Some(next)
        }
        ManeuverStatus::Executing => {
            if next.kind == ManeuverKind::FreeTurn {
                let started = next.start_time.unwrap_or(now);
                if now - started > FREE_TURN_DURATION {
                    events.push(SimEvent::ManeuverCompleted { kind: next.kind });
                    return None;
                }
            }
            Some(next)
        }
    }
}

/// Yaw along an eased turn at `progress` (0..=1).
pub fn smooth_turn_yaw(start: f64, target: f64, progress: f64) -> f64 {
    lerp(start, target, ease_out_quint(progress.clamp(0.0, 1.0)))
}

/// Apply an executing maneuver to the player ship.
///
/// Returns the maneuver still in effect afterward.
pub fn execute(
    ship: &mut Ship,
    maneuver: Option<ActiveManeuver>,
    now: f64,
    events: &mut Vec<SimEvent>,
) -> Option<ActiveManeuver> {
    let maneuver = maneuver?;
    if !maneuver.is_executing() {
        return Some(maneuver);
    }

    match maneuver.kind {
        ManeuverKind::TurnLeft90 | ManeuverKind::TurnRight90 | ManeuverKind::Turn180 => {
            let elapsed = now - maneuver.start_time.unwrap_or(now);
            let duration = maneuver.duration.unwrap_or(SMOOTH_TURN_DURATION);
            let progress = (elapsed / duration).clamp(0.0, 1.0);

            // The eased turn owns the helm; a pending manual order is void.
            ship.target_rotation = None;

            let (Some(start), Some(target)) = (maneuver.start_rotation, maneuver.target_rotation)
            else {
                return Some(maneuver);
            };

            if progress >= 1.0 {
                ship.rotation.yaw = wrap_angle(target);
                events.push(SimEvent::ManeuverCompleted {
                    kind: maneuver.kind,
                });
                return None;
            }
            ship.rotation.yaw = wrap_angle(smooth_turn_yaw(start, target, progress));
            Some(maneuver)
        }
        ManeuverKind::EmergencyStop => {
            ship.current_speed = 0.0;
            ship.desired_speed = 0.0;
            events.push(SimEvent::ManeuverCompleted {
                kind: maneuver.kind,
            });
            None
        }
        ManeuverKind::FreeTurn => Some(maneuver),
    }
}
