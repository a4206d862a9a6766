//! Fundamental geometric types and yaw math.
//!
//! Ships move on the x/z plane. Yaw 0 faces +z and increases toward +x,
//! so a positive bearing is to starboard. Pitch and roll are carried for
//! rendering but never driven by the simulation.

use std::f64::consts::{PI, TAU};

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// World-space vector (units, x/z ground plane, y up).
pub type Vec3 = DVec3;

/// Euler orientation. Only `yaw` is integrated by the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl Rotation {
    pub fn from_yaw(yaw: f64) -> Self {
        Self {
            yaw,
            ..Default::default()
        }
    }
}

/// Unit vector a ship with the given yaw is facing.
pub fn forward(yaw: f64) -> Vec3 {
    DVec3::new(yaw.sin(), 0.0, yaw.cos())
}

/// Unit vector to starboard of the given yaw (`up × forward`).
pub fn starboard(yaw: f64) -> Vec3 {
    DVec3::Y.cross(forward(yaw))
}

/// Yaw that points from `from` toward `to`.
pub fn bearing(from: Vec3, to: Vec3) -> f64 {
    let d = to - from;
    d.x.atan2(d.z)
}

/// Wrap an angle into `[-π, π]`. Angles already in range are returned unchanged.
pub fn wrap_angle(angle: f64) -> f64 {
    if (-PI..=PI).contains(&angle) {
        angle
    } else {
        (angle + PI).rem_euclid(TAU) - PI
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn wrap_positive(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Quintic ease-out: fast start, gentle settle.
pub fn ease_out_quint(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(5)
}

/// Frame-rate independent exponential approach of `current` toward `target`
/// along the shorter arc. `lambda` is the approach rate (1/s).
pub fn damp_angle(current: f64, target: f64, lambda: f64, dt: f64) -> f64 {
    let diff = wrap_angle(target - current);
    current + diff * (1.0 - (-lambda * dt).exp())
}

/// Rotate `current` toward `target` by at most `max_step`, shorter way round.
pub fn turn_toward(current: f64, target: f64, max_step: f64) -> f64 {
    let diff = wrap_angle(target - current);
    current + diff.abs().min(max_step) * diff.signum()
}

/// Move `current` toward `target` by at most `max_step` without overshoot.
pub fn approach(current: f64, target: f64, max_step: f64) -> f64 {
    let diff = target - current;
    current + diff.abs().min(max_step) * diff.signum()
}
