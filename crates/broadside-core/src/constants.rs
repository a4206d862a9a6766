//! Simulation constants and tuning parameters.

use std::f64::consts::PI;

// --- Shields ---

/// Number of directional shield segments per ship.
pub const SHIELD_SEGMENT_COUNT: usize = 6;

/// Angular width of one shield segment (60°).
pub const SHIELD_SEGMENT_ANGLE: f64 = PI / 3.0;

/// Distance at which an incoming projectile strikes the shield bubble.
pub const SHIELD_RADIUS: f64 = 3.0;

/// Shield points gained per unit of energy delivered.
pub const SHIELD_RECHARGE_EFFICIENCY: f64 = 0.8;

/// Shield points lost per second regardless of allocation.
pub const SHIELD_DECAY_RATE: f64 = 2.0;

/// Overcharge ceiling as a multiple of a segment's nominal max.
pub const SHIELD_OVERCHARGE_FACTOR: f64 = 1.5;

// --- Engines / helm ---

/// Acceleration bonus per engine allocation point (+10%).
pub const ENGINE_EFFICIENCY_FACTOR: f64 = 0.1;

/// Top speed multiplier while erratic maneuvers are engaged.
pub const ERRATIC_SPEED_FACTOR: f64 = 0.75;

/// Power drained per second by erratic maneuvers.
pub const ERRATIC_POWER_DRAIN: f64 = 6.0;

/// Erratic swerve oscillation frequency (rad/s of the sine argument).
pub const ERRATIC_SWERVE_FREQUENCY: f64 = 8.0;

/// Peak sideways speed of the erratic swerve at full speed.
pub const ERRATIC_LATERAL_AMPLITUDE: f64 = 3.0;

/// Peak visual yaw wobble at full speed (15°).
pub const ERRATIC_YAW_AMPLITUDE: f64 = PI / 12.0;

/// Speed differences below this snap straight to the desired speed.
pub const SPEED_SNAP_EPSILON: f64 = 0.01;

/// A manual heading order is complete once within this angle (radians).
pub const HEADING_TOLERANCE: f64 = 0.01;

/// Squared distance under which intercept steering holds its heading.
pub const INTERCEPT_MIN_DISTANCE_SQ: f64 = 0.1;

/// AI ships stop steering once this close to their destination.
pub const ARRIVAL_DISTANCE: f64 = 0.5;

// --- Maneuvers ---

/// Energy a maneuver must accumulate before it executes.
pub const MANEUVER_CHARGE_NEEDED: f64 = 50.0;

/// Duration of the eased 90°/180° fast turns (seconds).
pub const SMOOTH_TURN_DURATION: f64 = 0.75;

/// Turn rate multiplier while a free turn executes.
pub const FREE_TURN_RATE_MULTIPLIER: f64 = 5.0;

/// How long a free turn stays active once executing (seconds).
pub const FREE_TURN_DURATION: f64 = 4.0;

// --- AI ---

/// Beyond this range AI ships head straight for their pursuit target.
pub const AI_ENGAGE_RANGE: f64 = 30.0;

/// Orbit radius AI ships hold around their pursuit target.
pub const AI_ORBIT_RADIUS: f64 = 20.0;

/// Angular rate of the AI orbit offset (rad/s).
pub const AI_ORBIT_RATE: f64 = 0.3;

/// Player is "vulnerable" above this fraction of top speed.
pub const VULNERABLE_SPEED_RATIO: f64 = 0.8;

/// Player is "vulnerable" for this long after firing any weapon (seconds).
pub const VULNERABLE_AFTER_FIRE_SECS: f64 = 2.0;

/// Minimum forward·line-of-sight dot product to fire (~11°).
pub const FIRING_ARC_DOT: f64 = 0.98;

// --- Projectiles & defenses ---

/// Muzzle speed of every projectile (units/s).
pub const PROJECTILE_SPEED: f64 = 30.0;

/// Range inside which defensive tractor beams capture projectiles.
pub const TRACTOR_CAPTURE_RANGE: f64 = 15.0;

/// Range inside which point defense engages projectiles.
pub const POINT_DEFENSE_RANGE: f64 = 30.0;

/// Per-tick chance that point defense destroys an in-range projectile.
pub const POINT_DEFENSE_KILL_CHANCE: f64 = 0.05;

// --- Decoys ---

/// Lifetime of a launched decoy (seconds).
pub const DECOY_LIFETIME: f64 = 30.0;

/// Decoys are dropped this far behind the launching ship.
pub const DECOY_LAUNCH_OFFSET: f64 = 8.0;

// --- Game speed ---

/// Real seconds to simulated seconds at normal play speed.
pub const PLAY_SPEED_BASE: f64 = 1.0 / 8.0;
