//! Tests for the simulation step, its systems, command handling and the engine.

use std::f64::consts::{FRAC_PI_2, PI};

use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use broadside_core::commands::PlayerCommand;
use broadside_core::enums::*;
use broadside_core::error::{CommandRejection, FireBlocked};
use broadside_core::events::SimEvent;
use broadside_core::state::{ActiveManeuver, Projectile, WorldState};
use broadside_core::types::Vec3;

use crate::commands;
use crate::engine::{SimConfig, SimulationEngine};
use crate::scenario;
use crate::step::step;
use crate::systems::{energy, helm, projectiles};
use crate::world_setup::{shield_ring, terran_fighter, xenos_fighter};

fn lone_player() -> WorldState {
    WorldState {
        ships: vec![terran_fighter(1, "TCS Arrow", Vec3::ZERO, 0.0)],
        projectiles: Vec::new(),
        decoys: Vec::new(),
        player_ship_id: 1,
        target_ship_id: None,
        active_maneuver: None,
        next_entity_id: 10,
    }
}

/// Player at the origin facing +z, an idle raider 10 units dead ahead.
fn facing_off() -> WorldState {
    let mut world = lone_player();
    let mut raider = xenos_fighter(2, "XN Stinger", Vec3::new(0.0, 0.0, 10.0), PI, Vec3::ZERO);
    raider.current_speed = 0.0;
    raider.desired_speed = 0.0;
    raider.weapons.clear();
    world.ships.push(raider);
    world.target_ship_id = Some(2);
    world
}

fn round(id: u32, owner_id: u32, position: Vec3, velocity: Vec3, damage: f64) -> Projectile {
    Projectile {
        id,
        position,
        velocity,
        damage,
        range: 100.0,
        traveled: 0.0,
        owner_id,
    }
}

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

// ---- Movement ----

#[test]
fn test_engines_only_acceleration() {
    let mut world = lone_player();
    let ship = &mut world.ships[0];
    ship.shields = shield_ring(50.0, 0);
    ship.weapons.iter_mut().for_each(|w| w.allocation = 0);
    ship.desired_speed = 5.0;

    let out = step(&world, 1.0, 1.0, &mut rng());
    // acceleration 2 × (1 + 4 × 0.1)
    assert!((out.world.ships[0].current_speed - 2.8).abs() < 1e-10);
}

#[test]
fn test_speed_snaps_and_never_overshoots() {
    let mut world = lone_player();
    world.ships[0].current_speed = 2.995;
    world.ships[0].desired_speed = 3.0;
    let out = step(&world, 0.1, 0.1, &mut rng());
    assert_eq!(out.world.ships[0].current_speed, 3.0);

    let mut world = lone_player();
    world.ships[0].current_speed = 2.9;
    world.ships[0].desired_speed = 3.0;
    let out = step(&world, 1.0, 1.0, &mut rng());
    assert!((out.world.ships[0].current_speed - 3.0).abs() < 1e-12);
}

#[test]
fn test_erratic_clamps_speed_to_reduced_max() {
    let mut world = lone_player();
    world.ships[0].current_speed = 5.0;
    world.ships[0].desired_speed = 5.0;
    world.ships[0].is_erratic = true;
    let out = step(&world, 0.1, 0.1, &mut rng());
    assert!(out.world.ships[0].current_speed <= 5.0 * 0.75 + 1e-12);
}

#[test]
fn test_position_follows_heading() {
    let mut world = lone_player();
    world.ships[0].current_speed = 4.0;
    world.ships[0].desired_speed = 4.0;
    let out = step(&world, 0.5, 0.5, &mut rng());
    let pos = out.world.ships[0].position;
    assert!(pos.x.abs() < 1e-10);
    assert!((pos.z - 2.0).abs() < 1e-10);
}

#[test]
fn test_erratic_swerve_is_lateral_and_visual_only() {
    let mut world = lone_player();
    world.ships[0].current_speed = 3.0;
    world.ships[0].desired_speed = 3.0;
    world.ships[0].is_erratic = true;

    let now = 0.05;
    let out = step(&world, 0.05, now, &mut rng());
    let ship = &out.world.ships[0];
    assert_eq!(ship.rotation.yaw, 0.0);
    let ratio = 3.0 / 5.0;
    let expected_x = (now * 8.0).cos() * 3.0 * ratio * 0.05;
    assert!((ship.position.x - expected_x).abs() < 1e-10);
    let expected_wobble = (now * 8.0).sin() * (PI / 12.0) * ratio;
    assert!((ship.visual_yaw_offset - expected_wobble).abs() < 1e-10);
}

#[test]
fn test_manual_heading_damps_and_clears() {
    let mut world = lone_player();
    world.ships[0].target_rotation = Some(FRAC_PI_2);

    let out = step(&world, 0.1, 0.1, &mut rng());
    let yaw = out.world.ships[0].rotation.yaw;
    let expected = FRAC_PI_2 * (1.0 - (-FRAC_PI_2 * 0.1).exp());
    assert!((yaw - expected).abs() < 1e-10);
    assert_eq!(out.world.ships[0].target_rotation, Some(FRAC_PI_2));

    let mut world = out.world;
    for i in 0..200 {
        let now = 0.2 + f64::from(i) * 0.1;
        world = step(&world, 0.1, now, &mut rng()).world;
    }
    assert_eq!(world.ships[0].target_rotation, None);
    assert!((world.ships[0].rotation.yaw - FRAC_PI_2).abs() < 0.01);
}

#[test]
fn test_manual_heading_takes_short_way_across_pi() {
    let mut world = lone_player();
    world.ships[0].rotation.yaw = 3.0;
    world.ships[0].target_rotation = Some(-3.0);
    let out = step(&world, 0.1, 0.1, &mut rng());
    let yaw = out.world.ships[0].rotation.yaw;
    // Turning positive through π, wrapped back into range.
    assert!(yaw > 3.0 || yaw < -3.0);
    assert!((-PI..=PI).contains(&yaw));
}

#[test]
fn test_ai_turns_at_constant_rate() {
    let mut world = lone_player();
    let mut raider = xenos_fighter(
        2,
        "XN Stinger",
        Vec3::new(0.0, 0.0, -100.0),
        0.0,
        Vec3::ZERO,
    );
    raider.weapons.clear();
    world.ships.push(raider);

    let mut ship = world.ships[1].clone();
    ship.destination = Some(Vec3::new(100.0, 0.0, -100.0));
    helm::steer(
        &mut ship,
        &helm::HelmContext {
            prev: &world,
            is_player: false,
            smooth_turn: false,
            turn_rate: PI,
            dt: 0.1,
        },
        &mut Vec::new(),
    );
    assert!((ship.rotation.yaw - PI * 0.1).abs() < 1e-10);
}

#[test]
fn test_ai_holds_heading_on_arrival() {
    let world = lone_player();
    let mut ship = xenos_fighter(2, "XN Stinger", Vec3::ZERO, 1.0, Vec3::new(0.3, 0.0, 0.0));
    helm::steer(
        &mut ship,
        &helm::HelmContext {
            prev: &world,
            is_player: false,
            smooth_turn: false,
            turn_rate: PI,
            dt: 0.1,
        },
        &mut Vec::new(),
    );
    assert_eq!(ship.rotation.yaw, 1.0);
}

// ---- Intercept ----

#[test]
fn test_intercept_steers_toward_target() {
    let mut world = facing_off();
    world.ships[1].position = Vec3::new(10.0, 0.0, 0.0);
    world.ships[0].is_intercepting = true;

    let out = step(&world, 0.1, 0.1, &mut rng());
    let yaw = out.world.ships[0].rotation.yaw;
    assert!(yaw > 0.0 && yaw < FRAC_PI_2);
    assert!(out.world.ships[0].is_intercepting);
}

#[test]
fn test_intercept_lost_when_target_destroyed() {
    let mut world = facing_off();
    world.ships[1].destroyed = true;
    world.ships[0].is_intercepting = true;

    let out = step(&world, 0.1, 0.1, &mut rng());
    assert!(!out.world.ships[0].is_intercepting);
    assert!(out
        .events
        .contains(&SimEvent::InterceptLost { ship_id: 1 }));
    assert_eq!(out.world.target_ship_id, None);
}

// ---- Maneuvers ----

#[test]
fn test_maneuver_charge_clamps_on_transition() {
    let mut world = lone_player();
    world.ships[0].is_erratic = true;
    world.active_maneuver = Some(ActiveManeuver::new(ManeuverKind::TurnLeft90, 50.0));

    let out = step(&world, 0.5, 0.5, &mut rng());
    let charging = out.world.active_maneuver.clone().unwrap();
    assert!((charging.charge - 25.0).abs() < 1e-10);
    assert!(charging.is_charging());
    assert!(!out.world.ships[0].is_erratic);

    let out = step(&out.world, 1.5, 2.0, &mut rng());
    let executing = out.world.active_maneuver.clone().unwrap();
    assert_eq!(executing.charge, 50.0);
    assert!(executing.is_executing());
    assert_eq!(executing.start_time, Some(2.0));
    assert_eq!(executing.start_rotation, Some(0.0));
    assert_eq!(executing.target_rotation, Some(-FRAC_PI_2));
    assert!(out.events.contains(&SimEvent::ManeuverExecuting {
        kind: ManeuverKind::TurnLeft90
    }));
}

#[test]
fn test_charging_starves_ship_systems() {
    let mut world = lone_player();
    world.ships[0].shields = shield_ring(10.0, 2);
    world.ships[0].shields.iter_mut().for_each(|s| s.current = 5.0);
    world.active_maneuver = Some(ActiveManeuver::new(ManeuverKind::EmergencyStop, 50.0));

    let out = step(&world, 0.5, 0.5, &mut rng());
    for shield in &out.world.ships[0].shields {
        assert!((shield.current - 4.0).abs() < 1e-10, "decay only while charging");
    }
    assert_eq!(out.world.ships[0].weapons[0].current_charge, 0.0);
}

#[test]
fn test_smooth_turn_eases_then_snaps() {
    let mut world = lone_player();
    world.active_maneuver = Some(ActiveManeuver {
        kind: ManeuverKind::TurnRight90,
        charge: 50.0,
        charge_needed: 50.0,
        status: ManeuverStatus::Executing,
        start_time: Some(0.0),
        start_rotation: Some(0.0),
        target_rotation: Some(FRAC_PI_2),
        duration: Some(0.75),
    });
    world.ships[0].target_rotation = Some(-1.0);

    let half = step(&world, 0.375, 0.375, &mut rng());
    let expected = FRAC_PI_2 * (1.0 - 0.5_f64.powi(5));
    assert!((half.world.ships[0].rotation.yaw - expected).abs() < 1e-10);
    assert_eq!(half.world.ships[0].target_rotation, None);
    assert!(half.world.active_maneuver.is_some());

    let done = step(&half.world, 0.375, 0.75, &mut rng());
    assert_eq!(done.world.ships[0].rotation.yaw, FRAC_PI_2);
    assert!(done.world.active_maneuver.is_none());
}

#[test]
fn test_emergency_stop_zeroes_speed() {
    let mut world = lone_player();
    world.ships[0].current_speed = 4.0;
    world.ships[0].desired_speed = 4.0;
    world.active_maneuver = Some(ActiveManeuver::new(ManeuverKind::EmergencyStop, 50.0));

    let out = step(&world, 1.0, 1.0, &mut rng());
    assert_eq!(out.world.ships[0].current_speed, 0.0);
    assert_eq!(out.world.ships[0].desired_speed, 0.0);
    assert!(out.world.active_maneuver.is_none());
}

#[test]
fn test_free_turn_boosts_rate_then_expires() {
    let mut world = lone_player();
    world.ships[0].target_rotation = Some(FRAC_PI_2);
    world.active_maneuver = Some(ActiveManeuver {
        status: ManeuverStatus::Executing,
        start_time: Some(0.0),
        charge: 50.0,
        ..ActiveManeuver::new(ManeuverKind::FreeTurn, 50.0)
    });

    let out = step(&world, 0.1, 0.1, &mut rng());
    let expected = FRAC_PI_2 * (1.0 - (-FRAC_PI_2 * 5.0 * 0.1).exp());
    assert!((out.world.ships[0].rotation.yaw - expected).abs() < 1e-10);
    assert!(out.world.active_maneuver.is_some());

    let out = step(&out.world, 0.1, 4.1, &mut rng());
    assert!(out.world.active_maneuver.is_none());
    assert!(out.events.contains(&SimEvent::ManeuverCompleted {
        kind: ManeuverKind::FreeTurn
    }));
}

// ---- Energy ----

#[test]
fn test_zero_allocation_yields_zero_rate() {
    assert_eq!(energy::rate_per_point(50.0, 0), 0.0);
    assert_eq!(energy::rate_per_point(50.0, 10), 5.0);
}

#[test]
fn test_erratic_drain_and_disengage() {
    let mut world = lone_player();
    world.ships[0].is_erratic = true;
    let mut events = Vec::new();
    assert_eq!(
        energy::available_power(&mut world.ships[0], false, &mut events),
        44.0
    );

    world.ships[0].power.output = 4.0;
    assert_eq!(
        energy::available_power(&mut world.ships[0], false, &mut events),
        4.0
    );
    assert!(!world.ships[0].is_erratic);
    assert_eq!(events, vec![SimEvent::ErraticDisengaged { ship_id: 1 }]);
}

#[test]
fn test_shield_overcharge_converges_to_ceiling() {
    let mut world = lone_player();
    world.ships[0].engines.allocation = 0;
    world.ships[0].weapons.iter_mut().for_each(|w| w.allocation = 0);

    for i in 0..300 {
        let now = f64::from(i + 1) * 0.1;
        world = step(&world, 0.1, now, &mut rng()).world;
        for shield in &world.ships[0].shields {
            assert!(shield.current <= 75.0 + 1e-9);
            assert!(shield.current >= 0.0);
        }
    }
    assert!((world.ships[0].shields[0].current - 75.0).abs() < 1e-9);
}

#[test]
fn test_energy_spent_within_budget() {
    let mut world = lone_player();
    world.ships[0].shields.iter_mut().for_each(|s| s.current = 10.0);
    let dt = 0.2;

    let out = step(&world, dt, dt, &mut rng());
    let before = &world.ships[0];
    let after = &out.world.ships[0];

    let shield_gain: f64 = before
        .shields
        .iter()
        .zip(after.shields.iter())
        .map(|(b, a)| a.current - b.current + 2.0 * dt)
        .sum();
    let charge_gain = after.weapons[0].current_charge - before.weapons[0].current_charge;
    assert!(shield_gain > 0.0 && charge_gain > 0.0);
    assert!(shield_gain + charge_gain <= 50.0 * dt + 1e-9);
}

// ---- Projectiles ----

#[test]
fn test_projectile_expires_after_range() {
    let mut world = lone_player();
    world.projectiles.push(Projectile {
        range: 30.0,
        ..round(5, 1, Vec3::new(0.0, 0.0, 50.0), Vec3::new(0.0, 0.0, 30.0), 1.0)
    });

    // 30 / (30 × 0.25) = 4 ticks
    let mut now = 0.0;
    for _ in 0..3 {
        now += 0.25;
        world = step(&world, 0.25, now, &mut rng()).world;
        assert_eq!(world.projectiles.len(), 1);
    }
    world = step(&world, 0.25, now + 0.25, &mut rng()).world;
    assert!(world.projectiles.is_empty());
}

#[test]
fn test_tractors_capture_up_to_allocation() {
    let mut world = facing_off();
    world.ships[0].tractor_beams.defensive_allocation = 2;
    let away = Vec3::new(-30.0, 0.0, 0.0);
    for id in 20..23 {
        world
            .projectiles
            .push(round(id, 2, Vec3::new(-8.0, 0.0, 0.0), away, 5.0));
    }

    let out = step(&world, 0.01, 0.01, &mut rng());
    let captured = out
        .events
        .iter()
        .filter(|e| matches!(e, SimEvent::ProjectileCaptured { defender_id: 1, .. }))
        .count();
    assert_eq!(captured, 2);
    assert_eq!(out.world.projectiles.len(), 1);
    assert_eq!(out.world.projectiles[0].id, 22);
}

#[test]
fn test_point_defense_uses_injected_rng() {
    let mut world = facing_off();
    world.ships[0].point_defense_active = true;
    world.projectiles.push(round(
        20,
        2,
        Vec3::new(-20.0, 0.0, 0.0),
        Vec3::new(-30.0, 0.0, 0.0),
        5.0,
    ));

    let mut always = StepRng::new(0, 0);
    let out = step(&world, 0.01, 0.01, &mut always);
    assert!(out.world.projectiles.is_empty());
    assert!(out.events.contains(&SimEvent::ProjectileShotDown {
        projectile_id: 20,
        defender_id: 1
    }));

    let mut never = StepRng::new(u64::MAX, 0);
    let out = step(&world, 0.01, 0.01, &mut never);
    assert_eq!(out.world.projectiles.len(), 1);
}

#[test]
fn test_friendly_rounds_pass_through() {
    let mut world = facing_off();
    world.projectiles.push(round(
        20,
        1,
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(30.0, 0.0, 0.0),
        5.0,
    ));
    let out = step(&world, 0.01, 0.01, &mut rng());
    assert_eq!(out.world.projectiles.len(), 1);
    assert_eq!(out.world.ships[0].hull.current, 100.0);
}

#[test]
fn test_impact_facing_by_relative_bearing() {
    let ship = terran_fighter(1, "TCS Arrow", Vec3::ZERO, 0.0);
    assert_eq!(
        projectiles::impact_facing(&ship, Vec3::new(0.0, 0.0, 2.0)),
        ShieldFacing::Front
    );
    assert_eq!(
        projectiles::impact_facing(&ship, Vec3::new(2.0, 0.0, 1.0)),
        ShieldFacing::FrontRight
    );
    assert_eq!(
        projectiles::impact_facing(&ship, Vec3::new(0.0, 0.0, -2.0)),
        ShieldFacing::Rear
    );
    assert_eq!(
        projectiles::impact_facing(&ship, Vec3::new(-2.0, 0.0, 0.1)),
        ShieldFacing::FrontLeft
    );

    // Same hit from the bow's point of view after turning about.
    let turned = terran_fighter(1, "TCS Arrow", Vec3::ZERO, PI);
    assert_eq!(
        projectiles::impact_facing(&turned, Vec3::new(0.0, 0.0, 2.0)),
        ShieldFacing::Rear
    );
}

#[test]
fn test_impact_shield_absorbs_then_hull_takes_overflow() {
    let mut ship = terran_fighter(1, "TCS Arrow", Vec3::ZERO, 0.0);
    let hit = round(5, 2, Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, 5.0);
    let mut events = Vec::new();

    projectiles::apply_impact(&mut ship, &hit, &mut events);
    assert_eq!(ship.shield(ShieldFacing::Front).current, 45.0);
    assert_eq!(ship.hull.current, 100.0);

    ship.shields[0].current = 3.0;
    projectiles::apply_impact(&mut ship, &hit, &mut events);
    assert_eq!(ship.shields[0].current, 0.0);
    assert_eq!(ship.hull.current, 98.0);

    ship.hull.current = 1.0;
    projectiles::apply_impact(&mut ship, &hit, &mut events);
    assert_eq!(ship.hull.current, 0.0);
    assert!(events.contains(&SimEvent::HullDamaged {
        ship_id: 1,
        amount: 5.0
    }));
}

// ---- Destruction ----

#[test]
fn test_hull_zero_destroys_and_clears_lock() {
    let mut world = facing_off();
    let raider = &mut world.ships[1];
    raider.hull.current = 1.0;
    raider.shields = shield_ring(0.0, 0);
    let at = raider.position - Vec3::new(0.0, 0.0, 1.0);
    world
        .projectiles
        .push(round(20, 1, at, Vec3::new(0.0, 0.0, 30.0), 5.0));

    let out = step(&world, 0.01, 0.01, &mut rng());
    assert!(out.world.ships[1].destroyed);
    assert_eq!(out.world.ships[1].hull.current, 0.0);
    assert_eq!(out.world.target_ship_id, None);
    assert!(out.events.contains(&SimEvent::ShipDestroyed { ship_id: 2 }));

    // Wrecks stay put and stop acting.
    let later = step(&out.world, 0.5, 0.51, &mut rng());
    assert_eq!(later.world.ships[1], out.world.ships[1]);
}

#[test]
fn test_player_destroyed_drops_maneuver_and_ai_idles() {
    let mut world = facing_off();
    world.ships[0].destroyed = true;
    world.ships[0].hull.current = 0.0;
    world.active_maneuver = Some(ActiveManeuver::new(ManeuverKind::Turn180, 50.0));
    world.ships[1].destination = None;

    let out = step(&world, 0.1, 0.1, &mut rng());
    assert!(out.world.active_maneuver.is_none());
    assert_eq!(out.world.ships[1].destination, None);
}

// ---- AI ----

#[test]
fn test_ai_fires_charged_weapon_on_bearing() {
    let mut world = lone_player();
    let mut raider = xenos_fighter(2, "XN Stinger", Vec3::new(0.0, 0.0, -10.0), 0.0, Vec3::ZERO);
    raider.weapons[0].current_charge = 10.0;
    world.ships.push(raider);

    let out = step(&world, 0.1, 0.1, &mut rng());
    assert!(out.events.contains(&SimEvent::ProjectileFired {
        ship_id: 2,
        weapon_index: 0,
        projectile_id: 10,
    }));
    assert_eq!(out.world.next_entity_id, 11);
    let weapon = &out.world.ships[1].weapons[0];
    assert_eq!(weapon.last_fired, Some(0.1));
    assert!(weapon.current_charge < weapon.min_charge_to_fire);

    let shot = &out.world.projectiles[0];
    assert_eq!(shot.owner_id, 2);
    assert!((shot.position.z - (-10.0 + 3.0)).abs() < 1e-10);
}

#[test]
fn test_ai_holds_fire_when_uncharged() {
    let mut world = lone_player();
    world.ships.push(xenos_fighter(
        2,
        "XN Stinger",
        Vec3::new(0.0, 0.0, -10.0),
        0.0,
        Vec3::ZERO,
    ));
    let out = step(&world, 0.1, 0.1, &mut rng());
    assert!(out.world.projectiles.is_empty());
}

// ---- Decoys ----

#[test]
fn test_decoys_age_and_expire() {
    let mut world = lone_player();
    let (launched, _) = commands::apply(&world, &PlayerCommand::LaunchDecoy, 0.0).unwrap();
    world = launched;
    world.decoys[0].life = 0.15;

    let out = step(&world, 0.1, 0.1, &mut rng());
    assert_eq!(out.world.decoys.len(), 1);
    assert!((out.world.decoys[0].life - 0.05).abs() < 1e-10);

    let out = step(&out.world, 0.1, 0.2, &mut rng());
    assert!(out.world.decoys.is_empty());
    assert!(out.events.contains(&SimEvent::DecoyExpired { decoy_id: 10 }));
}

// ---- Commands ----

#[test]
fn test_launch_decoy_drops_astern() {
    let world = scenario::build_world(ScenarioId::Duel);
    let (next, events) = commands::apply(&world, &PlayerCommand::LaunchDecoy, 2.0).unwrap();

    let decoy = &next.decoys[0];
    // TCS Arrow sits at z = 10 facing -z.
    assert!(decoy.position.x.abs() < 1e-10);
    assert!((decoy.position.z - 18.0).abs() < 1e-10);
    assert_eq!(decoy.life, 30.0);
    assert_eq!(decoy.launched_at, 2.0);
    assert_eq!(next.player().unwrap().decoys.available, 2);
    assert_eq!(next.next_entity_id, world.next_entity_id + 1);
    assert_eq!(events.len(), 1);
}

#[test]
fn test_launch_decoy_with_none_left_is_refused() {
    let mut world = lone_player();
    world.ships[0].decoys.available = 0;
    assert_eq!(
        commands::apply(&world, &PlayerCommand::LaunchDecoy, 0.0),
        Err(CommandRejection::NoDecoys)
    );
}

#[test]
fn test_toggle_intercept_requires_target() {
    let world = lone_player();
    assert_eq!(
        commands::apply(&world, &PlayerCommand::ToggleIntercept, 0.0),
        Err(CommandRejection::NoTarget)
    );

    let mut world = facing_off();
    world.ships[0].is_erratic = true;
    world.ships[0].target_rotation = Some(1.0);
    let (next, _) = commands::apply(&world, &PlayerCommand::ToggleIntercept, 0.0).unwrap();
    let player = next.player().unwrap();
    assert!(player.is_intercepting);
    assert!(!player.is_erratic);
    assert_eq!(player.target_rotation, None);
}

#[test]
fn test_toggle_erratic_rules() {
    let mut world = facing_off();
    world.ships[0].is_intercepting = true;
    let (next, _) = commands::apply(&world, &PlayerCommand::ToggleErratic, 0.0).unwrap();
    assert!(next.ships[0].is_erratic);
    assert!(!next.ships[0].is_intercepting);

    // Turning it on is refused mid-maneuver; turning it off is not.
    let mut busy = lone_player();
    busy.active_maneuver = Some(ActiveManeuver::new(ManeuverKind::Turn180, 50.0));
    assert_eq!(
        commands::apply(&busy, &PlayerCommand::ToggleErratic, 0.0),
        Err(CommandRejection::ManeuverActive)
    );
    busy.ships[0].is_erratic = true;
    let (next, _) = commands::apply(&busy, &PlayerCommand::ToggleErratic, 0.0).unwrap();
    assert!(!next.ships[0].is_erratic);
}

#[test]
fn test_initiate_maneuver_guards() {
    let mut world = lone_player();
    let (next, _) = commands::apply(
        &world,
        &PlayerCommand::InitiateManeuver {
            kind: ManeuverKind::Turn180,
        },
        0.0,
    )
    .unwrap();
    let maneuver = next.active_maneuver.clone().unwrap();
    assert_eq!(maneuver.charge, 0.0);
    assert_eq!(maneuver.charge_needed, 50.0);

    assert_eq!(
        commands::apply(
            &next,
            &PlayerCommand::InitiateManeuver {
                kind: ManeuverKind::FreeTurn
            },
            0.0
        ),
        Err(CommandRejection::ManeuverActive)
    );

    world.ships[0].is_erratic = true;
    assert_eq!(
        commands::apply(
            &world,
            &PlayerCommand::InitiateManeuver {
                kind: ManeuverKind::FreeTurn
            },
            0.0
        ),
        Err(CommandRejection::HelmBusy)
    );

    let (cancelled, _) = commands::apply(&next, &PlayerCommand::CancelManeuver, 0.0).unwrap();
    assert!(cancelled.active_maneuver.is_none());
}

#[test]
fn test_set_target_rotation_guards() {
    let mut world = lone_player();
    let (next, _) =
        commands::apply(&world, &PlayerCommand::SetTargetRotation { angle: 4.0 }, 0.0).unwrap();
    assert!((next.ships[0].target_rotation.unwrap() - (4.0 - 2.0 * PI)).abs() < 1e-10);

    world.ships[0].is_intercepting = true;
    assert_eq!(
        commands::apply(&world, &PlayerCommand::SetTargetRotation { angle: 1.0 }, 0.0),
        Err(CommandRejection::HelmBusy)
    );
    assert!(matches!(
        commands::apply(
            &lone_player(),
            &PlayerCommand::SetTargetRotation { angle: f64::NAN },
            0.0
        ),
        Err(CommandRejection::InvalidValue(_))
    ));
}

#[test]
fn test_set_desired_speed_clamps() {
    let world = lone_player();
    let (next, _) =
        commands::apply(&world, &PlayerCommand::SetDesiredSpeed { speed: 12.0 }, 0.0).unwrap();
    assert_eq!(next.ships[0].desired_speed, 5.0);
    let (next, _) =
        commands::apply(&world, &PlayerCommand::SetDesiredSpeed { speed: -1.0 }, 0.0).unwrap();
    assert_eq!(next.ships[0].desired_speed, 0.0);
}

#[test]
fn test_set_target_ship_validation() {
    let mut world = facing_off();
    world.target_ship_id = None;
    assert_eq!(
        commands::apply(&world, &PlayerCommand::SetTargetShip { ship_id: 9 }, 0.0),
        Err(CommandRejection::UnknownShip(9))
    );
    assert!(commands::apply(&world, &PlayerCommand::SetTargetShip { ship_id: 1 }, 0.0).is_err());
    let (next, _) =
        commands::apply(&world, &PlayerCommand::SetTargetShip { ship_id: 2 }, 0.0).unwrap();
    assert_eq!(next.target_ship_id, Some(2));

    world.ships[1].destroyed = true;
    assert_eq!(
        commands::apply(&world, &PlayerCommand::SetTargetShip { ship_id: 2 }, 0.0),
        Err(CommandRejection::ShipDestroyed(2))
    );
}

#[test]
fn test_energy_allocation_and_defenses() {
    let world = lone_player();
    let (next, _) = commands::apply(
        &world,
        &PlayerCommand::SetEnergyAllocation {
            component: AllocationTarget::Shield,
            index: 3,
            value: 7,
        },
        0.0,
    )
    .unwrap();
    assert_eq!(next.ships[0].shields[3].allocation, 7);

    assert_eq!(
        commands::apply(
            &world,
            &PlayerCommand::SetEnergyAllocation {
                component: AllocationTarget::Weapon,
                index: 5,
                value: 1,
            },
            0.0
        ),
        Err(CommandRejection::IndexOutOfRange { index: 5, len: 2 })
    );

    let (next, _) =
        commands::apply(&world, &PlayerCommand::SetDefensiveTractors { count: 9 }, 0.0).unwrap();
    assert_eq!(next.ships[0].tractor_beams.defensive_allocation, 2);

    let (next, _) = commands::apply(&world, &PlayerCommand::TogglePointDefense, 0.0).unwrap();
    assert!(next.ships[0].point_defense_active);
}

#[test]
fn test_fire_weapon_gating() {
    let mut world = facing_off();
    let fire = PlayerCommand::FireWeapon {
        ship_id: 1,
        weapon_index: 0,
    };

    assert_eq!(
        commands::apply(&world, &fire, 1.0),
        Err(CommandRejection::FireBlocked(FireBlocked::Uncharged))
    );

    world.ships[0].weapons[0].current_charge = 15.0;
    let (fired, events) = commands::apply(&world, &fire, 1.0).unwrap();
    assert_eq!(fired.projectiles.len(), 1);
    assert_eq!(fired.ships[0].weapons[0].current_charge, 0.0);
    assert_eq!(fired.ships[0].weapons[0].last_fired, Some(1.0));
    assert_eq!(events.len(), 1);

    let mut again = fired.clone();
    again.ships[0].weapons[0].current_charge = 15.0;
    assert_eq!(
        commands::apply(&again, &fire, 1.2),
        Err(CommandRejection::FireBlocked(FireBlocked::Cooldown))
    );

    world.ships[1].position = Vec3::new(0.0, 0.0, 50.0);
    assert_eq!(
        commands::apply(&world, &fire, 1.0),
        Err(CommandRejection::FireBlocked(FireBlocked::OutOfRange))
    );

    world.ships[1].position = Vec3::new(10.0, 0.0, 0.0);
    assert_eq!(
        commands::apply(&world, &fire, 1.0),
        Err(CommandRejection::FireBlocked(FireBlocked::NotFacing))
    );

    world.target_ship_id = None;
    assert_eq!(
        commands::apply(&world, &fire, 1.0),
        Err(CommandRejection::FireBlocked(FireBlocked::NoTarget))
    );
}

// ---- Engine ----

#[test]
fn test_engine_scales_frame_delta() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let snap = engine.advance(1.0);
    assert_eq!(snap.clock.tick, 1);
    assert!((snap.clock.elapsed_secs - 0.125).abs() < 1e-12);
    assert_eq!(snap.speed, GameSpeed::Play);
}

#[test]
fn test_paused_engine_skips_step_but_takes_commands() {
    let mut engine = SimulationEngine::new(SimConfig {
        game_speed: GameSpeed::Paused,
        ..Default::default()
    });
    let before = engine.world().clone();
    let snap = engine.advance(1.0 / 60.0);
    assert_eq!(snap.clock.tick, 0);
    assert_eq!(snap.world, before);

    engine.queue_command(PlayerCommand::SetDesiredSpeed { speed: 3.0 });
    let snap = engine.advance(1.0 / 60.0);
    assert_eq!(snap.world.player().unwrap().desired_speed, 3.0);
    assert_eq!(snap.world.player().unwrap().current_speed, 0.0);
    assert_eq!(snap.clock.tick, 0);

    engine.queue_command(PlayerCommand::SetGameSpeed {
        speed: GameSpeed::Fast,
    });
    let snap = engine.advance(1.0);
    assert_eq!(engine.game_speed(), GameSpeed::Fast);
    assert!((snap.clock.elapsed_secs - 0.25).abs() < 1e-12);
}

#[test]
fn test_rejected_command_leaves_world_unchanged() {
    let mut world = lone_player();
    world.ships[0].decoys.available = 0;
    let mut engine = SimulationEngine::with_world(SimConfig::default(), world.clone());
    engine.queue_commands([PlayerCommand::ToggleIntercept, PlayerCommand::LaunchDecoy]);
    let snap = engine.advance_simulated(0.0);
    assert_eq!(snap.world, world);
    assert!(snap.events.is_empty());
}

#[test]
fn test_engine_drains_events_per_snapshot() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::LaunchDecoy);
    let snap = engine.advance(1.0 / 60.0);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::DecoyLaunched { owner_id: 1, .. })));
    let snap = engine.advance(1.0 / 60.0);
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::DecoyLaunched { .. })));
}

#[test]
fn test_determinism_same_seed() {
    let run = || {
        let mut engine = SimulationEngine::new(SimConfig {
            seed: 12345,
            scenario: ScenarioId::FleetAction,
            game_speed: GameSpeed::Fast,
        });
        engine.queue_command(PlayerCommand::TogglePointDefense);
        (0..600)
            .map(|_| serde_json::to_string(&engine.advance(1.0 / 60.0)).unwrap())
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run(), "Snapshots diverged with same seed");
}

#[test]
fn test_zero_dt_step_is_identity() {
    let world = scenario::build_world(ScenarioId::Duel);
    let out = step(&world, 0.0, 0.0, &mut rng());
    assert_eq!(out.world, world);
    let out = step(&world, f64::NAN, 0.0, &mut rng());
    assert_eq!(out.world, world);
    assert!(out.events.is_empty());
}
