use conn_core::enums::{Behavior, VesselClass};
use conn_core::types::Position;

use crate::fsm::{evaluate, ContactContext};
use crate::profiles::params_for;

fn make_context(
    behavior: Behavior,
    range_yd: f64,
    elapsed_in_leg: f64,
    time_in_attack_range: f64,
) -> ContactContext {
    // Contact due north of ownship, heading north.
    ContactContext {
        behavior,
        position: Position::new(0.0, range_yd),
        course_deg: 0.0,
        speed_kts: 5.0,
        own_position: Position::default(),
        range_to_ownship_yd: range_yd,
        elapsed_in_leg_secs: elapsed_in_leg,
        time_in_attack_range_secs: time_in_attack_range,
    }
}

#[test]
fn test_transit_holds_course() {
    let ctx = make_context(Behavior::Transit, 8000.0, 1000.0, 0.0);
    let update = evaluate(&ctx, &params_for(VesselClass::Merchant));
    assert!(!update.changed);
    assert_eq!(update.course_deg, 0.0);
}

#[test]
fn test_patrol_turns_at_leg_end() {
    let params = params_for(VesselClass::Sub);
    let before = make_context(Behavior::Patrol, 8000.0, params.patrol_leg_secs - 1.0, 0.0);
    assert!(!evaluate(&before, &params).changed);

    let due = make_context(Behavior::Patrol, 8000.0, params.patrol_leg_secs + 1.0, 0.0);
    let update = evaluate(&due, &params);
    assert!(update.changed);
    assert!((update.course_deg - params.patrol_turn_deg).abs() < 1e-9);
}

#[test]
fn test_evade_sprints_away_when_close() {
    let params = params_for(VesselClass::Sub);
    let ctx = make_context(Behavior::Evade, params.evade_range_yd - 500.0, 0.0, 0.0);
    let update = evaluate(&ctx, &params);
    assert!(update.changed);
    // Ownship is due south of the contact, so "away" is due north.
    assert!(update.course_deg.abs() < 1e-9);
    assert_eq!(update.speed_kts, params.sprint_speed_kts);
}

#[test]
fn test_evade_settles_back_to_cruise() {
    let params = params_for(VesselClass::Sub);
    let mut ctx = make_context(Behavior::Evade, params.evade_range_yd + 2000.0, 0.0, 0.0);
    ctx.speed_kts = params.sprint_speed_kts;
    let update = evaluate(&ctx, &params);
    assert!(update.changed);
    assert_eq!(update.speed_kts, params.cruise_speed_kts);
}

#[test]
fn test_pursue_steers_at_ownship() {
    let params = params_for(VesselClass::Sub);
    let ctx = make_context(Behavior::Pursue, 8000.0, 0.0, 0.0);
    let update = evaluate(&ctx, &params);
    // Ownship is due south of the contact.
    assert!((update.course_deg - 180.0).abs() < 1e-9);
    assert!(!update.attack);
}

#[test]
fn test_pursue_attacks_after_dwell() {
    let params = params_for(VesselClass::Sub);
    let short = make_context(
        Behavior::Pursue,
        params.attack_range_yd - 100.0,
        0.0,
        params.attack_dwell_secs - 1.0,
    );
    assert!(!evaluate(&short, &params).attack);

    let long = make_context(
        Behavior::Pursue,
        params.attack_range_yd - 100.0,
        0.0,
        params.attack_dwell_secs + 1.0,
    );
    assert!(evaluate(&long, &params).attack);
}

#[test]
fn test_merchant_never_attacks() {
    let params = params_for(VesselClass::Merchant);
    let ctx = make_context(Behavior::Pursue, 100.0, 0.0, 1e9);
    assert!(!evaluate(&ctx, &params).attack);
}
