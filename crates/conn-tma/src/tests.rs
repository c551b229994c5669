use conn_core::config::TmaConfig;
use conn_core::constants::KNOTS_TO_YDS_PER_SEC;
use conn_core::error::SolveError;
use conn_core::tma::{BearingObservation, RangeSolution};
use conn_core::types::Position;

use crate::legs::LegHistory;
use crate::solver::solve;

/// Ownship maneuver plan: (start_secs, course_deg, speed_kts) legs.
fn build_legs(plan: &[(f64, f64, f64)]) -> LegHistory {
    let mut legs = LegHistory::default();
    let mut pos = Position::default();
    let mut last: Option<(f64, f64, f64)> = None;
    for &(start, course, speed) in plan {
        if let Some((prev_start, prev_course, prev_speed)) = last {
            let dist = prev_speed * KNOTS_TO_YDS_PER_SEC * (start - prev_start);
            pos = pos.offset(prev_course, dist);
        }
        legs.observe(start, pos, course, speed);
        last = Some((start, course, speed));
    }
    legs
}

/// Noiseless bearing history for a constant-velocity target.
fn synthetic_bearings(
    legs: &LegHistory,
    target_start: Position,
    target_course: f64,
    target_speed_kts: f64,
    duration_secs: f64,
    interval_secs: f64,
) -> Vec<BearingObservation> {
    let spd = target_speed_kts * KNOTS_TO_YDS_PER_SEC;
    let mut out = Vec::new();
    let mut t = 0.0;
    while t <= duration_secs {
        let own = legs.position_at(t).unwrap();
        let target = target_start.offset(target_course, spd * t);
        out.push(BearingObservation {
            time_secs: t,
            bearing_deg: own.bearing_to(&target),
            contact_id: 1,
        });
        t += interval_secs;
    }
    out
}

/// Deterministic bearing jitter, decorrelated sample to sample.
fn jitter(bearings: &mut [BearingObservation], amp_deg: f64) {
    for (i, obs) in bearings.iter_mut().enumerate() {
        obs.bearing_deg += amp_deg * (i as f64 * 2.399_963).sin();
    }
}

// ---- Leg history ----

#[test]
fn test_leg_opens_on_course_change() {
    let mut legs = LegHistory::new(0.0, Position::default(), 0.0, 5.0);
    assert!(!legs.observe(10.0, Position::new(0.0, 28.0), 0.0, 5.0));
    assert!(legs.observe(60.0, Position::new(0.0, 168.0), 90.0, 5.0));
    assert_eq!(legs.legs().len(), 2);
}

#[test]
fn test_position_reconstruction_along_leg() {
    let legs = LegHistory::new(0.0, Position::default(), 0.0, 10.0);
    let p = legs.position_at(60.0).unwrap();
    // 10 kt north for 60 s ≈ 337.6 yd
    assert!(p.x.abs() < 1e-9);
    assert!((p.y - 10.0 * KNOTS_TO_YDS_PER_SEC * 60.0).abs() < 1e-6);
}

#[test]
fn test_distinct_legs_spanning() {
    let legs = build_legs(&[(0.0, 0.0, 5.0), (60.0, 90.0, 5.0)]);
    assert_eq!(legs.distinct_legs_spanning([10.0, 20.0]), 1);
    assert_eq!(legs.distinct_legs_spanning([10.0, 70.0]), 2);
}

// ---- Solver failure modes ----

#[test]
fn test_insufficient_data_below_two_bearings() {
    let legs = LegHistory::new(0.0, Position::default(), 0.0, 5.0);
    let cfg = TmaConfig::default();
    assert_eq!(
        solve(&[], &legs, &cfg).unwrap_err(),
        SolveError::InsufficientData
    );
    let one = [BearingObservation {
        time_secs: 0.0,
        bearing_deg: 45.0,
        contact_id: 1,
    }];
    assert_eq!(
        solve(&one, &legs, &cfg).unwrap_err(),
        SolveError::InsufficientData
    );
}

// ---- Single-leg ambiguity ----

#[test]
fn test_single_leg_never_resolves_range() {
    let legs = build_legs(&[(0.0, 0.0, 5.0)]);
    let target_start = Position::default().offset(45.0, 2000.0);
    let bearings = synthetic_bearings(&legs, target_start, 90.0, 8.0, 120.0, 2.0);

    let solution = solve(&bearings, &legs, &TmaConfig::default()).unwrap();
    assert_eq!(solution.range.range_yd(), None, "single leg must not range");
    let (near, far) = solution.range.candidates();
    assert!(near < far, "ambiguity pair must be non-empty: {near} {far}");
    assert!(solution.spread > 0.9, "flat valley: spread={}", solution.spread);
}

// ---- Two-leg resolution ----

#[test]
fn test_two_legs_resolve_range_within_15_percent() {
    let legs = build_legs(&[(0.0, 0.0, 5.0), (60.0, 90.0, 5.0)]);
    let target_start = Position::default().offset(45.0, 2000.0);
    let bearings = synthetic_bearings(&legs, target_start, 90.0, 8.0, 120.0, 2.0);

    let solution = solve(&bearings, &legs, &TmaConfig::default()).unwrap();
    let range = match solution.range {
        RangeSolution::Resolved { range_yd } => range_yd,
        RangeSolution::Ambiguous { near_yd, far_yd } => {
            // If a far candidate survives, the near one must be the truth.
            assert!(
                (near_yd - 2000.0).abs() / 2000.0 < 0.15,
                "near candidate off truth: near={near_yd} far={far_yd}"
            );
            near_yd
        }
    };
    assert!(
        (range - 2000.0).abs() / 2000.0 < 0.15,
        "range estimate {range} not within 15% of 2000"
    );
}

/// Accuracy under realistic bearing noise: a near crosser and a distant
/// opening contact both resolve within 15% of truth after one maneuver.
#[test]
fn test_two_legs_range_both_contacts_under_noise() {
    let legs = build_legs(&[(0.0, 0.0, 10.0), (60.0, 90.0, 10.0)]);
    let cases = [
        (45.0, 2_000.0, 90.0, 8.0),
        (90.0, 5_000.0, 180.0, 6.0),
    ];
    for (bearing, range, course, speed) in cases {
        let start = Position::default().offset(bearing, range);
        let mut bearings = synthetic_bearings(&legs, start, course, speed, 120.0, 5.0);
        jitter(&mut bearings, 0.1);

        let solution = solve(&bearings, &legs, &TmaConfig::default()).unwrap();
        let est = match solution.range {
            RangeSolution::Resolved { range_yd } => range_yd,
            other => panic!("contact at {range} yd stayed ambiguous: {other:?}"),
        };
        assert!(
            (est - range).abs() / range < 0.15,
            "contact at {range} yd: estimate {est} outside 15%"
        );
    }
}

#[test]
fn test_two_legs_velocity_converges() {
    let legs = build_legs(&[(0.0, 0.0, 5.0), (60.0, 90.0, 5.0)]);
    let target_start = Position::default().offset(90.0, 5000.0);
    let bearings = synthetic_bearings(&legs, target_start, 180.0, 6.0, 120.0, 2.0);

    let solution = solve(&bearings, &legs, &TmaConfig::default()).unwrap();
    let course_err = conn_core::types::angle_diff_deg(solution.course_deg, 180.0).abs();
    assert!(course_err < 20.0, "course estimate off: {}", solution.course_deg);
    assert!(
        (solution.speed_kts - 6.0).abs() < 4.0,
        "speed estimate off: {}",
        solution.speed_kts
    );
}

/// Convergence property: finer grids fit at least as well as coarse ones.
#[test]
fn test_grid_refinement_reduces_residual() {
    let legs = build_legs(&[(0.0, 0.0, 5.0), (60.0, 90.0, 5.0)]);
    let target_start = Position::default().offset(45.0, 2000.0);
    let bearings = synthetic_bearings(&legs, target_start, 90.0, 8.0, 120.0, 2.0);

    let coarse_cfg = TmaConfig {
        course_step_deg: 30.0,
        speed_step_kts: 5.0,
        refine_passes: 0,
        ..Default::default()
    };
    let fine_cfg = TmaConfig {
        course_step_deg: 5.0,
        speed_step_kts: 1.0,
        refine_passes: 3,
        ..Default::default()
    };

    let coarse = solve(&bearings, &legs, &coarse_cfg).unwrap();
    let fine = solve(&bearings, &legs, &fine_cfg).unwrap();
    assert!(
        fine.rms_residual_deg <= coarse.rms_residual_deg + 1e-9,
        "fine grid should not fit worse: fine={} coarse={}",
        fine.rms_residual_deg,
        coarse.rms_residual_deg
    );
}

/// A maneuver tightens the probable-error spread.
#[test]
fn test_maneuver_tightens_spread() {
    let target_start = Position::default().offset(45.0, 2000.0);

    let one_leg = build_legs(&[(0.0, 0.0, 5.0)]);
    let b1 = synthetic_bearings(&one_leg, target_start, 90.0, 8.0, 120.0, 2.0);
    let s1 = solve(&b1, &one_leg, &TmaConfig::default()).unwrap();

    let two_legs = build_legs(&[(0.0, 0.0, 5.0), (60.0, 90.0, 5.0)]);
    let b2 = synthetic_bearings(&two_legs, target_start, 90.0, 8.0, 120.0, 2.0);
    let s2 = solve(&b2, &two_legs, &TmaConfig::default()).unwrap();

    assert!(
        s2.spread < s1.spread,
        "maneuver should tighten spread: before={} after={}",
        s1.spread,
        s2.spread
    );
}
