//! Behavior evaluation for a single autonomous contact.

use conn_core::enums::Behavior;
use conn_core::types::Position;

use crate::profiles::BehaviorParams;

/// Input to the behavior evaluation for one contact.
pub struct ContactContext {
    pub behavior: Behavior,
    pub position: Position,
    pub course_deg: f64,
    pub speed_kts: f64,
    pub own_position: Position,
    pub range_to_ownship_yd: f64,
    /// Seconds the contact has held its current patrol leg.
    pub elapsed_in_leg_secs: f64,
    /// Accumulated seconds inside attack range (pursue only).
    pub time_in_attack_range_secs: f64,
}

/// Output of the behavior evaluation.
pub struct ContactUpdate {
    pub course_deg: f64,
    pub speed_kts: f64,
    /// True when course or speed changed (resets the contact's leg timer).
    pub changed: bool,
    /// True when a pursuer has pressed its attack home this tick.
    pub attack: bool,
}

/// Evaluate one contact. Pure: same context, same update.
pub fn evaluate(ctx: &ContactContext, params: &BehaviorParams) -> ContactUpdate {
    match ctx.behavior {
        Behavior::Transit => hold(ctx),
        Behavior::Patrol => evaluate_patrol(ctx, params),
        Behavior::Evade => evaluate_evade(ctx, params),
        Behavior::Pursue => evaluate_pursue(ctx, params),
    }
}

fn hold(ctx: &ContactContext) -> ContactUpdate {
    ContactUpdate {
        course_deg: ctx.course_deg,
        speed_kts: ctx.speed_kts,
        changed: false,
        attack: false,
    }
}

/// Patrol: hold each leg for the configured time, then turn.
fn evaluate_patrol(ctx: &ContactContext, params: &BehaviorParams) -> ContactUpdate {
    if ctx.elapsed_in_leg_secs >= params.patrol_leg_secs {
        return ContactUpdate {
            course_deg: (ctx.course_deg + params.patrol_turn_deg).rem_euclid(360.0),
            speed_kts: params.cruise_speed_kts,
            changed: true,
            attack: false,
        };
    }
    hold(ctx)
}

/// Evade: sprint directly away from ownship while it is close, settle back
/// to cruise once it opens out.
fn evaluate_evade(ctx: &ContactContext, params: &BehaviorParams) -> ContactUpdate {
    if ctx.range_to_ownship_yd < params.evade_range_yd {
        let away = ctx.own_position.bearing_to(&ctx.position);
        let changed = (away - ctx.course_deg).abs() > 1e-9
            || (params.sprint_speed_kts - ctx.speed_kts).abs() > 1e-9;
        return ContactUpdate {
            course_deg: away,
            speed_kts: params.sprint_speed_kts,
            changed,
            attack: false,
        };
    }
    if (ctx.speed_kts - params.cruise_speed_kts).abs() > 1e-9 {
        return ContactUpdate {
            course_deg: ctx.course_deg,
            speed_kts: params.cruise_speed_kts,
            changed: true,
            attack: false,
        };
    }
    hold(ctx)
}

/// Pursue: steer at ownship; once inside attack range long enough, the
/// attack lands (the scenario loss condition).
fn evaluate_pursue(ctx: &ContactContext, params: &BehaviorParams) -> ContactUpdate {
    let intercept = ctx.position.bearing_to(&ctx.own_position);
    let attack = ctx.range_to_ownship_yd <= params.attack_range_yd
        && ctx.time_in_attack_range_secs >= params.attack_dwell_secs;
    let changed = (intercept - ctx.course_deg).abs() > 1e-9
        || (params.pursue_speed_kts - ctx.speed_kts).abs() > 1e-9;
    ContactUpdate {
        course_deg: intercept,
        speed_kts: params.pursue_speed_kts,
        changed,
        attack,
    }
}
