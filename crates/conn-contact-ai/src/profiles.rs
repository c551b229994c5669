//! Behavior parameters per vessel class.
//!
//! Consolidates the per-class tuning the FSM reads. Values are defaults; a
//! scenario can override the behavior assigned to each contact but the
//! class parameters here set how that behavior is flown.

use conn_core::enums::VesselClass;

/// Tuning for one contact's behavior evaluation.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorParams {
    /// Ordinary cruising speed (knots).
    pub cruise_speed_kts: f64,
    /// Ownship closer than this triggers evasion (yards).
    pub evade_range_yd: f64,
    /// Sprint speed while evading (knots).
    pub sprint_speed_kts: f64,
    /// Seconds a patrol leg is held before turning.
    pub patrol_leg_secs: f64,
    /// Turn applied at the end of each patrol leg (degrees, clockwise).
    pub patrol_turn_deg: f64,
    /// Closing speed while pursuing ownship (knots).
    pub pursue_speed_kts: f64,
    /// Range inside which a pursuer can press an attack (yards).
    pub attack_range_yd: f64,
    /// Dwell inside attack range before the attack lands (seconds).
    pub attack_dwell_secs: f64,
}

/// Parameters for a vessel class.
pub fn params_for(class: VesselClass) -> BehaviorParams {
    match class {
        VesselClass::Merchant => BehaviorParams {
            cruise_speed_kts: 12.0,
            evade_range_yd: 1_000.0,
            sprint_speed_kts: 14.0,
            patrol_leg_secs: 600.0,
            patrol_turn_deg: 20.0,
            pursue_speed_kts: 12.0,
            attack_range_yd: 0.0,
            attack_dwell_secs: f64::INFINITY,
        },
        VesselClass::Warship => BehaviorParams {
            cruise_speed_kts: 15.0,
            evade_range_yd: 4_000.0,
            sprint_speed_kts: 28.0,
            patrol_leg_secs: 240.0,
            patrol_turn_deg: 60.0,
            pursue_speed_kts: 20.0,
            attack_range_yd: 3_000.0,
            attack_dwell_secs: 45.0,
        },
        VesselClass::Sub => BehaviorParams {
            cruise_speed_kts: 5.0,
            evade_range_yd: 3_000.0,
            sprint_speed_kts: 18.0,
            patrol_leg_secs: 300.0,
            patrol_turn_deg: 90.0,
            pursue_speed_kts: 8.0,
            attack_range_yd: 2_500.0,
            attack_dwell_secs: 30.0,
        },
    }
}
