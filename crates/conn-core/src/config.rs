//! Tactical tuning parameters.
//!
//! Baffle arc shape, search ceiling, lock timing, and solver grids are
//! scenario-tunable inputs, so they live here as configuration structs with
//! documented defaults rather than hardcoded constants.

use serde::{Deserialize, Serialize};

/// Sonar detection and bearing-noise model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Half-width of the baffle arc about dead astern (degrees). A contact
    /// whose relative bearing falls inside the arc is never detected.
    pub baffle_half_width_deg: f64,
    /// Range inside which detection is guaranteed (yards).
    pub sure_detect_range_yd: f64,
    /// Range beyond which detection never occurs (yards).
    pub max_range_yd: f64,
    /// Logistic slope of the detection-probability falloff (dB).
    pub detect_slope_db: f64,
    /// Bearing noise standard deviation at zero range (degrees).
    pub base_noise_deg: f64,
    /// Range at which bearing noise has doubled (yards).
    pub noise_ref_range_yd: f64,
    /// Seconds between sonar samples. The array integrates between samples;
    /// ticks in between produce no new observations.
    pub sample_interval_secs: f64,
    /// Radiated source level by vessel class, as a dB offset on the
    /// detection budget. Loud traffic detects farther out, a quiet boat
    /// closes well inside the nominal curve before it is held.
    pub source_level_merchant_db: f64,
    pub source_level_warship_db: f64,
    pub source_level_sub_db: f64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            baffle_half_width_deg: 30.0,
            sure_detect_range_yd: 1_000.0,
            max_range_yd: 40_000.0,
            detect_slope_db: 6.0,
            base_noise_deg: 0.5,
            noise_ref_range_yd: 10_000.0,
            sample_interval_secs: 2.0,
            source_level_merchant_db: 6.0,
            source_level_warship_db: 3.0,
            source_level_sub_db: -6.0,
        }
    }
}

/// Tracker lifecycle parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Seconds after designation before classification becomes available.
    pub classify_after_secs: f64,
    /// Bearing history retention window (seconds); older entries are pruned.
    pub history_retention_secs: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            classify_after_secs: 5.0,
            history_retention_secs: 900.0,
        }
    }
}

/// TMA solver grid and ambiguity parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmaConfig {
    /// Minimum candidate range (yards).
    pub min_range_yd: f64,
    /// Maximum candidate range (yards).
    pub max_range_yd: f64,
    /// Number of log-spaced points in the candidate range grid.
    pub range_grid_points: usize,
    /// Course grid step (degrees) for the coarse velocity-triage pass.
    pub course_step_deg: f64,
    /// Speed grid step (knots) for the coarse velocity-triage pass.
    pub speed_step_kts: f64,
    /// Maximum candidate target speed (knots).
    pub max_speed_kts: f64,
    /// Number of velocity-grid refinement passes after the coarse sweep.
    pub refine_passes: u32,
    /// A second range minimum within this ratio of the best score keeps the
    /// solution ambiguous (R1/R2).
    pub ambiguity_ratio: f64,
}

impl Default for TmaConfig {
    fn default() -> Self {
        Self {
            min_range_yd: 500.0,
            max_range_yd: 40_000.0,
            range_grid_points: 24,
            course_step_deg: 10.0,
            speed_step_kts: 2.0,
            max_speed_kts: 30.0,
            refine_passes: 2,
            ambiguity_ratio: 1.5,
        }
    }
}

/// Weapon control parameters: tube bank, lock timing, lock geometry gates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponConfig {
    /// Number of torpedo tubes.
    pub tube_count: usize,
    /// Seconds to load one tube.
    pub load_time_secs: f64,
    /// Base lock countdown duration (seconds) at point-blank range.
    pub base_lock_secs: f64,
    /// Range at which the lock countdown has doubled (yards).
    pub lock_range_factor_yd: f64,
    /// Targets shallower than this depth (feet) are never lockable.
    pub search_ceiling_ft: f64,
    /// Weapon run speed (knots), sets the run timer from target range.
    pub weapon_speed_kts: f64,
    /// Base probability of kill at fire resolution.
    pub base_pk: f64,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            tube_count: 4,
            load_time_secs: 30.0,
            base_lock_secs: 6.0,
            lock_range_factor_yd: 10_000.0,
            search_ceiling_ft: 150.0,
            weapon_speed_kts: 45.0,
            base_pk: 0.85,
        }
    }
}
