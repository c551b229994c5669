//! Simulation constants and unit conversions.
//!
//! Tactical tuning (baffle arc, search ceiling, lock timing, solver grids)
//! lives in `config.rs` — scenario-tunable, not constant.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 10;

/// Seconds per tick at time scale 1.0.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// One knot in yards per second (2025.372 yd per nautical mile).
pub const KNOTS_TO_YDS_PER_SEC: f64 = 2025.372 / 3600.0;

/// Course or speed change beyond which ownship is considered to have
/// started a new leg.
pub const LEG_COURSE_EPSILON_DEG: f64 = 0.5;
pub const LEG_SPEED_EPSILON_KTS: f64 = 0.1;

/// Maximum time-scale multiplier accepted from the UI.
pub const MAX_TIME_SCALE: f64 = 8.0;
