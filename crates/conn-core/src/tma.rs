//! TMA data model: bearing observations, ownship legs, and solutions.
//!
//! These are the inputs and outputs of the bearings-only solver. The solver
//! itself lives in `conn-tma`; these types are shared vocabulary because the
//! tracker store and snapshot views carry them too.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// A single noisy bearing observation. Immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BearingObservation {
    /// Simulation time of the observation (seconds).
    pub time_secs: f64,
    /// Observed true bearing, degrees in [0, 360).
    pub bearing_deg: f64,
    /// Contact id of the source entity. Carried for designation plumbing
    /// only — the solver never sees it.
    pub contact_id: u32,
}

/// A maintained-course/speed segment of ownship's own track.
///
/// Bearings-only ranging needs at least two geometrically distinct legs;
/// the solver partitions the bearing history by the leg active at each
/// observation's timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OwnshipLeg {
    /// Time the leg opened (seconds).
    pub start_secs: f64,
    /// Ownship position when the leg opened.
    pub start: Position,
    /// Course held on this leg (degrees true).
    pub course_deg: f64,
    /// Speed held on this leg (knots).
    pub speed_kts: f64,
}

/// Range component of a TMA solution.
///
/// Tagged variant rather than a nullable field so callers cannot forget to
/// check resolution state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RangeSolution {
    /// Two range candidates remain consistent with the bearing history:
    /// the near/far pair from a single-maneuver geometry, or the full
    /// candidate bracket when fewer than two legs are represented.
    Ambiguous { near_yd: f64, far_yd: f64 },
    /// A single range survived; requires a sufficient maneuver baseline.
    Resolved { range_yd: f64 },
}

impl RangeSolution {
    /// The single resolved range, if any. `Ambiguous` reports `None` —
    /// never a deterministic range.
    pub fn range_yd(&self) -> Option<f64> {
        match *self {
            RangeSolution::Resolved { range_yd } => Some(range_yd),
            RangeSolution::Ambiguous { .. } => None,
        }
    }

    /// Both candidates, near first. A resolved range repeats itself.
    pub fn candidates(&self) -> (f64, f64) {
        match *self {
            RangeSolution::Ambiguous { near_yd, far_yd } => (near_yd, far_yd),
            RangeSolution::Resolved { range_yd } => (range_yd, range_yd),
        }
    }
}

/// The solver's output: a pure function of {bearing history, leg history}.
/// Recomputed in full on every trigger, never incrementally patched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TmaSolution {
    pub range: RangeSolution,
    /// Best-fit target course (degrees true).
    pub course_deg: f64,
    /// Best-fit target speed (knots).
    pub speed_kts: f64,
    /// Probable-error spread in [0, 1]: the normalized width of the residual
    /// valley around the best fit. Flat minimum (short baseline) reads high,
    /// signaling an unreliable solution.
    pub spread: f64,
    /// RMS bearing residual of the best fit (degrees).
    pub rms_residual_deg: f64,
}
