//! Ownship leg history: maintained-course/speed segments of ownship's track.
//!
//! The tick driver feeds ownship kinematics in each tick; a new leg opens
//! whenever course or speed changes beyond epsilon. The solver reconstructs
//! ownship's position at any observation time from this history alone.

use conn_core::constants::{LEG_COURSE_EPSILON_DEG, LEG_SPEED_EPSILON_KTS, KNOTS_TO_YDS_PER_SEC};
use conn_core::tma::OwnshipLeg;
use conn_core::types::{angle_diff_deg, Position};

/// Ordered, append-only history of ownship legs. The last leg is open-ended.
#[derive(Debug, Clone, Default)]
pub struct LegHistory {
    legs: Vec<OwnshipLeg>,
}

impl LegHistory {
    /// Start a history with an initial leg.
    pub fn new(start_secs: f64, start: Position, course_deg: f64, speed_kts: f64) -> Self {
        Self {
            legs: vec![OwnshipLeg {
                start_secs,
                start,
                course_deg,
                speed_kts,
            }],
        }
    }

    pub fn legs(&self) -> &[OwnshipLeg] {
        &self.legs
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Record ownship kinematics for this tick. Opens a new leg when course
    /// or speed has moved beyond epsilon from the current leg.
    /// Returns true when a new leg opened (a solver recompute trigger).
    pub fn observe(
        &mut self,
        time_secs: f64,
        position: Position,
        course_deg: f64,
        speed_kts: f64,
    ) -> bool {
        let Some(current) = self.legs.last() else {
            self.legs.push(OwnshipLeg {
                start_secs: time_secs,
                start: position,
                course_deg,
                speed_kts,
            });
            return true;
        };

        let course_changed =
            angle_diff_deg(course_deg, current.course_deg).abs() > LEG_COURSE_EPSILON_DEG;
        let speed_changed = (speed_kts - current.speed_kts).abs() > LEG_SPEED_EPSILON_KTS;
        if course_changed || speed_changed {
            self.legs.push(OwnshipLeg {
                start_secs: time_secs,
                start: position,
                course_deg,
                speed_kts,
            });
            return true;
        }
        false
    }

    /// Index of the leg active at time `t`. Times before the first leg map
    /// to the first leg.
    pub fn leg_index_at(&self, t: f64) -> Option<usize> {
        if self.legs.is_empty() {
            return None;
        }
        let mut idx = 0;
        for (i, leg) in self.legs.iter().enumerate() {
            if leg.start_secs <= t {
                idx = i;
            } else {
                break;
            }
        }
        Some(idx)
    }

    /// Ownship position at time `t`, reconstructed by dead reckoning along
    /// the active leg.
    pub fn position_at(&self, t: f64) -> Option<Position> {
        let idx = self.leg_index_at(t)?;
        let leg = &self.legs[idx];
        let dt = (t - leg.start_secs).max(0.0);
        let dist = leg.speed_kts * KNOTS_TO_YDS_PER_SEC * dt;
        Some(leg.start.offset(leg.course_deg, dist))
    }

    /// Number of distinct legs represented among the given timestamps.
    pub fn distinct_legs_spanning(&self, times: impl IntoIterator<Item = f64>) -> usize {
        let mut seen: Vec<usize> = Vec::new();
        for t in times {
            if let Some(idx) = self.leg_index_at(t) {
                if !seen.contains(&idx) {
                    seen.push(idx);
                }
            }
        }
        seen.len()
    }
}
