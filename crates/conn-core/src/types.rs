//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

use crate::constants::KNOTS_TO_YDS_PER_SEC;

/// Planar position in the tactical frame (yards).
/// x = East, y = North.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Course, speed, and depth of an entity.
/// Course in degrees true (0 = North, clockwise), speed in knots,
/// depth in feet (positive down).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub course_deg: f64,
    pub speed_kts: f64,
    pub depth_ft: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds (time-scale already applied).
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Range to another position in yards.
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True bearing to another position in degrees (0 = North, clockwise).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).to_degrees().rem_euclid(360.0)
    }

    /// Position displaced along a course (degrees true) by a distance (yards).
    pub fn offset(&self, course_deg: f64, distance_yd: f64) -> Position {
        let rad = course_deg.to_radians();
        Position {
            x: self.x + distance_yd * rad.sin(),
            y: self.y + distance_yd * rad.cos(),
        }
    }
}

impl Kinematics {
    pub fn new(course_deg: f64, speed_kts: f64, depth_ft: f64) -> Self {
        Self {
            course_deg: course_deg.rem_euclid(360.0),
            speed_kts,
            depth_ft,
        }
    }

    /// Speed in yards per second.
    pub fn speed_yds_per_sec(&self) -> f64 {
        self.speed_kts * KNOTS_TO_YDS_PER_SEC
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Smallest signed angular difference `a - b` in degrees, in [-180, 180).
pub fn angle_diff_deg(a: f64, b: f64) -> f64 {
    (a - b + 180.0).rem_euclid(360.0) - 180.0
}
