//! Player commands sent from the UI collaborator to the simulation.
//!
//! Commands are queued and applied at the next tick boundary in arrival
//! order; conflicting commands against the same tracker are resolved by that
//! ordering alone.

use serde::{Deserialize, Serialize};

/// A partial kinematic update for a contact. `None` fields are left as-is.
/// Applying one to an `Active` contact flips it to `Overridden` atomically.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ManualUpdate {
    pub course_deg: Option<f64>,
    pub speed_kts: Option<f64>,
    pub depth_ft: Option<f64>,
}

/// All possible player actions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    // --- Tracker management ---
    /// Designate a tracker against a detected contact.
    DesignateTracker { contact_id: u32 },
    /// Drop a tracker (and any dependent engagement).
    DropTracker { tracker_id: u32 },

    // --- Contact control ---
    /// Manually update a contact's kinematics. Side effect: AI control flips
    /// to `Overridden` before any AI motion runs this tick.
    RecordManualUpdate {
        contact_id: u32,
        update: ManualUpdate,
    },
    /// Return an overridden contact to autonomous control.
    ResumeAi { contact_id: u32 },

    // --- Weapon control ---
    /// Start the detection/lock countdown against a tracker ("force detect").
    StartLock { tracker_id: u32 },
    /// Abort an in-progress lock or a held lock.
    AbortLock { tracker_id: u32 },
    /// Begin loading a tube.
    LoadTube { index: usize },
    /// Fire at a locked tracker, consuming a loaded tube.
    Fire { tracker_id: u32 },

    // --- Helm ---
    /// Order a new ownship course (degrees true).
    SetOwnshipCourse { course_deg: f64 },
    /// Order a new ownship speed (knots).
    SetOwnshipSpeed { speed_kts: f64 },
    /// Order a new ownship depth (feet).
    SetOwnshipDepth { depth_ft: f64 },

    // --- Session control ---
    /// Set time scale (1.0 = real time).
    SetTimeScale { scale: f64 },
    /// Gate the ground-truth view in snapshots (debug capability).
    RevealTruth { on: bool },
    /// Reset the mission from a scenario snapshot. Handled by the engine,
    /// which carries the scenario payload separately.
    ResetMission,
}
