//! State snapshot — the complete visible state published to the UI each tick.
//!
//! External collaborators only ever read these views; all mutation goes
//! through the command queue.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::tma::TmaSolution;
use crate::types::{Kinematics, Position, SimTime};

/// Complete tactical picture published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TacticalSnapshot {
    pub time: SimTime,
    pub time_scale: f64,
    pub mission: MissionView,
    pub ownship: OwnshipView,
    pub trackers: Vec<TrackerView>,
    pub tubes: Vec<TubeStatus>,
    /// Raw detections not yet bound to a tracker, available for designation.
    pub detections: Vec<DetectionView>,
    /// Ground truth, present only while the reveal-truth capability is on.
    pub truth: Option<TruthView>,
    pub events: Vec<SimEvent>,
}

/// Derived mission state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionView {
    pub alert: AlertLevel,
    pub outcome: MissionOutcome,
    /// Live contact count per reported classification.
    pub classified_counts: Vec<(Classification, u32)>,
}

/// Ownship as the player sees it (always truthful — it is their own boat).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnshipView {
    pub position: Position,
    pub kinematics: Kinematics,
    pub destroyed: bool,
}

/// A player-visible tracker estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerView {
    pub tracker_id: u32,
    pub classification: Classification,
    /// Most recent observed bearing (degrees), if any.
    pub latest_bearing_deg: Option<f64>,
    pub observation_count: usize,
    /// Current solution; `None` until the solver has enough history.
    pub solution: Option<TmaSolution>,
    /// AI control state of the linked contact, for the DEV sidebar.
    pub ai_control: AiControl,
    pub engagement: Option<EngagementView>,
}

/// An undesignated detection from the latest sensor pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DetectionView {
    pub contact_id: u32,
    pub bearing_deg: f64,
}

/// Weapon engagement status for one tracker.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EngagementView {
    pub phase: EngagementPhase,
    /// Lock countdown remaining (Detecting) or weapon run remaining (Fired).
    pub remaining_secs: f64,
    pub tube: Option<usize>,
}

/// Ground-truth entity view, gated behind the reveal-truth capability.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TruthView {
    pub contacts: Vec<TruthContactView>,
}

/// One ground-truth contact.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TruthContactView {
    pub contact_id: u32,
    pub position: Position,
    pub kinematics: Kinematics,
    pub class: VesselClass,
    pub ai_control: AiControl,
    pub hostile: bool,
}
