//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Tracker classification as shown to the player.
///
/// A tracker reports `Unknown` until the classification threshold is met,
/// then the truth class of its linked entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[default]
    Unknown,
    Merchant,
    Warship,
    Sub,
}

/// Ground-truth vessel class of a contact entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VesselClass {
    Merchant,
    Warship,
    Sub,
}

impl VesselClass {
    /// The classification a tracker reports once the threshold is met.
    pub fn as_classification(self) -> Classification {
        match self {
            VesselClass::Merchant => Classification::Merchant,
            VesselClass::Warship => Classification::Warship,
            VesselClass::Sub => Classification::Sub,
        }
    }
}

/// AI control state for a contact. Two-state machine: a manual kinematic
/// update flips `Active -> Overridden`; only an explicit resume flips back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiControl {
    #[default]
    Active,
    Overridden,
}

/// Behavior profile driving an AI-controlled contact.
/// Profile parameters are scenario data (see conn-contact-ai), not core logic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    /// Hold course and speed.
    #[default]
    Transit,
    /// Cycle between patrol legs, turning at the ends.
    Patrol,
    /// Turn away and sprint when ownship closes.
    Evade,
    /// Close ownship; attacks when inside attack range long enough.
    Pursue,
}

/// Torpedo tube status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TubeStatus {
    /// No weapon in the tube.
    Empty,
    /// Weapon being loaded; counts down to `Loaded`.
    Loading { remaining_secs: f64 },
    /// Weapon ready to fire.
    Loaded,
}

/// Engagement lifecycle phase. `Idle` is the absence of an engagement;
/// an `EngagementState` exists only in the phases below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngagementPhase {
    /// Lock countdown running, geometry re-checked each tick.
    Detecting,
    /// Countdown expired with geometry still valid; eligible to fire.
    Locked,
    /// Weapon away, run timer counting down to resolution.
    Fired,
}

/// Derived alert level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    /// No hostile-classified tracker.
    #[default]
    Normal,
    /// Hostile tracker exists, no engagement locked or fired.
    Alert,
    /// An engagement is locked or fired.
    Engaged,
}

/// Mission outcome. `Victory` and `Defeat` are terminal: once entered, the
/// mission ignores further world changes until reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionOutcome {
    #[default]
    InProgress,
    Victory,
    Defeat,
}
