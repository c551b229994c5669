//! Events emitted by the simulation for UI and audio feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::error::CommandError;

/// Per-tick event feed for the UI collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A new tracker was designated against a contact.
    TrackerDesignated { tracker_id: u32, bearing_deg: f64 },
    /// A tracker was dropped.
    TrackerDropped { tracker_id: u32 },
    /// A tracker's classification threshold was met.
    TrackerClassified {
        tracker_id: u32,
        classification: Classification,
    },
    /// Lock countdown started.
    LockStarted {
        tracker_id: u32,
        countdown_secs: f64,
    },
    /// Lock countdown expired with geometry still valid.
    LockAcquired { tracker_id: u32 },
    /// Lock geometry invalidated mid-countdown; engagement back to idle.
    /// Reported as an event, not an error.
    GeometryInvalid { tracker_id: u32 },
    /// Player aborted a lock or held lock.
    LockAborted { tracker_id: u32 },
    /// A tube finished loading.
    TubeLoaded { index: usize },
    /// Weapon away.
    WeaponFired { tracker_id: u32, tube: usize },
    /// Weapon run complete.
    WeaponResolved { tracker_id: u32, hit: bool },
    /// A contact was destroyed by weapon resolution.
    ContactDestroyed { contact_id: u32 },
    /// The mission reached a terminal outcome.
    MissionOver { outcome: MissionOutcome },
    /// A queued command was rejected with no effect.
    CommandRejected { reason: CommandError },
}
