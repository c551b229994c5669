//! Engagement data model — the weapon sequence state for one tracker.
//!
//! Stored in the engine's engagement map, keyed by tracker id. `Idle` is the
//! absence of an entry; an `EngagementState` exists only while a lock or
//! weapon run is in progress, and losing the parent tracker cancels it
//! unconditionally.

use conn_core::enums::EngagementPhase;

/// An in-progress engagement against one tracker.
#[derive(Debug, Clone)]
pub struct EngagementState {
    pub tracker_id: u32,
    pub phase: EngagementPhase,
    /// Lock countdown remaining (Detecting) or weapon run remaining (Fired).
    pub remaining_secs: f64,
    /// Tube consumed at fire time.
    pub tube: Option<usize>,
    /// Probability of kill captured at fire time.
    pub pk: f64,
}

impl EngagementState {
    /// Start the detection/lock countdown.
    pub fn detecting(tracker_id: u32, countdown_secs: f64) -> Self {
        Self {
            tracker_id,
            phase: EngagementPhase::Detecting,
            remaining_secs: countdown_secs,
            tube: None,
            pk: 0.0,
        }
    }
}
