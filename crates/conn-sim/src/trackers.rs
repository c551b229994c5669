//! Tracker store — the player-visible contact estimates.
//!
//! Plain-data store owned by the engine, not ECS entities. The ground-truth
//! linkage (which contact a tracker estimates) is a separate side-table
//! consulted only by classification and mission grading; the solver works
//! from `{bearing history, ownship legs}` alone.

use std::collections::BTreeMap;

use conn_core::enums::Classification;
use conn_core::error::CommandError;
use conn_core::tma::{BearingObservation, TmaSolution};

/// One tracker estimate.
#[derive(Debug, Clone)]
pub struct Tracker {
    pub id: u32,
    /// Simulation time of designation (seconds).
    pub designated_at_secs: f64,
    pub classification: Classification,
    /// Time-ordered bearing history, pruned to the retention window.
    pub history: Vec<BearingObservation>,
    /// Current solution; `None` until the solver has enough history.
    pub solution: Option<TmaSolution>,
    /// Set when new history or a new ownship leg requires a recompute.
    pub dirty: bool,
}

/// The live tracker set plus the ground-truth side-table.
#[derive(Debug, Clone, Default)]
pub struct TrackerTable {
    next_id: u32,
    trackers: BTreeMap<u32, Tracker>,
    /// tracker id -> contact id. Never handed to the solver.
    truth_links: BTreeMap<u32, u32>,
}

impl TrackerTable {
    /// Designate a new tracker against a source contact.
    /// At most one live tracker per source; ids are never reused.
    pub fn designate(&mut self, contact_id: u32, now_secs: f64) -> Result<u32, CommandError> {
        if self.truth_links.values().any(|&c| c == contact_id) {
            return Err(CommandError::AlreadyDesignated);
        }
        let id = self.next_id;
        self.next_id += 1;
        self.trackers.insert(
            id,
            Tracker {
                id,
                designated_at_secs: now_secs,
                classification: Classification::Unknown,
                history: Vec::new(),
                solution: None,
                dirty: false,
            },
        );
        self.truth_links.insert(id, contact_id);
        Ok(id)
    }

    /// Append an observation. A missing tracker drops the observation
    /// silently — expected when a drop races an in-flight observation.
    pub fn record_observation(
        &mut self,
        tracker_id: u32,
        obs: BearingObservation,
        retention_secs: f64,
    ) {
        let Some(tracker) = self.trackers.get_mut(&tracker_id) else {
            return;
        };
        tracker.history.push(obs);
        let cutoff = obs.time_secs - retention_secs;
        tracker.history.retain(|o| o.time_secs >= cutoff);
        tracker.dirty = true;
    }

    /// Destroy a tracker. Idempotent; returns whether it existed.
    /// The caller cascades to any dependent engagement.
    pub fn drop_tracker(&mut self, tracker_id: u32) -> bool {
        self.truth_links.remove(&tracker_id);
        self.trackers.remove(&tracker_id).is_some()
    }

    pub fn get(&self, tracker_id: u32) -> Option<&Tracker> {
        self.trackers.get(&tracker_id)
    }

    pub fn get_mut(&mut self, tracker_id: u32) -> Option<&mut Tracker> {
        self.trackers.get_mut(&tracker_id)
    }

    /// The contact a tracker estimates (scoring/classification only).
    pub fn linked_contact(&self, tracker_id: u32) -> Option<u32> {
        self.truth_links.get(&tracker_id).copied()
    }

    /// The live tracker bound to a contact, if any.
    pub fn tracker_for_contact(&self, contact_id: u32) -> Option<u32> {
        self.truth_links
            .iter()
            .find(|(_, &c)| c == contact_id)
            .map(|(&t, _)| t)
    }

    /// Trackers in id order (deterministic iteration).
    pub fn iter(&self) -> impl Iterator<Item = &Tracker> {
        self.trackers.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tracker> {
        self.trackers.values_mut()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.trackers.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// Mark every tracker for recompute (a new ownship leg completed).
    pub fn mark_all_dirty(&mut self) {
        for tracker in self.trackers.values_mut() {
            if !tracker.history.is_empty() {
                tracker.dirty = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(t: f64) -> BearingObservation {
        BearingObservation {
            time_secs: t,
            bearing_deg: 45.0,
            contact_id: 7,
        }
    }

    #[test]
    fn test_one_live_tracker_per_source() {
        let mut table = TrackerTable::default();
        let id = table.designate(7, 0.0).unwrap();
        assert_eq!(table.designate(7, 1.0), Err(CommandError::AlreadyDesignated));
        assert!(table.drop_tracker(id));
        // After the drop, the source can be designated again.
        let id2 = table.designate(7, 2.0).unwrap();
        assert_ne!(id, id2, "ids are never reused");
    }

    #[test]
    fn test_record_to_missing_tracker_is_silent() {
        let mut table = TrackerTable::default();
        table.record_observation(99, obs(1.0), 900.0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_drop_is_idempotent() {
        let mut table = TrackerTable::default();
        let id = table.designate(7, 0.0).unwrap();
        assert!(table.drop_tracker(id));
        assert!(!table.drop_tracker(id));
    }

    #[test]
    fn test_history_retention_prunes_oldest() {
        let mut table = TrackerTable::default();
        let id = table.designate(7, 0.0).unwrap();
        table.record_observation(id, obs(0.0), 100.0);
        table.record_observation(id, obs(50.0), 100.0);
        table.record_observation(id, obs(200.0), 100.0);
        let tracker = table.get(id).unwrap();
        assert_eq!(tracker.history.len(), 2, "t=0 falls outside the window");
        assert!(tracker.history.iter().all(|o| o.time_secs >= 100.0));
    }
}
