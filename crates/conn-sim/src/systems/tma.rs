//! Solver bridge: recompute solutions for trackers whose history changed.
//!
//! Recomputation triggers are a new bearing or a completed ownship leg; it
//! is always a full recompute from stored history, never an incremental
//! patch, so a solution can never drift from stale partial updates.

use conn_core::config::TmaConfig;
use conn_tma::LegHistory;

use crate::trackers::TrackerTable;

/// Recompute every dirty tracker.
pub fn run(trackers: &mut TrackerTable, legs: &LegHistory, cfg: &TmaConfig) {
    for tracker in trackers.iter_mut() {
        if !tracker.dirty {
            continue;
        }
        tracker.dirty = false;
        // InsufficientData is a "no solution" state, not an error.
        tracker.solution = conn_tma::solve(&tracker.history, legs, cfg).ok();
    }
}
