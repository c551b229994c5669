//! Mission evaluation: derived alert level and terminal outcome.
//!
//! Alert is never commanded: it is recomputed each tick from the tracker
//! set and the engagement map. Outcome transitions are evaluated only while
//! `InProgress`; the engine latches terminal states.

use std::collections::BTreeMap;

use hecs::World;

use conn_core::components::{Contact, ContactMeta};
use conn_core::enums::{AlertLevel, Classification, EngagementPhase, MissionOutcome};

use crate::engagement::EngagementState;
use crate::trackers::TrackerTable;

/// Result of one mission evaluation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissionEval {
    pub alert: AlertLevel,
    pub outcome: MissionOutcome,
}

/// Evaluate alert and outcome for this tick.
///
/// `ever_alerted` is the engine's latch that the mission has at some point
/// held a hostile-classified tracker; victory through dropping trackers is
/// only reachable after the threat was actually recognized.
pub fn evaluate(
    world: &World,
    trackers: &TrackerTable,
    engagements: &BTreeMap<u32, EngagementState>,
    ownship_destroyed: bool,
    ever_alerted: bool,
) -> MissionEval {
    if ownship_destroyed {
        return MissionEval {
            alert: AlertLevel::Engaged,
            outcome: MissionOutcome::Defeat,
        };
    }

    let hostile_tracker = trackers.iter().any(|t| {
        t.classification != Classification::Unknown
            && trackers
                .linked_contact(t.id)
                .and_then(|cid| contact_hostile(world, cid))
                .unwrap_or(false)
    });

    let weapon_hot = engagements
        .values()
        .any(|e| matches!(e.phase, EngagementPhase::Locked | EngagementPhase::Fired));

    let alert = if !hostile_tracker {
        AlertLevel::Normal
    } else if weapon_hot {
        AlertLevel::Engaged
    } else {
        AlertLevel::Alert
    };

    // Victory: alert back to Normal (no hostile-classified entity remains)
    // after the threat was recognized at least once. Open-ended training
    // scenarios with no hostiles never terminate on their own.
    let victory = ever_alerted && alert == AlertLevel::Normal;

    MissionEval {
        alert,
        outcome: if victory {
            MissionOutcome::Victory
        } else {
            MissionOutcome::InProgress
        },
    }
}

fn contact_hostile(world: &World, contact_id: u32) -> Option<bool> {
    let mut q = world.query::<(&Contact, &ContactMeta)>();
    q.iter()
        .find(|(_, (_, meta))| meta.contact_id == contact_id)
        .map(|(_, (_, meta))| meta.hostile)
}
